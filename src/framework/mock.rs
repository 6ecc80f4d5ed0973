//! # Mock Framework
//!
//! [`MockClient<T>`] hands out a real [`ResourceClient<T>`] whose requests are
//! answered from a queue of expectations instead of a running actor. Use it
//! to test code that sits on top of a client (the order actor's driver
//! check, the tracking service's repository lookups) without spawning the
//! actors it depends on.
//!
//! ```rust,ignore
//! let mut drivers = MockClient::<Driver>::new();
//! drivers.expect_get(DriverId::from("driver001")).return_ok(Some(driver));
//!
//! let client = DriverClient::new(drivers.client());
//! // ... exercise code that calls client.get_driver(..)
//! drivers.verify();
//! ```
//!
//! Expectations are consumed in order. A request that does not match the
//! next expectation (wrong kind or wrong id) panics the mock task, which
//! the caller observes as [`FrameworkError::ActorDropped`].

use crate::framework::client::ResourceClient;
use crate::framework::entity::ActorEntity;
use crate::framework::error::FrameworkError;
use crate::framework::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

enum Expectation<T: ActorEntity> {
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    Create {
        response: Result<T::Id, FrameworkError>,
    },
    List {
        response: Result<Vec<T>, FrameworkError>,
    },
    Update {
        id: T::Id,
        response: Result<T, FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock client with expectation tracking for fluent testing.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = queue.lock().unwrap().pop_front();

                match (request, expectation) {
                    (ResourceRequest::Get { id, respond_to }, Some(Expectation::Get { id: want, response })) => {
                        assert_eq!(id, want, "get called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Create { respond_to, .. }, Some(Expectation::Create { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::List { respond_to }, Some(Expectation::List { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Update { id, respond_to, .. }, Some(Expectation::Update { id: want, response })) => {
                        assert_eq!(id, want, "update called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Action { id, respond_to, .. }, Some(Expectation::Action { id: want, response })) => {
                        assert_eq!(id, want, "action called with unexpected id");
                        let _ = respond_to.send(response);
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    /// Expects a `get` operation.
    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(move |response| Expectation::Get { id, response })
    }

    /// Expects a `create` operation.
    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T::Id> {
        self.builder(|response| Expectation::Create { response })
    }

    /// Expects a `list` operation.
    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(|response| Expectation::List { response })
    }

    /// Expects an `update` operation.
    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        self.builder(move |response| Expectation::Update { id, response })
    }

    /// Expects an `action` operation.
    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        self.builder(move |response| Expectation::Action { id, response })
    }

    /// Number of expectations not yet consumed.
    pub fn pending(&self) -> usize {
        self.expectations.lock().unwrap().len()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = self.pending();
        if remaining != 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }

    fn builder<R>(
        &mut self,
        make: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send + 'static,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            make: Box::new(make),
            expectations: self.expectations.clone(),
        }
    }
}

/// Completes an expectation with the response the mock should send back.
pub struct ExpectationBuilder<T: ActorEntity, R> {
    make: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send>,
    expectations: Queue<T>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, FrameworkError>) {
        let expectation = (self.make)(response);
        self.expectations.lock().unwrap().push_back(expectation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Coordinate, Driver, DriverCreate, DriverId, VehicleKind};

    fn driver() -> Driver {
        Driver {
            id: DriverId::from("driver001"),
            name: "Moussa Sow".into(),
            vehicle: VehicleKind::Scooter,
            route: vec![Coordinate::new(14.7645, -17.3660)],
        }
    }

    #[tokio::test]
    async fn test_mock_client_with_expectations() {
        let mut mock = MockClient::<Driver>::new();
        mock.expect_create().return_ok(DriverId::from("driver001"));
        mock.expect_get(DriverId::from("driver001")).return_ok(Some(driver()));

        let client = mock.client();
        let id = client
            .create(DriverCreate {
                id: None,
                name: "Moussa Sow".into(),
                vehicle: VehicleKind::Scooter,
                route: vec![],
            })
            .await
            .unwrap();
        assert_eq!(id, DriverId::from("driver001"));

        let fetched = client.get(id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Moussa Sow");

        mock.verify();
    }

    #[tokio::test]
    async fn test_mock_client_returns_errors() {
        let mut mock = MockClient::<Driver>::new();
        mock.expect_list().return_err(FrameworkError::ActorClosed);

        let result = mock.client().list().await;
        assert!(matches!(result, Err(FrameworkError::ActorClosed)));
        mock.verify();
    }

    #[tokio::test]
    async fn test_mock_client_mismatch_drops_reply() {
        let mut mock = MockClient::<Driver>::new();
        mock.expect_get(DriverId::from("driver001")).return_ok(None);

        let result = mock.client().get(DriverId::from("driver999")).await;
        assert!(matches!(result, Err(FrameworkError::ActorDropped)));
    }
}
