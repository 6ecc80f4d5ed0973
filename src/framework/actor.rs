//! # Generic Actor Server
//!
//! [`ResourceActor`] owns the entity store for one resource type and handles
//! its requests one at a time on a single Tokio task.

use crate::framework::client::ResourceClient;
use crate::framework::entity::ActorEntity;
use crate::framework::error::FrameworkError;
use crate::framework::message::ResourceRequest;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of entities.
///
/// This is the "server" half: it owns the `store` and the receiving end of
/// the channel. Requests are processed sequentially, so the store needs no
/// lock. Several actors (orders, drivers) run in parallel on their own tasks.
///
/// # Usage Pattern
///
/// 1. **Create**: `ResourceActor::new()` returns the actor and its client.
/// 2. **Wire**: pass dependencies (other clients) into `actor.run(context)`.
/// 3. **Run**: spawn the run loop on a background task.
///
/// ```rust,ignore
/// let (actor, client) = ResourceActor::<Driver>::new(32, next_driver_id);
/// tokio::spawn(actor.run(()));
/// let id = client.create(params).await?;
/// ```
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the mailbox capacity; clients wait when it is full.
    /// `next_id_fn` generates ids for creates that do not request one.
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until the channel closes.
    ///
    /// # Context Injection
    /// `context` is handed to every entity hook. It is supplied here rather
    /// than in `new()` so that actors can depend on clients created later.
    pub async fn run(mut self, context: T::Context) {
        // Just the type name, e.g. "Order" instead of "dakar_tracking::model::order::Order"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = T::requested_id(&params).unwrap_or_else(|| (self.next_id_fn)());

                    if self.store.contains_key(&id) {
                        warn!(entity_type, %id, "Already exists");
                        let _ = respond_to.send(Err(FrameworkError::AlreadyExists(id.to_string())));
                        continue;
                    }

                    match T::from_create_params(id.clone(), params) {
                        Ok(mut item) => {
                            if let Err(e) = item.on_create(&context).await {
                                warn!(entity_type, %id, error = %e, "on_create failed");
                                let _ =
                                    respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                                continue;
                            }
                            self.store.insert(id.clone(), item);
                            info!(entity_type, %id, size = self.store.len(), "Created");
                            let _ = respond_to.send(Ok(id));
                        }
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    debug!(entity_type, size = self.store.len(), "List");
                    let _ = respond_to.send(Ok(self.store.values().cloned().collect()));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    if let Some(item) = self.store.get_mut(&id) {
                        if let Err(e) = item.on_update(update, &context).await {
                            warn!(entity_type, %id, error = %e, "Update failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        info!(entity_type, %id, "Updated");
                        let _ = respond_to.send(Ok(item.clone()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    if let Some(item) = self.store.get(&id) {
                        if let Err(e) = item.on_delete(&context).await {
                            warn!(entity_type, %id, error = %e, "on_delete failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        self.store.remove(&id);
                        info!(entity_type, %id, size = self.store.len(), "Deleted");
                        let _ = respond_to.send(Ok(()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    if let Some(item) = self.store.get_mut(&id) {
                        let result = item
                            .handle_action(action, &context)
                            .await
                            .map_err(|e| FrameworkError::EntityError(Box::new(e)));
                        match &result {
                            Ok(_) => info!(entity_type, %id, "Action ok"),
                            Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                        }
                        let _ = respond_to.send(result);
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[derive(Clone, Debug, PartialEq)]
    struct Depot {
        id: String,
        name: String,
        open: bool,
    }

    #[derive(Debug)]
    struct DepotCreate {
        id: Option<String>,
        name: String,
    }

    #[derive(Debug)]
    struct DepotUpdate {
        name: Option<String>,
    }

    #[derive(Debug)]
    enum DepotAction {
        Open,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("depot error: {0}")]
    struct DepotError(String);

    #[async_trait]
    impl ActorEntity for Depot {
        type Id = String;
        type Create = DepotCreate;
        type Update = DepotUpdate;
        type Action = DepotAction;
        type ActionResult = bool;
        type Context = ();
        type Error = DepotError;

        fn requested_id(params: &DepotCreate) -> Option<String> {
            params.id.clone()
        }

        fn from_create_params(id: String, params: DepotCreate) -> Result<Self, DepotError> {
            if params.name.is_empty() {
                return Err(DepotError("empty name".into()));
            }
            Ok(Self {
                id,
                name: params.name,
                open: false,
            })
        }

        async fn on_update(&mut self, update: DepotUpdate, _ctx: &()) -> Result<(), DepotError> {
            if let Some(name) = update.name {
                self.name = name;
            }
            Ok(())
        }

        async fn handle_action(&mut self, action: DepotAction, _ctx: &()) -> Result<bool, DepotError> {
            match action {
                DepotAction::Open => {
                    let changed = !self.open;
                    self.open = true;
                    Ok(changed)
                }
            }
        }
    }

    fn spawn_depots() -> ResourceClient<Depot> {
        let counter = Arc::new(AtomicU32::new(1));
        let next_id = move || format!("depot_{}", counter.fetch_add(1, Ordering::SeqCst));
        let (actor, client) = ResourceActor::new(10, next_id);
        tokio::spawn(actor.run(()));
        client
    }

    #[tokio::test]
    async fn test_resource_actor_lifecycle() {
        let client = spawn_depots();

        let id = client
            .create(DepotCreate { id: None, name: "Yoff".into() })
            .await
            .unwrap();
        assert_eq!(id, "depot_1");

        assert!(client.perform_action(id.clone(), DepotAction::Open).await.unwrap());
        assert!(!client.perform_action(id.clone(), DepotAction::Open).await.unwrap());

        let updated = client
            .update(id.clone(), DepotUpdate { name: Some("Plateau".into()) })
            .await
            .unwrap();
        assert_eq!(updated.name, "Plateau");
        assert!(updated.open);

        assert_eq!(client.list().await.unwrap().len(), 1);

        client.delete(id.clone()).await.unwrap();
        assert!(client.get(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_requested_id_and_duplicates() {
        let client = spawn_depots();

        let id = client
            .create(DepotCreate { id: Some("hub".into()), name: "Hub".into() })
            .await
            .unwrap();
        assert_eq!(id, "hub");

        let dup = client
            .create(DepotCreate { id: Some("hub".into()), name: "Other".into() })
            .await;
        assert!(matches!(dup, Err(FrameworkError::AlreadyExists(ref s)) if s == "hub"));
    }

    #[tokio::test]
    async fn test_entity_errors_are_recoverable() {
        let client = spawn_depots();

        let err = client
            .create(DepotCreate { id: None, name: String::new() })
            .await
            .unwrap_err();
        let inner = err.entity_error::<DepotError>().expect("depot error");
        assert_eq!(inner.0, "empty name");

        let missing = client.update("nope".into(), DepotUpdate { name: None }).await;
        assert!(matches!(missing, Err(FrameworkError::NotFound(_))));
    }
}
