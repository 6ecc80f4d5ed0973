//! Custom actions for the Order actor.
//!
//! Operations on an [`Order`](crate::model::Order) beyond plain CRUD, handled
//! by [`ActorEntity::handle_action`](crate::framework::ActorEntity::handle_action).

use crate::model::DriverAssignment;

/// Custom actions for Order entities.
#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Hands the order to a registered driver. A pending order becomes accepted.
    ///
    /// # Errors
    /// Fails if the driver is unknown or the order is already terminal.
    AssignDriver(DriverAssignment),
    /// Removes the current driver, if any.
    Unassign,
}
