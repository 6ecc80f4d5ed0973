//! Pure data structures: geometry, orders, drivers and location updates.

pub mod driver;
pub mod geo;
pub mod location;
pub mod order;

pub use driver::*;
pub use geo::*;
pub use location::*;
pub use order::*;
