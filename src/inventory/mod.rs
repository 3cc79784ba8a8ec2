//! Room inventory: capacity and occupancy tracking.
//!
//! The inventory is seeded once per session from collaborator-supplied
//! room data and mutated only through [`RoomInventory::assign`] /
//! [`RoomInventory::release`] (plus snapshot restore). Iteration order is
//! seed order, which also defines the fallback order for auto-assignment:
//! a student whose preferences are all unavailable takes the FIRST open
//! room in seed order.
//!
//! Display metadata (features, floor, building) passes through untouched;
//! allocation reads only capacity and occupancy.

mod room;
mod store;

pub use room::{Room, RoomType};
pub use store::{OccupancySnapshot, RoomInventory};
