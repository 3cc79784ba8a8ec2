//! Crate-wide error taxonomy.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by intake, scoring, inventory, and engine operations.
///
/// The inventory-misuse variants (`CapacityExceeded`, `RoomNotFound`,
/// `InvalidRelease`) cannot be triggered through the normal allocation
/// flow, which always checks availability before assigning. Seeing one
/// escape [`AllocationEngine::run`](crate::engine::AllocationEngine::run)
/// indicates a logic bug, not bad input.
#[derive(Debug, Error)]
pub enum Error {
    /// Intake or seed data failed validation; nothing was queued or built.
    #[error("invalid application data: {0}")]
    Validation(String),

    /// A special-priority label outside the fixed category set.
    #[error("unknown special-priority category: {0:?}")]
    InvalidCategory(String),

    /// An allocation run was requested with no queued applications.
    #[error("no applications queued for allocation")]
    EmptyQueue,

    /// Assignment requested on a room that is already at capacity.
    #[error("room {room_id} is already at capacity")]
    CapacityExceeded { room_id: String },

    /// The referenced room id does not exist in the inventory.
    #[error("room {room_id} not found in inventory")]
    RoomNotFound { room_id: String },

    /// Release requested on a room with no occupants.
    #[error("room {room_id} has no occupants to release")]
    InvalidRelease { room_id: String },

    /// The engine is still marked as running a batch.
    #[error("an allocation run is already in progress")]
    RunInProgress,

    /// Reversal requested but no batch has been run.
    #[error("no allocation batch to reverse")]
    NoCompletedRun,
}
