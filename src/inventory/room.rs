//! Room description and occupancy state.

use std::fmt;

/// Occupancy class of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoomType {
    Single,
    Double,
    Triple,
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RoomType::Single => "Single",
            RoomType::Double => "Double",
            RoomType::Triple => "Triple",
        };
        f.write_str(label)
    }
}

/// A hostel room: identity, capacity, current occupancy, and display
/// metadata.
///
/// Occupancy is private and moves only through the inventory's
/// assign/release/restore operations, so `occupied <= capacity` holds for
/// the life of the room (seed data is validated on inventory
/// construction).
///
/// # Examples
///
/// ```
/// use hostel_alloc::inventory::{Room, RoomType};
///
/// let room = Room::new("A101", RoomType::Single, 1)
///     .with_floor(1)
///     .with_building("A")
///     .with_features(["AC", "WiFi", "Study Table"]);
///
/// assert!(room.has_space());
/// assert_eq!(room.remaining(), 1);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Room {
    id: String,
    room_type: RoomType,
    capacity: u32,
    occupied: u32,
    features: Vec<String>,
    floor: u32,
    building: String,
}

impl Room {
    /// Creates an empty room with the given identity and capacity.
    pub fn new(id: impl Into<String>, room_type: RoomType, capacity: u32) -> Self {
        Self {
            id: id.into(),
            room_type,
            capacity,
            occupied: 0,
            features: Vec::new(),
            floor: 0,
            building: String::new(),
        }
    }

    /// Sets the seed occupancy (validated against capacity by
    /// [`RoomInventory::from_rooms`](crate::inventory::RoomInventory::from_rooms)).
    pub fn with_occupied(mut self, occupied: u32) -> Self {
        self.occupied = occupied;
        self
    }

    /// Sets the feature tags (opaque display metadata).
    pub fn with_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features = features.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the floor number (opaque display metadata).
    pub fn with_floor(mut self, floor: u32) -> Self {
        self.floor = floor;
        self
    }

    /// Sets the building name (opaque display metadata).
    pub fn with_building(mut self, building: impl Into<String>) -> Self {
        self.building = building.into();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn room_type(&self) -> RoomType {
        self.room_type
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn occupied(&self) -> u32 {
        self.occupied
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    pub fn floor(&self) -> u32 {
        self.floor
    }

    pub fn building(&self) -> &str {
        &self.building
    }

    /// Whether at least one spot is free.
    pub fn has_space(&self) -> bool {
        self.occupied < self.capacity
    }

    /// Number of free spots.
    pub fn remaining(&self) -> u32 {
        self.capacity - self.occupied
    }

    pub(crate) fn occupy(&mut self) {
        self.occupied += 1;
    }

    pub(crate) fn vacate(&mut self) {
        self.occupied -= 1;
    }

    pub(crate) fn set_occupied(&mut self, occupied: u32) {
        self.occupied = occupied;
    }
}
