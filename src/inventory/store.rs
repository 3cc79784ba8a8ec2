//! The room store: lookup, assignment, and occupancy snapshots.

use super::room::Room;
use crate::error::{Error, Result};
use std::collections::HashSet;

/// Opaque capture of every room's occupancy counter.
///
/// Produced by [`RoomInventory::snapshot`] and consumed by
/// [`RoomInventory::restore`]; only meaningful for the inventory it was
/// taken from.
#[derive(Debug, Clone)]
pub struct OccupancySnapshot {
    occupied: Vec<u32>,
}

/// The session's room stock.
///
/// Rooms keep their seed order; [`find_any_available`] walks that order,
/// which makes fallback auto-assignment deterministic. The room set is
/// fixed for the session, only occupancy counters change.
///
/// [`find_any_available`]: RoomInventory::find_any_available
#[derive(Debug, Clone)]
pub struct RoomInventory {
    rooms: Vec<Room>,
}

impl RoomInventory {
    /// Builds an inventory from seed data.
    ///
    /// Rejects duplicate room ids, zero capacities, and seed occupancy
    /// above capacity with [`Error::Validation`].
    pub fn from_rooms(rooms: Vec<Room>) -> Result<Self> {
        let mut seen = HashSet::new();
        for room in &rooms {
            if !seen.insert(room.id().to_string()) {
                return Err(Error::Validation(format!(
                    "duplicate room id {:?}",
                    room.id()
                )));
            }
            if room.capacity() == 0 {
                return Err(Error::Validation(format!(
                    "room {:?} has zero capacity",
                    room.id()
                )));
            }
            if room.occupied() > room.capacity() {
                return Err(Error::Validation(format!(
                    "room {:?} seeded with occupancy {} above capacity {}",
                    room.id(),
                    room.occupied(),
                    room.capacity()
                )));
            }
        }
        Ok(Self { rooms })
    }

    /// All rooms in seed order.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Number of rooms.
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Looks up a room by id.
    pub fn get(&self, room_id: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id() == room_id)
    }

    /// The room, if it exists AND has space.
    pub fn find_available(&self, room_id: &str) -> Option<&Room> {
        self.get(room_id).filter(|r| r.has_space())
    }

    /// First room in seed order with space, if any.
    pub fn find_any_available(&self) -> Option<&Room> {
        self.rooms.iter().find(|r| r.has_space())
    }

    /// Rooms with at least one free spot, in seed order.
    pub fn available_rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter().filter(|r| r.has_space())
    }

    /// Claims one spot in the given room.
    ///
    /// Callers are expected to check availability first; the error paths
    /// here guard against logic bugs, not bad user input.
    pub fn assign(&mut self, room_id: &str) -> Result<()> {
        let room = self
            .rooms
            .iter_mut()
            .find(|r| r.id() == room_id)
            .ok_or_else(|| Error::RoomNotFound {
                room_id: room_id.to_string(),
            })?;
        if !room.has_space() {
            return Err(Error::CapacityExceeded {
                room_id: room_id.to_string(),
            });
        }
        room.occupy();
        Ok(())
    }

    /// Frees one spot in the given room.
    pub fn release(&mut self, room_id: &str) -> Result<()> {
        let room = self
            .rooms
            .iter_mut()
            .find(|r| r.id() == room_id)
            .ok_or_else(|| Error::RoomNotFound {
                room_id: room_id.to_string(),
            })?;
        if room.occupied() == 0 {
            return Err(Error::InvalidRelease {
                room_id: room_id.to_string(),
            });
        }
        room.vacate();
        Ok(())
    }

    /// Captures the current occupancy of every room.
    pub fn snapshot(&self) -> OccupancySnapshot {
        OccupancySnapshot {
            occupied: self.rooms.iter().map(Room::occupied).collect(),
        }
    }

    /// Reinstates a previously captured occupancy state.
    ///
    /// The snapshot must come from this inventory; the room set is fixed
    /// for the session, so the counters line up positionally.
    pub fn restore(&mut self, snapshot: &OccupancySnapshot) {
        debug_assert_eq!(self.rooms.len(), snapshot.occupied.len());
        for (room, &occupied) in self.rooms.iter_mut().zip(&snapshot.occupied) {
            room.set_occupied(occupied);
        }
    }

    /// Total spots across all rooms.
    pub fn total_capacity(&self) -> u32 {
        self.rooms.iter().map(Room::capacity).sum()
    }

    /// Total occupied spots across all rooms.
    pub fn total_occupied(&self) -> u32 {
        self.rooms.iter().map(Room::occupied).sum()
    }

    /// Occupied share of total capacity, rounded to a whole percent.
    /// 0 for an empty inventory.
    pub fn utilization_percent(&self) -> u32 {
        let capacity = self.total_capacity();
        if capacity == 0 {
            return 0;
        }
        (self.total_occupied() as f64 / capacity as f64 * 100.0).round() as u32
    }
}
