//! Priority-driven hostel room allocation.
//!
//! Assigns dormitory rooms to students from a pool of applications,
//! prioritizing by a computed score and greedily satisfying room
//! preferences subject to capacity:
//!
//! - **Queue** (`queue`): binary min-heap keyed by priority score,
//!   generic over any [`queue::Prioritized`] item.
//! - **Scoring** (`scoring`): the closed special-priority category set
//!   and the score formula combining category, GPA, and waiting time.
//! - **Inventory** (`inventory`): rooms with capacity/occupancy tracking
//!   and occupancy snapshots for reversal.
//! - **Engine** (`engine`): application intake, the one-pass greedy
//!   assignment loop, batch summaries, and batch reversal.
//!
//! # Architecture
//!
//! This crate is the allocation core only. Presentation concerns (forms,
//! rendering, navigation) belong to a collaborator layer that feeds
//! applications and room seed data in and consumes allocation records
//! out. Lower score means higher priority throughout, so a favorable
//! category or an earlier submission pushes a student toward the front
//! of the queue.

pub mod engine;
pub mod error;
pub mod inventory;
pub mod queue;
pub mod scoring;

pub use error::{Error, Result};
