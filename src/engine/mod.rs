//! Greedy room allocation over the priority queue.
//!
//! [`AllocationEngine`] ties the crate together. Applications enter
//! through [`ApplicationForm`] and [`AllocationEngine::submit`]; a run
//! drains the queue in priority order and assigns rooms preference-first
//! with a fallback to any open room. A finished batch can be reversed
//! back to the occupancy captured at run start.
//!
//! The pass is a one-shot greedy heuristic. It promises nothing about
//! global optimality: a high-priority student may claim a room that would
//! have been a first-choice match for someone later in the queue.

mod application;
mod runner;
mod types;

pub use application::{Application, ApplicationForm, MAX_PREFERENCES};
pub use runner::AllocationEngine;
pub use types::{AllocationRecord, AllocationSummary, EngineState, Progress};
