//! Min-heap priority queue over scored items.
//!
//! The queue is generic: anything implementing [`Prioritized`] can be
//! queued, with **lower scores extracted first** (the minimization
//! convention used throughout this crate). Student applications are the
//! only production item type; tests plug in their own.
//!
//! # Tie order
//!
//! Items with equal priority come out in heap-structural order, which
//! depends on the insertion sequence and is NOT stable by arrival. Callers
//! that need a total order must impose a distinct score per item.

mod heap;
mod types;

pub use heap::MinHeap;
pub use types::Prioritized;
