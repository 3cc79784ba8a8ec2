//! Core trait for queueable items.

/// An item carrying a priority score.
///
/// Scores are `f64` where **lower is higher priority**. The score must be
/// finite and must not change while the item sits in a [`MinHeap`]
/// (a mutated score silently breaks the heap property).
///
/// [`MinHeap`]: crate::queue::MinHeap
pub trait Prioritized {
    /// Returns the priority score of this item. Lower is extracted first.
    fn priority(&self) -> f64;
}

/// Bare scores are queueable directly; used by tests and benchmarks.
impl Prioritized for f64 {
    fn priority(&self) -> f64 {
        *self
    }
}
