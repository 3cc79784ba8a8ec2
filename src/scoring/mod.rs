//! Priority scoring for student applications.
//!
//! A student's rank in the allocation queue is a single `f64` score,
//! **lower = higher priority**, combining three signals:
//!
//! - **Special-priority category**: a fixed multiplier on the base
//!   priority (medical cases halve it, see [`SpecialPriority`]).
//! - **GPA**: each grade point subtracts `gpa_weight` from the score.
//! - **Submission age**: each hour since submission subtracts one point,
//!   so earlier applications edge out otherwise-equal later ones.
//!
//! Scores are computed once at intake and frozen; see
//! [`crate::engine::Application`].

mod category;
mod scorer;

pub use category::SpecialPriority;
pub use scorer::{EpochMillis, PriorityScorer, DEFAULT_BASE_PRIORITY, DEFAULT_GPA_WEIGHT};
