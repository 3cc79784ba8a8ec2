//! Engine lifecycle, allocation records, and run summaries.

use super::application::Application;

/// Lifecycle of the allocation engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineState {
    /// No batch held. Fresh engine, or the last batch was reversed.
    #[default]
    Idle,

    /// A run is in flight. Not normally observable from outside; the
    /// state persists only when a run aborted on an internal error, and
    /// reversal is the way out.
    Running,

    /// A run finished. Records and summary are available.
    Completed,
}

/// Outcome for one student, in processing order within the batch.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AllocationRecord {
    /// The application as of processing time, allocation mark included.
    pub student: Application,

    /// Whether a room was assigned.
    pub allocated: bool,

    /// Id of the assigned room, if any.
    pub room_id: Option<String>,

    /// 1-based rank of the matched preference; 0 when the room was
    /// auto-assigned or the student was waitlisted.
    pub preference_rank: usize,
}

impl AllocationRecord {
    /// Whether the assigned room was one of the student's stated choices.
    pub fn matched_preference(&self) -> bool {
        self.preference_rank > 0
    }
}

/// Aggregates over one allocation batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AllocationSummary {
    /// Number of students processed.
    pub total_processed: usize,

    /// Number of students who received a room.
    pub total_allocated: usize,

    /// Number of students left without a room.
    pub total_waitlisted: usize,

    /// Allocations that hit one of the student's stated preferences.
    pub preference_matches: usize,

    /// `round(allocated / processed * 100)`; 0 for an empty batch.
    pub success_rate_percent: u32,
}

impl AllocationSummary {
    /// Derives the aggregates from a batch.
    pub fn from_records(records: &[AllocationRecord]) -> Self {
        let total_processed = records.len();
        let total_allocated = records.iter().filter(|r| r.allocated).count();
        let preference_matches = records.iter().filter(|r| r.matched_preference()).count();
        let success_rate_percent = if total_processed == 0 {
            0
        } else {
            (total_allocated as f64 / total_processed as f64 * 100.0).round() as u32
        };
        Self {
            total_processed,
            total_allocated,
            total_waitlisted: total_processed - total_allocated,
            preference_matches,
            success_rate_percent,
        }
    }
}

/// Progress notification emitted after each processed student.
#[derive(Debug, Clone)]
pub struct Progress {
    /// Name of the student just processed.
    pub student_name: String,

    /// Students processed so far, this one included.
    pub processed: usize,

    /// Queue size at run start.
    pub total: usize,
}
