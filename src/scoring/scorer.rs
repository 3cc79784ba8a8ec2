//! Priority score computation.

use super::category::SpecialPriority;

/// Milliseconds since the Unix epoch.
pub type EpochMillis = i64;

/// Default base priority before category scaling.
pub const DEFAULT_BASE_PRIORITY: f64 = 1000.0;

/// Default score reduction per GPA point.
pub const DEFAULT_GPA_WEIGHT: f64 = 100.0;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Computes a student's priority score from GPA, category, and
/// submission time.
///
/// ```text
/// score = base_priority * category.multiplier()
///       - gpa * gpa_weight
///       - hours since submission (clamped at zero)
/// ```
///
/// Lower scores are processed first, so a favorable category or a high
/// GPA pulls a student toward the front of the queue, and waiting longer
/// nudges them further forward. The result is rounded to two decimal
/// places.
///
/// # Examples
///
/// ```
/// use hostel_alloc::scoring::{PriorityScorer, SpecialPriority};
///
/// let scorer = PriorityScorer::default();
/// let score = scorer.score(3.8, SpecialPriority::AcademicExcellence, 0, 0);
/// assert_eq!(score, 220.0); // 1000 * 0.6 - 380, no age bonus
/// ```
#[derive(Debug, Clone)]
pub struct PriorityScorer {
    /// Base priority before category scaling.
    pub base_priority: f64,

    /// Score reduction per GPA point.
    pub gpa_weight: f64,
}

impl Default for PriorityScorer {
    fn default() -> Self {
        Self {
            base_priority: DEFAULT_BASE_PRIORITY,
            gpa_weight: DEFAULT_GPA_WEIGHT,
        }
    }
}

impl PriorityScorer {
    /// Creates a scorer with the default weights.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base priority. Must be finite.
    pub fn with_base_priority(mut self, base: f64) -> Self {
        self.base_priority = base;
        self
    }

    /// Sets the per-GPA-point weight. Must be finite.
    pub fn with_gpa_weight(mut self, weight: f64) -> Self {
        self.gpa_weight = weight;
        self
    }

    /// Computes the priority score for one application.
    ///
    /// `submitted_at` and `now` are epoch milliseconds. A submission
    /// timestamp in the future contributes no age bonus.
    pub fn score(
        &self,
        gpa: f64,
        category: SpecialPriority,
        submitted_at: EpochMillis,
        now: EpochMillis,
    ) -> f64 {
        let raw =
            self.base_priority * category.multiplier() - gpa * self.gpa_weight - hours_since(submitted_at, now);
        round2(raw)
    }
}

/// Hours elapsed from `submitted_at` to `now`, never negative.
fn hours_since(submitted_at: EpochMillis, now: EpochMillis) -> f64 {
    ((now - submitted_at) as f64 / MILLIS_PER_HOUR).max(0.0)
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR_MS: EpochMillis = 3_600_000;

    #[test]
    fn test_reference_score() {
        // 1000 * 0.6 - 3.8 * 100 - 0 = 220.00
        let score =
            PriorityScorer::default().score(3.8, SpecialPriority::AcademicExcellence, 1_000, 1_000);
        assert_eq!(score, 220.0);
    }

    #[test]
    fn test_no_category_no_age() {
        let score = PriorityScorer::default().score(3.0, SpecialPriority::None, 0, 0);
        assert_eq!(score, 700.0);
    }

    #[test]
    fn test_each_hour_subtracts_one_point() {
        let scorer = PriorityScorer::default();
        let fresh = scorer.score(3.0, SpecialPriority::None, 0, 0);
        let aged = scorer.score(3.0, SpecialPriority::None, 0, 2 * HOUR_MS);
        assert_eq!(fresh - aged, 2.0);
    }

    #[test]
    fn test_future_timestamp_contributes_nothing() {
        let scorer = PriorityScorer::default();
        let now = 10 * HOUR_MS;
        assert_eq!(
            scorer.score(3.0, SpecialPriority::None, now + 5 * HOUR_MS, now),
            scorer.score(3.0, SpecialPriority::None, now, now),
        );
    }

    #[test]
    fn test_rounds_to_two_decimals() {
        // 444_444 ms = 0.123456... hours; 1000 - 0.123456... = 999.876...
        let score = PriorityScorer::default().score(0.0, SpecialPriority::None, 0, 444_444);
        assert_eq!(score, 999.88);
    }

    #[test]
    fn test_category_ordering_for_equal_students() {
        let scorer = PriorityScorer::default();
        let score_of = |c| scorer.score(3.5, c, 0, 0);

        assert!(score_of(SpecialPriority::Medical) < score_of(SpecialPriority::AcademicExcellence));
        assert!(score_of(SpecialPriority::AcademicExcellence) < score_of(SpecialPriority::Sports));
        assert!(score_of(SpecialPriority::Sports) < score_of(SpecialPriority::FinancialAid));
        assert!(score_of(SpecialPriority::FinancialAid) < score_of(SpecialPriority::None));
    }

    #[test]
    fn test_higher_gpa_scores_lower() {
        let scorer = PriorityScorer::default();
        assert!(
            scorer.score(3.9, SpecialPriority::None, 0, 0)
                < scorer.score(2.8, SpecialPriority::None, 0, 0)
        );
    }

    #[test]
    fn test_custom_weights() {
        let scorer = PriorityScorer::new()
            .with_base_priority(500.0)
            .with_gpa_weight(50.0);
        assert_eq!(scorer.score(2.0, SpecialPriority::None, 0, 0), 400.0);
    }
}
