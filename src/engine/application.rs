//! Student applications and the intake form.

use crate::error::{Error, Result};
use crate::queue::Prioritized;
use crate::scoring::{EpochMillis, PriorityScorer, SpecialPriority};

/// Maximum number of ranked room preferences an applicant may state.
pub const MAX_PREFERENCES: usize = 3;

/// Intake form for one student application.
///
/// Construct with the required fields, then chain the optional ones.
/// Validation happens at submission, not construction.
///
/// # Examples
///
/// ```ignore
/// let form = ApplicationForm::new("Mina Park", "S-1001", 3.8, SpecialPriority::Medical)
///     .with_preferences(vec!["A101".into(), "A102".into()]);
/// ```
#[derive(Debug, Clone)]
pub struct ApplicationForm {
    name: String,
    student_id: String,
    gpa: f64,
    category: SpecialPriority,
    preferences: Vec<String>,
    submitted_at: Option<EpochMillis>,
}

impl ApplicationForm {
    pub fn new(
        name: impl Into<String>,
        student_id: impl Into<String>,
        gpa: f64,
        category: SpecialPriority,
    ) -> Self {
        Self {
            name: name.into(),
            student_id: student_id.into(),
            gpa,
            category,
            preferences: Vec::new(),
            submitted_at: None,
        }
    }

    /// Ranked room choices, most-wanted first. At most [`MAX_PREFERENCES`].
    pub fn with_preferences(mut self, preferences: Vec<String>) -> Self {
        self.preferences = preferences;
        self
    }

    /// Overrides the submission timestamp. When absent, the `now` passed to
    /// the submitting call is used.
    pub fn with_submitted_at(mut self, at: EpochMillis) -> Self {
        self.submitted_at = Some(at);
        self
    }

    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation("name must not be empty".into()));
        }
        if self.student_id.trim().is_empty() {
            return Err(Error::Validation("student id must not be empty".into()));
        }
        if !self.gpa.is_finite() {
            return Err(Error::Validation(format!(
                "gpa must be a finite number, got {}",
                self.gpa
            )));
        }
        if self.preferences.len() > MAX_PREFERENCES {
            return Err(Error::Validation(format!(
                "at most {MAX_PREFERENCES} room preferences allowed, got {}",
                self.preferences.len()
            )));
        }
        if self.preferences.iter().any(|p| p.trim().is_empty()) {
            return Err(Error::Validation(
                "preference room ids must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// A validated, scored student application.
///
/// The score inputs are frozen at construction, so the stored priority
/// score can never drift from them. The allocation mark is the only
/// mutable part, and only the engine touches it.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Application {
    name: String,
    student_id: String,
    gpa: f64,
    category: SpecialPriority,
    preferences: Vec<String>,
    submitted_at: EpochMillis,
    priority_score: f64,
    allocated_room: Option<String>,
}

impl Application {
    /// Validates the form and scores it against `now`.
    ///
    /// A form without an explicit submission timestamp is stamped with
    /// `now` (zero waiting-time bonus).
    pub fn from_form(form: ApplicationForm, scorer: &PriorityScorer, now: EpochMillis) -> Result<Self> {
        form.validate()?;
        let submitted_at = form.submitted_at.unwrap_or(now);
        let priority_score = scorer.score(form.gpa, form.category, submitted_at, now);
        Ok(Self {
            name: form.name,
            student_id: form.student_id,
            gpa: form.gpa,
            category: form.category,
            preferences: form.preferences,
            submitted_at,
            priority_score,
            allocated_room: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn student_id(&self) -> &str {
        &self.student_id
    }

    pub fn gpa(&self) -> f64 {
        self.gpa
    }

    pub fn category(&self) -> SpecialPriority {
        self.category
    }

    /// Ranked room choices, most-wanted first.
    pub fn preferences(&self) -> &[String] {
        &self.preferences
    }

    pub fn submitted_at(&self) -> EpochMillis {
        self.submitted_at
    }

    /// The score this application is queued under. Lower is served first.
    pub fn priority_score(&self) -> f64 {
        self.priority_score
    }

    /// Whether a room has been assigned.
    pub fn allocated(&self) -> bool {
        self.allocated_room.is_some()
    }

    /// Id of the assigned room, if any.
    pub fn allocated_room(&self) -> Option<&str> {
        self.allocated_room.as_deref()
    }

    pub(crate) fn mark_allocated(&mut self, room_id: &str) {
        self.allocated_room = Some(room_id.to_string());
    }

    pub(crate) fn clear_allocation(&mut self) {
        self.allocated_room = None;
    }
}

impl Prioritized for Application {
    fn priority(&self) -> f64 {
        self.priority_score
    }
}
