//! The allocation loop: intake, queue drain, preference matching, reversal.

use super::application::{Application, ApplicationForm};
use super::types::{AllocationRecord, AllocationSummary, EngineState, Progress};
use crate::error::{Error, Result};
use crate::inventory::{OccupancySnapshot, RoomInventory};
use crate::queue::MinHeap;
use crate::scoring::{EpochMillis, PriorityScorer};
use tracing::{debug, info};

/// Drains the priority queue and assigns rooms greedily.
///
/// The engine owns the queue, the inventory, and the current allocation
/// batch; nothing else mutates them. A run processes students strictly in
/// score order, one at a time: each student's room claim is settled before
/// the next student is looked at, so an earlier student can take a room a
/// later one wanted. There is no backtracking and no revisiting.
///
/// # Examples
///
/// ```
/// use hostel_alloc::engine::{AllocationEngine, ApplicationForm};
/// use hostel_alloc::inventory::{Room, RoomInventory, RoomType};
/// use hostel_alloc::scoring::SpecialPriority;
///
/// # fn main() -> hostel_alloc::Result<()> {
/// let inventory = RoomInventory::from_rooms(vec![
///     Room::new("A101", RoomType::Single, 1),
///     Room::new("A102", RoomType::Double, 2),
/// ])?;
/// let mut engine = AllocationEngine::new(inventory);
///
/// let now = 1_704_067_200_000;
/// engine.submit(
///     ApplicationForm::new("Mina Park", "S-1001", 3.8, SpecialPriority::Medical)
///         .with_preferences(vec!["A101".into()]),
///     now,
/// )?;
///
/// let summary = engine.run()?;
/// assert_eq!(summary.total_allocated, 1);
/// assert_eq!(summary.preference_matches, 1);
/// # Ok(())
/// # }
/// ```
pub struct AllocationEngine {
    queue: MinHeap<Application>,
    inventory: RoomInventory,
    scorer: PriorityScorer,
    batch: Vec<AllocationRecord>,
    pre_run: Option<OccupancySnapshot>,
    state: EngineState,
}

impl AllocationEngine {
    /// Creates an engine over the given inventory with an empty queue.
    pub fn new(inventory: RoomInventory) -> Self {
        Self::with_queue(inventory, MinHeap::new())
    }

    /// Creates an engine over a pre-filled queue.
    pub fn with_queue(inventory: RoomInventory, queue: MinHeap<Application>) -> Self {
        Self {
            queue,
            inventory,
            scorer: PriorityScorer::default(),
            batch: Vec::new(),
            pre_run: None,
            state: EngineState::Idle,
        }
    }

    /// Replaces the default scorer used at intake.
    pub fn with_scorer(mut self, scorer: PriorityScorer) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Applications waiting to be processed, in heap-internal order.
    pub fn queue(&self) -> &MinHeap<Application> {
        &self.queue
    }

    pub fn inventory(&self) -> &RoomInventory {
        &self.inventory
    }

    /// The current batch, in processing order. Empty until a run happens.
    pub fn records(&self) -> &[AllocationRecord] {
        &self.batch
    }

    /// Aggregates over the current batch.
    pub fn summary(&self) -> AllocationSummary {
        AllocationSummary::from_records(&self.batch)
    }

    /// Records of students processed but left without a room.
    pub fn waitlisted(&self) -> impl Iterator<Item = &AllocationRecord> {
        self.batch.iter().filter(|r| !r.allocated)
    }

    /// Validates, scores, and enqueues one application.
    ///
    /// `now` is the scoring reference time; a form without an explicit
    /// submission timestamp is stamped with it. Returns the computed
    /// priority score.
    pub fn submit(&mut self, form: ApplicationForm, now: EpochMillis) -> Result<f64> {
        if self.state == EngineState::Running {
            return Err(Error::RunInProgress);
        }
        let application = Application::from_form(form, &self.scorer, now)?;
        let score = application.priority_score();
        debug!(student = %application.name(), score, "application queued");
        self.queue.insert(application);
        Ok(score)
    }

    /// Runs one allocation pass over the whole queue.
    pub fn run(&mut self) -> Result<AllocationSummary> {
        self.run_with_progress(|_| {})
    }

    /// Runs one allocation pass, notifying the observer after each student.
    ///
    /// The observer is called synchronously and has no effect on ordering
    /// or outcomes. Fails with [`Error::EmptyQueue`] when there is nothing
    /// to process; the previous batch is untouched in that case.
    pub fn run_with_progress<F>(&mut self, mut observer: F) -> Result<AllocationSummary>
    where
        F: FnMut(Progress),
    {
        if self.state == EngineState::Running {
            return Err(Error::RunInProgress);
        }
        if self.queue.is_empty() {
            return Err(Error::EmptyQueue);
        }

        // The snapshot must predate any occupancy change: reversal after an
        // aborted run rolls back to exactly this state.
        self.pre_run = Some(self.inventory.snapshot());
        self.batch.clear();
        self.state = EngineState::Running;

        let total = self.queue.len();
        while let Some(mut student) = self.queue.extract_min() {
            let (room_id, preference_rank) = self.place(&student)?;
            if let Some(ref id) = room_id {
                student.mark_allocated(id);
            }
            debug!(
                student = %student.name(),
                room = room_id.as_deref().unwrap_or("-"),
                preference_rank,
                "student processed"
            );

            let student_name = student.name().to_string();
            self.batch.push(AllocationRecord {
                allocated: room_id.is_some(),
                room_id,
                preference_rank,
                student,
            });
            observer(Progress {
                student_name,
                processed: self.batch.len(),
                total,
            });
        }

        self.state = EngineState::Completed;
        let summary = AllocationSummary::from_records(&self.batch);
        info!(
            processed = summary.total_processed,
            allocated = summary.total_allocated,
            waitlisted = summary.total_waitlisted,
            preference_matches = summary.preference_matches,
            success_rate = summary.success_rate_percent,
            "allocation run completed"
        );
        Ok(summary)
    }

    /// Picks a room for one student: stated preferences in order, then any
    /// open room in inventory seed order. Returns the assigned room id and
    /// the 1-based preference rank (0 for auto-assignment or waitlist).
    fn place(&mut self, student: &Application) -> Result<(Option<String>, usize)> {
        for (index, preference) in student.preferences().iter().enumerate() {
            // Unknown ids fall through like full rooms.
            if self.inventory.find_available(preference).is_some() {
                self.inventory.assign(preference)?;
                return Ok((Some(preference.clone()), index + 1));
            }
        }
        if let Some(room_id) = self.inventory.find_any_available().map(|r| r.id().to_string()) {
            self.inventory.assign(&room_id)?;
            return Ok((Some(room_id), 0));
        }
        Ok((None, 0))
    }

    /// Undoes the current batch.
    ///
    /// Restores the occupancy captured at run start, re-inserts every
    /// processed student into the queue with score unchanged and
    /// allocation mark cleared, and returns the engine to idle. Also
    /// accepts the running state, which is the recovery path after a run
    /// aborted on an internal error.
    pub fn reverse(&mut self) -> Result<()> {
        match self.state {
            EngineState::Completed | EngineState::Running => {}
            EngineState::Idle => return Err(Error::NoCompletedRun),
        }

        if let Some(snapshot) = self.pre_run.take() {
            self.inventory.restore(&snapshot);
        }

        let batch = std::mem::take(&mut self.batch);
        let requeued = batch.len();
        for record in batch {
            let mut student = record.student;
            student.clear_allocation();
            self.queue.insert(student);
        }

        self.state = EngineState::Idle;
        info!(requeued, "allocation batch reversed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::{Room, RoomType};
    use crate::scoring::SpecialPriority;

    const NOW: EpochMillis = 1_704_067_200_000;

    fn inventory() -> RoomInventory {
        RoomInventory::from_rooms(vec![
            Room::new("A101", RoomType::Single, 1),
            Room::new("A102", RoomType::Double, 2),
            Room::new("B201", RoomType::Double, 2),
        ])
        .unwrap()
    }

    fn full_inventory() -> RoomInventory {
        RoomInventory::from_rooms(vec![
            Room::new("A101", RoomType::Single, 1).with_occupied(1),
            Room::new("A102", RoomType::Double, 2).with_occupied(2),
        ])
        .unwrap()
    }

    fn submit(
        engine: &mut AllocationEngine,
        name: &str,
        gpa: f64,
        category: SpecialPriority,
        prefs: &[&str],
    ) -> f64 {
        let form = ApplicationForm::new(name, format!("S-{name}"), gpa, category)
            .with_preferences(prefs.iter().map(|p| p.to_string()).collect());
        engine.submit(form, NOW).unwrap()
    }

    // All test students submit at NOW, so the waiting-time bonus is zero
    // and scores are easy to predict: None 4.0 -> 600, None 3.0 -> 700,
    // None 2.0 -> 800, Medical 3.0 -> 200.

    #[test]
    fn test_submit_returns_score_and_queues() {
        let mut engine = AllocationEngine::new(inventory());
        let score = submit(&mut engine, "amy", 4.0, SpecialPriority::None, &[]);

        assert_eq!(score, 600.0);
        assert_eq!(engine.queue().len(), 1);
        assert_eq!(engine.state(), EngineState::Idle);
    }

    #[test]
    fn test_submit_rejects_invalid_form() {
        let mut engine = AllocationEngine::new(inventory());
        let form = ApplicationForm::new("", "S-1", 3.0, SpecialPriority::None);
        let err = engine.submit(form, NOW).unwrap_err();

        assert!(matches!(err, Error::Validation(_)));
        assert!(engine.queue().is_empty());
    }

    #[test]
    fn test_run_on_empty_queue_fails() {
        let mut engine = AllocationEngine::new(inventory());
        let err = engine.run().unwrap_err();

        assert!(matches!(err, Error::EmptyQueue));
        assert_eq!(engine.state(), EngineState::Idle);
    }

    #[test]
    fn test_first_preference_match() {
        let mut engine = AllocationEngine::new(inventory());
        submit(&mut engine, "amy", 4.0, SpecialPriority::None, &["A101"]);

        let summary = engine.run().unwrap();

        assert_eq!(summary.total_allocated, 1);
        assert_eq!(summary.preference_matches, 1);
        assert_eq!(engine.state(), EngineState::Completed);

        let record = &engine.records()[0];
        assert!(record.allocated);
        assert_eq!(record.room_id.as_deref(), Some("A101"));
        assert_eq!(record.preference_rank, 1);
        assert_eq!(record.student.allocated_room(), Some("A101"));
        assert_eq!(engine.inventory().get("A101").unwrap().occupied(), 1);
    }

    #[test]
    fn test_falls_to_second_preference_when_first_full() {
        let rooms = RoomInventory::from_rooms(vec![
            Room::new("A101", RoomType::Single, 1).with_occupied(1),
            Room::new("A102", RoomType::Double, 2),
        ])
        .unwrap();
        let mut engine = AllocationEngine::new(rooms);
        submit(&mut engine, "amy", 4.0, SpecialPriority::None, &["A101", "A102"]);

        engine.run().unwrap();

        let record = &engine.records()[0];
        assert_eq!(record.room_id.as_deref(), Some("A102"));
        assert_eq!(record.preference_rank, 2);
    }

    #[test]
    fn test_auto_assignment_walks_seed_order() {
        let rooms = RoomInventory::from_rooms(vec![
            Room::new("A101", RoomType::Single, 1),
            Room::new("A102", RoomType::Double, 2),
            Room::new("B201", RoomType::Double, 2).with_occupied(2),
        ])
        .unwrap();
        let mut engine = AllocationEngine::new(rooms);
        submit(&mut engine, "amy", 4.0, SpecialPriority::None, &["B201"]);

        engine.run().unwrap();

        // Preference is full, so the first open room in seed order wins.
        let record = &engine.records()[0];
        assert_eq!(record.room_id.as_deref(), Some("A101"));
        assert_eq!(record.preference_rank, 0);
    }

    #[test]
    fn test_unknown_preference_id_is_skipped() {
        let mut engine = AllocationEngine::new(inventory());
        submit(&mut engine, "amy", 4.0, SpecialPriority::None, &["Z999"]);

        engine.run().unwrap();

        let record = &engine.records()[0];
        assert!(record.allocated);
        assert_eq!(record.room_id.as_deref(), Some("A101"));
        assert_eq!(record.preference_rank, 0);
    }

    #[test]
    fn test_waitlisted_when_inventory_full() {
        let mut engine = AllocationEngine::new(full_inventory());
        submit(&mut engine, "amy", 4.0, SpecialPriority::None, &["A101"]);

        let summary = engine.run().unwrap();

        assert_eq!(summary.total_allocated, 0);
        assert_eq!(summary.total_waitlisted, 1);
        assert_eq!(summary.success_rate_percent, 0);

        let record = &engine.records()[0];
        assert!(!record.allocated);
        assert_eq!(record.room_id, None);
        assert_eq!(record.preference_rank, 0);
        assert!(!record.student.allocated());
        assert_eq!(engine.inventory().total_occupied(), 3); // untouched
    }

    #[test]
    fn test_processing_follows_score_order() {
        let mut engine = AllocationEngine::new(inventory());
        submit(&mut engine, "ben", 3.0, SpecialPriority::None, &[]);
        submit(&mut engine, "amy", 4.0, SpecialPriority::None, &[]);
        submit(&mut engine, "dia", 3.0, SpecialPriority::Medical, &[]);

        engine.run().unwrap();

        let order: Vec<&str> = engine.records().iter().map(|r| r.student.name()).collect();
        assert_eq!(order, vec!["dia", "amy", "ben"]); // 200, 600, 700
    }

    #[test]
    fn test_earlier_student_claims_contested_room() {
        let mut engine = AllocationEngine::new(inventory());
        submit(&mut engine, "ben", 3.0, SpecialPriority::None, &["A101"]);
        submit(&mut engine, "dia", 3.0, SpecialPriority::Medical, &["A101"]);

        engine.run().unwrap();

        let records = engine.records();
        assert_eq!(records[0].student.name(), "dia");
        assert_eq!(records[0].room_id.as_deref(), Some("A101"));
        assert_eq!(records[0].preference_rank, 1);

        // ben wanted A101 too but arrives second in score order and gets
        // auto-assigned elsewhere. No revisiting.
        assert_eq!(records[1].student.name(), "ben");
        assert_eq!(records[1].room_id.as_deref(), Some("A102"));
        assert_eq!(records[1].preference_rank, 0);
    }

    #[test]
    fn test_progress_notifications() {
        let mut engine = AllocationEngine::new(inventory());
        submit(&mut engine, "ben", 3.0, SpecialPriority::None, &[]);
        submit(&mut engine, "amy", 4.0, SpecialPriority::None, &[]);
        submit(&mut engine, "dia", 3.0, SpecialPriority::Medical, &[]);

        let mut seen = Vec::new();
        engine
            .run_with_progress(|p| seen.push((p.student_name.clone(), p.processed, p.total)))
            .unwrap();

        assert_eq!(
            seen,
            vec![
                ("dia".to_string(), 1, 3),
                ("amy".to_string(), 2, 3),
                ("ben".to_string(), 3, 3),
            ]
        );
    }

    #[test]
    fn test_summary_and_waitlist_access() {
        let rooms = RoomInventory::from_rooms(vec![
            Room::new("A101", RoomType::Single, 1),
            Room::new("A102", RoomType::Single, 1),
        ])
        .unwrap();
        let mut engine = AllocationEngine::new(rooms);
        submit(&mut engine, "dia", 3.0, SpecialPriority::Medical, &["A101"]);
        submit(&mut engine, "amy", 4.0, SpecialPriority::None, &["A101"]);
        submit(&mut engine, "ben", 3.0, SpecialPriority::None, &[]);

        let summary = engine.run().unwrap();

        assert_eq!(summary.total_processed, 3);
        assert_eq!(summary.total_allocated, 2);
        assert_eq!(summary.total_waitlisted, 1);
        assert_eq!(summary.preference_matches, 1);
        assert_eq!(summary.success_rate_percent, 67);
        assert_eq!(engine.summary(), summary);

        let waitlist: Vec<&str> = engine.waitlisted().map(|r| r.student.name()).collect();
        assert_eq!(waitlist, vec!["ben"]);
    }

    #[test]
    fn test_reverse_restores_and_requeues() {
        let mut engine = AllocationEngine::new(inventory());
        submit(&mut engine, "dia", 3.0, SpecialPriority::Medical, &["A101"]);
        submit(&mut engine, "amy", 4.0, SpecialPriority::None, &["A102"]);

        engine.run().unwrap();
        let first: Vec<(String, Option<String>, usize)> = engine
            .records()
            .iter()
            .map(|r| (r.student.name().to_string(), r.room_id.clone(), r.preference_rank))
            .collect();

        engine.reverse().unwrap();

        assert_eq!(engine.state(), EngineState::Idle);
        assert!(engine.records().is_empty());
        assert_eq!(engine.queue().len(), 2);
        assert_eq!(engine.inventory().total_occupied(), 0);
        assert!(engine.queue().as_slice().iter().all(|s| !s.allocated()));

        // Same inputs, same batch: scores are distinct, so the drain
        // order is fully determined.
        engine.run().unwrap();
        let second: Vec<(String, Option<String>, usize)> = engine
            .records()
            .iter()
            .map(|r| (r.student.name().to_string(), r.room_id.clone(), r.preference_rank))
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_reverse_with_nothing_to_undo_fails() {
        let mut engine = AllocationEngine::new(inventory());
        let err = engine.reverse().unwrap_err();
        assert!(matches!(err, Error::NoCompletedRun));
    }

    #[test]
    fn test_rerun_stacks_on_current_occupancy() {
        let rooms = RoomInventory::from_rooms(vec![
            Room::new("A101", RoomType::Single, 1),
            Room::new("A102", RoomType::Single, 1),
        ])
        .unwrap();
        let mut engine = AllocationEngine::new(rooms);

        submit(&mut engine, "amy", 4.0, SpecialPriority::None, &["A101"]);
        engine.run().unwrap();
        assert_eq!(engine.inventory().get("A101").unwrap().occupied(), 1);

        // A later intake round runs on top of the occupancy the first
        // round produced.
        submit(&mut engine, "ben", 3.0, SpecialPriority::None, &["A101"]);
        engine.run().unwrap();

        let record = &engine.records()[0];
        assert_eq!(record.student.name(), "ben");
        assert_eq!(record.room_id.as_deref(), Some("A102"));
        assert_eq!(record.preference_rank, 0);

        // Reversal returns to the state before the SECOND run, not to an
        // empty building.
        engine.reverse().unwrap();
        assert_eq!(engine.inventory().get("A101").unwrap().occupied(), 1);
        assert_eq!(engine.inventory().get("A102").unwrap().occupied(), 0);
        assert_eq!(engine.queue().len(), 1);
    }

    #[test]
    fn test_second_run_needs_new_submissions() {
        let mut engine = AllocationEngine::new(inventory());
        submit(&mut engine, "amy", 4.0, SpecialPriority::None, &[]);
        engine.run().unwrap();

        let err = engine.run().unwrap_err();
        assert!(matches!(err, Error::EmptyQueue));

        // The failed attempt leaves the completed batch alone.
        assert_eq!(engine.state(), EngineState::Completed);
        assert_eq!(engine.records().len(), 1);
    }
}
