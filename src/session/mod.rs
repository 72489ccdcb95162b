//! The quiz session engine: prompts, grading, scoring and navigation over
//! one loaded item set.

mod grader;
mod navigation;
mod prompt;
mod state;

pub use grader::{EmptyAnswerPolicy, FieldResult, Grade, grade, normalize};
pub use navigation::Position;
pub use prompt::{Prompt, capitalize, expected_fields};
pub use state::{AnswerRecord, Answers, Recorded, SessionState, Status};

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::models::{Item, ItemSet};

/// Result of submitting answers for the current item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// First submission for the item; it was graded and scored.
    Graded(Grade),
    /// The item was already answered; this is the stored answer's grade.
    Replay(Grade),
    /// The session is on the results screen.
    NotInSession,
}

/// A practice session over one item set.
pub struct Session {
    state: SessionState,
    rng: StdRng,
    policy: EmptyAnswerPolicy,
}

impl Session {
    pub fn new(items: ItemSet, rng: StdRng, policy: EmptyAnswerPolicy) -> Self {
        info!(items = items.len(), shape = ?items.shape(), ?policy, "session started");
        Self {
            state: SessionState::start(items),
            rng,
            policy,
        }
    }

    /// A session with reproducible directions when a seed is given.
    pub fn with_seed(items: ItemSet, seed: Option<u64>, policy: EmptyAnswerPolicy) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::new(items, rng, policy)
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn items(&self) -> &ItemSet {
        self.state.items()
    }

    pub fn len(&self) -> usize {
        self.state.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    pub fn policy(&self) -> EmptyAnswerPolicy {
        self.policy
    }

    pub fn position(&self) -> Position {
        self.state.position()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.state.current_index()
    }

    pub fn current_item(&self) -> Option<&Item> {
        self.current_index().and_then(|index| self.items().get(index))
    }

    pub fn is_answered(&self, index: usize) -> bool {
        self.state.record(index).is_some()
    }

    /// The prompt for the current item. The direction is rolled on the
    /// first visit and reused afterwards.
    pub fn prompt(&mut self) -> Option<Prompt> {
        let index = self.current_index()?;
        let direction = self.state.direction_for(index, &mut self.rng)?;
        let item = self.state.items().get(index)?;
        Some(Prompt::build(item, direction))
    }

    /// Grade and record answers for the current item. An item already
    /// answered is not graded again.
    pub fn submit(&mut self, answers: Answers) -> Submission {
        let Some(index) = self.current_index() else {
            return Submission::NotInSession;
        };
        if let Some(stored) = self.stored_grade(index) {
            debug!(index, "item already answered, replaying stored grade");
            return Submission::Replay(stored);
        }
        let Some(direction) = self.state.direction_for(index, &mut self.rng) else {
            return Submission::NotInSession;
        };
        let Some(item) = self.state.items().get(index) else {
            return Submission::NotInSession;
        };

        let result = grade(item, direction, &answers, self.policy);
        self.state
            .record_answer(index, direction, answers, result.correct);
        Submission::Graded(result)
    }

    /// Grade of the stored answer for an item, if it has one.
    pub fn stored_grade(&self, index: usize) -> Option<Grade> {
        let record = self.state.record(index)?;
        let item = self.items().get(index)?;
        Some(grade(item, record.direction, &record.values, self.policy))
    }

    pub fn next(&mut self) -> Position {
        self.state.next()
    }

    pub fn previous(&mut self) -> Position {
        self.state.previous()
    }

    pub fn jump_to(&mut self, index: usize) -> Position {
        self.state.jump_to(index)
    }

    pub fn restart(&mut self) -> Position {
        self.state.restart()
    }

    pub fn is_last(&self) -> bool {
        self.state.is_last()
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn score(&self) -> usize {
        self.state.score()
    }

    pub fn percentage_score(&self) -> u32 {
        self.state.percentage_score()
    }

    pub fn statuses(&self) -> &[Status] {
        self.state.statuses()
    }
}
