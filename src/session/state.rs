//! Per-session scores and answer history.

use std::collections::BTreeMap;

use rand::Rng;
use tracing::debug;

use super::navigation::Position;
use crate::models::{Direction, Field, ItemSet};

/// Submitted text per answer field.
pub type Answers = BTreeMap<Field, String>;

/// Grading status of one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Unanswered,
    Correct,
    Incorrect,
}

/// The first graded submission for an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRecord {
    pub direction: Direction,
    pub values: Answers,
}

/// Outcome of [`SessionState::record_answer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recorded {
    Stored,
    /// The item already had a record; nothing changed.
    AlreadyAnswered,
    OutOfRange,
}

/// State of one pass over an item set.
///
/// `statuses`, `history` and `directions` always have one entry per item.
#[derive(Debug, Clone)]
pub struct SessionState {
    items: ItemSet,
    pub(super) position: Position,
    score: usize,
    statuses: Vec<Status>,
    history: Vec<Option<AnswerRecord>>,
    directions: Vec<Option<Direction>>,
}

impl SessionState {
    pub fn start(items: ItemSet) -> Self {
        let len = items.len();
        debug!(len, shape = ?items.shape(), "starting session");

        Self {
            items,
            position: Position::InSession(0),
            score: 0,
            statuses: vec![Status::Unanswered; len],
            history: vec![None; len],
            directions: vec![None; len],
        }
    }

    /// Wipe progress and go back to the first item.
    pub fn reset(&mut self) {
        let len = self.items.len();
        self.position = Position::InSession(0);
        self.score = 0;
        self.statuses = vec![Status::Unanswered; len];
        self.history = vec![None; len];
        self.directions = vec![None; len];
    }

    pub fn items(&self) -> &ItemSet {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn statuses(&self) -> &[Status] {
        &self.statuses
    }

    pub fn status(&self, index: usize) -> Status {
        self.statuses.get(index).copied().unwrap_or_default()
    }

    pub fn record(&self, index: usize) -> Option<&AnswerRecord> {
        self.history.get(index).and_then(Option::as_ref)
    }

    /// Store the first answer for an item. Later calls for the same index
    /// change nothing, so an item is scored at most once.
    pub fn record_answer(
        &mut self,
        index: usize,
        direction: Direction,
        values: Answers,
        is_correct: bool,
    ) -> Recorded {
        let Some(slot) = self.history.get_mut(index) else {
            return Recorded::OutOfRange;
        };
        if slot.is_some() {
            return Recorded::AlreadyAnswered;
        }

        *slot = Some(AnswerRecord { direction, values });
        self.directions[index] = Some(direction);
        self.statuses[index] = if is_correct {
            self.score += 1;
            Status::Correct
        } else {
            Status::Incorrect
        };

        debug!(index, is_correct, score = self.score, "recorded answer");
        Recorded::Stored
    }

    /// Score as a rounded percentage of the item count.
    pub fn percentage_score(&self) -> u32 {
        let len = self.items.len();
        if len == 0 {
            return 0;
        }
        (self.score as f64 / len as f64 * 100.0).round() as u32
    }

    /// The direction for an item, rolled once and then fixed.
    pub fn direction_for<R: Rng + ?Sized>(&mut self, index: usize, rng: &mut R) -> Option<Direction> {
        if let Some(record) = self.record(index) {
            return Some(record.direction);
        }
        let slot = self.directions.get_mut(index)?;
        Some(*slot.get_or_insert_with(|| Direction::random(rng)))
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use serde_json::json;

    use super::*;
    use crate::data::item_set_from_value;

    fn verbs(count: usize) -> ItemSet {
        let list: Vec<_> = (0..count)
            .map(|i| json!({"base": format!("verb{i}"), "spanish": format!("verbo{i}")}))
            .collect();
        item_set_from_value(json!(list)).unwrap()
    }

    #[test]
    fn test_start_allocates_parallel_vectors() {
        for count in [1, 2, 17] {
            let state = SessionState::start(verbs(count));

            assert_eq!(state.statuses().len(), count);
            assert!(state.statuses().iter().all(|s| *s == Status::Unanswered));
            assert!((0..count).all(|i| state.record(i).is_none()));
            assert_eq!(state.score(), 0);
            assert_eq!(state.position, Position::InSession(0));
        }
    }

    #[test]
    fn test_record_answer_counts_at_most_once() {
        let mut state = SessionState::start(verbs(3));

        let first = state.record_answer(1, Direction::PromptIsTranslation, Answers::new(), true);
        let second = state.record_answer(1, Direction::PromptIsTranslation, Answers::new(), true);

        assert_eq!(first, Recorded::Stored);
        assert_eq!(second, Recorded::AlreadyAnswered);
        assert_eq!(state.score(), 1);
        assert_eq!(state.status(1), Status::Correct);
    }

    #[test]
    fn test_record_answer_keeps_first_result() {
        let mut state = SessionState::start(verbs(2));

        state.record_answer(0, Direction::PromptIsTargetForm, Answers::new(), false);
        state.record_answer(0, Direction::PromptIsTranslation, Answers::new(), true);

        assert_eq!(state.score(), 0);
        assert_eq!(state.status(0), Status::Incorrect);
        assert_eq!(
            state.record(0).map(|r| r.direction),
            Some(Direction::PromptIsTargetForm)
        );
    }

    #[test]
    fn test_record_answer_out_of_range() {
        let mut state = SessionState::start(verbs(1));
        let recorded = state.record_answer(5, Direction::PromptIsTranslation, Answers::new(), true);

        assert_eq!(recorded, Recorded::OutOfRange);
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_score_is_monotonic_and_bounded() {
        let mut state = SessionState::start(verbs(4));
        let mut last = 0;

        for (index, correct) in [(0, true), (1, false), (0, true), (2, true), (3, true), (2, false)] {
            state.record_answer(index, Direction::PromptIsTranslation, Answers::new(), correct);
            assert!(state.score() >= last);
            assert!(state.score() <= state.len());
            last = state.score();
        }

        let correct = state.statuses().iter().filter(|s| **s == Status::Correct).count();
        assert_eq!(state.score(), correct);
        assert_eq!(state.score(), 3);
    }

    #[test]
    fn test_percentage_score_rounds() {
        let mut state = SessionState::start(verbs(3));
        assert_eq!(state.percentage_score(), 0);

        state.record_answer(0, Direction::PromptIsTranslation, Answers::new(), true);
        assert_eq!(state.percentage_score(), 33);

        state.record_answer(1, Direction::PromptIsTranslation, Answers::new(), true);
        assert_eq!(state.percentage_score(), 67);

        state.record_answer(2, Direction::PromptIsTranslation, Answers::new(), true);
        assert_eq!(state.percentage_score(), 100);
    }

    #[test]
    fn test_direction_is_memoized() {
        let mut state = SessionState::start(verbs(2));
        let mut rng = StdRng::seed_from_u64(3);

        let first = state.direction_for(0, &mut rng).unwrap();
        for _ in 0..20 {
            assert_eq!(state.direction_for(0, &mut rng), Some(first));
        }
        assert_eq!(state.direction_for(9, &mut rng), None);
    }

    #[test]
    fn test_recorded_direction_wins() {
        let mut state = SessionState::start(verbs(1));
        let mut rng = StdRng::seed_from_u64(11);

        let rolled = state.direction_for(0, &mut rng).unwrap();
        let other = match rolled {
            Direction::PromptIsTranslation => Direction::PromptIsTargetForm,
            Direction::PromptIsTargetForm => Direction::PromptIsTranslation,
        };
        state.record_answer(0, other, Answers::new(), false);

        assert_eq!(state.direction_for(0, &mut rng), Some(other));
    }

    #[test]
    fn test_reset_wipes_progress() {
        let mut state = SessionState::start(verbs(2));
        let mut rng = StdRng::seed_from_u64(1);
        state.direction_for(1, &mut rng);
        state.record_answer(0, Direction::PromptIsTranslation, Answers::new(), true);
        state.position = Position::Finished;

        state.reset();

        assert_eq!(state.score(), 0);
        assert!(state.record(0).is_none());
        assert_eq!(state.position, Position::InSession(0));
        assert_eq!(state.len(), 2);
    }
}
