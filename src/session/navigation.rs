//! Moving between items and into the results screen.

use tracing::debug;

use super::state::SessionState;

/// Where the session currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    InSession(usize),
    Finished,
}

impl SessionState {
    pub fn position(&self) -> Position {
        self.position
    }

    pub fn current_index(&self) -> Option<usize> {
        match self.position {
            Position::InSession(index) => Some(index),
            Position::Finished => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.position == Position::Finished
    }

    /// True when the current item is the last one, so `next` shows results.
    pub fn is_last(&self) -> bool {
        self.current_index() == Some(self.len().saturating_sub(1))
    }

    pub fn next(&mut self) -> Position {
        if let Position::InSession(index) = self.position {
            self.position = if index + 1 < self.len() {
                Position::InSession(index + 1)
            } else {
                Position::Finished
            };
            debug!(from = index, to = ?self.position, "next");
        }
        self.position
    }

    pub fn previous(&mut self) -> Position {
        if let Position::InSession(index) = self.position {
            if index > 0 {
                self.position = Position::InSession(index - 1);
                debug!(from = index, to = index - 1, "previous");
            }
        }
        self.position
    }

    /// Go straight to an item. Out-of-range indices are ignored.
    pub fn jump_to(&mut self, index: usize) -> Position {
        if index < self.len() {
            self.position = Position::InSession(index);
            debug!(to = index, "jump");
        }
        self.position
    }

    /// Start over on the same items.
    pub fn restart(&mut self) -> Position {
        self.reset();
        debug!("restart");
        self.position
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::data::item_set_from_value;
    use crate::models::Direction;
    use crate::session::Answers;

    fn state(count: usize) -> SessionState {
        let list: Vec<_> = (0..count)
            .map(|i| json!({"word": format!("w{i}"), "translation": format!("t{i}")}))
            .collect();
        SessionState::start(item_set_from_value(json!(list)).unwrap())
    }

    #[test]
    fn test_next_walks_to_finished() {
        let mut state = state(3);

        assert_eq!(state.next(), Position::InSession(1));
        assert_eq!(state.next(), Position::InSession(2));
        assert!(state.is_last());
        assert_eq!(state.next(), Position::Finished);
        assert_eq!(state.next(), Position::Finished);
        assert!(state.is_finished());
        assert_eq!(state.current_index(), None);
    }

    #[test]
    fn test_single_item_finishes_immediately() {
        let mut state = state(1);
        assert!(state.is_last());
        assert_eq!(state.next(), Position::Finished);
    }

    #[test]
    fn test_previous_stops_at_first() {
        let mut state = state(3);
        state.jump_to(2);

        assert_eq!(state.previous(), Position::InSession(1));
        assert_eq!(state.previous(), Position::InSession(0));
        assert_eq!(state.previous(), Position::InSession(0));
    }

    #[test]
    fn test_previous_from_finished_is_noop() {
        let mut state = state(1);
        state.next();
        assert_eq!(state.previous(), Position::Finished);
    }

    #[test]
    fn test_jump_to_validates_index() {
        let mut state = state(4);

        assert_eq!(state.jump_to(3), Position::InSession(3));
        assert_eq!(state.jump_to(4), Position::InSession(3));
        state.next();
        assert_eq!(state.jump_to(1), Position::InSession(1));
    }

    #[test]
    fn test_restart_keeps_items() {
        let mut state = state(2);
        state.record_answer(0, Direction::PromptIsTranslation, Answers::new(), true);
        state.next();
        state.next();

        assert_eq!(state.restart(), Position::InSession(0));
        assert_eq!(state.len(), 2);
        assert_eq!(state.score(), 0);
        assert!(state.record(0).is_none());
    }
}
