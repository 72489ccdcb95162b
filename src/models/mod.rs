mod direction;
mod field;
mod item;
mod shape;

pub use direction::Direction;
pub use field::Field;
pub use item::{Connector, Examples, FrequencyWord, Item, ItemSet, PhrasalVerb, RegularVerb};
pub use shape::Shape;

/// Which screen the terminal app is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Welcome,
    Quiz,
    Result,
}
