//! Choosing what to show and what to ask for an item.

use crate::models::{Direction, Field, Item, Shape};

/// Fields the user must fill in for a shape and direction.
pub fn expected_fields(shape: Shape, direction: Direction) -> &'static [Field] {
    use Direction::{PromptIsTargetForm, PromptIsTranslation};
    use Field::{Base, IngForm, Participle, Past, SForm, Spanish};

    match (shape, direction) {
        (Shape::RegularVerb, PromptIsTranslation) => &[Base, Past, Participle, SForm, IngForm],
        (Shape::RegularVerb, PromptIsTargetForm) => &[Base, Past, Spanish, SForm, IngForm],
        (Shape::PhrasalVerb, PromptIsTranslation) => &[Base],
        (Shape::PhrasalVerb, PromptIsTargetForm) => &[Spanish],
        (Shape::Connector, PromptIsTranslation) => &[Base],
        (Shape::Connector, PromptIsTargetForm) => &[Spanish],
        (Shape::FrequencyWord, PromptIsTranslation) => &[Base],
        (Shape::FrequencyWord, PromptIsTargetForm) => &[Spanish],
    }
}

/// The question side of an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub direction: Direction,
    /// Text shown as the question, capitalized.
    pub text: String,
    /// English text to narrate. Spanish prompts are never spoken.
    pub speech: Option<String>,
    pub fields: &'static [Field],
}

impl Prompt {
    pub fn build(item: &Item, direction: Direction) -> Self {
        let shown = match (item, direction) {
            (_, Direction::PromptIsTranslation) => item.ground_truth(Field::Spanish),
            (Item::RegularVerb(verb), Direction::PromptIsTargetForm) => verb.participle.as_str(),
            (
                Item::PhrasalVerb(_) | Item::Connector(_) | Item::FrequencyWord(_),
                Direction::PromptIsTargetForm,
            ) => item.ground_truth(Field::Base),
        };

        let speech = match direction {
            Direction::PromptIsTargetForm if !shown.trim().is_empty() => Some(shown.to_string()),
            _ => None,
        };

        Self {
            direction,
            text: capitalize(shown),
            speech,
            fields: expected_fields(item.shape(), direction),
        }
    }

    pub fn audio_eligible(&self) -> bool {
        self.speech.is_some()
    }
}

/// Upper-case the first character.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
