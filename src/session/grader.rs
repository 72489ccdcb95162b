//! Field-by-field answer checking.

use super::prompt::expected_fields;
use super::state::Answers;
use crate::models::{Direction, Examples, Field, Item};

/// How an empty submission is judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyAnswerPolicy {
    /// An empty answer never matches, even an empty correct value.
    #[default]
    AlwaysMismatch,
    /// An empty answer matches an empty correct value.
    MatchEmptyTruth,
}

/// Result for one expected field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldResult {
    pub field: Field,
    pub submitted: String,
    /// The correct value as stored in the data.
    pub expected: String,
    pub matched: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grade {
    pub correct: bool,
    pub fields: Vec<FieldResult>,
    pub examples: Option<Examples>,
}

impl Grade {
    pub fn field(&self, field: Field) -> Option<&FieldResult> {
        self.fields.iter().find(|result| result.field == field)
    }

    pub fn mismatches(&self) -> impl Iterator<Item = &FieldResult> {
        self.fields.iter().filter(|result| !result.matched)
    }
}

pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

fn matches(submitted: &str, expected: &str, policy: EmptyAnswerPolicy) -> bool {
    let submitted = normalize(submitted);
    if submitted.is_empty() && policy == EmptyAnswerPolicy::AlwaysMismatch {
        return false;
    }
    submitted == normalize(expected)
}

/// Grade a submission. Fields outside the expected set are ignored.
pub fn grade(item: &Item, direction: Direction, answers: &Answers, policy: EmptyAnswerPolicy) -> Grade {
    let fields: Vec<FieldResult> = expected_fields(item.shape(), direction)
        .iter()
        .map(|&field| {
            let submitted = answers.get(&field).map(String::as_str).unwrap_or("");
            let expected = item.ground_truth(field);
            FieldResult {
                field,
                submitted: submitted.to_string(),
                expected: expected.to_string(),
                matched: matches(submitted, expected, policy),
            }
        })
        .collect();

    let correct = fields.iter().all(|result| result.matched);

    // Connectors and frequency words always show their examples; verbs only
    // after a miss.
    let show_examples = match item {
        Item::Connector(_) | Item::FrequencyWord(_) => true,
        Item::RegularVerb(_) | Item::PhrasalVerb(_) => !correct,
    };
    let examples = Some(item.examples()).filter(|examples| show_examples && !examples.is_empty());

    Grade {
        correct,
        fields,
        examples,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::data::item_set_from_value;

    fn first_item(value: serde_json::Value) -> Item {
        item_set_from_value(json!([value])).unwrap().get(0).unwrap().clone()
    }

    fn go() -> Item {
        first_item(json!({
            "base": "go", "past": "went", "participle": "gone",
            "S-ES-IES": "goes", "ing-form": "going", "spanish": "ir",
            "example": "I go to school.", "example_es": "Voy a la escuela."
        }))
    }

    fn answers(pairs: &[(Field, &str)]) -> Answers {
        pairs.iter().map(|(field, text)| (*field, text.to_string())).collect()
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        let item = first_item(json!({"word": "went", "translation": "fue"}));
        let result = grade(
            &item,
            Direction::PromptIsTranslation,
            &answers(&[(Field::Base, "  Went ")]),
            EmptyAnswerPolicy::default(),
        );

        assert!(result.correct);
    }

    #[test]
    fn test_ground_truth_is_normalized_too() {
        let item = first_item(json!({"word": " House ", "translation": "casa"}));
        let result = grade(
            &item,
            Direction::PromptIsTranslation,
            &answers(&[(Field::Base, "house")]),
            EmptyAnswerPolicy::default(),
        );

        assert!(result.correct);
    }

    #[test]
    fn test_full_target_form_answer_is_correct() {
        let submitted = answers(&[
            (Field::Base, "go"),
            (Field::Past, "went"),
            (Field::Spanish, "ir"),
            (Field::SForm, "goes"),
            (Field::IngForm, "going"),
        ]);
        let result = grade(&go(), Direction::PromptIsTargetForm, &submitted, EmptyAnswerPolicy::default());

        assert!(result.correct);
        assert_eq!(result.fields.len(), 5);
        assert_eq!(result.mismatches().count(), 0);
        assert!(result.examples.is_none());
    }

    #[test]
    fn test_typo_reports_correction() {
        let submitted = answers(&[
            (Field::Base, "go"),
            (Field::Past, "went"),
            (Field::Participle, "gon"),
        ]);
        let result = grade(&go(), Direction::PromptIsTranslation, &submitted, EmptyAnswerPolicy::default());

        assert!(!result.correct);
        let participle = result.field(Field::Participle).unwrap();
        assert!(!participle.matched);
        assert_eq!(participle.expected, "gone");
        assert_eq!(participle.submitted, "gon");
        assert!(result.field(Field::Base).unwrap().matched);
        assert_eq!(
            result.examples.as_ref().and_then(|e| e.english.as_deref()),
            Some("I go to school.")
        );
    }

    #[test]
    fn test_fields_outside_expected_set_are_ignored() {
        let item = first_item(json!({"verb": "give up", "spanish": "rendirse"}));
        let submitted = answers(&[(Field::Spanish, "rendirse"), (Field::Past, "nonsense")]);
        let result = grade(&item, Direction::PromptIsTargetForm, &submitted, EmptyAnswerPolicy::default());

        assert!(result.correct);
        assert!(result.field(Field::Past).is_none());
    }

    #[test]
    fn test_empty_submission_against_text_is_wrong() {
        for policy in [EmptyAnswerPolicy::AlwaysMismatch, EmptyAnswerPolicy::MatchEmptyTruth] {
            let item = first_item(json!({"word": "house", "translation": "casa"}));
            let result = grade(&item, Direction::PromptIsTargetForm, &answers(&[(Field::Spanish, "   ")]), policy);
            assert!(!result.correct);

            let result = grade(&item, Direction::PromptIsTargetForm, &Answers::new(), policy);
            assert!(!result.correct);
        }
    }

    #[test]
    fn test_empty_submission_against_missing_truth() {
        let item = first_item(json!({"base": "go", "past": "went"}));
        let submitted = answers(&[
            (Field::Base, "go"),
            (Field::Past, "went"),
            (Field::Participle, ""),
            (Field::SForm, ""),
            (Field::IngForm, ""),
        ]);

        let strict = grade(&item, Direction::PromptIsTranslation, &submitted, EmptyAnswerPolicy::AlwaysMismatch);
        assert!(!strict.correct);
        assert!(!strict.field(Field::IngForm).unwrap().matched);

        let lenient = grade(&item, Direction::PromptIsTranslation, &submitted, EmptyAnswerPolicy::MatchEmptyTruth);
        assert!(lenient.correct);
    }

    #[test]
    fn test_text_against_missing_truth_is_wrong() {
        let item = first_item(json!({"base": "go"}));
        let result = grade(
            &item,
            Direction::PromptIsTranslation,
            &answers(&[(Field::Base, "go"), (Field::Past, "went")]),
            EmptyAnswerPolicy::MatchEmptyTruth,
        );

        assert!(!result.field(Field::Past).unwrap().matched);
    }

    #[test]
    fn test_grading_is_idempotent() {
        let submitted = answers(&[(Field::Base, "Go"), (Field::Past, "goed")]);
        let first = grade(&go(), Direction::PromptIsTranslation, &submitted, EmptyAnswerPolicy::default());
        let second = grade(&go(), Direction::PromptIsTranslation, &submitted, EmptyAnswerPolicy::default());

        assert_eq!(first, second);
    }

    #[test]
    fn test_connector_examples_shown_on_success() {
        let item = first_item(json!({
            "connector": "however", "meaning_es": "sin embargo",
            "example_en": "However, it worked.", "example_es": "Sin embargo, funcionó."
        }));
        let result = grade(
            &item,
            Direction::PromptIsTargetForm,
            &answers(&[(Field::Spanish, "Sin embargo")]),
            EmptyAnswerPolicy::default(),
        );

        assert!(result.correct);
        let examples = result.examples.unwrap();
        assert_eq!(examples.english.as_deref(), Some("However, it worked."));
        assert_eq!(examples.spanish.as_deref(), Some("Sin embargo, funcionó."));
    }

    #[test]
    fn test_frequency_word_without_examples() {
        let item = first_item(json!({"word": "house", "translation": "casa"}));
        let result = grade(
            &item,
            Direction::PromptIsTranslation,
            &answers(&[(Field::Base, "home")]),
            EmptyAnswerPolicy::default(),
        );

        assert!(!result.correct);
        assert!(result.examples.is_none());
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Went\t"), "went");
        assert_eq!(normalize("SIN EMBARGO"), "sin embargo");
    }
}
