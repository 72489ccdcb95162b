use serde_json::{Map, Value};
use tracing::warn;

/// The structural variant of the items in a data set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    RegularVerb,
    PhrasalVerb,
    Connector,
    FrequencyWord,
}

impl Shape {
    /// Recognize a shape from the keys of one raw item.
    ///
    /// Checks run in a fixed priority order. Returns `None` when no known
    /// key set is present.
    pub fn classify(object: &Map<String, Value>) -> Option<Shape> {
        let has = |key: &str| object.contains_key(key);

        if has("verb") && !has("base") {
            Some(Shape::PhrasalVerb)
        } else if has("connector") && has("meaning_es") {
            Some(Shape::Connector)
        } else if has("word") && has("translation") {
            Some(Shape::FrequencyWord)
        } else if has("base") {
            Some(Shape::RegularVerb)
        } else {
            None
        }
    }

    /// Like [`Shape::classify`], falling back to `RegularVerb` for
    /// unrecognized items.
    pub fn detect(object: &Map<String, Value>) -> Shape {
        Self::classify(object).unwrap_or_else(|| {
            let keys: Vec<&str> = object.keys().map(String::as_str).collect();
            warn!(?keys, "unrecognized item keys, treating data as regular verbs");
            Shape::RegularVerb
        })
    }

    pub fn label(self) -> &'static str {
        match self {
            Shape::RegularVerb => "Verbs",
            Shape::PhrasalVerb => "Phrasal verbs",
            Shape::Connector => "Connectors",
            Shape::FrequencyWord => "Frequency words",
        }
    }
}
