use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use super::{Field, Shape};
use crate::data::LoadError;

/// Reads any JSON scalar as text. `null` becomes the empty string.
fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RegularVerb {
    #[serde(default, deserialize_with = "text")]
    pub base: String,
    #[serde(default, deserialize_with = "text")]
    pub past: String,
    #[serde(default, deserialize_with = "text")]
    pub participle: String,
    #[serde(rename = "S-ES-IES", default, deserialize_with = "text")]
    pub s_form: String,
    #[serde(rename = "ing-form", default, deserialize_with = "text")]
    pub ing_form: String,
    #[serde(default, deserialize_with = "text")]
    pub spanish: String,
    #[serde(default, deserialize_with = "text")]
    pub example: String,
    #[serde(default, deserialize_with = "text")]
    pub example_es: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PhrasalVerb {
    #[serde(default, deserialize_with = "text")]
    pub verb: String,
    #[serde(default, deserialize_with = "text")]
    pub spanish: String,
    #[serde(default, deserialize_with = "text")]
    pub example: String,
    #[serde(default, deserialize_with = "text")]
    pub example_es: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Connector {
    #[serde(default, deserialize_with = "text")]
    pub connector: String,
    #[serde(default, deserialize_with = "text")]
    pub meaning_es: String,
    #[serde(default, deserialize_with = "text")]
    pub example_en: String,
    #[serde(default, deserialize_with = "text")]
    pub example_es: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FrequencyWord {
    #[serde(default, deserialize_with = "text")]
    pub word: String,
    #[serde(default, deserialize_with = "text")]
    pub translation: String,
    #[serde(default, deserialize_with = "text")]
    pub example: String,
    #[serde(default, deserialize_with = "text")]
    pub example_es: String,
}

/// Example sentences attached to an item. Empty sentences are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Examples {
    pub english: Option<String>,
    pub spanish: Option<String>,
}

impl Examples {
    fn new(english: &str, spanish: &str) -> Self {
        let non_empty = |s: &str| (!s.trim().is_empty()).then(|| s.to_string());
        Self {
            english: non_empty(english),
            spanish: non_empty(spanish),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.english.is_none() && self.spanish.is_none()
    }
}

/// One quiz unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    RegularVerb(RegularVerb),
    PhrasalVerb(PhrasalVerb),
    Connector(Connector),
    FrequencyWord(FrequencyWord),
}

impl Item {
    /// Read a raw JSON object as an item of the given shape.
    ///
    /// Missing keys become empty strings; keys of other shapes are ignored.
    pub fn from_object(shape: Shape, object: Map<String, Value>) -> serde_json::Result<Self> {
        let value = Value::Object(object);
        Ok(match shape {
            Shape::RegularVerb => Item::RegularVerb(serde_json::from_value(value)?),
            Shape::PhrasalVerb => Item::PhrasalVerb(serde_json::from_value(value)?),
            Shape::Connector => Item::Connector(serde_json::from_value(value)?),
            Shape::FrequencyWord => Item::FrequencyWord(serde_json::from_value(value)?),
        })
    }

    pub fn shape(&self) -> Shape {
        match self {
            Item::RegularVerb(_) => Shape::RegularVerb,
            Item::PhrasalVerb(_) => Shape::PhrasalVerb,
            Item::Connector(_) => Shape::Connector,
            Item::FrequencyWord(_) => Shape::FrequencyWord,
        }
    }

    /// The correct value for an answer field. Fields a shape does not have
    /// are empty.
    pub fn ground_truth(&self, field: Field) -> &str {
        match (self, field) {
            (Item::RegularVerb(v), Field::Base) => &v.base,
            (Item::RegularVerb(v), Field::Past) => &v.past,
            (Item::RegularVerb(v), Field::Participle) => &v.participle,
            (Item::RegularVerb(v), Field::SForm) => &v.s_form,
            (Item::RegularVerb(v), Field::IngForm) => &v.ing_form,
            (Item::RegularVerb(v), Field::Spanish) => &v.spanish,
            (Item::PhrasalVerb(v), Field::Base) => &v.verb,
            (Item::PhrasalVerb(v), Field::Spanish) => &v.spanish,
            (Item::Connector(c), Field::Base) => &c.connector,
            (Item::Connector(c), Field::Spanish) => &c.meaning_es,
            (Item::FrequencyWord(w), Field::Base) => &w.word,
            (Item::FrequencyWord(w), Field::Spanish) => &w.translation,
            _ => "",
        }
    }

    pub fn examples(&self) -> Examples {
        match self {
            Item::RegularVerb(v) => Examples::new(&v.example, &v.example_es),
            Item::PhrasalVerb(v) => Examples::new(&v.example, &v.example_es),
            Item::Connector(c) => Examples::new(&c.example_en, &c.example_es),
            Item::FrequencyWord(w) => Examples::new(&w.example, &w.example_es),
        }
    }
}

/// A non-empty list of items sharing one shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSet {
    shape: Shape,
    items: Vec<Item>,
}

impl ItemSet {
    /// The shape is taken from the first item. Mixed shapes are not checked.
    pub fn new(items: Vec<Item>) -> Result<Self, LoadError> {
        let shape = items
            .first()
            .map(Item::shape)
            .ok_or_else(|| LoadError::EmptyOrInvalidData("the list has no items".to_string()))?;
        Ok(Self { shape, items })
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }
}
