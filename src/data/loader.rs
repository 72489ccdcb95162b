use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, info};

use crate::models::{Item, ItemSet, Shape};

/// Object members that commonly wrap the item list, checked in order.
const WRAPPER_KEYS: [&str; 6] = ["items", "data", "verbs", "phrasal_verbs", "connectors", "words"];

/// Error loading an item set.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("the data is empty or not a list of items: {0}")]
    EmptyOrInvalidData(String),

    #[error("could not read {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not download data: {0}")]
    Http(#[from] reqwest::Error),

    #[error("no JSON files found in {0}")]
    NoJsonFiles(String),

    #[error("no catalog file matches '{0}'")]
    UnknownFile(String),
}

/// Parse raw JSON bytes into an item set.
pub fn parse_item_set(bytes: &[u8]) -> Result<ItemSet, LoadError> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|err| LoadError::EmptyOrInvalidData(format!("unparseable JSON: {err}")))?;
    item_set_from_value(value)
}

/// Build an item set from a bare list or from an object wrapping one.
///
/// The shape is detected from the first element only.
pub fn item_set_from_value(value: Value) -> Result<ItemSet, LoadError> {
    let objects = unwrap_list(value)?
        .into_iter()
        .enumerate()
        .map(|(index, element)| match element {
            Value::Object(object) => Ok(object),
            _ => Err(LoadError::EmptyOrInvalidData(format!(
                "element {} is not an object",
                index + 1
            ))),
        })
        .collect::<Result<Vec<Map<String, Value>>, _>>()?;

    let shape = objects
        .first()
        .map(Shape::detect)
        .ok_or_else(|| LoadError::EmptyOrInvalidData("the list has no items".to_string()))?;

    let items = objects
        .into_iter()
        .enumerate()
        .map(|(index, object)| {
            Item::from_object(shape, object).map_err(|err| {
                LoadError::EmptyOrInvalidData(format!("element {}: {err}", index + 1))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(?shape, count = items.len(), "parsed item set");
    ItemSet::new(items)
}

fn unwrap_list(value: Value) -> Result<Vec<Value>, LoadError> {
    match value {
        Value::Array(list) => Ok(list),
        Value::Object(mut object) => {
            let key = WRAPPER_KEYS
                .iter()
                .find(|key| object.get(**key).is_some_and(Value::is_array))
                .map(|key| key.to_string())
                .or_else(|| {
                    object
                        .iter()
                        .find(|(_, member)| member.is_array())
                        .map(|(key, _)| key.clone())
                });

            match key.and_then(|key| object.remove(&key)) {
                Some(Value::Array(list)) => Ok(list),
                _ => Err(LoadError::EmptyOrInvalidData(
                    "the object does not contain a list".to_string(),
                )),
            }
        }
        _ => Err(LoadError::EmptyOrInvalidData(
            "expected a list of items".to_string(),
        )),
    }
}

/// Read and parse a local JSON file.
pub async fn load_from_path<P: AsRef<Path>>(path: P) -> Result<ItemSet, LoadError> {
    let path = path.as_ref();

    let bytes = tokio::fs::read(path).await.map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let items = parse_item_set(&bytes)?;

    info!(path = %path.display(), count = items.len(), shape = ?items.shape(), "loaded items from file");
    Ok(items)
}

/// Download and parse a JSON file.
pub async fn load_from_url(client: &reqwest::Client, url: &str) -> Result<ItemSet, LoadError> {
    let bytes = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;
    let items = parse_item_set(&bytes)?;

    info!(%url, count = items.len(), shape = ?items.shape(), "loaded items from url");
    Ok(items)
}
