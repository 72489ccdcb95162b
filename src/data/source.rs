use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::github::{self, Catalog, RemoteFile};
use super::{LoadError, load_from_path, load_from_url};
use crate::models::ItemSet;

const USER_AGENT: &str = concat!("verb-drill/", env!("CARGO_PKG_VERSION"));

/// Where the item set comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    Url(String),
    GitHub {
        catalog: Catalog,
        category: String,
        pick: Option<String>,
    },
}

/// A loaded item set and a label describing where it came from.
#[derive(Debug, Clone)]
pub struct Loaded {
    pub items: ItemSet,
    pub label: String,
}

/// Another item set the user can switch to without leaving the drill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub label: String,
    pub source: Source,
}

impl Choice {
    pub async fn load(&self) -> Result<Loaded, LoadError> {
        let loaded = self.source.load().await?;
        Ok(Loaded {
            label: self.label.clone(),
            ..loaded
        })
    }
}

fn http_client() -> Result<reqwest::Client, LoadError> {
    Ok(reqwest::Client::builder().user_agent(USER_AGENT).build()?)
}

impl Source {
    /// Fetch and parse the items. Failures are not retried.
    pub async fn load(&self) -> Result<Loaded, LoadError> {
        match self {
            Source::File(path) => Ok(Loaded {
                items: load_from_path(path).await?,
                label: path.display().to_string(),
            }),
            Source::Url(url) => Ok(Loaded {
                items: load_from_url(&http_client()?, url).await?,
                label: url.clone(),
            }),
            Source::GitHub {
                catalog,
                category,
                pick,
            } => {
                let client = http_client()?;
                let files = catalog.list(&client, category).await?;
                let file = github::pick(&files, pick.as_deref())?;
                info!(file = %file.name, category = %category, "loading catalog file");

                Ok(Loaded {
                    items: load_from_url(&client, &file.download_url).await?,
                    label: catalog_label(category, file),
                })
            }
        }
    }

    /// Item sets next to this one: the files of the same catalog category,
    /// or the JSON files in the directory of a local file. A plain URL has
    /// none.
    pub async fn choices(&self) -> Result<Vec<Choice>, LoadError> {
        match self {
            Source::GitHub {
                catalog, category, ..
            } => {
                let files = catalog.list(&http_client()?, category).await?;
                Ok(files
                    .into_iter()
                    .map(|file| Choice {
                        label: catalog_label(category, &file),
                        source: Source::Url(file.download_url),
                    })
                    .collect())
            }
            Source::File(path) => sibling_files(path).await,
            Source::Url(_) => Ok(Vec::new()),
        }
    }
}

fn catalog_label(category: &str, file: &RemoteFile) -> String {
    format!("{} · {}", category.replace('_', " "), file.display_name())
}

async fn sibling_files(path: &Path) -> Result<Vec<Choice>, LoadError> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let io_error = |source: std::io::Error| LoadError::Io {
        path: dir.clone(),
        source,
    };

    let mut entries = tokio::fs::read_dir(&dir).await.map_err(io_error)?;
    let mut paths = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(io_error)? {
        let path = entry.path();
        let is_file = entry.file_type().await.map_err(io_error)?.is_file();
        if is_file && path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path);
        }
    }
    paths.sort();
    debug!(dir = %dir.display(), count = paths.len(), "listed local files");

    Ok(paths
        .into_iter()
        .map(|path| Choice {
            label: path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            source: Source::File(path),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::models::Shape;

    #[tokio::test]
    async fn test_file_source_uses_path_as_label() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"items": [{{"verb": "give up", "spanish": "rendirse"}}]}}"#).unwrap();

        let source = Source::File(file.path().to_path_buf());
        let loaded = source.load().await.unwrap();

        assert_eq!(loaded.items.shape(), Shape::PhrasalVerb);
        assert_eq!(loaded.label, file.path().display().to_string());
    }

    #[tokio::test]
    async fn test_file_choices_are_sibling_json_files() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["verbs_2.json", "verbs_1.json", "notes.txt"] {
            std::fs::write(dir.path().join(name), r#"[{"base": "go"}]"#).unwrap();
        }
        std::fs::create_dir(dir.path().join("old.json")).unwrap();

        let source = Source::File(dir.path().join("verbs_1.json"));
        let choices = source.choices().await.unwrap();

        let labels: Vec<_> = choices.iter().map(|choice| choice.label.as_str()).collect();
        assert_eq!(labels, vec!["verbs_1.json", "verbs_2.json"]);
        assert_eq!(choices[1].source, Source::File(dir.path().join("verbs_2.json")));
    }

    #[tokio::test]
    async fn test_choice_load_uses_choice_label() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.json");
        std::fs::write(&path, r#"[{"word": "house", "translation": "casa"}]"#).unwrap();

        let choice = Choice {
            label: "words.json".to_string(),
            source: Source::File(path),
        };
        let loaded = choice.load().await.unwrap();

        assert_eq!(loaded.label, "words.json");
        assert_eq!(loaded.items.shape(), Shape::FrequencyWord);
    }

    #[tokio::test]
    async fn test_url_source_has_no_choices() {
        let source = Source::Url("https://example.test/verbs.json".to_string());
        assert!(source.choices().await.unwrap().is_empty());
    }
}
