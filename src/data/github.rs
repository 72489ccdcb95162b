use serde::Deserialize;
use tracing::{debug, info};

use super::LoadError;

pub const DEFAULT_OWNER: &str = "Kevin-LWC";
pub const DEFAULT_REPO: &str = "Aprender-Verbos-en-Ingles";
pub const DEFAULT_FOLDER: &str = "data";
pub const DEFAULT_CATEGORY: &str = "verbs";

const API_ROOT: &str = "https://api.github.com/repos";

/// A folder of JSON drill files in a GitHub repository, one sub-folder per
/// category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    pub owner: String,
    pub repo: String,
    pub folder: String,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            owner: DEFAULT_OWNER.to_string(),
            repo: DEFAULT_REPO.to_string(),
            folder: DEFAULT_FOLDER.to_string(),
        }
    }
}

/// Entry of the GitHub contents API listing.
#[derive(Debug, Deserialize)]
struct ContentEntry {
    name: String,
    download_url: Option<String>,
}

/// A downloadable JSON file in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFile {
    pub name: String,
    pub download_url: String,
}

impl RemoteFile {
    /// `phrasal_verbs_1.json` is shown as `PHRASAL VERBS 1`.
    pub fn display_name(&self) -> String {
        self.name
            .strip_suffix(".json")
            .unwrap_or(&self.name)
            .replace('_', " ")
            .to_uppercase()
    }

    fn matches(&self, wanted: &str) -> bool {
        let wanted = wanted.trim();
        self.name.eq_ignore_ascii_case(wanted)
            || self
                .name
                .strip_suffix(".json")
                .is_some_and(|stem| stem.eq_ignore_ascii_case(wanted))
            || self.display_name().eq_ignore_ascii_case(wanted)
    }
}

impl Catalog {
    pub fn listing_url(&self, category: &str) -> String {
        format!(
            "{}/{}/{}/contents/{}/{}",
            API_ROOT, self.owner, self.repo, self.folder, category
        )
    }

    /// List the JSON files of a category.
    pub async fn list(
        &self,
        client: &reqwest::Client,
        category: &str,
    ) -> Result<Vec<RemoteFile>, LoadError> {
        let url = self.listing_url(category);
        debug!(%url, "listing catalog");

        let entries: Vec<ContentEntry> = client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let files = json_files(entries);
        if files.is_empty() {
            return Err(LoadError::NoJsonFiles(format!("{}/{}", self.folder, category)));
        }

        info!(category, count = files.len(), "listed catalog files");
        Ok(files)
    }
}

fn json_files(entries: Vec<ContentEntry>) -> Vec<RemoteFile> {
    entries
        .into_iter()
        .filter(|entry| entry.name.ends_with(".json"))
        .filter_map(|entry| {
            Some(RemoteFile {
                download_url: entry.download_url?,
                name: entry.name,
            })
        })
        .collect()
}

/// Choose a file by 1-based number or by name. Without a choice the first
/// file is used.
pub(super) fn pick<'a>(
    files: &'a [RemoteFile],
    wanted: Option<&str>,
) -> Result<&'a RemoteFile, LoadError> {
    let Some(wanted) = wanted else {
        return files
            .first()
            .ok_or_else(|| LoadError::NoJsonFiles("the catalog".to_string()));
    };

    let found = match wanted.trim().parse::<usize>() {
        Ok(number) => number.checked_sub(1).and_then(|index| files.get(index)),
        Err(_) => files.iter().find(|file| file.matches(wanted)),
    };

    found.ok_or_else(|| LoadError::UnknownFile(wanted.to_string()))
}
