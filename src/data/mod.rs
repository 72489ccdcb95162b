//! Loading item sets from JSON files, URLs and a GitHub catalog.

mod github;
mod loader;
mod source;

pub use github::{Catalog, DEFAULT_CATEGORY, DEFAULT_FOLDER, DEFAULT_OWNER, DEFAULT_REPO, RemoteFile};
pub use loader::{LoadError, item_set_from_value, load_from_path, load_from_url, parse_item_set};
pub use source::{Choice, Loaded, Source};
