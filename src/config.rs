//! Store location configuration.
//!
//! The store path comes from `--store`, then `BLOG_STORE`, then the
//! default file in the working directory. A leading `~` is expanded.

use std::path::PathBuf;

use crate::store::PostStore;

/// Default store file name (relative to the working directory)
pub const STORE_PATH_DEFAULT: &str = "posts.json";

/// Environment variable that overrides the store location
pub const STORE_PATH_ENV: &str = "BLOG_STORE";

/// Resolved client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogConfig {
    /// Snapshot file location, tilde already expanded
    pub store_path: PathBuf,
}

impl BlogConfig {
    /// Build from a raw, possibly `~`-prefixed path
    pub fn from_raw(store_path: &str) -> Self {
        Self {
            store_path: PathBuf::from(shellexpand::tilde(store_path).into_owned()),
        }
    }

    /// Open the store this configuration points at
    pub fn open_store(&self) -> PostStore {
        PostStore::new(&self.store_path)
    }
}
