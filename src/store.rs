//! Post Store
//!
//! TigerStyle: Single point of durable truth for all posts.
//!
//! Every operation round-trips through a full snapshot of the store file:
//! - Read: parse the whole file into an id → record map
//! - Write: serialize the whole map, write a sibling temp file, rename it
//!   over the store file
//!
//! A missing file is a valid empty store. There is no locking; concurrent
//! writers race and the last rename wins.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::post::{Post, PostRecord};

// =============================================================================
// TigerStyle Constants
// =============================================================================

/// Id given to the first post of an empty store
pub const POST_ID_FIRST: u64 = 1;

/// Suffix of the temp file a snapshot is staged in before the rename
pub const SNAPSHOT_TEMP_SUFFIX: &str = ".tmp";

// =============================================================================
// Types
// =============================================================================

/// Posts keyed by id, in ascending id order
pub type Posts = BTreeMap<u64, PostRecord>;

/// Store result alias
pub type Result<T> = std::result::Result<T, StoreError>;

/// File-backed post store
#[derive(Debug, Clone)]
pub struct PostStore {
    /// Snapshot file location
    path: PathBuf,
}

impl PostStore {
    /// Create a store backed by the given file (which need not exist yet)
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Snapshot file location
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all posts, or only those whose id is in `filter`.
    ///
    /// Unknown ids in the filter are skipped. A missing store file is
    /// reported and treated as an empty store.
    pub fn load(&self, filter: Option<&BTreeSet<u64>>) -> Result<Posts> {
        let posts = match self.read_snapshot()? {
            Some(posts) => posts,
            None => {
                tracing::warn!(path = %self.path.display(), "File not found");
                return Ok(Posts::new());
            }
        };

        Ok(match filter {
            Some(ids) => posts
                .into_iter()
                .filter(|(id, _)| ids.contains(id))
                .collect(),
            None => posts,
        })
    }

    /// Persist one post, returning the id it was stored under.
    ///
    /// - Empty store: the post becomes id 1
    /// - Post id present in the store: that record is overwritten
    /// - Post without id (or id 0): max id + 1
    /// - Post with an id not in the store: inserted under that id
    pub fn save(&self, post: &Post) -> Result<u64> {
        let mut posts = self.read_snapshot()?.unwrap_or_default();

        let requested = post.id.filter(|&id| id != 0);
        let id = match (posts.keys().next_back().copied(), requested) {
            (None, _) => POST_ID_FIRST,
            (Some(_), Some(id)) => id,
            (Some(max), None) => max
                .checked_add(1)
                .ok_or(StoreError::IdSpaceExhausted { max })?,
        };

        let replaced = posts.insert(id, post.to_record()).is_some();
        self.write_snapshot(&posts)?;

        tracing::info!(
            post_id = id,
            replaced = replaced,
            count = posts.len(),
            "Saved post"
        );

        Ok(id)
    }

    /// Posts whose title or body contains `query`, ignoring case.
    ///
    /// The empty query matches every post.
    pub fn search(&self, query: &str) -> Result<Posts> {
        let needle = query.to_lowercase();
        let matches: Posts = self
            .load(None)?
            .into_iter()
            .filter(|(_, record)| {
                record.title.to_lowercase().contains(&needle)
                    || record.body.to_lowercase().contains(&needle)
            })
            .collect();

        tracing::debug!(query = query, matches = matches.len(), "Searched posts");

        Ok(matches)
    }

    /// Remove a post. Returns `false` (and leaves the file untouched) if the
    /// id is not in the store.
    pub fn delete(&self, id: u64) -> Result<bool> {
        let mut posts = self.read_snapshot()?.unwrap_or_default();

        if posts.remove(&id).is_none() {
            tracing::warn!(post_id = id, "Post id not found");
            return Ok(false);
        }

        self.write_snapshot(&posts)?;
        tracing::info!(post_id = id, count = posts.len(), "Deleted post");

        Ok(true)
    }

    /// Read the full snapshot; `None` if the file does not exist
    fn read_snapshot(&self) -> Result<Option<Posts>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let posts: Posts = serde_json::from_slice(&bytes).map_err(StoreError::InvalidSnapshot)?;
        tracing::debug!(path = %self.path.display(), count = posts.len(), "Loaded snapshot");

        Ok(Some(posts))
    }

    /// Replace the snapshot file with `posts`
    fn write_snapshot(&self, posts: &Posts) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut staged = self.path.clone().into_os_string();
        staged.push(SNAPSHOT_TEMP_SUFFIX);
        let staged = PathBuf::from(staged);

        let bytes = serde_json::to_vec_pretty(posts)?;
        fs::write(&staged, &bytes)?;
        fs::rename(&staged, &self.path)?;

        tracing::debug!(path = %self.path.display(), count = posts.len(), "Wrote snapshot");

        Ok(())
    }
}

// =============================================================================
// Errors
// =============================================================================

/// Store errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid store file: {0}")]
    InvalidSnapshot(serde_json::Error),

    #[error("no id left after {max}")]
    IdSpaceExhausted { max: u64 },
}

// =============================================================================
// Tests
// =============================================================================
