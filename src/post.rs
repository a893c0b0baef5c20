//! Post Entity
//!
//! TigerStyle: One blog post in memory, convertible to the stored record.
//!
//! A post starts out unsaved (`id == None`; an id of 0 means the same). Saving it through the
//! [`PostStore`] assigns an id; the id is the key of the snapshot map and
//! is never embedded in the record itself.

use chrono::{Local, NaiveDateTime, SubsecRound};
use serde::{Deserialize, Serialize};

use crate::store::{PostStore, Result};

// =============================================================================
// TigerStyle Constants
// =============================================================================

/// On-disk and display format of the modification timestamp
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// =============================================================================
// Types
// =============================================================================

/// The storable shape of a post, as kept in the snapshot file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    /// Post title
    pub title: String,
    /// Last modification time
    #[serde(with = "date_format")]
    pub date: NaiveDateTime,
    /// Post body
    pub body: String,
}

impl PostRecord {
    /// Modification time rendered the way it is stored
    pub fn date_string(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

/// A blog post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    /// Store-assigned id (None until saved)
    pub id: Option<u64>,
    /// Post title
    pub title: String,
    /// Post body
    pub body: String,
    /// Captured when the post is constructed, not when it is saved
    pub modified_at: NaiveDateTime,
}

impl Post {
    /// Create an unsaved post stamped with the current local time
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            body: body.into(),
            modified_at: now(),
        }
    }

    /// Create a post that targets an explicit id
    pub fn with_id(id: u64, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            ..Self::new(title, body)
        }
    }

    /// Convert to the record stored under this post's id
    pub fn to_record(&self) -> PostRecord {
        PostRecord {
            title: self.title.clone(),
            date: self.modified_at,
            body: self.body.clone(),
        }
    }

    /// Persist through the store and remember the assigned id
    pub fn save(&mut self, store: &PostStore) -> Result<u64> {
        let id = store.save(self)?;
        self.id = Some(id);
        Ok(id)
    }
}

/// Current local time truncated to whole seconds, matching the stored precision
fn now() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(0)
}

mod date_format {
    use super::DATE_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        date: &NaiveDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use tempfile::tempdir;

    #[test]
    fn test_new_post_is_unsaved() {
        let post = Post::new("Title", "Body");
        assert_eq!(post.id, None);
        assert_eq!(post.modified_at.nanosecond(), 0);
    }

    #[test]
    fn test_record_excludes_id() {
        let post = Post::with_id(7, "Title", "Body");
        let json = serde_json::to_value(post.to_record()).unwrap();

        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 3);
        assert!(obj.contains_key("title"));
        assert!(obj.contains_key("date"));
        assert!(obj.contains_key("body"));
    }

    #[test]
    fn test_record_date_format() {
        let record: PostRecord = serde_json::from_str(
            r#"{"title": "T", "date": "2016-03-01 09:05:07", "body": "B"}"#,
        )
        .unwrap();
        assert_eq!(record.date_string(), "2016-03-01 09:05:07");

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"title":"T","date":"2016-03-01 09:05:07","body":"B"}"#
        );
    }

    #[test]
    fn test_record_rejects_bad_date() {
        let result: std::result::Result<PostRecord, _> =
            serde_json::from_str(r#"{"title": "T", "date": "yesterday", "body": "B"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_save_assigns_id() {
        let dir = tempdir().unwrap();
        let store = PostStore::new(dir.path().join("posts.json"));

        let mut first = Post::new("T1", "B1");
        assert_eq!(first.save(&store).unwrap(), 1);
        assert_eq!(first.id, Some(1));

        let mut second = Post::new("T2", "B2");
        assert_eq!(second.save(&store).unwrap(), 2);
        assert_eq!(second.id, Some(2));
    }
}
