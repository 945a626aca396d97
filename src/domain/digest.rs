use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One AI-generated digest record, owned by the backend and read-only here.
///
/// The fetch collaborator returns digests newest-first; the element at
/// index 0 is the latest digest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Digest {
    pub id: i64,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub sources: Vec<DigestSource>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub is_bookmarked: bool,
}

/// A cited source attached to a digest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DigestSource {
    pub title: Option<String>,
    pub url: Option<String>,
}

impl Digest {
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            "(Untitled)"
        } else {
            &self.title
        }
    }
}
