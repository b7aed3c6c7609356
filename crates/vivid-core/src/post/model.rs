//! Post domain model.
//!
//! Posts are never mutated in place: a post is replaced wholesale or removed.

use crate::user::UserRef;
use crate::wire::{flexible_id, lenient_string, parse_timestamp, string_list};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

/// Title used when the backend omits one.
pub const UNTITLED: &str = "Untitled";

/// Author used when the backend names none.
pub const DEFAULT_AUTHOR: &str = "Blog Author";

const WORDS_PER_MINUTE: usize = 200;

/// A post as held in the local collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub content: String,
    /// Tags in insertion order.
    pub tags: Vec<String>,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Maps a backend record, defaulting every missing field.
    ///
    /// `now` stands in for an absent or unreadable `createdAt`.
    pub fn from_record(record: PostRecord, now: DateTime<Utc>) -> Self {
        let id = record
            .id
            .or(record.legacy_id)
            .unwrap_or_else(|| format!("local-{}", Uuid::new_v4().simple()));

        let author = record
            .user
            .and_then(|u| u.name)
            .filter(|n| !n.is_empty())
            .or(record.author.filter(|a| !a.is_empty()))
            .unwrap_or_else(|| DEFAULT_AUTHOR.to_string());

        let created_at = record
            .created_at
            .as_deref()
            .and_then(parse_timestamp)
            .unwrap_or(now);

        Self {
            id,
            title: record.title.unwrap_or_else(|| UNTITLED.to_string()),
            content: record.content.unwrap_or_default(),
            tags: record.tags.unwrap_or_default(),
            author,
            created_at,
        }
    }

    /// Estimated reading time, e.g. `"3 min read"`.
    pub fn read_time(&self) -> String {
        let words = self.content.split_whitespace().count();
        let minutes = words.div_ceil(WORDS_PER_MINUTE).max(1);
        format!("{} min read", minutes)
    }

    /// Creation date formatted for display.
    pub fn display_date(&self) -> String {
        self.created_at.format("%b %-d, %Y").to_string()
    }

    /// Case-insensitive substring match over title, content and tags.
    ///
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.content.to_lowercase().contains(needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(needle))
    }
}

/// A post as the backend sends it. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    #[serde(default, deserialize_with = "flexible_id")]
    pub id: Option<String>,
    #[serde(default, rename = "_id", deserialize_with = "flexible_id")]
    pub legacy_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub tags: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub author: Option<String>,
    #[serde(default)]
    pub user: Option<UserRef>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub created_at: Option<String>,
}

/// Payload for `POST /posts`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    /// Backend user id the post is attributed to.
    pub author_user_ref: String,
}

impl NewPost {
    /// JSON body; the author id is sent as a number when it is numeric.
    pub fn to_payload(&self) -> Value {
        let author_id = self
            .author_user_ref
            .parse::<i64>()
            .map(Value::from)
            .unwrap_or_else(|_| Value::from(self.author_user_ref.clone()));

        json!({
            "title": self.title,
            "content": self.content,
            "tags": self.tags,
            "user": { "id": author_id },
        })
    }
}

/// Splits comma-separated tag input, trimming entries and dropping empties.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
