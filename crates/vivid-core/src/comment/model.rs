//! Comment domain model.

use crate::session::Session;
use crate::user::UserRef;
use crate::wire::{flexible_id, lenient_string, parse_timestamp};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A comment in the thread of one post.
///
/// `owner_identity` is fixed at creation and never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: String,
    pub post_id: String,
    pub content: String,
    pub owner_identity: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Maps a backend record fetched for `post_id`.
    ///
    /// Records without an id cannot be edited or deleted and are skipped.
    pub fn from_record(record: CommentRecord, post_id: &str, now: DateTime<Utc>) -> Option<Self> {
        let id = record.id?;
        let owner_identity = record.user.and_then(|u| u.email).unwrap_or_default();
        let created_at = record
            .created_at
            .as_deref()
            .and_then(parse_timestamp)
            .unwrap_or(now);

        Some(Self {
            id,
            post_id: record.post_id.unwrap_or_else(|| post_id.to_string()),
            content: record.content.unwrap_or_default(),
            owner_identity,
            created_at,
        })
    }

    /// Creation time formatted for display.
    pub fn display_timestamp(&self) -> String {
        self.created_at.format("%b %-d, %Y %H:%M").to_string()
    }
}

/// A comment as the backend sends it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentRecord {
    #[serde(default, deserialize_with = "flexible_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "flexible_id")]
    pub post_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub content: Option<String>,
    #[serde(default)]
    pub user: Option<UserRef>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub created_at: Option<String>,
}

/// Whether the current session may be offered edit/delete controls.
///
/// Advisory only. The backend re-validates ownership on every mutation and its
/// answer wins.
pub fn can_mutate(comment: &Comment, session: &Session) -> bool {
    session
        .identity()
        .is_some_and(|identity| identity == comment.owner_identity)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(owner: &str, content: &str) -> Comment {
        Comment {
            id: "c1".to_string(),
            post_id: "p1".to_string(),
            content: content.to_string(),
            owner_identity: owner.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_owner_can_mutate() {
        let session = Session::authenticated("tok", "a@x.com");
        assert!(can_mutate(&comment("a@x.com", "first"), &session));
        assert!(can_mutate(&comment("a@x.com", "anything else"), &session));
    }

    #[test]
    fn test_other_identity_cannot_mutate() {
        let session = Session::authenticated("tok", "b@x.com");
        assert!(!can_mutate(&comment("a@x.com", "first"), &session));
    }

    #[test]
    fn test_anonymous_cannot_mutate_ownerless_comment() {
        assert!(!can_mutate(&comment("", "orphan"), &Session::empty()));
    }

    #[test]
    fn test_from_record_uses_bound_post_id() {
        let record: CommentRecord = serde_json::from_str(
            r#"{"id": 5, "content": "hi", "user": {"id": 2, "email": "a@x.com"}, "createdAt": "2024-01-01T08:30:00Z"}"#,
        )
        .unwrap();

        let mapped = Comment::from_record(record, "42", Utc::now()).unwrap();
        assert_eq!(mapped.id, "5");
        assert_eq!(mapped.post_id, "42");
        assert_eq!(mapped.owner_identity, "a@x.com");
        assert_eq!(mapped.display_timestamp(), "Jan 1, 2024 08:30");
    }

    #[test]
    fn test_from_record_tolerates_epoch_and_numeric_content() {
        let record: CommentRecord = serde_json::from_str(
            r#"{"id": 6, "content": 7, "user": {"email": "a@x.com"}, "createdAt": 1704103200000}"#,
        )
        .unwrap();

        let mapped = Comment::from_record(record, "42", Utc::now()).unwrap();
        assert_eq!(mapped.content, "7");
        assert_eq!(mapped.display_timestamp(), "Jan 1, 2024 10:00");
    }

    #[test]
    fn test_from_record_skips_records_without_id() {
        assert!(Comment::from_record(CommentRecord::default(), "42", Utc::now()).is_none());
    }
}
