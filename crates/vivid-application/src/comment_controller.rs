//! Comment thread of a single post.
//!
//! Comments are never appended locally. Authorship and timestamps are assigned
//! by the backend, so every successful mutation is followed by a full refresh.

use chrono::Utc;
use std::sync::Arc;
use vivid_core::comment::{self, Comment};
use vivid_core::error::{ClientError, Result};
use vivid_core::gateway::ContentGateway;
use vivid_core::session::SessionStore;

/// Which comment is being edited, and the text typed so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditCursor {
    pub comment_id: String,
    pub draft: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The user declined; nothing was sent.
    Cancelled,
}

/// Explicit user confirmation for destructive actions.
pub trait Confirmation {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirmation for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Owns the comments of one post plus the local edit cursor.
pub struct CommentThreadController {
    gateway: Arc<dyn ContentGateway>,
    store: Arc<dyn SessionStore>,
    post_id: String,
    comments: Vec<Comment>,
    editing: Option<EditCursor>,
}

impl CommentThreadController {
    pub fn new(
        gateway: Arc<dyn ContentGateway>,
        store: Arc<dyn SessionStore>,
        post_id: impl Into<String>,
    ) -> Self {
        Self {
            gateway,
            store,
            post_id: post_id.into(),
            comments: Vec::new(),
            editing: None,
        }
    }

    pub fn post_id(&self) -> &str {
        &self.post_id
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn editing(&self) -> Option<&EditCursor> {
        self.editing.as_ref()
    }

    /// Binds the controller to another post. Prior comments and any edit in
    /// progress are dropped; call [`refresh`](Self::refresh) afterwards.
    pub fn rescope(&mut self, post_id: impl Into<String>) {
        self.post_id = post_id.into();
        self.comments.clear();
        self.editing = None;
    }

    /// Replaces the local comments with the backend's list for the bound post.
    ///
    /// A 401 is reported as [`ClientError::SessionExpired`]; check
    /// [`ClientError::requires_login`] to redirect.
    pub async fn refresh(&mut self) -> Result<usize> {
        let records = self
            .gateway
            .list_comments_for_post(&self.post_id)
            .await
            .map_err(|e| {
                tracing::debug!("[Comments] Refresh of post {} failed: {}", self.post_id, e);
                ClientError::from(e)
            })?;

        let now = Utc::now();
        self.comments = records
            .into_iter()
            .filter_map(|record| Comment::from_record(record, &self.post_id, now))
            .collect();

        tracing::debug!(
            "[Comments] Post {} has {} comments",
            self.post_id,
            self.comments.len()
        );
        Ok(self.comments.len())
    }

    /// Posts a comment on the bound post, then refreshes.
    pub async fn create(&mut self, content: &str) -> Result<usize> {
        let content = content.trim();
        if content.is_empty() || !self.store.load().is_active() {
            return Err(ClientError::MissingContentOrAuth);
        }

        self.gateway.create_comment(&self.post_id, content).await?;
        tracing::info!("[Comments] Added comment to post {}", self.post_id);
        self.refresh().await
    }

    /// Starts editing `comment_id`, seeding the draft with its current text.
    ///
    /// Returns false if the comment is not in the local thread.
    pub fn begin_edit(&mut self, comment_id: &str) -> bool {
        let Some(comment) = self.comments.iter().find(|c| c.id == comment_id) else {
            return false;
        };

        self.editing = Some(EditCursor {
            comment_id: comment.id.clone(),
            draft: comment.content.clone(),
        });
        true
    }

    pub fn set_draft(&mut self, draft: impl Into<String>) {
        if let Some(cursor) = self.editing.as_mut() {
            cursor.draft = draft.into();
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Sends the edited text.
    ///
    /// On `NotOwner` (403) the cursor stays active so the user can cancel. On
    /// success the cursor is cleared and the thread refreshed.
    pub async fn save_edit(&mut self, comment_id: &str, new_content: &str) -> Result<usize> {
        let new_content = new_content.trim();
        if new_content.is_empty() {
            return Err(ClientError::MissingContentOrAuth);
        }

        if let Err(e) = self.gateway.update_comment(comment_id, new_content).await {
            let err = ClientError::from(e);
            tracing::info!("[Comments] Edit of {} rejected: {}", comment_id, err);
            return Err(err);
        }

        if self
            .editing
            .as_ref()
            .is_some_and(|cursor| cursor.comment_id == comment_id)
        {
            self.editing = None;
        }
        self.refresh().await
    }

    /// Deletes a comment after `confirmation` approves.
    pub async fn delete(
        &mut self,
        comment_id: &str,
        confirmation: &dyn Confirmation,
    ) -> Result<DeleteOutcome> {
        if !confirmation.confirm("Delete this comment? This cannot be undone.") {
            return Ok(DeleteOutcome::Cancelled);
        }

        if let Err(e) = self.gateway.delete_comment(comment_id).await {
            let err = ClientError::from(e);
            tracing::info!("[Comments] Delete of {} rejected: {}", comment_id, err);
            return Err(err);
        }

        tracing::info!("[Comments] Deleted comment {}", comment_id);
        if self.editing.as_ref().is_some_and(|c| c.comment_id == comment_id) {
            self.editing = None;
        }
        self.refresh().await?;
        Ok(DeleteOutcome::Deleted)
    }

    /// Whether edit/delete controls should be offered for `comment`.
    ///
    /// The backend still decides; a 403 overrides a true here.
    pub fn can_mutate(&self, comment: &Comment) -> bool {
        comment::can_mutate(comment, &self.store.load())
    }
}
