//! Local post collection kept in sync with the backend.

use chrono::Utc;
use std::sync::Arc;
use vivid_core::error::{ClientError, Result};
use vivid_core::gateway::ContentGateway;
use vivid_core::post::{NewPost, Post};
use vivid_core::session::SessionStore;

/// Owns the in-memory post list.
///
/// `refresh` replaces the list wholesale. `create` is the only optimistic
/// path: the created post is prepended without waiting for a refresh.
pub struct PostCollectionController {
    gateway: Arc<dyn ContentGateway>,
    store: Arc<dyn SessionStore>,
    author_user_ref: String,
    posts: Vec<Post>,
}

impl PostCollectionController {
    /// `author_user_ref` is the backend user id new posts are attributed to.
    pub fn new(
        gateway: Arc<dyn ContentGateway>,
        store: Arc<dyn SessionStore>,
        author_user_ref: impl Into<String>,
    ) -> Self {
        Self {
            gateway,
            store,
            author_user_ref: author_user_ref.into(),
            posts: Vec::new(),
        }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Replaces the local collection with the backend's post list.
    ///
    /// Requires an active session; without one nothing is fetched and
    /// [`ClientError::SessionExpired`] is returned.
    pub async fn refresh(&mut self) -> Result<usize> {
        if !self.store.load().is_active() {
            return Err(ClientError::SessionExpired);
        }

        let records = self.gateway.list_posts().await?;
        let now = Utc::now();
        self.posts = records
            .into_iter()
            .map(|record| Post::from_record(record, now))
            .collect();

        tracing::debug!("[Posts] Refreshed {} posts", self.posts.len());
        Ok(self.posts.len())
    }

    /// Creates a post and prepends it to the local collection.
    pub async fn create(&mut self, title: &str, content: &str, tags: Vec<String>) -> Result<Post> {
        let title = title.trim();
        let content = content.trim();
        if title.is_empty() || content.is_empty() {
            return Err(ClientError::MissingFields);
        }

        let draft = NewPost {
            title: title.to_string(),
            content: content.to_string(),
            tags,
            author_user_ref: self.author_user_ref.clone(),
        };

        let mut record = self.gateway.create_post(&draft).await.map_err(|e| {
            tracing::warn!("[Posts] Create failed: {}", e);
            ClientError::CreateFailed(e.to_string())
        })?;

        if record.tags.is_none() {
            record.tags = Some(draft.tags);
        }

        let post = Post::from_record(record, Utc::now());
        self.posts.insert(0, post.clone());
        tracing::info!("[Posts] Created post {}", post.id);
        Ok(post)
    }

    /// Posts whose title, content or any tag contains `query`, ignoring case.
    ///
    /// Order is preserved; an empty query returns every post.
    pub fn search(&self, query: &str) -> Vec<&Post> {
        let needle = query.to_lowercase();
        self.posts.iter().filter(|p| p.matches(&needle)).collect()
    }

    /// The locally held post with `id`, or the backend's copy when absent.
    pub async fn open(&self, id: &str) -> Result<Post> {
        if let Some(post) = self.posts.iter().find(|p| p.id == id) {
            return Ok(post.clone());
        }

        let record = self.gateway.get_post(id).await?;
        Ok(Post::from_record(record, Utc::now()))
    }

    /// Drops the local collection, e.g. after logout.
    pub fn discard(&mut self) {
        self.posts.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockGateway, post_record};
    use vivid_core::gateway::GatewayError;
    use vivid_core::post::{DEFAULT_AUTHOR, PostRecord, UNTITLED};
    use vivid_infrastructure::InMemorySessionStore;

    fn signed_in(gateway: Arc<MockGateway>) -> PostCollectionController {
        let store = Arc::new(InMemorySessionStore::with_session("tok", "a@x.com"));
        PostCollectionController::new(gateway, store, "1")
    }

    async fn loaded(gateway: Arc<MockGateway>) -> PostCollectionController {
        gateway.list_posts.push(Ok(vec![
            post_record("1", "Rust ownership", "Borrowing rules", &["rust"]),
            post_record("2", "Gardening", "Tomatoes in spring", &["outdoors"]),
            post_record("3", "Async in practice", "Futures and RUST runtimes", &[]),
        ]));
        let mut posts = signed_in(gateway);
        posts.refresh().await.unwrap();
        posts
    }

    fn ids(posts: &[&Post]) -> Vec<String> {
        posts.iter().map(|p| p.id.clone()).collect()
    }

    #[tokio::test]
    async fn test_refresh_replaces_collection() {
        let gateway = Arc::new(MockGateway::new());
        let mut posts = loaded(gateway.clone()).await;
        assert_eq!(posts.posts().len(), 3);

        gateway.list_posts.push(Ok(vec![PostRecord::default()]));
        assert_eq!(posts.refresh().await.unwrap(), 1);

        let only = &posts.posts()[0];
        assert_eq!(only.title, UNTITLED);
        assert_eq!(only.author, DEFAULT_AUTHOR);
        assert!(only.id.starts_with("local-"));
    }

    #[tokio::test]
    async fn test_refresh_without_session_skips_gateway() {
        let gateway = Arc::new(MockGateway::new());
        let mut posts = PostCollectionController::new(
            gateway.clone(),
            Arc::new(InMemorySessionStore::new()),
            "1",
        );

        assert_eq!(posts.refresh().await.unwrap_err(), ClientError::SessionExpired);
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_last_known_good() {
        let gateway = Arc::new(MockGateway::new());
        let mut posts = loaded(gateway.clone()).await;

        gateway.list_posts.push(Err(GatewayError::transport("reset")));
        let err = posts.refresh().await.unwrap_err();

        assert_eq!(err, ClientError::Transport("reset".to_string()));
        assert_eq!(posts.posts().len(), 3);
    }

    #[tokio::test]
    async fn test_create_with_empty_title_makes_no_call() {
        let gateway = Arc::new(MockGateway::new());
        let mut posts = loaded(gateway.clone()).await;
        let before = posts.posts().to_vec();
        let calls_before = gateway.calls().len();

        let err = posts.create("", "hello", Vec::new()).await.unwrap_err();

        assert_eq!(err, ClientError::MissingFields);
        assert_eq!(gateway.calls().len(), calls_before);
        assert_eq!(posts.posts(), before.as_slice());
    }

    #[tokio::test]
    async fn test_create_rejects_whitespace_content() {
        let gateway = Arc::new(MockGateway::new());
        let mut posts = signed_in(gateway.clone());

        let err = posts.create("Title", "   ", Vec::new()).await.unwrap_err();
        assert_eq!(err, ClientError::MissingFields);
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_create_prepends_backend_post() {
        let gateway = Arc::new(MockGateway::new());
        let mut posts = loaded(gateway.clone()).await;
        gateway
            .create_post
            .push(Ok(post_record("9", "New", "Fresh content", &["news"])));

        let created = posts
            .create("  New ", " Fresh content ", vec!["news".to_string()])
            .await
            .unwrap();

        assert_eq!(created.id, "9");
        assert_eq!(posts.posts()[0], created);
        assert_eq!(posts.posts().len(), 4);
        assert_eq!(gateway.calls().last().unwrap(), "create_post New by 1");
    }

    #[tokio::test]
    async fn test_create_keeps_submitted_tags_when_response_omits_them() {
        let gateway = Arc::new(MockGateway::new());
        gateway.create_post.push(Ok(PostRecord {
            id: Some("9".to_string()),
            title: Some("New".to_string()),
            ..Default::default()
        }));
        let mut posts = signed_in(gateway);

        let created = posts
            .create("New", "Body", vec!["a".to_string(), "b".to_string()])
            .await
            .unwrap();
        assert_eq!(created.tags, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_create_failure_leaves_collection_unchanged() {
        let gateway = Arc::new(MockGateway::new());
        let mut posts = loaded(gateway.clone()).await;
        gateway.create_post.push(Err(GatewayError::RequestFailed {
            status: 500,
            message: None,
        }));

        let err = posts.create("T", "C", Vec::new()).await.unwrap_err();

        assert!(matches!(err, ClientError::CreateFailed(_)));
        assert_eq!(posts.posts().len(), 3);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_and_ordered() {
        let posts = loaded(Arc::new(MockGateway::new())).await;

        assert_eq!(ids(&posts.search("rust")), vec!["1", "3"]);
        assert_eq!(ids(&posts.search("OUTDOORS")), vec!["2"]);
        assert_eq!(ids(&posts.search("tomatoes")), vec!["2"]);
        assert!(posts.search("kubernetes").is_empty());
    }

    #[tokio::test]
    async fn test_empty_search_returns_everything() {
        let posts = loaded(Arc::new(MockGateway::new())).await;
        assert_eq!(ids(&posts.search("")), vec!["1", "2", "3"]);
    }

    #[tokio::test]
    async fn test_open_prefers_local_post() {
        let gateway = Arc::new(MockGateway::new());
        let posts = loaded(gateway.clone()).await;

        let post = posts.open("2").await.unwrap();
        assert_eq!(post.title, "Gardening");
        assert!(!gateway.calls().iter().any(|c| c.starts_with("get_post")));
    }

    #[tokio::test]
    async fn test_open_fetches_missing_post() {
        let gateway = Arc::new(MockGateway::new());
        let posts = signed_in(gateway.clone());
        gateway.get_post.push(Err(GatewayError::NotFound));

        assert_eq!(posts.open("77").await.unwrap_err(), ClientError::NotFound);
        assert_eq!(gateway.calls(), vec!["get_post 77"]);
    }

    #[tokio::test]
    async fn test_discard_empties_collection() {
        let mut posts = loaded(Arc::new(MockGateway::new())).await;
        posts.discard();
        assert!(posts.posts().is_empty());
    }
}
