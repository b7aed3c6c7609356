//! Scripted gateway used by the controller tests.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use vivid_core::comment::CommentRecord;
use vivid_core::gateway::{ContentGateway, GatewayResult};
use vivid_core::post::{NewPost, PostRecord};
use vivid_core::user::UserRecord;

/// Responses for one operation, consumed in order. Once the queue is drained
/// the last consumed response repeats; with none scripted the operation
/// succeeds with a default value.
pub struct Script<T> {
    responses: Mutex<VecDeque<GatewayResult<T>>>,
    last: Mutex<Option<GatewayResult<T>>>,
}

impl<T: Clone + Default> Script<T> {
    fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            last: Mutex::new(None),
        }
    }

    pub fn push(&self, response: GatewayResult<T>) {
        self.responses.lock().unwrap().push_back(response);
    }

    fn next(&self) -> GatewayResult<T> {
        let mut last = self.last.lock().unwrap();
        if let Some(response) = self.responses.lock().unwrap().pop_front() {
            *last = Some(response);
        }
        last.clone().unwrap_or_else(|| Ok(T::default()))
    }
}

/// Gateway that records every call and replays scripted responses.
pub struct MockGateway {
    calls: Mutex<Vec<String>>,
    pub list_users: Script<Vec<UserRecord>>,
    pub create_user: Script<UserRecord>,
    pub list_posts: Script<Vec<PostRecord>>,
    pub create_post: Script<PostRecord>,
    pub get_post: Script<PostRecord>,
    pub list_comments: Script<Vec<CommentRecord>>,
    pub create_comment: Script<()>,
    pub update_comment: Script<()>,
    pub delete_comment: Script<()>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            list_users: Script::new(),
            create_user: Script::new(),
            list_posts: Script::new(),
            create_post: Script::new(),
            get_post: Script::new(),
            list_comments: Script::new(),
            create_comment: Script::new(),
            update_comment: Script::new(),
            delete_comment: Script::new(),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ContentGateway for MockGateway {
    async fn list_users(&self) -> GatewayResult<Vec<UserRecord>> {
        self.record("list_users".to_string());
        self.list_users.next()
    }

    async fn create_user(&self, email: &str, password: &str) -> GatewayResult<UserRecord> {
        self.record(format!("create_user {} {}", email, password));
        self.create_user.next()
    }

    async fn list_posts(&self) -> GatewayResult<Vec<PostRecord>> {
        self.record("list_posts".to_string());
        self.list_posts.next()
    }

    async fn create_post(&self, post: &NewPost) -> GatewayResult<PostRecord> {
        self.record(format!("create_post {} by {}", post.title, post.author_user_ref));
        self.create_post.next()
    }

    async fn get_post(&self, id: &str) -> GatewayResult<PostRecord> {
        self.record(format!("get_post {}", id));
        self.get_post.next()
    }

    async fn list_comments_for_post(&self, post_id: &str) -> GatewayResult<Vec<CommentRecord>> {
        self.record(format!("list_comments {}", post_id));
        self.list_comments.next()
    }

    async fn create_comment(&self, post_id: &str, content: &str) -> GatewayResult<()> {
        self.record(format!("create_comment {} {}", post_id, content));
        self.create_comment.next()
    }

    async fn update_comment(&self, id: &str, content: &str) -> GatewayResult<()> {
        self.record(format!("update_comment {} {}", id, content));
        self.update_comment.next()
    }

    async fn delete_comment(&self, id: &str) -> GatewayResult<()> {
        self.record(format!("delete_comment {}", id));
        self.delete_comment.next()
    }
}

pub fn user(email: &str, password: &str) -> UserRecord {
    UserRecord {
        email: Some(email.to_string()),
        password: Some(password.to_string()),
        ..Default::default()
    }
}

pub fn post_record(id: &str, title: &str, content: &str, tags: &[&str]) -> PostRecord {
    PostRecord {
        id: Some(id.to_string()),
        title: Some(title.to_string()),
        content: Some(content.to_string()),
        tags: Some(tags.iter().map(|t| t.to_string()).collect()),
        ..Default::default()
    }
}

pub fn comment_record(id: &str, owner: &str, content: &str) -> CommentRecord {
    CommentRecord {
        id: Some(id.to_string()),
        content: Some(content.to_string()),
        user: Some(vivid_core::user::UserRef {
            email: Some(owner.to_string()),
            ..Default::default()
        }),
        created_at: Some("2024-05-01T09:00:00Z".to_string()),
        ..Default::default()
    }
}
