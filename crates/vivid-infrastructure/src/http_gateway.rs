//! HTTP implementation of the content gateway.
//!
//! Each call is a single attempt with the transport's default timeouts. The
//! bearer token is read from the session store on every request, so a login or
//! logout takes effect on the next call without rebuilding the gateway.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::sync::Arc;
use vivid_core::comment::CommentRecord;
use vivid_core::config::ClientConfig;
use vivid_core::gateway::{ContentGateway, GatewayError, GatewayResult};
use vivid_core::post::{NewPost, PostRecord};
use vivid_core::session::SessionStore;
use vivid_core::user::UserRecord;

/// Gateway talking JSON over HTTP to the blog backend.
#[derive(Clone)]
pub struct HttpContentGateway {
    client: Client,
    api_base_url: String,
    comments_base_url: String,
    session: Arc<dyn SessionStore>,
}

impl HttpContentGateway {
    pub fn new(config: &ClientConfig, session: Arc<dyn SessionStore>) -> Self {
        Self {
            client: Client::new(),
            api_base_url: config.api_base_url.clone(),
            comments_base_url: config.comments_base_url.clone(),
            session,
        }
    }

    fn api_url(&self, segments: &[&str]) -> GatewayResult<Url> {
        endpoint(&self.api_base_url, segments)
    }

    fn comments_url(&self, segments: &[&str]) -> GatewayResult<Url> {
        endpoint(&self.comments_base_url, segments)
    }

    /// Attaches the bearer credential, sends, and classifies the status.
    async fn send(&self, request: RequestBuilder) -> GatewayResult<Response> {
        let request = match self.session.load().token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request
            .send()
            .await
            .map_err(|e| GatewayError::transport(format!("Request failed: {}", e)))?;

        let status = response.status();
        tracing::debug!("[Gateway] {} {}", status.as_u16(), response.url());

        if status.is_success() {
            return Ok(response);
        }

        let body = response.bytes().await.unwrap_or_default();
        Err(classify_failure(status, &body))
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> GatewayResult<T> {
        let body = response
            .bytes()
            .await
            .map_err(|e| GatewayError::transport(format!("Failed to read response body: {}", e)))?;

        serde_json::from_slice(&body)
            .map_err(|e| GatewayError::transport(format!("Invalid JSON response: {}", e)))
    }

    /// Reads a JSON array. A non-array body is an empty list; entries that do
    /// not fit the record shape are skipped.
    async fn read_list<T: DeserializeOwned>(response: Response) -> GatewayResult<Vec<T>> {
        let value: Value = Self::read_json(response).await?;

        let Value::Array(items) = value else {
            tracing::warn!("[Gateway] Expected a JSON array, treating response as empty");
            return Ok(Vec::new());
        };

        Ok(items
            .into_iter()
            .filter_map(|item| match serde_json::from_value(item) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!("[Gateway] Skipping malformed record: {}", e);
                    None
                }
            })
            .collect())
    }
}

/// Appends `segments` to `base`, percent-encoding each one, so an id holding
/// `/`, `?` or `#` stays a single path segment.
pub fn endpoint(base: &str, segments: &[&str]) -> GatewayResult<Url> {
    let mut url = Url::parse(base)
        .map_err(|e| GatewayError::transport(format!("Invalid base URL {}: {}", base, e)))?;

    url.path_segments_mut()
        .map_err(|_| GatewayError::transport(format!("Base URL {} cannot hold a path", base)))?
        .pop_if_empty()
        .extend(segments);

    Ok(url)
}

/// Maps a non-2xx status to the gateway taxonomy.
pub fn classify_failure(status: StatusCode, body: &[u8]) -> GatewayError {
    match status {
        StatusCode::UNAUTHORIZED => GatewayError::Unauthenticated,
        StatusCode::FORBIDDEN => GatewayError::Forbidden,
        StatusCode::NOT_FOUND => GatewayError::NotFound,
        _ => GatewayError::RequestFailed {
            status: status.as_u16(),
            message: error_message(body),
        },
    }
}

/// Extracts `message` from a JSON error body.
fn error_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    match value.get("message")? {
        Value::String(message) if !message.is_empty() => Some(message.clone()),
        _ => None,
    }
}

#[async_trait]
impl ContentGateway for HttpContentGateway {
    async fn list_users(&self) -> GatewayResult<Vec<UserRecord>> {
        let response = self.send(self.client.get(self.api_url(&["users"])?)).await?;
        Self::read_list(response).await
    }

    async fn create_user(&self, email: &str, password: &str) -> GatewayResult<UserRecord> {
        let request = self
            .client
            .post(self.api_url(&["users"])?)
            .json(&json!({ "email": email, "password": password }));

        match self.send(request).await {
            Ok(response) => Self::read_json(response).await,
            Err(GatewayError::RequestFailed { status: 409, .. }) => {
                Err(GatewayError::EmailAlreadyRegistered)
            }
            Err(e) => Err(e),
        }
    }

    async fn list_posts(&self) -> GatewayResult<Vec<PostRecord>> {
        let response = self.send(self.client.get(self.api_url(&["posts"])?)).await?;
        Self::read_list(response).await
    }

    async fn create_post(&self, post: &NewPost) -> GatewayResult<PostRecord> {
        let request = self
            .client
            .post(self.api_url(&["posts"])?)
            .json(&post.to_payload());
        let response = self.send(request).await?;
        Self::read_json(response).await
    }

    async fn get_post(&self, id: &str) -> GatewayResult<PostRecord> {
        let response = self
            .send(self.client.get(self.api_url(&["posts", id])?))
            .await?;
        Self::read_json(response).await
    }

    async fn list_comments_for_post(&self, post_id: &str) -> GatewayResult<Vec<CommentRecord>> {
        let url = self.comments_url(&["comments", "post", post_id])?;
        let response = self.send(self.client.get(url)).await?;
        Self::read_list(response).await
    }

    async fn create_comment(&self, post_id: &str, content: &str) -> GatewayResult<()> {
        let request = self
            .client
            .post(self.comments_url(&["comments"])?)
            .json(&json!({ "postId": post_id, "content": content }));
        self.send(request).await?;
        Ok(())
    }

    async fn update_comment(&self, id: &str, content: &str) -> GatewayResult<()> {
        let request = self
            .client
            .put(self.comments_url(&["comments", id])?)
            .json(&json!({ "content": content }));
        self.send(request).await?;
        Ok(())
    }

    async fn delete_comment(&self, id: &str) -> GatewayResult<()> {
        let url = self.comments_url(&["comments", id])?;
        let response = self.send(self.client.delete(url)).await?;

        // Deletion is confirmed only by 204 No Content.
        let status = response.status();
        if status != StatusCode::NO_CONTENT {
            let body = response.bytes().await.unwrap_or_default();
            return Err(GatewayError::RequestFailed {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_auth_statuses() {
        assert_eq!(
            classify_failure(StatusCode::UNAUTHORIZED, b""),
            GatewayError::Unauthenticated
        );
        assert_eq!(
            classify_failure(StatusCode::FORBIDDEN, b"{}"),
            GatewayError::Forbidden
        );
        assert_eq!(
            classify_failure(StatusCode::NOT_FOUND, b"<html>"),
            GatewayError::NotFound
        );
    }

    #[test]
    fn test_endpoint_encodes_each_segment() {
        let url = endpoint("http://localhost:8080", &["posts", "a/b?c#d"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/posts/a%2Fb%3Fc%23d");

        let url = endpoint("http://host/api", &["comments", "post", "7"]).unwrap();
        assert_eq!(url.as_str(), "http://host/api/comments/post/7");

        assert!(matches!(
            endpoint("not a url", &["posts"]),
            Err(GatewayError::Transport(_))
        ));
    }

    #[test]
    fn test_classify_other_status_keeps_backend_message() {
        let err = classify_failure(
            StatusCode::BAD_REQUEST,
            br#"{"message": "password too short"}"#,
        );
        assert_eq!(
            err,
            GatewayError::RequestFailed {
                status: 400,
                message: Some("password too short".to_string()),
            }
        );

        let err = classify_failure(StatusCode::INTERNAL_SERVER_ERROR, b"oops");
        assert_eq!(
            err,
            GatewayError::RequestFailed {
                status: 500,
                message: None,
            }
        );
    }
}
