//! Remote-store seam.
//!
//! The backing store is an external collaborator; this trait is the whole
//! surface the session core depends on, so tests mock it and the HTTP
//! implementation stays a thin translation layer. The identity token is
//! passed explicitly on the calls that need one — nothing reads it ambiently.

use crate::error::{ClientError, Result};
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use reqwest::StatusCode;
use take_core::{Comment, Post, SortStrategy, VoteDirection, VoteReceipt};
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TakeStore: Send + Sync {
    /// One page of posts for a strategy. An empty page signals end of data
    /// for that strategy, not an error.
    async fn fetch_feed(
        &self,
        strategy: SortStrategy,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Post>>;

    async fn fetch_post(&self, post_id: Uuid) -> Result<Post>;

    /// Apply one vote action. The store runs the same transition table
    /// server-side, so the receipt is authoritative for the tallies.
    async fn cast_vote(
        &self,
        post_id: Uuid,
        voter: Uuid,
        direction: VoteDirection,
    ) -> Result<VoteReceipt>;

    async fn fetch_comments(&self, post_id: Uuid) -> Result<Vec<Comment>>;

    async fn submit_comment(&self, post_id: Uuid, content: &str) -> Result<Comment>;

    /// Append a reply to a comment; returns the updated comment.
    async fn submit_reply(&self, comment_id: Uuid, content: &str) -> Result<Comment>;
}

/// HTTP implementation of [`TakeStore`] against the take-service API.
pub struct HttpTakeStore {
    base_url: String,
    http: reqwest::Client,
}

impl HttpTakeStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url, http }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// The service expects the identity as `Authorization: Basic b64(token)`.
    fn identity_header(voter: Uuid) -> String {
        format!(
            "Basic {}",
            general_purpose::STANDARD.encode(voter.to_string())
        )
    }

    async fn expect_ok(resp: reqwest::Response, subject: Uuid) -> Result<reqwest::Response> {
        match resp.status() {
            status if status.is_success() => Ok(resp),
            StatusCode::NOT_FOUND => Err(ClientError::NotFound(subject)),
            StatusCode::UNAUTHORIZED => {
                Err(ClientError::InvalidIdentity("rejected by store".into()))
            }
            status => Err(ClientError::Remote {
                status: status.as_u16(),
                message: resp.text().await.unwrap_or_default(),
            }),
        }
    }
}

#[async_trait]
impl TakeStore for HttpTakeStore {
    async fn fetch_feed(
        &self,
        strategy: SortStrategy,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Post>> {
        let resp = self
            .http
            .get(self.url("/posts"))
            .query(&[
                ("sort", strategy.as_str().to_string()),
                ("offset", offset.to_string()),
                ("limit", limit.to_string()),
            ])
            .send()
            .await?;
        Ok(Self::expect_ok(resp, Uuid::nil()).await?.json().await?)
    }

    async fn fetch_post(&self, post_id: Uuid) -> Result<Post> {
        let resp = self
            .http
            .get(self.url(&format!("/posts/{post_id}")))
            .send()
            .await?;
        Ok(Self::expect_ok(resp, post_id).await?.json().await?)
    }

    async fn cast_vote(
        &self,
        post_id: Uuid,
        voter: Uuid,
        direction: VoteDirection,
    ) -> Result<VoteReceipt> {
        let resp = self
            .http
            .post(self.url(&format!("/posts/{post_id}/votes")))
            .header("Authorization", Self::identity_header(voter))
            .json(&serde_json::json!({ "direction": direction }))
            .send()
            .await?;
        Ok(Self::expect_ok(resp, post_id).await?.json().await?)
    }

    async fn fetch_comments(&self, post_id: Uuid) -> Result<Vec<Comment>> {
        let resp = self
            .http
            .get(self.url(&format!("/posts/{post_id}/comments")))
            .send()
            .await?;
        Ok(Self::expect_ok(resp, post_id).await?.json().await?)
    }

    async fn submit_comment(&self, post_id: Uuid, content: &str) -> Result<Comment> {
        let resp = self
            .http
            .post(self.url(&format!("/posts/{post_id}/comments")))
            .json(&serde_json::json!({ "content": content }))
            .send()
            .await?;
        Ok(Self::expect_ok(resp, post_id).await?.json().await?)
    }

    async fn submit_reply(&self, comment_id: Uuid, content: &str) -> Result<Comment> {
        let resp = self
            .http
            .post(self.url(&format!("/comments/{comment_id}/replies")))
            .json(&serde_json::json!({ "content": content }))
            .send()
            .await?;
        Ok(Self::expect_ok(resp, comment_id).await?.json().await?)
    }
}
