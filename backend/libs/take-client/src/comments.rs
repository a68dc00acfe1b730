//! Per-post comment thread.
//!
//! Comments load lazily, once per post, when first needed. Appending is
//! optimistic: the comment becomes visible immediately under a locally minted
//! id, then reconciles with the store's acknowledgment. If the remote write
//! fails the pending comment is reverted — phantom comments do not survive a
//! failed submission.

use crate::error::Result;
use crate::store::TakeStore;
use chrono::Utc;
use take_core::Comment;
use uuid::Uuid;

pub struct CommentThread {
    post_id: Uuid,
    comments: Vec<Comment>,
    loaded: bool,
}

impl CommentThread {
    pub fn new(post_id: Uuid) -> Self {
        Self {
            post_id,
            comments: Vec::new(),
            loaded: false,
        }
    }

    pub fn post_id(&self) -> Uuid {
        self.post_id
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Fetch the thread on first call; later calls serve the local list.
    pub async fn load<S: TakeStore + ?Sized>(&mut self, store: &S) -> Result<&[Comment]> {
        if !self.loaded {
            self.comments = store.fetch_comments(self.post_id).await?;
            self.loaded = true;
        }
        Ok(&self.comments)
    }

    /// Append a comment optimistically, then submit it. On acknowledgment the
    /// pending entry adopts the store's id and timestamp; on failure it is
    /// removed and the error propagates.
    pub async fn append<S: TakeStore + ?Sized>(
        &mut self,
        store: &S,
        content: &str,
    ) -> Result<Comment> {
        let pending_id = self.push_pending(content);
        match store.submit_comment(self.post_id, content).await {
            Ok(acked) => {
                self.resolve_pending(pending_id, acked.clone());
                Ok(acked)
            }
            Err(err) => {
                self.revert_pending(pending_id);
                Err(err)
            }
        }
    }

    /// Append a reply to one of this thread's comments. Replies apply only
    /// after acknowledgment; the updated comment replaces the local one.
    pub async fn reply<S: TakeStore + ?Sized>(
        &mut self,
        store: &S,
        comment_id: Uuid,
        content: &str,
    ) -> Result<Comment> {
        let updated = store.submit_reply(comment_id, content).await?;
        if let Some(slot) = self.comments.iter_mut().find(|c| c.id == comment_id) {
            *slot = updated.clone();
        }
        Ok(updated)
    }

    /// Make the comment visible locally before any remote acknowledgment.
    fn push_pending(&mut self, content: &str) -> Uuid {
        let pending = Comment {
            id: Uuid::new_v4(),
            post_id: self.post_id,
            content: content.to_string(),
            replies: Vec::new(),
            created_at: Utc::now(),
        };
        let id = pending.id;
        self.comments.push(pending);
        id
    }

    fn resolve_pending(&mut self, pending_id: Uuid, acked: Comment) {
        if let Some(slot) = self.comments.iter_mut().find(|c| c.id == pending_id) {
            *slot = acked;
        }
    }

    fn revert_pending(&mut self, pending_id: Uuid) {
        self.comments.retain(|c| c.id != pending_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use crate::store::MockTakeStore;
    use mockall::predicate::eq;

    fn remote_comment(post_id: Uuid, content: &str) -> Comment {
        Comment {
            id: Uuid::new_v4(),
            post_id,
            content: content.to_string(),
            replies: Vec::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_pending_comment_is_visible_before_acknowledgment() {
        let mut thread = CommentThread::new(Uuid::new_v4());
        let pending_id = thread.push_pending("hello");
        assert_eq!(thread.comments().len(), 1);
        assert_eq!(thread.comments()[0].content, "hello");
        assert_eq!(thread.comments()[0].id, pending_id);
    }

    #[tokio::test]
    async fn test_load_fetches_once_and_caches() {
        let post_id = Uuid::new_v4();
        let mut store = MockTakeStore::new();
        store
            .expect_fetch_comments()
            .with(eq(post_id))
            .times(1)
            .returning(move |id| Ok(vec![remote_comment(id, "first!")]));

        let mut thread = CommentThread::new(post_id);
        assert!(!thread.is_loaded());
        assert_eq!(thread.load(&store).await.unwrap().len(), 1);
        // second load serves the cached list; the mock would panic otherwise
        assert_eq!(thread.load(&store).await.unwrap().len(), 1);
        assert!(thread.is_loaded());
    }

    #[tokio::test]
    async fn test_acknowledged_append_adopts_store_identity() {
        let post_id = Uuid::new_v4();
        let acked = remote_comment(post_id, "hello");
        let acked_id = acked.id;

        let mut store = MockTakeStore::new();
        store
            .expect_submit_comment()
            .times(1)
            .returning(move |_, content| {
                let mut c = acked.clone();
                c.content = content.to_string();
                Ok(c)
            });

        let mut thread = CommentThread::new(post_id);
        let committed = thread.append(&store, "hello").await.unwrap();
        assert_eq!(committed.id, acked_id);
        assert_eq!(thread.comments().len(), 1);
        assert_eq!(thread.comments()[0].id, acked_id);
        assert_eq!(thread.comments()[0].content, "hello");
    }

    #[tokio::test]
    async fn test_failed_append_is_reverted() {
        let post_id = Uuid::new_v4();
        let mut store = MockTakeStore::new();
        store
            .expect_submit_comment()
            .times(1)
            .returning(move |id, _| Err(ClientError::NotFound(id)));

        let mut thread = CommentThread::new(post_id);
        let err = thread.append(&store, "lost forever").await.unwrap_err();
        assert!(matches!(err, ClientError::NotFound(_)));
        // the optimistic entry does not outlive the failure
        assert!(thread.comments().is_empty());
    }

    #[tokio::test]
    async fn test_reply_updates_the_owning_comment() {
        let post_id = Uuid::new_v4();
        let existing = remote_comment(post_id, "original");
        let comment_id = existing.id;

        let mut store = MockTakeStore::new();
        {
            let existing = existing.clone();
            store
                .expect_fetch_comments()
                .returning(move |_| Ok(vec![existing.clone()]));
        }
        store
            .expect_submit_reply()
            .with(eq(comment_id), eq("me too"))
            .times(1)
            .returning(move |_, content| {
                let mut updated = existing.clone();
                updated.replies.push(take_core::Reply {
                    content: content.to_string(),
                    created_at: Utc::now(),
                });
                Ok(updated)
            });

        let mut thread = CommentThread::new(post_id);
        thread.load(&store).await.unwrap();
        let updated = thread.reply(&store, comment_id, "me too").await.unwrap();
        assert_eq!(updated.replies.len(), 1);
        assert_eq!(thread.comments()[0].replies.len(), 1);
    }
}
