//! Session facade.
//!
//! One logical actor per client: owns the identity token, the vote ledger,
//! the feed cursor and the comment threads, and threads the identity through
//! every call that needs it — nothing reads it ambiently. The ledger is the
//! only place tally sets get mutated; the feed holds ids and renders through
//! the ledger, so a post shown in two places always reads one entry.

use crate::comments::CommentThread;
use crate::error::{ClientError, Result};
use crate::feed::FeedSession;
use crate::heat;
use crate::identity::IdentityProvider;
use crate::ledger::{VoteLedger, VoteOutcome};
use crate::store::TakeStore;
use std::collections::HashMap;
use take_core::{Comment, Post, SortStrategy, VoteDirection};
use uuid::Uuid;

pub struct TakeSession<S: TakeStore> {
    store: S,
    identity: Uuid,
    ledger: VoteLedger,
    feed: FeedSession,
    threads: HashMap<Uuid, CommentThread>,
}

impl<S: TakeStore> TakeSession<S> {
    pub fn new(store: S, identity: Uuid, strategy: SortStrategy, page_size: usize) -> Self {
        Self {
            store,
            identity,
            ledger: VoteLedger::new(),
            feed: FeedSession::new(strategy, page_size),
            threads: HashMap::new(),
        }
    }

    /// Build a session with the client's durable identity token.
    pub fn open(
        store: S,
        provider: &IdentityProvider,
        strategy: SortStrategy,
        page_size: usize,
    ) -> Result<Self> {
        let identity = provider.get_or_create()?;
        Ok(Self::new(store, identity, strategy, page_size))
    }

    pub fn identity(&self) -> Uuid {
        self.identity
    }

    pub fn feed(&self) -> &FeedSession {
        &self.feed
    }

    pub fn ledger(&self) -> &VoteLedger {
        &self.ledger
    }

    /// Seed the feed from a deep link: fetch the addressed post, pin it as
    /// the anchor, and restart pagination beneath it.
    pub async fn open_with_anchor(&mut self, post_id: Uuid) -> Result<()> {
        let post = self.store.fetch_post(post_id).await?;
        self.feed = FeedSession::with_anchor(self.feed.strategy(), self.feed.page_size(), post.id);
        self.ledger.insert(post);
        Ok(())
    }

    /// Fetch and fold in the next feed page. Returns how many posts became
    /// visible; zero with an exhausted feed means end of data.
    pub async fn load_more(&mut self) -> Result<usize> {
        let accepted = self.feed.advance(&self.store).await?;
        let count = accepted.len();
        for post in accepted {
            self.ledger.insert(post);
        }
        Ok(count)
    }

    /// Switch ordering and fetch the first page of the new strategy.
    pub async fn switch_strategy(&mut self, strategy: SortStrategy) -> Result<usize> {
        self.feed.switch(strategy);
        self.load_more().await
    }

    /// The visible feed, in order, resolved through the ledger.
    pub fn visible(&self) -> Vec<&Post> {
        self.feed
            .order()
            .iter()
            .filter_map(|id| self.ledger.get(*id))
            .collect()
    }

    /// Apply one vote action: predict locally through the transition table,
    /// then submit. A transient remote failure keeps the local prediction
    /// (deliberately — the next full fetch reconciles) and surfaces the error
    /// so the caller can notify.
    pub async fn vote(&mut self, post_id: Uuid, direction: VoteDirection) -> Result<VoteOutcome> {
        let outcome = self.ledger.apply(post_id, self.identity, direction)?;

        match self.store.cast_vote(post_id, self.identity, direction).await {
            Ok(receipt) => {
                self.ledger.reconcile(self.identity, &receipt);
                Ok(outcome)
            }
            Err(err) => {
                tracing::warn!(%post_id, error = %err, "vote submission failed, keeping local prediction");
                Err(err)
            }
        }
    }

    /// The post's comments, loaded lazily on first request.
    pub async fn comments(&mut self, post_id: Uuid) -> Result<&[Comment]> {
        if self.ledger.get(post_id).is_none() {
            return Err(ClientError::NotFound(post_id));
        }
        let thread = self
            .threads
            .entry(post_id)
            .or_insert_with(|| CommentThread::new(post_id));
        thread.load(&self.store).await
    }

    /// Append a comment to a post's thread (optimistic, reverted on failure).
    pub async fn comment(&mut self, post_id: Uuid, content: &str) -> Result<Comment> {
        if self.ledger.get(post_id).is_none() {
            return Err(ClientError::NotFound(post_id));
        }
        let thread = self
            .threads
            .entry(post_id)
            .or_insert_with(|| CommentThread::new(post_id));
        thread.append(&self.store, content).await
    }

    /// Reply to a comment in a post's thread.
    pub async fn reply(&mut self, post_id: Uuid, comment_id: Uuid, content: &str) -> Result<Comment> {
        let thread = self
            .threads
            .get_mut(&post_id)
            .ok_or(ClientError::NotFound(comment_id))?;
        thread.reply(&self.store, comment_id, content).await
    }

    /// Display-ready heat label for a visible post.
    pub fn heat_label(&self, post_id: Uuid) -> Option<String> {
        self.ledger.get(post_id).map(|p| heat::format_heat(p.heat()))
    }
}
