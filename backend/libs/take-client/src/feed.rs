//! Feed pagination cursor.
//!
//! Tracks how many posts have been fetched for the active strategy, whether
//! the strategy is exhausted, and which post ids are visible. A deep-linked
//! "anchor" post can be pinned ahead of the first page; any later occurrence
//! of it (or of any already-visible post — random pages can overlap) is
//! filtered out before appending, so the same post is never rendered twice.

use crate::error::Result;
use crate::store::TakeStore;
use take_core::{Post, SortStrategy};
use uuid::Uuid;

pub struct FeedSession {
    strategy: SortStrategy,
    page_size: usize,
    /// Count of posts fetched for the active strategy, accepted or not.
    offset: usize,
    /// True once a fetched page came back empty; reset only by a switch.
    exhausted: bool,
    /// Deep-linked post pinned at the top; always excluded from merged pages.
    anchor: Option<Uuid>,
    /// Visible post ids in render order.
    order: Vec<Uuid>,
}

impl FeedSession {
    pub fn new(strategy: SortStrategy, page_size: usize) -> Self {
        Self {
            strategy,
            page_size: page_size.max(1),
            offset: 0,
            exhausted: false,
            anchor: None,
            order: Vec::new(),
        }
    }

    /// Seed the feed with a single directly-addressed post pinned first.
    pub fn with_anchor(strategy: SortStrategy, page_size: usize, anchor: Uuid) -> Self {
        let mut session = Self::new(strategy, page_size);
        session.anchor = Some(anchor);
        session.order.push(anchor);
        session
    }

    pub fn strategy(&self) -> SortStrategy {
        self.strategy
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn order(&self) -> &[Uuid] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Fold one fetched page into the visible feed. Returns the posts that
    /// were actually appended (anchor and already-visible ids are dropped).
    /// An empty page marks the strategy exhausted.
    pub fn merge_page(&mut self, page: Vec<Post>) -> Vec<Post> {
        self.offset += page.len();
        if page.is_empty() {
            self.exhausted = true;
            return Vec::new();
        }

        let mut accepted = Vec::with_capacity(page.len());
        for post in page {
            if self.anchor == Some(post.id) || self.order.contains(&post.id) {
                continue;
            }
            self.order.push(post.id);
            accepted.push(post);
        }
        accepted
    }

    /// Fetch the next page at the current offset and fold it in. Returns the
    /// newly visible posts; an empty result with `is_exhausted()` true means
    /// end of data, which is terminal until the strategy changes.
    pub async fn advance<S: TakeStore + ?Sized>(&mut self, store: &S) -> Result<Vec<Post>> {
        if self.exhausted {
            return Ok(Vec::new());
        }
        let page = store
            .fetch_feed(self.strategy, self.offset, self.page_size)
            .await?;
        Ok(self.merge_page(page))
    }

    /// Switch ordering strategy: discard the accumulated feed and start the
    /// cursor over. A pinned anchor survives the switch — it is re-seeded at
    /// the top and stays excluded from merged pages, so the deep-linked post
    /// keeps rendering exactly once under every ordering.
    pub fn switch(&mut self, strategy: SortStrategy) {
        self.strategy = strategy;
        self.offset = 0;
        self.exhausted = false;
        self.order.clear();
        if let Some(anchor) = self.anchor {
            self.order.push(anchor);
        }
    }
}
