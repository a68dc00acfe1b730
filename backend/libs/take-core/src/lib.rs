/// Shared core for the takes platform
///
/// Everything that both the backing service and the client session logic must
/// agree on lives here:
///
/// - `model`: wire types for posts, comments and vote receipts
/// - `vote`: the vote state machine (one transition table, used on both sides)
/// - `feed`: the enumerated sort strategies and their canonical ordering
pub mod feed;
pub mod model;
pub mod vote;

pub use feed::SortStrategy;
pub use model::{Comment, Post, Reply, VoteReceipt};
pub use vote::{Transition, VoteDirection, VoteState};
