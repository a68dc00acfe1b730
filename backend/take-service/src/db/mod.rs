/// Database access layer
///
/// Schema bootstrap and repositories for takes, votes and comments. All
/// tally mutation goes through `vote_repo`; nothing else touches the vote
/// sets or the denormalized counters.
pub mod comment_repo;
pub mod post_repo;
pub mod schema;
pub mod vote_repo;

pub use schema::ensure_tables;
