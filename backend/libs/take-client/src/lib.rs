/// Client-session core for the takes platform
///
/// Everything a presentation layer needs to drive one anonymous session
/// against the backing store, with no rendering concerns:
///
/// - `identity`: the durable per-client identity token
/// - `store`: the remote-store seam (`TakeStore`) and its HTTP implementation
/// - `ledger`: per-post vote state and optimistic tally prediction
/// - `heat`: compact display formatting of the aggregate score
/// - `feed`: pagination cursor, strategy switching and anchor de-duplication
/// - `comments`: lazy-loaded threads with optimistic append
/// - `session`: the facade tying the above together
pub mod comments;
pub mod error;
pub mod feed;
pub mod heat;
pub mod identity;
pub mod ledger;
pub mod session;
pub mod store;

pub use error::{ClientError, Result};
pub use feed::FeedSession;
pub use identity::IdentityProvider;
pub use ledger::{VoteLedger, VoteOutcome};
pub use session::TakeSession;
pub use store::{HttpTakeStore, TakeStore};
