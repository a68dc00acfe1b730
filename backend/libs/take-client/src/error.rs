//! Client-side error taxonomy.
//!
//! `NotFound` and `InvalidIdentity` are programming/data errors surfaced to
//! the caller immediately and never retried here. `Transient` covers remote
//! calls that failed or timed out; it is non-fatal and the caller decides how
//! to notify. Pagination running out of data is not an error at all — the
//! feed session reports it through its `exhausted` flag.

use uuid::Uuid;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Referenced post or comment does not exist.
    #[error("not found: {0}")]
    NotFound(Uuid),

    /// No usable identity token when one was required.
    #[error("no identity available: {0}")]
    InvalidIdentity(String),

    /// Remote call failed or timed out; local optimistic state may remain.
    #[error("transient network failure: {0}")]
    Transient(#[from] reqwest::Error),

    /// The store answered with an unexpected status.
    #[error("remote rejected request with status {status}: {message}")]
    Remote { status: u16, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_names_the_missing_id() {
        let id = Uuid::new_v4();
        let msg = ClientError::NotFound(id).to_string();
        assert!(msg.contains(&id.to_string()));
    }
}
