//! Durable anonymous identity.
//!
//! One opaque token per client, generated on first use and persisted to
//! client-local storage so it survives restarts. It is a bare correlation
//! key, not a credential; there is no server-side account behind it.

use crate::error::{ClientError, Result};
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

const IDENTITY_FILE: &str = "identity";

/// Issues and persists the client's identity token.
pub struct IdentityProvider {
    path: PathBuf,
}

impl IdentityProvider {
    /// `dir` is the client-local storage directory; the token lives in a
    /// single file inside it.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: dir.into().join(IDENTITY_FILE),
        }
    }

    /// Return the persisted token, minting and persisting a fresh one on the
    /// first call (or when the stored value is unreadable). Idempotent across
    /// restarts for the lifetime of the storage directory.
    pub fn get_or_create(&self) -> Result<Uuid> {
        if let Ok(raw) = fs::read_to_string(&self.path) {
            if let Ok(token) = Uuid::parse_str(raw.trim()) {
                return Ok(token);
            }
            tracing::warn!(path = %self.path.display(), "stored identity unreadable, reissuing");
        }

        let token = Uuid::new_v4();
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ClientError::InvalidIdentity(e.to_string()))?;
        }
        fs::write(&self.path, token.to_string())
            .map_err(|e| ClientError::InvalidIdentity(e.to_string()))?;
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_token_is_stable_across_calls_and_instances() {
        let dir = tempdir().unwrap();
        let provider = IdentityProvider::new(dir.path());

        let first = provider.get_or_create().unwrap();
        let second = provider.get_or_create().unwrap();
        assert_eq!(first, second);

        // a fresh provider over the same storage sees the same token
        let again = IdentityProvider::new(dir.path()).get_or_create().unwrap();
        assert_eq!(first, again);
    }

    #[test]
    fn test_corrupt_storage_reissues_a_token() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(IDENTITY_FILE), "not-a-uuid").unwrap();

        let provider = IdentityProvider::new(dir.path());
        let token = provider.get_or_create().unwrap();
        // and the reissued token persists
        assert_eq!(provider.get_or_create().unwrap(), token);
    }

    #[test]
    fn test_distinct_clients_get_distinct_tokens() {
        let a = tempdir().unwrap();
        let b = tempdir().unwrap();
        let ta = IdentityProvider::new(a.path()).get_or_create().unwrap();
        let tb = IdentityProvider::new(b.path()).get_or_create().unwrap();
        assert_ne!(ta, tb);
    }
}
