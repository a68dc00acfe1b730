//! Feed sort strategies.
//!
//! The UI used to carry two positional strategy arrays that disagreed on both
//! membership and order, and cycled them by index. Here there is one
//! enumerated type and one canonical ordering that every caller shares;
//! cycling goes through [`SortStrategy::next`] instead of raw indices.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The enumerated feed orderings the backing store understands. The concrete
/// ranking behind `Popular`, `Random` and `Hot` is the store's business;
/// callers only name the strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortStrategy {
    Hot,
    New,
    Popular,
    Random,
    #[serde(rename = "agreed")]
    MostAgreed,
    #[serde(rename = "disagreed")]
    MostDisagreed,
    Old,
}

impl SortStrategy {
    /// The single canonical ordering, shared by every call site.
    pub const ALL: [SortStrategy; 7] = [
        SortStrategy::Hot,
        SortStrategy::New,
        SortStrategy::Popular,
        SortStrategy::Random,
        SortStrategy::MostAgreed,
        SortStrategy::MostDisagreed,
        SortStrategy::Old,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortStrategy::Hot => "hot",
            SortStrategy::New => "new",
            SortStrategy::Popular => "popular",
            SortStrategy::Random => "random",
            SortStrategy::MostAgreed => "agreed",
            SortStrategy::MostDisagreed => "disagreed",
            SortStrategy::Old => "old",
        }
    }

    /// Next strategy in canonical order, wrapping around. Drives the UI's
    /// sort-cycling button.
    pub fn next(self) -> SortStrategy {
        let idx = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

impl Default for SortStrategy {
    fn default() -> Self {
        SortStrategy::Hot
    }
}

impl fmt::Display for SortStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort strategy: {0}")]
pub struct UnknownSortStrategy(pub String);

impl FromStr for SortStrategy {
    type Err = UnknownSortStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hot" => Ok(SortStrategy::Hot),
            "new" => Ok(SortStrategy::New),
            "popular" => Ok(SortStrategy::Popular),
            "random" => Ok(SortStrategy::Random),
            "agreed" => Ok(SortStrategy::MostAgreed),
            "disagreed" => Ok(SortStrategy::MostDisagreed),
            "old" => Ok(SortStrategy::Old),
            other => Err(UnknownSortStrategy(other.to_string())),
        }
    }
}
