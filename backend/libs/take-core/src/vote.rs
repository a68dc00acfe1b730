//! Vote state machine
//!
//! A voter is in exactly one of three states per post: neutral, agreed or
//! disagreed. Repeating an action toggles the vote off; the opposite action
//! flips the vote in a single step with a combined delta of magnitude 2 (no
//! intermediate neutral state is ever observable). Every accepted action
//! counts as one interaction regardless of the delta sign.
//!
//! The service applies this table inside the vote transaction and the client
//! applies it for optimistic prediction, so the two can never diverge on
//! semantics.

use serde::{Deserialize, Serialize};

/// The two directions a voter can react in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteDirection {
    Agree,
    Disagree,
}

impl VoteDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteDirection::Agree => "agree",
            VoteDirection::Disagree => "disagree",
        }
    }
}

/// Per-(post, voter) vote state, derived from set membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteState {
    Neutral,
    Agreed,
    Disagreed,
}

/// Result of applying one action to one state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub next: VoteState,
    /// Net heat delta (agree minus disagree) produced by the action.
    pub heat_delta: i64,
}

impl VoteState {
    /// Derive the state from set membership. Membership in both sets violates
    /// the mutual-exclusivity invariant and is unrepresentable here.
    pub fn from_membership(in_agree: bool, in_disagree: bool) -> Self {
        debug_assert!(!(in_agree && in_disagree), "voter in both tally sets");
        match (in_agree, in_disagree) {
            (true, _) => VoteState::Agreed,
            (_, true) => VoteState::Disagreed,
            _ => VoteState::Neutral,
        }
    }

    /// Apply one action. This is the whole transition table; interactions
    /// always increment by exactly one per application, which is the caller's
    /// job to record.
    pub fn apply(self, direction: VoteDirection) -> Transition {
        use VoteDirection::*;
        use VoteState::*;
        let (next, heat_delta) = match (self, direction) {
            (Neutral, Agree) => (Agreed, 1),
            (Neutral, Disagree) => (Disagreed, -1),
            (Agreed, Agree) => (Neutral, -1),
            (Agreed, Disagree) => (Disagreed, -2),
            (Disagreed, Disagree) => (Neutral, 1),
            (Disagreed, Agree) => (Agreed, 2),
        };
        Transition { next, heat_delta }
    }

    /// Agree/disagree tally-count deltas implied by moving out of `self` into
    /// `next`. Used to keep denormalized counters in step with set membership.
    pub fn count_deltas(self, next: VoteState) -> (i64, i64) {
        let occupancy = |state: VoteState| match state {
            VoteState::Agreed => (1, 0),
            VoteState::Disagreed => (0, 1),
            VoteState::Neutral => (0, 0),
        };
        let (a0, d0) = occupancy(self);
        let (a1, d1) = occupancy(next);
        (a1 - a0, d1 - d0)
    }
}
