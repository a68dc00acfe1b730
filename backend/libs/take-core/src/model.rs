//! Wire types shared by the service and the client session core.

use crate::vote::VoteState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A take: a short statement other participants react to.
///
/// `agree` / `disagree` are the voter identity sets (disjoint by the ledger's
/// invariant); `agree_count` / `disagree_count` are the denormalized tallies
/// the service sorts on; `interactions` counts vote events, not the net
/// score, and only ever grows.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub agree: Vec<Uuid>,
    pub disagree: Vec<Uuid>,
    pub agree_count: i64,
    pub disagree_count: i64,
    pub interactions: i64,
    /// Comment ids in creation order.
    pub comments: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Net reaction score: agrees minus disagrees. This is the one heat
    /// semantics used everywhere, at load time and per delta.
    pub fn heat(&self) -> i64 {
        self.agree_count - self.disagree_count
    }

    /// Derive this voter's state from set membership.
    pub fn vote_state(&self, voter: Uuid) -> VoteState {
        VoteState::from_membership(self.agree.contains(&voter), self.disagree.contains(&voter))
    }
}

/// Lightweight reply record embedded in its comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// A comment, owned by exactly one post. Append-only in this core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub content: String,
    pub replies: Vec<Reply>,
    pub created_at: DateTime<Utc>,
}

/// Outcome of one accepted vote action, as reported by the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteReceipt {
    pub post_id: Uuid,
    /// The voter's state after the transition.
    pub state: VoteState,
    /// Net heat delta the action produced.
    pub heat_delta: i64,
    pub agree_count: i64,
    pub disagree_count: i64,
    pub interactions: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vote::VoteState;

    fn post(agree: Vec<Uuid>, disagree: Vec<Uuid>) -> Post {
        Post {
            id: Uuid::new_v4(),
            title: "pineapple belongs on pizza".into(),
            agree_count: agree.len() as i64,
            disagree_count: disagree.len() as i64,
            agree,
            disagree,
            interactions: 0,
            comments: vec![],
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_heat_is_net_score() {
        let voters: Vec<Uuid> = (0..5).map(|_| Uuid::new_v4()).collect();
        let p = post(voters[..3].to_vec(), voters[3..].to_vec());
        assert_eq!(p.heat(), 1);
    }

    #[test]
    fn test_vote_state_from_membership() {
        let u = Uuid::new_v4();
        assert_eq!(post(vec![u], vec![]).vote_state(u), VoteState::Agreed);
        assert_eq!(post(vec![], vec![u]).vote_state(u), VoteState::Disagreed);
        assert_eq!(post(vec![], vec![]).vote_state(u), VoteState::Neutral);
    }

    #[test]
    fn test_post_round_trips_through_json() {
        let p = post(vec![Uuid::new_v4()], vec![]);
        let json = serde_json::to_string(&p).unwrap();
        let back: Post = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, p.id);
        assert_eq!(back.agree, p.agree);
        assert_eq!(back.heat(), 1);
    }
}
