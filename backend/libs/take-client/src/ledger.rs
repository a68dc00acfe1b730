//! Per-post vote ledger.
//!
//! Authoritative local view of every post the session has seen. A vote action
//! builds a brand-new entry from the old one instead of splicing the shared
//! voter arrays in place, so two views rendering the same post can never
//! observe a half-applied transition. Tally sets are mutated here and nowhere
//! else in the client.

use crate::error::{ClientError, Result};
use std::collections::HashMap;
use take_core::{Post, VoteDirection, VoteReceipt, VoteState};
use uuid::Uuid;

/// What one accepted action did to the local view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteOutcome {
    /// The voter's state after the transition.
    pub state: VoteState,
    /// Net heat delta of this single action.
    pub heat_delta: i64,
    /// Running net heat of the post after the action.
    pub heat: i64,
    /// Vote events recorded for the post so far; strictly increasing.
    pub interactions: i64,
}

#[derive(Default)]
pub struct VoteLedger {
    entries: HashMap<Uuid, Post>,
}

impl VoteLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, post: Post) {
        self.entries.insert(post.id, post);
    }

    pub fn get(&self, post_id: Uuid) -> Option<&Post> {
        self.entries.get(&post_id)
    }

    pub fn state_of(&self, post_id: Uuid, voter: Uuid) -> Option<VoteState> {
        self.entries.get(&post_id).map(|p| p.vote_state(voter))
    }

    /// Apply one action from one voter to one post. Produces a new entry for
    /// that post only; every other post and voter is untouched.
    pub fn apply(
        &mut self,
        post_id: Uuid,
        voter: Uuid,
        direction: VoteDirection,
    ) -> Result<VoteOutcome> {
        let current = self
            .entries
            .get(&post_id)
            .ok_or(ClientError::NotFound(post_id))?;

        let state = current.vote_state(voter);
        let transition = state.apply(direction);
        let (agree_delta, disagree_delta) = state.count_deltas(transition.next);

        let mut next = current.clone();
        next.agree.retain(|v| *v != voter);
        next.disagree.retain(|v| *v != voter);
        match transition.next {
            VoteState::Agreed => next.agree.push(voter),
            VoteState::Disagreed => next.disagree.push(voter),
            VoteState::Neutral => {}
        }
        next.agree_count += agree_delta;
        next.disagree_count += disagree_delta;
        // interactions counts events, not the net tally: +1 whatever the sign
        next.interactions += 1;

        let outcome = VoteOutcome {
            state: transition.next,
            heat_delta: transition.heat_delta,
            heat: next.heat(),
            interactions: next.interactions,
        };
        self.entries.insert(post_id, next);
        Ok(outcome)
    }

    /// Adopt the store's authoritative tallies after a vote acknowledgment.
    /// Other voters may have acted in between, so counts come from the
    /// receipt; only this voter's own membership is reasserted.
    pub fn reconcile(&mut self, voter: Uuid, receipt: &VoteReceipt) {
        if let Some(current) = self.entries.get(&receipt.post_id) {
            let mut next = current.clone();
            next.agree.retain(|v| *v != voter);
            next.disagree.retain(|v| *v != voter);
            match receipt.state {
                VoteState::Agreed => next.agree.push(voter),
                VoteState::Disagreed => next.disagree.push(voter),
                VoteState::Neutral => {}
            }
            next.agree_count = receipt.agree_count;
            next.disagree_count = receipt.disagree_count;
            next.interactions = next.interactions.max(receipt.interactions);
            self.entries.insert(receipt.post_id, next);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rand::Rng;

    fn fresh_post() -> Post {
        Post {
            id: Uuid::new_v4(),
            title: "cereal is a soup".into(),
            agree: vec![],
            disagree: vec![],
            agree_count: 0,
            disagree_count: 0,
            interactions: 0,
            comments: vec![],
            created_at: Utc::now(),
        }
    }

    fn ledger_with(post: &Post) -> VoteLedger {
        let mut ledger = VoteLedger::new();
        ledger.insert(post.clone());
        ledger
    }

    #[test]
    fn test_two_voter_scenario() {
        // u1 agrees, u1 flips to disagree, u2 agrees
        let post = fresh_post();
        let (u1, u2) = (Uuid::new_v4(), Uuid::new_v4());
        let mut ledger = ledger_with(&post);

        let o = ledger.apply(post.id, u1, VoteDirection::Agree).unwrap();
        assert_eq!(o.state, VoteState::Agreed);
        assert_eq!(o.heat_delta, 1);
        assert_eq!(o.interactions, 1);
        assert_eq!(ledger.get(post.id).unwrap().agree, vec![u1]);

        let o = ledger.apply(post.id, u1, VoteDirection::Disagree).unwrap();
        assert_eq!(o.state, VoteState::Disagreed);
        assert_eq!(o.heat_delta, -2);
        assert_eq!(o.interactions, 2);
        let entry = ledger.get(post.id).unwrap();
        assert!(entry.agree.is_empty());
        assert_eq!(entry.disagree, vec![u1]);

        let o = ledger.apply(post.id, u2, VoteDirection::Agree).unwrap();
        assert_eq!(o.interactions, 3);
        let entry = ledger.get(post.id).unwrap();
        assert_eq!(entry.agree, vec![u2]);
        assert_eq!(entry.disagree, vec![u1]);
        assert_eq!(entry.heat(), 0);
    }

    #[test]
    fn test_double_agree_toggles_off_with_net_zero_and_two_events() {
        let post = fresh_post();
        let voter = Uuid::new_v4();
        let mut ledger = ledger_with(&post);

        let a = ledger.apply(post.id, voter, VoteDirection::Agree).unwrap();
        let b = ledger.apply(post.id, voter, VoteDirection::Agree).unwrap();
        assert_eq!(b.state, VoteState::Neutral);
        assert_eq!(a.heat_delta + b.heat_delta, 0);
        assert_eq!(b.heat, 0);
        assert_eq!(b.interactions, 2);
    }

    #[test]
    fn test_mutual_exclusivity_under_arbitrary_sequences() {
        let post = fresh_post();
        let voters: Vec<Uuid> = (0..4).map(|_| Uuid::new_v4()).collect();
        let mut ledger = ledger_with(&post);
        let mut rng = rand::thread_rng();
        let mut last_interactions = 0;

        for _ in 0..200 {
            let voter = voters[rng.gen_range(0..voters.len())];
            let direction = if rng.gen_bool(0.5) {
                VoteDirection::Agree
            } else {
                VoteDirection::Disagree
            };
            let outcome = ledger.apply(post.id, voter, direction).unwrap();

            // interactions never decreases, whatever the delta sign
            assert_eq!(outcome.interactions, last_interactions + 1);
            last_interactions = outcome.interactions;

            let entry = ledger.get(post.id).unwrap();
            for v in &voters {
                assert!(
                    !(entry.agree.contains(v) && entry.disagree.contains(v)),
                    "voter in both sets"
                );
            }
            assert_eq!(entry.heat(), entry.agree.len() as i64 - entry.disagree.len() as i64);
        }
    }

    #[test]
    fn test_unknown_post_is_not_found() {
        let mut ledger = VoteLedger::new();
        let missing = Uuid::new_v4();
        match ledger.apply(missing, Uuid::new_v4(), VoteDirection::Agree) {
            Err(ClientError::NotFound(id)) => assert_eq!(id, missing),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_apply_does_not_touch_other_posts() {
        let a = fresh_post();
        let b = fresh_post();
        let voter = Uuid::new_v4();
        let mut ledger = VoteLedger::new();
        ledger.insert(a.clone());
        ledger.insert(b.clone());

        ledger.apply(a.id, voter, VoteDirection::Agree).unwrap();
        let untouched = ledger.get(b.id).unwrap();
        assert!(untouched.agree.is_empty());
        assert_eq!(untouched.interactions, 0);
    }

    #[test]
    fn test_reconcile_adopts_store_tallies_but_keeps_own_membership() {
        let post = fresh_post();
        let voter = Uuid::new_v4();
        let mut ledger = ledger_with(&post);
        ledger.apply(post.id, voter, VoteDirection::Agree).unwrap();

        // the store saw two other agrees in the meantime
        let receipt = VoteReceipt {
            post_id: post.id,
            state: VoteState::Agreed,
            heat_delta: 1,
            agree_count: 3,
            disagree_count: 0,
            interactions: 7,
        };
        ledger.reconcile(voter, &receipt);

        let entry = ledger.get(post.id).unwrap();
        assert_eq!(entry.agree_count, 3);
        assert_eq!(entry.interactions, 7);
        assert!(entry.agree.contains(&voter));
    }
}
