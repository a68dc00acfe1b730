// Integration tests for the vote ledger and feed against a real Postgres.
// Run manually: cargo test --test vote_flow_test -- --ignored --nocapture

mod common;

use take_core::{SortStrategy, VoteDirection, VoteState};
use take_service::db::{comment_repo, post_repo, vote_repo};
use take_service::AppError;
use uuid::Uuid;

#[tokio::test]
#[ignore] // needs DATABASE_URL pointing at a disposable database
async fn test_vote_lifecycle_walks_the_transition_table() {
    let pool = common::connect().await;
    let post = post_repo::create_post(&pool, "pineapple belongs on pizza")
        .await
        .expect("create post");
    let voter = Uuid::new_v4();

    // Neutral -> Agreed
    let receipt = vote_repo::apply_vote(&pool, post.id, voter, VoteDirection::Agree)
        .await
        .expect("agree");
    assert_eq!(receipt.state, VoteState::Agreed);
    assert_eq!(receipt.heat_delta, 1);
    assert_eq!(receipt.agree_count, post.agree_count + 1);
    assert_eq!(receipt.interactions, post.interactions + 1);

    // Agreed -> Neutral (toggle off)
    let receipt = vote_repo::apply_vote(&pool, post.id, voter, VoteDirection::Agree)
        .await
        .expect("toggle off");
    assert_eq!(receipt.state, VoteState::Neutral);
    assert_eq!(receipt.heat_delta, -1);
    assert_eq!(receipt.agree_count, post.agree_count);
    assert_eq!(receipt.interactions, post.interactions + 2);

    // Neutral -> Agreed -> Disagreed (flip)
    vote_repo::apply_vote(&pool, post.id, voter, VoteDirection::Agree)
        .await
        .expect("re-agree");
    let receipt = vote_repo::apply_vote(&pool, post.id, voter, VoteDirection::Disagree)
        .await
        .expect("flip");
    assert_eq!(receipt.state, VoteState::Disagreed);
    assert_eq!(receipt.heat_delta, -2);
    assert_eq!(receipt.agree_count, post.agree_count);
    assert_eq!(receipt.disagree_count, post.disagree_count + 1);
    assert_eq!(receipt.interactions, post.interactions + 4);
}

#[tokio::test]
#[ignore]
async fn test_voter_appears_in_exactly_one_tally_set() {
    let pool = common::connect().await;
    let post = post_repo::create_post(&pool, "tabs beat spaces")
        .await
        .expect("create post");
    let voter = Uuid::new_v4();

    vote_repo::apply_vote(&pool, post.id, voter, VoteDirection::Agree)
        .await
        .expect("agree");
    vote_repo::apply_vote(&pool, post.id, voter, VoteDirection::Disagree)
        .await
        .expect("flip");

    let post = post_repo::get_post(&pool, post.id)
        .await
        .expect("fetch")
        .expect("post exists");
    assert!(!post.agree.contains(&voter));
    assert!(post.disagree.contains(&voter));
    assert_eq!(post.vote_state(voter), VoteState::Disagreed);
}

#[tokio::test]
#[ignore]
async fn test_vote_on_missing_post_is_not_found() {
    let pool = common::connect().await;
    let err = vote_repo::apply_vote(&pool, Uuid::new_v4(), Uuid::new_v4(), VoteDirection::Agree)
        .await
        .expect_err("must fail");
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
#[ignore]
async fn test_feed_pages_do_not_overlap_under_a_stable_sort() {
    let pool = common::connect().await;
    for i in 0..5 {
        post_repo::create_post(&pool, &format!("paging take {i}"))
            .await
            .expect("create post");
    }

    let first = post_repo::fetch_feed(&pool, SortStrategy::Old, 0, 3)
        .await
        .expect("page 1");
    let second = post_repo::fetch_feed(&pool, SortStrategy::Old, 3, 3)
        .await
        .expect("page 2");

    assert_eq!(first.len(), 3);
    for post in &second {
        assert!(first.iter().all(|p| p.id != post.id));
    }
    // oldest-first is stable: page 1 strictly precedes page 2
    if let (Some(last), Some(next)) = (first.last(), second.first()) {
        assert!(last.created_at <= next.created_at);
    }
}

#[tokio::test]
#[ignore]
async fn test_comment_and_reply_round_trip() {
    let pool = common::connect().await;
    let post = post_repo::create_post(&pool, "cilantro tastes like soap")
        .await
        .expect("create post");

    let comment = comment_repo::create_comment(&pool, post.id, "objectively true")
        .await
        .expect("comment");
    assert!(comment.replies.is_empty());

    let updated = comment_repo::append_reply(&pool, comment.id, "genetics disagree")
        .await
        .expect("reply");
    assert_eq!(updated.id, comment.id);
    assert_eq!(updated.replies.len(), 1);
    assert_eq!(updated.replies[0].content, "genetics disagree");

    let listed = comment_repo::list_comments(&pool, post.id)
        .await
        .expect("list");
    assert!(listed.iter().any(|c| c.id == comment.id));

    // the post view carries the comment id in creation order
    let post = post_repo::get_post(&pool, post.id)
        .await
        .expect("fetch")
        .expect("post exists");
    assert!(post.comments.contains(&comment.id));
}
