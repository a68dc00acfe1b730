/// Vote repository — the authoritative side of the vote state machine.
///
/// One transaction per action: lock the post row, read the voter's current
/// membership, run the shared transition table, then write the new
/// membership and counter deltas together. The post-row lock serializes
/// concurrent actions on the same post, so a rapid double-click from one
/// voter walks the table twice instead of racing into an impossible state.
use crate::error::{AppError, Result};
use sqlx::{PgPool, Row};
use take_core::{VoteDirection, VoteReceipt, VoteState};
use uuid::Uuid;

pub async fn apply_vote(
    pool: &PgPool,
    post_id: Uuid,
    voter: Uuid,
    direction: VoteDirection,
) -> Result<VoteReceipt> {
    let mut tx = pool.begin().await?;

    let locked: Option<Uuid> =
        sqlx::query_scalar("SELECT id FROM takes WHERE id = $1 FOR UPDATE")
            .bind(post_id)
            .fetch_optional(&mut *tx)
            .await?;
    if locked.is_none() {
        return Err(AppError::NotFound(format!("post {post_id}")));
    }

    let current: Option<String> =
        sqlx::query_scalar("SELECT direction FROM votes WHERE post_id = $1 AND voter = $2")
            .bind(post_id)
            .bind(voter)
            .fetch_optional(&mut *tx)
            .await?;

    let state = match current.as_deref() {
        Some("agree") => VoteState::Agreed,
        Some("disagree") => VoteState::Disagreed,
        _ => VoteState::Neutral,
    };
    let transition = state.apply(direction);

    match transition.next {
        VoteState::Neutral => {
            sqlx::query("DELETE FROM votes WHERE post_id = $1 AND voter = $2")
                .bind(post_id)
                .bind(voter)
                .execute(&mut *tx)
                .await?;
        }
        next => {
            let stored = if next == VoteState::Agreed { "agree" } else { "disagree" };
            sqlx::query(
                r#"
                INSERT INTO votes (post_id, voter, direction)
                VALUES ($1, $2, $3)
                ON CONFLICT (post_id, voter)
                DO UPDATE SET direction = EXCLUDED.direction, created_at = now()
                "#,
            )
            .bind(post_id)
            .bind(voter)
            .bind(stored)
            .execute(&mut *tx)
            .await?;
        }
    }

    let (agree_delta, disagree_delta) = state.count_deltas(transition.next);

    // interactions counts events: +1 per accepted action, whatever the sign
    let row = sqlx::query(
        r#"
        UPDATE takes
        SET agree_count = agree_count + $2,
            disagree_count = disagree_count + $3,
            interactions = interactions + 1
        WHERE id = $1
        RETURNING agree_count, disagree_count, interactions
        "#,
    )
    .bind(post_id)
    .bind(agree_delta)
    .bind(disagree_delta)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(VoteReceipt {
        post_id,
        state: transition.next,
        heat_delta: transition.heat_delta,
        agree_count: row.get("agree_count"),
        disagree_count: row.get("disagree_count"),
        interactions: row.get("interactions"),
    })
}
