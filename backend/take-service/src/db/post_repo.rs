/// Post repository
///
/// Reads assemble the full wire shape — voter id arrays, comment id list and
/// the denormalized counters — in one query via lateral aggregates. The
/// counters are maintained by `vote_repo` and only read here.
use crate::error::{AppError, Result};
use sqlx::PgPool;
use take_core::{Post, SortStrategy};
use uuid::Uuid;

/// Shared SELECT: one row per take, arrays aggregated per post.
const POST_SELECT: &str = r#"
    SELECT t.id,
           t.title,
           COALESCE(a.voters, '{}') AS agree,
           COALESCE(d.voters, '{}') AS disagree,
           t.agree_count,
           t.disagree_count,
           t.interactions,
           COALESCE(c.ids, '{}') AS comments,
           t.created_at
    FROM takes t
    LEFT JOIN LATERAL (
        SELECT array_agg(v.voter) AS voters
        FROM votes v WHERE v.post_id = t.id AND v.direction = 'agree'
    ) a ON true
    LEFT JOIN LATERAL (
        SELECT array_agg(v.voter) AS voters
        FROM votes v WHERE v.post_id = t.id AND v.direction = 'disagree'
    ) d ON true
    LEFT JOIN LATERAL (
        SELECT array_agg(c.id ORDER BY c.created_at) AS ids
        FROM comments c WHERE c.post_id = t.id
    ) c ON true
"#;

/// Create a new take. Authoring is intentionally minimal: a title, nothing
/// else; votes and comments accrue through their own repos.
pub async fn create_post(pool: &PgPool, title: &str) -> Result<Post> {
    let id: Uuid = sqlx::query_scalar("INSERT INTO takes (title) VALUES ($1) RETURNING id")
        .bind(title)
        .fetch_one(pool)
        .await?;

    get_post(pool, id)
        .await?
        .ok_or_else(|| AppError::Internal(format!("created post {id} vanished")))
}

/// Fetch one post by id.
pub async fn get_post(pool: &PgPool, post_id: Uuid) -> Result<Option<Post>> {
    let sql = format!("{POST_SELECT} WHERE t.id = $1");
    let post = sqlx::query_as::<_, Post>(&sql)
        .bind(post_id)
        .fetch_optional(pool)
        .await?;

    Ok(post)
}

/// One page of the feed under the given strategy. An empty page means the
/// strategy is exhausted at this offset, which is not an error.
pub async fn fetch_feed(
    pool: &PgPool,
    strategy: SortStrategy,
    offset: i64,
    limit: i64,
) -> Result<Vec<Post>> {
    let order_by = order_clause(strategy);
    let sql = format!("{POST_SELECT} ORDER BY {order_by} LIMIT $1 OFFSET $2");

    let posts = sqlx::query_as::<_, Post>(&sql)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

    Ok(posts)
}

/// The ORDER BY expression backing each strategy. `Random` re-samples per
/// request; `Hot` is recency-decayed engagement (vote events per day of
/// age, log-damped so viral takes do not pin the feed forever). Clients
/// treat both as opaque orderings.
fn order_clause(strategy: SortStrategy) -> &'static str {
    match strategy {
        SortStrategy::New => "t.created_at DESC",
        SortStrategy::Old => "t.created_at ASC",
        SortStrategy::Popular => "t.interactions DESC, t.created_at DESC",
        SortStrategy::MostAgreed => "t.agree_count DESC, t.created_at DESC",
        SortStrategy::MostDisagreed => "t.disagree_count DESC, t.created_at DESC",
        SortStrategy::Random => "random()",
        SortStrategy::Hot => {
            "ln(1 + t.agree_count + t.disagree_count) \
             / (1 + EXTRACT(EPOCH FROM (now() - t.created_at)) / 86400.0) DESC, \
             t.created_at DESC"
        }
    }
}
