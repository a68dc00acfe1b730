/// Comment repository
///
/// Comments are append-only rows owned by their post; replies are lightweight
/// records embedded in the comment row as JSONB, appended in place.
use crate::error::{AppError, Result};
use sqlx::types::Json;
use sqlx::PgPool;
use take_core::{Comment, Reply};
use uuid::Uuid;

#[derive(sqlx::FromRow)]
struct CommentRow {
    id: Uuid,
    post_id: Uuid,
    content: String,
    replies: Json<Vec<Reply>>,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Comment {
            id: row.id,
            post_id: row.post_id,
            content: row.content,
            replies: row.replies.0,
            created_at: row.created_at,
        }
    }
}

const COMMENT_COLUMNS: &str = "id, post_id, content, replies, created_at";

pub async fn post_exists(pool: &PgPool, post_id: Uuid) -> Result<bool> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM takes WHERE id = $1)")
        .bind(post_id)
        .fetch_one(pool)
        .await?;
    Ok(exists)
}

/// All comments for a post, oldest first (render order).
pub async fn list_comments(pool: &PgPool, post_id: Uuid) -> Result<Vec<Comment>> {
    let sql = format!(
        "SELECT {COMMENT_COLUMNS} FROM comments WHERE post_id = $1 ORDER BY created_at ASC"
    );
    let rows = sqlx::query_as::<_, CommentRow>(&sql)
        .bind(post_id)
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(Comment::from).collect())
}

/// Append a comment to a post.
pub async fn create_comment(pool: &PgPool, post_id: Uuid, content: &str) -> Result<Comment> {
    let sql = format!(
        "INSERT INTO comments (post_id, content) VALUES ($1, $2) RETURNING {COMMENT_COLUMNS}"
    );
    let row = sqlx::query_as::<_, CommentRow>(&sql)
        .bind(post_id)
        .bind(content)
        .fetch_one(pool)
        .await?;

    Ok(row.into())
}

/// Append a reply record to a comment; returns the updated comment, or
/// NotFound if the comment does not exist.
pub async fn append_reply(pool: &PgPool, comment_id: Uuid, content: &str) -> Result<Comment> {
    let reply = Reply {
        content: content.to_string(),
        created_at: chrono::Utc::now(),
    };

    let sql = format!(
        "UPDATE comments SET replies = replies || $2 WHERE id = $1 RETURNING {COMMENT_COLUMNS}"
    );
    let row = sqlx::query_as::<_, CommentRow>(&sql)
        .bind(comment_id)
        .bind(Json(reply))
        .fetch_optional(pool)
        .await?;

    row.map(Comment::from)
        .ok_or_else(|| AppError::NotFound(format!("comment {comment_id}")))
}
