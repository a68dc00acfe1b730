/// Comment handlers - HTTP endpoints for comment operations
use crate::db::comment_repo;
use crate::error::{AppError, Result};
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CommentRequest {
    #[validate(length(min = 1, max = 1000, message = "content must be 1..=1000 characters"))]
    pub content: String,
}

/// Get comments for a post, oldest first
pub async fn list_comments(
    pool: web::Data<PgPool>,
    post_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    if !comment_repo::post_exists(&pool, *post_id).await? {
        return Err(AppError::NotFound(format!("post {post_id}")));
    }

    let comments = comment_repo::list_comments(&pool, *post_id).await?;
    Ok(HttpResponse::Ok().json(comments))
}

/// Append a comment to a post
pub async fn create_comment(
    pool: web::Data<PgPool>,
    post_id: web::Path<Uuid>,
    req: web::Json<CommentRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    if !comment_repo::post_exists(&pool, *post_id).await? {
        return Err(AppError::NotFound(format!("post {post_id}")));
    }

    let comment = comment_repo::create_comment(&pool, *post_id, req.content.trim()).await?;
    Ok(HttpResponse::Created().json(comment))
}

/// Append a reply to a comment; responds with the updated comment
pub async fn append_reply(
    pool: web::Data<PgPool>,
    comment_id: web::Path<Uuid>,
    req: web::Json<CommentRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let comment = comment_repo::append_reply(&pool, *comment_id, req.content.trim()).await?;
    Ok(HttpResponse::Ok().json(comment))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_content_bounds() {
        assert!(CommentRequest { content: String::new() }.validate().is_err());
        assert!(CommentRequest { content: "y".repeat(1001) }.validate().is_err());
        assert!(CommentRequest { content: "hello".into() }.validate().is_ok());
    }
}
