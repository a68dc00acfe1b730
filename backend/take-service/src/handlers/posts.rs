/// Post handlers - HTTP endpoints for takes and the feed
use crate::config::Config;
use crate::db::post_repo;
use crate::error::{AppError, Result};
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use take_core::SortStrategy;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, max = 280, message = "title must be 1..=280 characters"))]
    pub title: String,
}

/// Create a new take
pub async fn create_post(
    pool: web::Data<PgPool>,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let post = post_repo::create_post(&pool, req.title.trim()).await?;
    tracing::info!(post_id = %post.id, "take created");

    Ok(HttpResponse::Created().json(post))
}

/// Get a post by ID
pub async fn get_post(pool: web::Data<PgPool>, post_id: web::Path<Uuid>) -> Result<HttpResponse> {
    match post_repo::get_post(&pool, *post_id).await? {
        Some(post) => Ok(HttpResponse::Ok().json(post)),
        None => Err(AppError::NotFound(format!("post {post_id}"))),
    }
}

/// Feed query parameters. `sort` takes the strategy names the client
/// enumeration serializes to; absent offset means the first page.
#[derive(Debug, Deserialize)]
pub struct FeedQueryParams {
    pub sort: Option<String>,
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

impl FeedQueryParams {
    fn strategy(&self) -> Result<SortStrategy> {
        match &self.sort {
            Some(raw) => raw
                .parse::<SortStrategy>()
                .map_err(|e| AppError::BadRequest(e.to_string())),
            None => Ok(SortStrategy::default()),
        }
    }
}

/// Get one page of the feed
pub async fn get_feed(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    query: web::Query<FeedQueryParams>,
) -> Result<HttpResponse> {
    let strategy = query.strategy()?;
    let offset = query.offset.unwrap_or(0).max(0);
    let limit = query
        .limit
        .unwrap_or(config.feed.default_page_size)
        .clamp(1, config.feed.max_page_size);

    tracing::debug!(%strategy, offset, limit, "feed request");

    let posts = post_repo::fetch_feed(&pool, strategy, offset, limit).await?;
    Ok(HttpResponse::Ok().json(posts))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(sort: Option<&str>) -> FeedQueryParams {
        FeedQueryParams {
            sort: sort.map(str::to_string),
            offset: None,
            limit: None,
        }
    }

    #[test]
    fn test_missing_sort_falls_back_to_the_default_strategy() {
        assert_eq!(params(None).strategy().unwrap(), SortStrategy::default());
    }

    #[test]
    fn test_every_canonical_strategy_parses() {
        for strategy in SortStrategy::ALL {
            assert_eq!(
                params(Some(strategy.as_str())).strategy().unwrap(),
                strategy
            );
        }
    }

    #[test]
    fn test_unknown_sort_is_a_bad_request() {
        let err = params(Some("spiciest")).strategy().unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_title_validation_bounds() {
        assert!(CreatePostRequest { title: String::new() }.validate().is_err());
        assert!(CreatePostRequest { title: "x".repeat(281) }.validate().is_err());
        assert!(CreatePostRequest { title: "hot take".into() }.validate().is_ok());
    }
}
