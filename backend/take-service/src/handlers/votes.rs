/// Vote handler - applies one reaction through the transition table
use crate::db::vote_repo;
use crate::error::Result;
use crate::identity::Identity;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use take_core::VoteDirection;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    pub direction: VoteDirection,
}

/// Apply one agree/disagree action from the requesting identity to a post.
/// The ledger does no request de-duplication: every delivered action is one
/// transition and one interactions increment, so exactly-once delivery per
/// click is the caller's job.
pub async fn cast_vote(
    pool: web::Data<PgPool>,
    post_id: web::Path<Uuid>,
    identity: Identity,
    req: web::Json<VoteRequest>,
) -> Result<HttpResponse> {
    let receipt = vote_repo::apply_vote(&pool, *post_id, identity.0, req.direction).await?;

    tracing::debug!(
        post_id = %receipt.post_id,
        state = ?receipt.state,
        heat_delta = receipt.heat_delta,
        interactions = receipt.interactions,
        "vote applied"
    );

    Ok(HttpResponse::Ok().json(receipt))
}
