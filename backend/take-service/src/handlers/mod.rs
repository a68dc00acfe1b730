/// HTTP handlers for the take-service API
///
/// - Posts: create a take, fetch one take, fetch the sorted feed
/// - Votes: apply one agree/disagree action for the requesting identity
/// - Comments: list, append, and reply
pub mod comments;
pub mod posts;
pub mod votes;

use actix_web::web;

/// Route table, shared by the binary and the tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/posts", web::post().to(posts::create_post))
        .route("/posts", web::get().to(posts::get_feed))
        .route("/posts/{id}", web::get().to(posts::get_post))
        .route("/posts/{id}/votes", web::post().to(votes::cast_vote))
        .route("/posts/{id}/comments", web::get().to(comments::list_comments))
        .route("/posts/{id}/comments", web::post().to(comments::create_comment))
        .route("/comments/{id}/replies", web::post().to(comments::append_reply));
}
