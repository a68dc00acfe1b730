/// Take Service Library
///
/// The backing store for the takes platform: posts, votes, comments and the
/// sorted feed, persisted in Postgres and exposed over HTTP. The vote
/// endpoint applies the shared transition table from `take-core` inside a
/// transaction, so server-side tallies can never diverge from what clients
/// predict locally.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers
/// - `db`: schema bootstrap and repositories
/// - `identity`: anonymous identity extraction from the Authorization header
/// - `error`: error types and HTTP mapping
/// - `config`: configuration management
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod identity;

pub use config::Config;
pub use error::{AppError, Result};
