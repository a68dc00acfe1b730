/// Anonymous identity extraction
///
/// Clients identify themselves with `Authorization: Basic base64(token)`,
/// where the token is the uuid minted and persisted client-side. It is a
/// correlation key, not a credential: there is no account, password or
/// expiry behind it, so there is nothing to validate beyond the shape.
use crate::error::AppError;
use actix_web::{dev::Payload, FromRequest, HttpRequest};
use base64::{engine::general_purpose, Engine as _};
use std::future::{ready, Ready};
use uuid::Uuid;

/// The requesting client's anonymous identity token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity(pub Uuid);

impl Identity {
    fn from_header(value: &str) -> Result<Self, AppError> {
        let encoded = value
            .strip_prefix("Basic ")
            .ok_or_else(|| AppError::InvalidIdentity("unsupported authorization scheme".into()))?;

        let decoded = general_purpose::STANDARD
            .decode(encoded.trim())
            .map_err(|_| AppError::InvalidIdentity("identity is not valid base64".into()))?;

        let raw = String::from_utf8(decoded)
            .map_err(|_| AppError::InvalidIdentity("identity is not valid utf-8".into()))?;

        Uuid::parse_str(raw.trim())
            .map(Identity)
            .map_err(|_| AppError::InvalidIdentity("identity is not a uuid".into()))
    }
}

impl FromRequest for Identity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let header = req
            .headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok());

        ready(match header {
            Some(value) => Identity::from_header(value),
            None => Err(AppError::InvalidIdentity(
                "missing Authorization header".into(),
            )),
        })
    }
}
