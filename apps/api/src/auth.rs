//! Caller identity.
//!
//! Sessions live with the upstream auth provider. It resolves the signed-in
//! user and forwards the user id in the `x-user-id` header; this service only
//! trusts that header and threads the id explicitly into every operation.

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::warn;

use crate::errors::AppError;

pub const CALLER_HEADER: &str = "x-user-id";

/// The authenticated user making a request. Never blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerId(String);

impl CallerId {
    pub fn new(id: impl Into<String>) -> Result<Self, AppError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(AppError::Unauthorized);
        }
        Ok(CallerId(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when `owner_id` names this caller.
    pub fn owns(&self, owner_id: &str) -> bool {
        self.0 == owner_id
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CallerId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(CALLER_HEADER)
            .and_then(|h| h.to_str().ok());

        match header {
            Some(value) => CallerId::new(value),
            None => {
                warn!("Rejected request to {}: missing {CALLER_HEADER}", parts.uri.path());
                Err(AppError::Unauthorized)
            }
        }
    }
}
