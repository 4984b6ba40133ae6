//! `x-api-key` guard for write routes.

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::IntoResponse,
};
use tracing::{debug, error};

use super::api_error::error_body;
use super::state::ServerState;

pub const HEADER_API_KEY: &str = "x-api-key";

/// Proof that the request carried the configured API key.
#[derive(Debug)]
pub struct ApiKey;

#[derive(Debug, PartialEq, Eq)]
pub enum ApiKeyRejection {
    NotConfigured,
    Missing,
    Invalid,
}

impl IntoResponse for ApiKeyRejection {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiKeyRejection::NotConfigured => error_body(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Server misconfigured: API key not set",
            ),
            ApiKeyRejection::Missing => error_body(StatusCode::UNAUTHORIZED, "Missing API key"),
            ApiKeyRejection::Invalid => error_body(StatusCode::FORBIDDEN, "Invalid API key"),
        }
    }
}

fn check_api_key(
    expected: Option<&str>,
    provided: Option<&[u8]>,
) -> Result<ApiKey, ApiKeyRejection> {
    let expected = expected.ok_or(ApiKeyRejection::NotConfigured)?;
    let provided = provided.ok_or(ApiKeyRejection::Missing)?;
    if provided != expected.as_bytes() {
        return Err(ApiKeyRejection::Invalid);
    }
    Ok(ApiKey)
}

impl FromRequestParts<ServerState> for ApiKey {
    type Rejection = ApiKeyRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        let provided = parts.headers.get(HEADER_API_KEY).map(|v| v.as_bytes());
        let result = check_api_key(ctx.config.api_key.as_deref(), provided);
        match &result {
            Err(ApiKeyRejection::NotConfigured) => {
                error!("Write request refused, no API key configured")
            }
            Err(rejection) => debug!("API key rejected: {:?}", rejection),
            Ok(_) => {}
        }
        result
    }
}
