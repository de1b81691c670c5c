//! Bearer token authentication extractor.
//!
//! Administrative handlers take [`RequireAdmin`] as an argument; the
//! extractor rejects the request before the handler body runs when the
//! token is missing (401) or fails verification (403).

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::models::CurrentAdmin;
use crate::services::auth::verify_token;
use crate::state::AppState;

/// Extractor that admits only authenticated administrators.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub CurrentAdmin);

/// Rejection for failed admin authentication.
#[derive(Debug)]
pub enum AdminAuthRejection {
    /// No `Authorization: Bearer` header on the request.
    MissingToken,
    /// Token present but malformed, badly signed, or expired.
    InvalidToken,
}

impl IntoResponse for AdminAuthRejection {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::MissingToken => (StatusCode::UNAUTHORIZED, "missing bearer token"),
            Self::InvalidToken => (StatusCode::FORBIDDEN, "invalid or expired token"),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AdminAuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or(AdminAuthRejection::MissingToken)?;

        let current = verify_token(token, state.config().jwt_secret())
            .map_err(|_| AdminAuthRejection::InvalidToken)?;

        Ok(Self(current))
    }
}
