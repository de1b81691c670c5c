//! Login and token verification handlers.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use vitrine_core::AdminId;

use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::models::CurrentAdmin;
use crate::services::auth::AuthService;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    token: String,
    admin: AdminInfo,
}

/// Administrator identity returned from login.
#[derive(Debug, Serialize)]
pub struct AdminInfo {
    id: AdminId,
    email: String,
    name: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    valid: bool,
    user: CurrentAdmin,
}

/// `POST /auth/login`
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    if request.email.is_empty() || request.password.is_empty() {
        return Err(AppError::BadRequest(
            "email and password are required".to_owned(),
        ));
    }

    let auth = AuthService::new(state.pool(), state.config().jwt_secret());
    let (token, admin) = auth.login(&request.email, &request.password).await?;

    Ok(Json(LoginResponse {
        token,
        admin: AdminInfo {
            id: admin.id,
            email: admin.email.as_str().to_owned(),
            name: admin.name,
        },
    }))
}

/// `GET /auth/verify`
///
/// Reaching the handler at all means the token checked out; echo the
/// identity it binds.
pub async fn verify(RequireAdmin(current): RequireAdmin) -> Json<VerifyResponse> {
    Json(VerifyResponse {
        valid: true,
        user: current,
    })
}
