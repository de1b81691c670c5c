//! Administrator account management handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use vitrine_core::{AdminId, Email};

use crate::db::AdminRepository;
use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::models::Admin;
use crate::services::auth::AuthService;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateAdminRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    name: String,
}

#[derive(Debug, Serialize)]
pub struct CreatedAdminResponse {
    id: AdminId,
    email: String,
    name: String,
    message: String,
}

/// `POST /admins`
pub async fn create(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Json(request): Json<CreateAdminRequest>,
) -> Result<(StatusCode, Json<CreatedAdminResponse>), AppError> {
    if request.email.is_empty() || request.password.is_empty() || request.name.is_empty() {
        return Err(AppError::BadRequest(
            "email, password and name are required".to_owned(),
        ));
    }

    let email = Email::parse(&request.email)
        .map_err(|e| AppError::BadRequest(format!("invalid email: {e}")))?;

    let auth = AuthService::new(state.pool(), state.config().jwt_secret());
    let admin = auth
        .create_admin(&email, &request.password, &request.name)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedAdminResponse {
            id: admin.id,
            email: admin.email.as_str().to_owned(),
            name: admin.name,
            message: "administrator created".to_owned(),
        }),
    ))
}

/// `GET /admins`
///
/// Password hashes never appear in the response type.
pub async fn list(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<Admin>>, AppError> {
    let admins = AdminRepository::new(state.pool()).list_all().await?;
    Ok(Json(admins))
}
