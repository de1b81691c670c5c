//! Contact form handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use vitrine_core::MessageId;

use super::MessageResponse;
use crate::db::ContactRepository;
use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::models::ContactMessage;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    message: String,
}

/// `POST /contact`
///
/// The one unauthenticated write in the API. Whitespace-only fields
/// count as missing.
pub async fn submit(
    State(state): State<AppState>,
    Json(request): Json<ContactRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let name = request.name.trim();
    let email = request.email.trim();
    let message = request.message.trim();

    if name.is_empty() || email.is_empty() || message.is_empty() {
        return Err(AppError::BadRequest(
            "name, email and message are required".to_owned(),
        ));
    }

    ContactRepository::new(state.pool())
        .create(name, email, message)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("message sent")),
    ))
}

/// `GET /admin/contact`
pub async fn list(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<ContactMessage>>, AppError> {
    let messages = ContactRepository::new(state.pool()).list_all().await?;
    Ok(Json(messages))
}

/// `PUT /admin/contact/{id}/read`
pub async fn mark_read(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    ContactRepository::new(state.pool())
        .mark_read(MessageId::new(id))
        .await?;
    Ok(Json(MessageResponse::new("message marked as read")))
}
