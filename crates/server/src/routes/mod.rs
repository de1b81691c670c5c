//! HTTP route handlers and the API router.

pub mod admins;
pub mod auth;
pub mod contact;
pub mod content;
pub mod forms;
pub mod gallery;
pub mod services;

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use serde::Serialize;

use crate::state::AppState;

/// Generic `{ "message": ... }` acknowledgement body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Build the API router.
///
/// Routes partition strictly into public endpoints and administrator
/// endpoints; every handler under `/admin`, plus admin management and
/// token verification, takes the [`crate::middleware::RequireAdmin`]
/// extractor.
pub fn router() -> Router<AppState> {
    Router::new()
        // Authentication
        .route("/auth/login", post(auth::login))
        .route("/auth/verify", get(auth::verify))
        // Administrator accounts
        .route("/admins", post(admins::create).get(admins::list))
        // Content items
        .route("/content/{kind}", get(content::list_public))
        .route(
            "/admin/content",
            get(content::list_all).post(content::create),
        )
        .route(
            "/admin/content/{id}",
            put(content::update).delete(content::remove),
        )
        // Services
        .route("/services", get(services::list_public))
        .route(
            "/admin/services",
            get(services::list_all).post(services::create),
        )
        .route(
            "/admin/services/{id}",
            put(services::update).delete(services::remove),
        )
        // Gallery
        .route("/gallery", get(gallery::list_public))
        .route(
            "/admin/gallery",
            get(gallery::list_all).post(gallery::create),
        )
        .route("/admin/gallery/{id}", delete(gallery::remove))
        // Contact messages
        .route("/contact", post(contact::submit))
        .route("/admin/contact", get(contact::list))
        .route("/admin/contact/{id}/read", put(contact::mark_read))
}
