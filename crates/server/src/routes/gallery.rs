//! Gallery handlers. Entries are created and deleted, never updated,
//! and the image upload is mandatory at creation.

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};

use vitrine_core::GalleryId;

use super::{MessageResponse, forms};
use crate::db::GalleryRepository;
use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::models::{GalleryItem, NewGalleryItem};
use crate::services::media::MEDIA_FOLDER;
use crate::state::AppState;

/// `GET /gallery`
pub async fn list_public(
    State(state): State<AppState>,
) -> Result<Json<Vec<GalleryItem>>, AppError> {
    let items = GalleryRepository::new(state.pool()).list_public().await?;
    Ok(Json(items))
}

/// `GET /admin/gallery`
pub async fn list_all(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<GalleryItem>>, AppError> {
    let items = GalleryRepository::new(state.pool()).list_all().await?;
    Ok(Json(items))
}

/// `POST /admin/gallery`
pub async fn create(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<GalleryItem>), AppError> {
    let form = forms::read_form(multipart).await?;

    let Some(ref file) = form.file else {
        return Err(AppError::BadRequest("image is required".to_owned()));
    };

    let stored = state
        .media()
        .store(
            file.bytes.clone(),
            &file.content_type,
            &file.file_name,
            MEDIA_FOLDER,
        )
        .await?;

    let item = NewGalleryItem {
        title: form.opt_text("title"),
        image: stored.url,
        description: form.text("description"),
        order_index: form.order_index(),
        visible: form.visible(),
    };

    let created = GalleryRepository::new(state.pool()).create(&item).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `DELETE /admin/gallery/{id}`
pub async fn remove(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = GalleryId::new(id);
    let repo = GalleryRepository::new(state.pool());

    let existing = repo
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("gallery entry {id}")))?;

    state.media().release(&existing.image, None).await;

    repo.delete(id).await?;
    Ok(Json(MessageResponse::new("gallery entry deleted")))
}
