//! Content item handlers (carousel slides, about sections, ...).

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};

use vitrine_core::ContentId;

use super::{MessageResponse, forms};
use crate::db::ContentRepository;
use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::models::{ContentItem, NewContentItem};
use crate::services::media::MEDIA_FOLDER;
use crate::state::AppState;

/// `GET /content/{kind}`
pub async fn list_public(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> Result<Json<Vec<ContentItem>>, AppError> {
    let items = ContentRepository::new(state.pool()).list_public(&kind).await?;
    Ok(Json(items))
}

/// `GET /admin/content`
pub async fn list_all(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<ContentItem>>, AppError> {
    let items = ContentRepository::new(state.pool()).list_all().await?;
    Ok(Json(items))
}

/// `POST /admin/content`
pub async fn create(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ContentItem>), AppError> {
    let form = forms::read_form(multipart).await?;

    let image = match form.file {
        Some(ref file) => Some(
            state
                .media()
                .store(
                    file.bytes.clone(),
                    &file.content_type,
                    &file.file_name,
                    MEDIA_FOLDER,
                )
                .await?
                .url,
        ),
        None => None,
    };

    let item = NewContentItem {
        kind: form.text("type"),
        title: form.text("title"),
        description: form.text("description"),
        image,
        link: form.opt_text("link"),
        order_index: form.order_index(),
        visible: form.visible(),
    };

    let created = ContentRepository::new(state.pool()).create(&item).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `PUT /admin/content/{id}`
///
/// Full replacement of the mutable fields. A new image upload stores
/// the replacement first, then releases the prior asset best-effort.
pub async fn update(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Result<Json<MessageResponse>, AppError> {
    let id = ContentId::new(id);
    let repo = ContentRepository::new(state.pool());

    let existing = repo
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("content {id}")))?;

    let form = forms::read_form(multipart).await?;

    let image = match form.file {
        Some(ref file) => {
            let stored = state
                .media()
                .store(
                    file.bytes.clone(),
                    &file.content_type,
                    &file.file_name,
                    MEDIA_FOLDER,
                )
                .await?;
            if let Some(old) = &existing.image {
                state.media().release(old, None).await;
            }
            Some(stored.url)
        }
        None => existing.image,
    };

    let item = NewContentItem {
        kind: form.text("type"),
        title: form.text("title"),
        description: form.text("description"),
        image,
        link: form.opt_text("link"),
        order_index: form.order_index(),
        visible: form.visible(),
    };

    repo.update(id, &item).await?;
    Ok(Json(MessageResponse::new("content updated")))
}

/// `DELETE /admin/content/{id}`
pub async fn remove(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = ContentId::new(id);
    let repo = ContentRepository::new(state.pool());

    let existing = repo
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("content {id}")))?;

    if let Some(image) = &existing.image {
        state.media().release(image, None).await;
    }

    repo.delete(id).await?;
    Ok(Json(MessageResponse::new("content deleted")))
}
