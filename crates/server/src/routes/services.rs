//! Service card handlers.

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};

use vitrine_core::ServiceId;

use super::{MessageResponse, forms};
use crate::db::ServiceRepository;
use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::models::{NewServiceItem, ServiceItem};
use crate::services::media::MEDIA_FOLDER;
use crate::state::AppState;

/// `GET /services`
pub async fn list_public(
    State(state): State<AppState>,
) -> Result<Json<Vec<ServiceItem>>, AppError> {
    let items = ServiceRepository::new(state.pool()).list_public().await?;
    Ok(Json(items))
}

/// `GET /admin/services`
pub async fn list_all(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<ServiceItem>>, AppError> {
    let items = ServiceRepository::new(state.pool()).list_all().await?;
    Ok(Json(items))
}

/// `POST /admin/services`
pub async fn create(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ServiceItem>), AppError> {
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

    let item = NewServiceItem {
        title: form.text("title"),
        description: form.text("description"),
        image,
        price: form.text("price"),
        order_index: form.order_index(),
        visible: form.visible(),
    };

    let created = ServiceRepository::new(state.pool()).create(&item).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `PUT /admin/services/{id}`
pub async fn update(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Result<Json<MessageResponse>, AppError> {
    let id = ServiceId::new(id);
    let repo = ServiceRepository::new(state.pool());

    let existing = repo
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("service {id}")))?;

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

    let item = NewServiceItem {
        title: form.text("title"),
        description: form.text("description"),
        image,
        price: form.text("price"),
        order_index: form.order_index(),
        visible: form.visible(),
    };

    repo.update(id, &item).await?;
    Ok(Json(MessageResponse::new("service updated")))
}

/// `DELETE /admin/services/{id}`
pub async fn remove(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = ServiceId::new(id);
    let repo = ServiceRepository::new(state.pool());

    let existing = repo
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("service {id}")))?;

    if let Some(image) = &existing.image {
        state.media().release(image, None).await;
    }

    repo.delete(id).await?;
    Ok(Json(MessageResponse::new("service deleted")))
}
