//! Gallery repository.
//!
//! Gallery entries are append-and-delete only; there is no update
//! operation, and the image reference is mandatory at creation.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use vitrine_core::GalleryId;

use super::RepositoryError;
use crate::models::{GalleryItem, NewGalleryItem};

/// Internal row type for gallery queries.
#[derive(Debug, sqlx::FromRow)]
struct GalleryRow {
    id: i64,
    title: Option<String>,
    image: String,
    description: String,
    order_index: i64,
    visible: bool,
    created_at: DateTime<Utc>,
}

impl From<GalleryRow> for GalleryItem {
    fn from(row: GalleryRow) -> Self {
        Self {
            id: GalleryId::new(row.id),
            title: row.title,
            image: row.image,
            description: row.description,
            order_index: row.order_index,
            visible: row.visible,
            created_at: row.created_at,
        }
    }
}

const SELECT_COLUMNS: &str = "id, title, image, description, order_index, visible, created_at";

/// Repository for gallery database operations.
pub struct GalleryRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> GalleryRepository<'a> {
    /// Create a new gallery repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List visible gallery entries ordered by `order_index`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_public(&self) -> Result<Vec<GalleryItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, GalleryRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM gallery \
             WHERE visible = 1 \
             ORDER BY order_index ASC, id ASC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// List all gallery entries regardless of visibility.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<GalleryItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, GalleryRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM gallery \
             ORDER BY order_index ASC, id ASC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get a single gallery entry by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: GalleryId) -> Result<Option<GalleryItem>, RepositoryError> {
        let row = sqlx::query_as::<_, GalleryRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM gallery WHERE id = ?1"
        ))
        .bind(id.as_i64())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Create a gallery entry.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, item: &NewGalleryItem) -> Result<GalleryItem, RepositoryError> {
        let row = sqlx::query_as::<_, GalleryRow>(&format!(
            "INSERT INTO gallery \
             (title, image, description, order_index, visible, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6) \
             RETURNING {SELECT_COLUMNS}"
        ))
        .bind(&item.title)
        .bind(&item.image)
        .bind(&item.description)
        .bind(item.order_index)
        .bind(item.visible)
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Delete a gallery entry. Media release is the caller's
    /// responsibility.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row has this id.
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: GalleryId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM gallery WHERE id = ?1")
            .bind(id.as_i64())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::test_support::memory_pool;

    fn entry(image: &str, order_index: i64, visible: bool) -> NewGalleryItem {
        NewGalleryItem {
            title: None,
            image: image.to_owned(),
            description: String::new(),
            order_index,
            visible,
        }
    }

    #[tokio::test]
    async fn test_listing_order_and_visibility() {
        let pool = memory_pool().await;
        let repo = GalleryRepository::new(&pool);

        repo.create(&entry("https://cdn/b.jpg", 2, true))
            .await
            .unwrap();
        repo.create(&entry("https://cdn/a.jpg", 1, true))
            .await
            .unwrap();
        repo.create(&entry("https://cdn/hidden.jpg", 0, false))
            .await
            .unwrap();

        let public = repo.list_public().await.unwrap();
        assert_eq!(public.len(), 2);
        assert_eq!(public[0].image, "https://cdn/a.jpg");

        assert_eq!(repo.list_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_optional_title_round_trips_as_null() {
        let pool = memory_pool().await;
        let repo = GalleryRepository::new(&pool);

        let untitled = repo.create(&entry("https://cdn/x.jpg", 0, true)).await.unwrap();
        assert!(untitled.title.is_none());

        let mut titled = entry("https://cdn/y.jpg", 0, true);
        titled.title = Some("Sunset".to_owned());
        let titled = repo.create(&titled).await.unwrap();
        assert_eq!(titled.title.as_deref(), Some("Sunset"));
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_not_found() {
        let pool = memory_pool().await;
        let repo = GalleryRepository::new(&pool);

        let err = repo.delete(GalleryId::new(9)).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }
}
