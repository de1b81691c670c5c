//! Content item repository.
//!
//! Generic content items back the carousel and the about section; the
//! `kind` column discriminates. Public listings see only visible rows,
//! ordered by the manually assigned `order_index`.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use vitrine_core::ContentId;

use super::RepositoryError;
use crate::models::{ContentItem, NewContentItem};

/// Internal row type for content queries.
#[derive(Debug, sqlx::FromRow)]
struct ContentRow {
    id: i64,
    kind: String,
    title: String,
    description: String,
    image: Option<String>,
    link: Option<String>,
    order_index: i64,
    visible: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ContentRow> for ContentItem {
    fn from(row: ContentRow) -> Self {
        Self {
            id: ContentId::new(row.id),
            kind: row.kind,
            title: row.title,
            description: row.description,
            image: row.image,
            link: row.link,
            order_index: row.order_index,
            visible: row.visible,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const SELECT_COLUMNS: &str = "id, kind, title, description, image, link, \
                              order_index, visible, created_at, updated_at";

/// Repository for content item database operations.
pub struct ContentRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ContentRepository<'a> {
    /// Create a new content repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List visible items of one kind, ordered by `order_index`.
    ///
    /// This backs the public, unauthenticated endpoint.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_public(&self, kind: &str) -> Result<Vec<ContentItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, ContentRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM content \
             WHERE kind = ?1 AND visible = 1 \
             ORDER BY order_index ASC, id ASC"
        ))
        .bind(kind)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// List every item regardless of visibility, grouped by kind.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<ContentItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, ContentRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM content \
             ORDER BY kind ASC, order_index ASC, id ASC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get a single item by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ContentId) -> Result<Option<ContentItem>, RepositoryError> {
        let row = sqlx::query_as::<_, ContentRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM content WHERE id = ?1"
        ))
        .bind(id.as_i64())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Create a content item.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, item: &NewContentItem) -> Result<ContentItem, RepositoryError> {
        let now = Utc::now();

        let row = sqlx::query_as::<_, ContentRow>(&format!(
            "INSERT INTO content \
             (kind, title, description, image, link, order_index, visible, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8) \
             RETURNING {SELECT_COLUMNS}"
        ))
        .bind(&item.kind)
        .bind(&item.title)
        .bind(&item.description)
        .bind(&item.image)
        .bind(&item.link)
        .bind(item.order_index)
        .bind(item.visible)
        .bind(now)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Replace the mutable fields of an item; `updated_at` is refreshed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row has this id.
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update(
        &self,
        id: ContentId,
        item: &NewContentItem,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE content
            SET kind = ?1, title = ?2, description = ?3, image = ?4, link = ?5,
                order_index = ?6, visible = ?7, updated_at = ?8
            WHERE id = ?9
            ",
        )
        .bind(&item.kind)
        .bind(&item.title)
        .bind(&item.description)
        .bind(&item.image)
        .bind(&item.link)
        .bind(item.order_index)
        .bind(item.visible)
        .bind(Utc::now())
        .bind(id.as_i64())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Delete an item. The caller is responsible for releasing any
    /// stored media first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row has this id.
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: ContentId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM content WHERE id = ?1")
            .bind(id.as_i64())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
