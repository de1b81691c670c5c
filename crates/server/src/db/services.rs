//! Service card repository.
//!
//! Same lifecycle shape as content items, minus the kind discriminator
//! and plus the free-text price label.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use vitrine_core::ServiceId;

use super::RepositoryError;
use crate::models::{NewServiceItem, ServiceItem};

/// Internal row type for service queries.
#[derive(Debug, sqlx::FromRow)]
struct ServiceRow {
    id: i64,
    title: String,
    description: String,
    image: Option<String>,
    price: String,
    order_index: i64,
    visible: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ServiceRow> for ServiceItem {
    fn from(row: ServiceRow) -> Self {
        Self {
            id: ServiceId::new(row.id),
            title: row.title,
            description: row.description,
            image: row.image,
            price: row.price,
            order_index: row.order_index,
            visible: row.visible,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const SELECT_COLUMNS: &str = "id, title, description, image, price, \
                              order_index, visible, created_at, updated_at";

/// Repository for service database operations.
pub struct ServiceRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ServiceRepository<'a> {
    /// Create a new service repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List visible services ordered by `order_index`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_public(&self) -> Result<Vec<ServiceItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, ServiceRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM services \
             WHERE visible = 1 \
             ORDER BY order_index ASC, id ASC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// List all services regardless of visibility.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<ServiceItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, ServiceRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM services \
             ORDER BY order_index ASC, id ASC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get a single service by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ServiceId) -> Result<Option<ServiceItem>, RepositoryError> {
        let row = sqlx::query_as::<_, ServiceRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM services WHERE id = ?1"
        ))
        .bind(id.as_i64())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Create a service.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, item: &NewServiceItem) -> Result<ServiceItem, RepositoryError> {
        let now = Utc::now();

        let row = sqlx::query_as::<_, ServiceRow>(&format!(
            "INSERT INTO services \
             (title, description, image, price, order_index, visible, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7) \
             RETURNING {SELECT_COLUMNS}"
        ))
        .bind(&item.title)
        .bind(&item.description)
        .bind(&item.image)
        .bind(&item.price)
        .bind(item.order_index)
        .bind(item.visible)
        .bind(now)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Replace the mutable fields of a service; `updated_at` is refreshed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row has this id.
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update(
        &self,
        id: ServiceId,
        item: &NewServiceItem,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE services
            SET title = ?1, description = ?2, image = ?3, price = ?4,
                order_index = ?5, visible = ?6, updated_at = ?7
            WHERE id = ?8
            ",
        )
        .bind(&item.title)
        .bind(&item.description)
        .bind(&item.image)
        .bind(&item.price)
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

    /// Delete a service. Media release is the caller's responsibility.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row has this id.
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: ServiceId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM services WHERE id = ?1")
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

    fn card(title: &str, visible: bool) -> NewServiceItem {
        NewServiceItem {
            title: title.to_owned(),
            description: "desc".to_owned(),
            image: None,
            price: "from 50€".to_owned(),
            order_index: 0,
            visible,
        }
    }

    #[tokio::test]
    async fn test_visibility_partition() {
        let pool = memory_pool().await;
        let repo = ServiceRepository::new(&pool);

        repo.create(&card("shown", true)).await.unwrap();
        repo.create(&card("hidden", false)).await.unwrap();

        let public = repo.list_public().await.unwrap();
        assert_eq!(public.len(), 1);
        assert_eq!(public[0].title, "shown");

        let all = repo.list_all().await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_price_is_free_text() {
        let pool = memory_pool().await;
        let repo = ServiceRepository::new(&pool);

        let created = repo.create(&card("priced", true)).await.unwrap();
        assert_eq!(created.price, "from 50€");
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let pool = memory_pool().await;
        let repo = ServiceRepository::new(&pool);

        let err = repo
            .update(ServiceId::new(42), &card("x", false))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }
}
