//! Contact message repository.
//!
//! Messages arrive through the public form and are only ever mutated by
//! the mark-read operation, which is idempotent.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use vitrine_core::MessageId;

use super::RepositoryError;
use crate::models::ContactMessage;

/// Internal row type for contact message queries.
#[derive(Debug, sqlx::FromRow)]
struct ContactMessageRow {
    id: i64,
    name: String,
    email: String,
    message: String,
    read: bool,
    created_at: DateTime<Utc>,
}

impl From<ContactMessageRow> for ContactMessage {
    fn from(row: ContactMessageRow) -> Self {
        Self {
            id: MessageId::new(row.id),
            name: row.name,
            email: row.email,
            message: row.message,
            read: row.read,
            created_at: row.created_at,
        }
    }
}

const SELECT_COLUMNS: &str = "id, name, email, message, read, created_at";

/// Repository for contact message database operations.
pub struct ContactRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ContactRepository<'a> {
    /// Create a new contact message repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all messages, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<ContactMessage>, RepositoryError> {
        let rows = sqlx::query_as::<_, ContactMessageRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM contact_messages \
             ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Record a new, unread message.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        name: &str,
        email: &str,
        message: &str,
    ) -> Result<ContactMessage, RepositoryError> {
        let row = sqlx::query_as::<_, ContactMessageRow>(&format!(
            "INSERT INTO contact_messages (name, email, message, read, created_at) \
             VALUES (?1, ?2, ?3, 0, ?4) \
             RETURNING {SELECT_COLUMNS}"
        ))
        .bind(name)
        .bind(email)
        .bind(message)
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Mark a message as read. Idempotent: marking an already-read
    /// message succeeds.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row has this id.
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn mark_read(&self, id: MessageId) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE contact_messages SET read = 1 WHERE id = ?1")
            .bind(id.as_i64())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Count all stored messages.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM contact_messages")
            .fetch_one(self.pool)
            .await?;

        Ok(count.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::test_support::memory_pool;

    #[tokio::test]
    async fn test_create_starts_unread() {
        let pool = memory_pool().await;
        let repo = ContactRepository::new(&pool);

        let msg = repo
            .create("Ada", "ada@example.com", "Hello there")
            .await
            .unwrap();
        assert!(!msg.read);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_mark_read_is_idempotent() {
        let pool = memory_pool().await;
        let repo = ContactRepository::new(&pool);

        let msg = repo.create("Ada", "ada@example.com", "Hi").await.unwrap();

        repo.mark_read(msg.id).await.unwrap();
        // Second call succeeds and leaves the flag set
        repo.mark_read(msg.id).await.unwrap();

        let all = repo.list_all().await.unwrap();
        assert!(all[0].read);
    }

    #[tokio::test]
    async fn test_mark_read_unknown_id_is_not_found() {
        let pool = memory_pool().await;
        let repo = ContactRepository::new(&pool);

        let err = repo.mark_read(MessageId::new(404)).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_listing_newest_first() {
        let pool = memory_pool().await;
        let repo = ContactRepository::new(&pool);

        repo.create("First", "a@example.com", "one").await.unwrap();
        repo.create("Second", "b@example.com", "two").await.unwrap();

        let all = repo.list_all().await.unwrap();
        assert_eq!(all[0].name, "Second");
        assert_eq!(all[1].name, "First");
    }
}
