//! Administrator repository for database operations.
//!
//! Queries are runtime-bound (`query_as::<_, Row>`); internal row types
//! convert into domain types via `TryFrom` so invalid stored data
//! surfaces as `DataCorruption` instead of panicking.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use vitrine_core::{AdminId, Email};

use super::RepositoryError;
use crate::models::{Admin, AdminCredentials};

/// Internal row type for admin queries.
#[derive(Debug, sqlx::FromRow)]
struct AdminRow {
    id: i64,
    email: String,
    name: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<AdminRow> for Admin {
    type Error = RepositoryError;

    fn try_from(row: AdminRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: AdminId::new(row.id),
            email,
            name: row.name,
            created_at: row.created_at,
        })
    }
}

/// Internal row type carrying the password hash for the login path.
#[derive(Debug, sqlx::FromRow)]
struct AdminCredentialsRow {
    id: i64,
    email: String,
    password_hash: String,
    name: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<AdminCredentialsRow> for AdminCredentials {
    type Error = RepositoryError;

    fn try_from(row: AdminCredentialsRow) -> Result<Self, Self::Error> {
        let admin = AdminRow {
            id: row.id,
            email: row.email,
            name: row.name,
            created_at: row.created_at,
        }
        .try_into()?;

        Ok(Self {
            admin,
            password_hash: row.password_hash,
        })
    }
}

/// Repository for administrator database operations.
pub struct AdminRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> AdminRepository<'a> {
    /// Create a new administrator repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all administrators, newest first. Password hashes are not
    /// part of the returned type.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn list_all(&self) -> Result<Vec<Admin>, RepositoryError> {
        let rows = sqlx::query_as::<_, AdminRow>(
            r"
            SELECT id, email, name, created_at
            FROM admins
            ORDER BY created_at DESC, id DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Look up an administrator with their password hash by email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn find_credentials(
        &self,
        email: &Email,
    ) -> Result<Option<AdminCredentials>, RepositoryError> {
        let row = sqlx::query_as::<_, AdminCredentialsRow>(
            r"
            SELECT id, email, password_hash, name, created_at
            FROM admins
            WHERE email = ?1
            ",
        )
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Create a new administrator from an already-hashed password.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        email: &Email,
        password_hash: &str,
        name: &str,
    ) -> Result<Admin, RepositoryError> {
        let created_at = Utc::now();

        let row = sqlx::query_as::<_, AdminRow>(
            r"
            INSERT INTO admins (email, password_hash, name, created_at)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id, email, name, created_at
            ",
        )
        .bind(email.as_str())
        .bind(password_hash)
        .bind(name)
        .bind(created_at)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("email already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        row.try_into()
    }

    /// Count all administrator accounts.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM admins")
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
    async fn test_create_and_find_credentials() {
        let pool = memory_pool().await;
        let repo = AdminRepository::new(&pool);
        let email = Email::parse("admin@example.com").unwrap();

        let admin = repo.create(&email, "$2b$10$hash", "Admin").await.unwrap();
        assert_eq!(admin.email.as_str(), "admin@example.com");
        assert_eq!(admin.name, "Admin");

        let creds = repo.find_credentials(&email).await.unwrap().unwrap();
        assert_eq!(creds.admin.id, admin.id);
        assert_eq!(creds.password_hash, "$2b$10$hash");

        let unknown = Email::parse("other@example.com").unwrap();
        assert!(repo.find_credentials(&unknown).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_conflict_leaves_count_unchanged() {
        let pool = memory_pool().await;
        let repo = AdminRepository::new(&pool);
        let email = Email::parse("admin@example.com").unwrap();

        repo.create(&email, "hash-a", "First").await.unwrap();
        let err = repo.create(&email, "hash-b", "Second").await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_list_all_newest_first_without_hashes() {
        let pool = memory_pool().await;
        let repo = AdminRepository::new(&pool);

        repo.create(&Email::parse("a@example.com").unwrap(), "h", "A")
            .await
            .unwrap();
        repo.create(&Email::parse("b@example.com").unwrap(), "h", "B")
            .await
            .unwrap();

        let admins = repo.list_all().await.unwrap();
        assert_eq!(admins.len(), 2);
        // Newest first; ties on created_at break by id
        assert_eq!(admins[0].email.as_str(), "b@example.com");
        assert_eq!(admins[1].email.as_str(), "a@example.com");

        let json = serde_json::to_value(&admins).unwrap();
        assert!(json[0].get("password_hash").is_none());
    }
}
