//! Administrator authentication: bcrypt password verification and
//! signed bearer tokens.
//!
//! Login and token verification are deliberately shaped so that unknown
//! emails and wrong passwords are indistinguishable from the outside,
//! and the unknown-email path still performs a hash verification so the
//! two cases take comparable time.

mod error;

pub use error::AuthError;

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use vitrine_core::{AdminId, Email};

use crate::config::BootstrapAdminConfig;
use crate::db::AdminRepository;
use crate::models::{Admin, CurrentAdmin};

/// Token lifetime in seconds (24 hours).
const TOKEN_VALIDITY_SECS: i64 = 24 * 60 * 60;

/// bcrypt work factor for newly stored passwords.
const HASH_COST: u32 = 10;

/// A valid bcrypt hash of an unguessable string, verified against when
/// the email is unknown so both login failures cost a hash check.
const DUMMY_HASH: &str = "$2a$10$N9qo8uLOickgx2ZMRZoMyeIjZAgcfl7p92ldGxad68LJZdL17lhWy";

/// Bearer token claims.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Administrator id.
    sub: i64,
    /// Email at the time of issue.
    email: String,
    /// Issued-at, seconds since the epoch.
    iat: i64,
    /// Expiry, seconds since the epoch.
    exp: i64,
}

/// Issue a signed bearer token for an administrator.
///
/// # Errors
///
/// Returns `AuthError::Token` if encoding fails.
pub fn issue_token(admin: &Admin, secret: &SecretString) -> Result<String, AuthError> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: admin.id.as_i64(),
        email: admin.email.as_str().to_owned(),
        iat: now,
        exp: now + TOKEN_VALIDITY_SECS,
    };

    let token = jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.expose_secret().as_bytes()),
    )?;

    Ok(token)
}

/// Verify a bearer token and recover the administrator it binds.
///
/// # Errors
///
/// Returns `AuthError::InvalidToken` for malformed, badly signed, or
/// expired tokens.
pub fn verify_token(token: &str, secret: &SecretString) -> Result<CurrentAdmin, AuthError> {
    let data = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.expose_secret().as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AuthError::InvalidToken)?;

    Ok(CurrentAdmin {
        id: AdminId::new(data.claims.sub),
        email: data.claims.email,
    })
}

/// Authentication service over the administrator repository.
pub struct AuthService<'a> {
    pool: &'a SqlitePool,
    secret: &'a SecretString,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool, secret: &'a SecretString) -> Self {
        Self { pool, secret }
    }

    /// Verify credentials and issue a bearer token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for unknown emails and
    /// wrong passwords alike. Returns `AuthError::Repository` if the
    /// lookup fails.
    pub async fn login(&self, email: &str, password: &str) -> Result<(String, Admin), AuthError> {
        let repo = AdminRepository::new(self.pool);

        // An unparseable email cannot match an account; burn a hash
        // check anyway so the failure takes the same time.
        let Ok(email) = Email::parse(email) else {
            verify_password(password.to_owned(), DUMMY_HASH.to_owned()).await?;
            return Err(AuthError::InvalidCredentials);
        };

        let Some(credentials) = repo.find_credentials(&email).await? else {
            verify_password(password.to_owned(), DUMMY_HASH.to_owned()).await?;
            return Err(AuthError::InvalidCredentials);
        };

        let matches =
            verify_password(password.to_owned(), credentials.password_hash.clone()).await?;
        if !matches {
            return Err(AuthError::InvalidCredentials);
        }

        let token = issue_token(&credentials.admin, self.secret)?;
        Ok((token, credentials.admin))
    }

    /// Hash a password and store a new administrator account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` with a conflict if the email is
    /// already registered, and `AuthError::Hash` if hashing fails.
    pub async fn create_admin(
        &self,
        email: &Email,
        password: &str,
        name: &str,
    ) -> Result<Admin, AuthError> {
        let password = password.to_owned();
        let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, HASH_COST)).await??;

        let repo = AdminRepository::new(self.pool);
        Ok(repo.create(email, &hash, name).await?)
    }

    /// Seed the first administrator account when none exist.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the count or insert fails, and
    /// `AuthError::Hash` if hashing fails.
    pub async fn bootstrap(&self, config: &BootstrapAdminConfig) -> Result<(), AuthError> {
        let repo = AdminRepository::new(self.pool);
        if repo.count().await? > 0 {
            return Ok(());
        }

        let Ok(email) = Email::parse(&config.email) else {
            tracing::warn!(
                email = %config.email,
                "bootstrap admin email is invalid; no account seeded"
            );
            return Ok(());
        };

        self.create_admin(&email, config.password.expose_secret(), &config.name)
            .await?;
        tracing::info!(email = %email, "seeded bootstrap administrator account");
        Ok(())
    }
}

/// bcrypt verification on the blocking pool.
async fn verify_password(password: String, hash: String) -> Result<bool, AuthError> {
    let matches = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await??;
    Ok(matches)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::test_support::memory_pool;

    fn secret() -> SecretString {
        SecretString::from("a-test-signing-secret-of-decent-length")
    }

    #[tokio::test]
    async fn test_login_issues_verifiable_token() {
        let pool = memory_pool().await;
        let secret = secret();
        let auth = AuthService::new(&pool, &secret);
        let email = Email::parse("admin@example.com").unwrap();

        auth.create_admin(&email, "correct horse battery", "Admin")
            .await
            .unwrap();

        let (token, admin) = auth
            .login("admin@example.com", "correct horse battery")
            .await
            .unwrap();

        let current = verify_token(&token, &secret).unwrap();
        assert_eq!(current.id, admin.id);
        assert_eq!(current.email, "admin@example.com");
    }

    #[tokio::test]
    async fn test_unknown_email_and_wrong_password_are_indistinguishable() {
        let pool = memory_pool().await;
        let secret = secret();
        let auth = AuthService::new(&pool, &secret);
        let email = Email::parse("admin@example.com").unwrap();

        auth.create_admin(&email, "right-password", "Admin")
            .await
            .unwrap();

        let unknown = auth
            .login("nobody@example.com", "whatever")
            .await
            .unwrap_err();
        let wrong = auth
            .login("admin@example.com", "wrong-password")
            .await
            .unwrap_err();
        let malformed = auth.login("not-an-email", "whatever").await.unwrap_err();

        assert!(matches!(unknown, AuthError::InvalidCredentials));
        assert!(matches!(wrong, AuthError::InvalidCredentials));
        assert!(matches!(malformed, AuthError::InvalidCredentials));
        assert_eq!(unknown.to_string(), wrong.to_string());
    }

    #[tokio::test]
    async fn test_bootstrap_seeds_only_into_empty_table() {
        let pool = memory_pool().await;
        let secret = secret();
        let auth = AuthService::new(&pool, &secret);
        let config = BootstrapAdminConfig {
            email: "admin@example.com".to_owned(),
            password: SecretString::from("bootstrap-password"),
            name: "Administrator".to_owned(),
        };

        auth.bootstrap(&config).await.unwrap();
        // Second run is a no-op: the table already has an account
        auth.bootstrap(&config).await.unwrap();

        let repo = AdminRepository::new(&pool);
        assert_eq!(repo.count().await.unwrap(), 1);

        auth.login("admin@example.com", "bootstrap-password")
            .await
            .unwrap();
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let secret = secret();
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: 1,
            email: "admin@example.com".to_owned(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.expose_secret().as_bytes()),
        )
        .unwrap();

        let err = verify_token(&token, &secret).unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let admin = Admin {
            id: AdminId::new(7),
            email: Email::parse("admin@example.com").unwrap(),
            name: "Admin".to_owned(),
            created_at: Utc::now(),
        };

        let token = issue_token(&admin, &SecretString::from("one-secret-value-here")).unwrap();
        let err = verify_token(&token, &SecretString::from("another-secret-value")).unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }
}
