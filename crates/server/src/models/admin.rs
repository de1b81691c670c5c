//! Administrator domain types.
//!
//! These types represent validated domain objects for administrator
//! identity. The password hash never appears on [`Admin`], so admin
//! listings can be serialized directly without leaking it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vitrine_core::{AdminId, Email};

/// An administrator account (domain type).
#[derive(Debug, Clone, Serialize)]
pub struct Admin {
    /// Unique administrator ID.
    pub id: AdminId,
    /// Administrator's email address.
    pub email: Email,
    /// Administrator's display name.
    pub name: String,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

/// An administrator account together with its password hash.
///
/// Only the login path sees this type; it is never serialized.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    /// The administrator account.
    pub admin: Admin,
    /// bcrypt hash of the password.
    pub password_hash: String,
}

/// The authenticated administrator attached to a request.
///
/// Reconstructed from the bearer token claims on every administrative
/// request; holds exactly what the token binds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAdmin {
    /// Administrator ID from the token subject.
    pub id: AdminId,
    /// Email bound into the token at login.
    pub email: String,
}
