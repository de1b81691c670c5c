//! Business logic services built on the repositories.

pub mod auth;
pub mod media;
