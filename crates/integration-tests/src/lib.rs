//! Integration tests for Vitrine.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the server against a scratch database
//! DATABASE_URL=sqlite:scratch.db?mode=rwc cargo run -p vitrine-server
//!
//! # Run the ignored integration tests
//! cargo test -p vitrine-integration-tests -- --ignored
//! ```
//!
//! Tests talk to a running server over HTTP; the base URL comes from
//! `VITRINE_BASE_URL` (default `http://localhost:3000`). The bootstrap
//! administrator credentials are the server defaults unless
//! `INITIAL_ADMIN_EMAIL` / `INITIAL_ADMIN_PASSWORD` are set for both
//! processes.
