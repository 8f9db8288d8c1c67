//! # sigbox-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Receive **operator callbacks** (`POST /sigfox/callback`) as JSON or
//!   URL-encoded forms and hand them to the record service
//! - Serve a **server-side-rendered HTML page** (`GET /`) listing the most
//!   recent records, regenerated from storage on every request
//! - Map application results into HTTP responses (JSON or HTML)
//!
//! ## Dependency rule
//! Depends on `sigbox-app` (for port traits and services) and `sigbox-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod dashboard;
pub mod error;
pub mod router;
pub mod state;
