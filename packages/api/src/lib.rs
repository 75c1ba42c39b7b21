//! HTTP API for uploading publications and reading back stored records.
//!
//! Uploads go through [`formex_extractor`] and land in Postgres; the read
//! side is a paginated listing plus lookup by ID.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod state;
pub mod store;

pub use config::ApiConfig;
pub use db::{create_pool, run_migrations};
pub use error::ApiError;
pub use handlers::create_router;
pub use models::{Document, NewDocument, PaginatedResponse};
pub use state::AppState;
