//! HTTP API handlers for journal-ai
//!
//! - `POST /analyze`, `POST /add`, `GET /last`, `GET /all` (entries.rs)
//! - `GET /health` (health.rs)

pub mod entries;
pub mod health;

pub use entries::entry_routes;
pub use health::health_routes;
