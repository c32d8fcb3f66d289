//! docrank: keyword-driven document search service.
//!
//! Wraps the [`docrank_search`] pipeline in an HTTP service:
//! free-form text in, a plain-text list of ranked documents out.
//!
//! # Architecture
//!
//! - **Config**: TOML file with `[server]` and `[search]` sections
//! - **Server**: axum router exposing `POST /document_search` and `GET /health`
//! - **Pipeline**: stopword removal, TextRank keywords, per-keyword search
//!   fan-out, title dedup and TF-IDF similarity ranking (see `docrank-search`)

pub mod config;
pub mod error;
pub mod server;

pub use config::{AppConfig, ServerConfig};
pub use error::{Result, ServiceError};
pub use server::DocumentSearchServer;
