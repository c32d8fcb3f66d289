//! Search provider implementations.
//!
//! Each module provides a struct implementing [`crate::client::SearchClient`]
//! for a specific document-search API.

pub mod metaphor;

pub use metaphor::MetaphorClient;
