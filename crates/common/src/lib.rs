//! Licitamos Common Library
//!
//! Shared code for the Licitamos back-office service including:
//! - Database entities and repository pattern
//! - Pipeline board model and financial aggregation
//! - Document expiry classification and template generation
//! - External lookup client (CEP / CNPJ)
//! - Error types and handling
//! - Configuration management
//! - Authentication utilities
//! - Metrics and observability

pub mod auth;
pub mod backup;
pub mod config;
pub mod db;
pub mod errors;
pub mod expiry;
pub mod finance;
pub mod formatters;
pub mod lookup;
pub mod metrics;
pub mod pipeline;
pub mod templates;

// Re-export commonly used types
pub use config::AppConfig;
pub use db::Repository;
pub use errors::{AppError, Result};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
