//! Shared utilities and common types for the NestHaven server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Common type definitions (language preference)
//! - Utility functions (email validation, masking, etc.)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, DatabaseConfig, Environment, MailConfig, ServerConfig, VerificationConfig,
};
pub use types::Language;
pub use utils::email;
