//! Callboard Core Library
//!
//! This crate provides the foundational types, traits, and error handling
//! for the Callboard call analytics system. It includes:
//!
//! - The Call Record model and its closed display categories
//! - The `CallSource` seam for upstream record fetching
//! - Unified error handling with HTTP response mapping
//! - Application configuration

pub mod config;
pub mod error;
pub mod models;
pub mod traits;

pub use config::AppConfig;
pub use error::AppError;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;
