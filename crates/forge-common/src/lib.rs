//! Forge Common Library
//!
//! Shared error types and logging infrastructure for the Forge workspace.
//!
//! # Overview
//!
//! This crate provides functionality used across all Forge workspace members:
//!
//! - **Error Handling**: the [`ForgeError`] type and [`Result`] alias
//! - **Logging**: centralized `tracing` initialization with environment-based
//!   configuration
//!
//! # Example
//!
//! ```no_run
//! use forge_common::logging::{init_logging, LogConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = LogConfig::from_env()?;
//!     init_logging(&config)?;
//!     tracing::info!("service starting");
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod logging;

// Re-export commonly used types
pub use error::{ForgeError, Result};
