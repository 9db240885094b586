//! Core utilities for the rideshare search tools
//!
//! This crate provides shared functionality used by the search binary:
//!
//! - **Error handling**: Structured errors with codes, context, and recovery suggestions
//! - **Configuration**: TOML-based configuration with validation
//! - **Validation**: Fluent checks for user input and ride records
//!
//! # Example
//!
//! ```rust,no_run
//! use rideshare_core::config::Config;
//!
//! let config = Config::load(None).expect("invalid configuration");
//! println!("default sort: {}", config.schema.search.default_sort);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod validation;

pub use error::{Error, ErrorCode, Result, ResultExt};

