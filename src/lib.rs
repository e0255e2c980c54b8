//! Utilities for the ole tool: safe file names, a named logger hierarchy
//! and timestamps pinned to the UTC offset captured at startup.

pub mod app_config;
pub mod cli;
pub mod common;
pub mod config_loader;
pub mod core;
pub mod errors;
pub mod operations;

pub use common::{datetime_now, get_valid_filename, Logger, LoggingContext, SystemClock};
pub use errors::AppError;
