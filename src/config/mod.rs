//! Configuration module for course-cashflow
//!
//! This module provides configuration management including:
//! - Platform path resolution
//! - User settings persistence
//! - Default cost parameters

pub mod paths;
pub mod settings;

pub use paths::CashflowPaths;
pub use settings::Settings;
