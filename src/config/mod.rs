//! Configuration types for the back-office SDK.
//!
//! This module provides configuration options for:
//! - [`ClientConfig`]: API endpoint, timeouts and login path
//! - [`PaginationDefaults`]: Initial page and page size for controllers

mod client;
mod pagination;

pub use client::{ClientConfig, DEFAULT_LOGIN_PATH};
pub use pagination::PaginationDefaults;
