//! Integration tests for the back-office Rust SDK.
//!
//! Each test starts a local `wiremock` server that plays the admin API and
//! drives the SDK through the real REST transport.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test integration
//!
//! # With SDK logs
//! RUST_LOG=backoffice=debug cargo test --test integration -- --nocapture
//! ```

mod common;
mod controller_tests;
mod export_tests;
mod session_tests;
