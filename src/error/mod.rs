//! Error types for the back-office SDK.
//!
//! Every fallible SDK call returns [`Error`], categorized by [`ErrorKind`].
//!
//! ## Key Invariant
//!
//! Paginated controllers never return errors. A failed fetch is converted
//! into the controller's `error` text and the last good page stays visible.
//! Only direct calls (login, summaries, export) surface `Err`.
//!
//! ```rust,ignore
//! // controller: failure lands in state, not in a Result
//! investors.refetch().await;
//! if let Some(message) = investors.state().error {
//!     eprintln!("{message}");
//! }
//!
//! // direct call: failure is an Err
//! let summary = client.bulk_transaction_summary("bt_1").await?;
//! ```

#[allow(clippy::module_inception)]
mod error;
mod kind;

pub use error::Error;
pub use kind::ErrorKind;

/// A specialized `Result` type for back-office operations.
pub type Result<T> = std::result::Result<T, Error>;
