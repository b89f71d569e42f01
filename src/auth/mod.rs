//! Authentication for the back-office SDK.
//!
//! - [`Credentials`]: admin username and password, validated locally
//! - [`SessionContext`]: login, logout and the persisted bearer token
//!
//! ```rust,ignore
//! use backoffice::auth::Credentials;
//!
//! let session = client.session();
//! session.login(&Credentials::new("admin", "secret")).await?;
//! assert!(session.is_authenticated());
//! session.logout()?;
//! ```

mod credentials;
mod session;

pub use credentials::Credentials;
pub use session::SessionContext;
