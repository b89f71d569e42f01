//! Admin login credentials.

use std::fmt;

use zeroize::Zeroizing;

use crate::Error;

/// Username and password for the admin login.
///
/// The password is zeroized on drop and never printed.
///
/// ```rust
/// use backoffice::auth::Credentials;
///
/// let credentials = Credentials::new("  admin ", "secret");
/// assert!(credentials.validate().is_ok());
/// assert_eq!(credentials.user_name(), "admin");
/// assert!(!format!("{credentials:?}").contains("secret"));
///
/// let err = Credentials::new("", "secret").validate().unwrap_err();
/// assert_eq!(err.message(), "Username is required");
/// ```
#[derive(Clone)]
pub struct Credentials {
    user_name: String,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Creates credentials. The username is trimmed.
    pub fn new(user_name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into().trim().to_string(),
            password: Zeroizing::new(password.into()),
        }
    }

    /// Returns the trimmed username.
    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    /// Checks the fields locally.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::Validation`](crate::ErrorKind::Validation) with
    /// `"Username is required"` or `"Password is required"`.
    pub fn validate(&self) -> Result<(), Error> {
        if self.user_name.is_empty() {
            return Err(Error::validation("Username is required"));
        }
        if self.password.trim().is_empty() {
            return Err(Error::validation("Password is required"));
        }
        Ok(())
    }

    /// Login request body.
    pub(crate) fn to_body(&self) -> serde_json::Value {
        serde_json::json!({
            "userName": self.user_name,
            "password": self.password.as_str(),
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user_name", &self.user_name)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
