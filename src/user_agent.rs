//! User-Agent header for SDK requests.

use std::borrow::Cow;
use std::sync::OnceLock;

const SDK_NAME: &str = "backoffice-rust";

const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

static USER_AGENT: OnceLock<String> = OnceLock::new();

/// Returns the SDK User-Agent string.
///
/// Format: `backoffice-rust/0.1.0 (rust/1.92; linux/x86_64)`
pub fn user_agent() -> &'static str {
    USER_AGENT.get_or_init(|| {
        let os = match std::env::consts::OS {
            "macos" => "darwin",
            os => os,
        };
        format!(
            "{}/{} (rust/{}; {}/{})",
            SDK_NAME,
            SDK_VERSION,
            env!("CARGO_PKG_RUST_VERSION"),
            os,
            std::env::consts::ARCH,
        )
    })
}

/// Returns the configured override, falling back to [`user_agent`].
pub(crate) fn resolve(configured: Option<&str>) -> Cow<'static, str> {
    match configured {
        Some(value) if !value.trim().is_empty() => Cow::Owned(value.to_string()),
        _ => Cow::Borrowed(user_agent()),
    }
}
