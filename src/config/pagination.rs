//! Default query state for paginated controllers.

/// Initial page and page size applied when a controller is created.
///
/// Resources may override the page size (bulk transaction details list 20
/// rows per page); everything else starts from these values.
///
/// ```rust
/// use backoffice::PaginationDefaults;
///
/// let defaults = PaginationDefaults::default().with_limit(25);
/// assert_eq!(defaults.page, 1);
/// assert_eq!(defaults.limit, 25);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationDefaults {
    /// First page to request (1-indexed).
    pub page: u32,
    /// Page size.
    pub limit: u32,
}

impl Default for PaginationDefaults {
    fn default() -> Self {
        Self { page: 1, limit: 10 }
    }
}

impl PaginationDefaults {
    /// Sets the page size. Zero is clamped to one.
    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit.max(1);
        self
    }
}
