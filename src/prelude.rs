//! Prelude module for convenient imports.
//!
//! ```rust
//! use backoffice::prelude::*;
//! ```
//!
//! This provides access to:
//! - The client and its configuration
//! - Error types
//! - Controller and query types
//! - Session and theme contexts

pub use crate::{
    auth::{Credentials, SessionContext},
    client::{BackofficeClient, ClientBuilder},
    config::{ClientConfig, PaginationDefaults},
    context::{AppContext, FileStore, KeyValueStore, MemoryStore, Theme, ThemeContext},
    error::{Error, ErrorKind, Result},
    pagination::{
        Field, FilterSet, NoFilters, PageResult, Pagination, QueryState, QueryUpdate, Resource,
        ResourceController, ViewState, ViewStatus,
    },
    transport::HttpClient,
};
