//! Paginated listings.
//!
//! One generic [`ResourceController`] drives every back-office listing. A
//! listing is described by a [`Resource`]: its record type, its
//! [`FilterSet`] and its endpoint. The controller owns the
//! [`QueryState`], turns it into a request, decodes the response envelope
//! into a [`PageResult`] and exposes the result as a [`ViewState`].
//!
//! ## Query Changes
//!
//! [`QueryUpdate`]s are partial: present fields overwrite, absent fields
//! are kept. Any update that does not set `page` itself returns the listing
//! to page 1.
//!
//! ## Ordering
//!
//! Each fetch takes a sequence number. A response is applied only if its
//! request is still the most recent one, so a slow response to an older
//! query can never overwrite a newer one.

mod controller;
mod envelope;
mod query;
mod resource;

pub use controller::{FetchFuture, ResourceController, ViewState, ViewStatus};
pub use envelope::{PageResult, Pagination, decode_page, decode_record};
pub use query::{Field, FilterSet, NoFilters, QueryParams, QueryState, QueryUpdate};
pub use resource::Resource;
