//! Headless CMS client
//!
//! Typed HTTP client for the content source. The CMS is the system of
//! record: posts are queried by document kind or fetched by unique id,
//! and listing results are paginated through an opaque next-page URL.

mod client;
mod document;
mod error;

pub use client::CmsClient;
pub use document::{Document, PagedResponse};
pub use error::{CmsError, Result};
