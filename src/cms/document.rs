//! Wire types for the content source API
//!
//! The API returns documents wrapped in an envelope: identity and
//! publication metadata at the top level, free-form structured fields
//! under `data`. List queries return a page of documents plus an opaque
//! `next_page` URL; a null or empty value signals the last page.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer};

/// A single CMS document with typed `data` fields
#[derive(Debug, Clone, Deserialize)]
pub struct Document<D> {
    /// Unique identifier (absent on documents without a uid field)
    #[serde(default)]
    pub uid: Option<String>,

    /// Publication timestamp (absent on unpublished previews)
    #[serde(default)]
    pub first_publication_date: Option<DateTime<FixedOffset>>,

    /// Document fields as stored in the CMS
    pub data: D,
}

/// One page of a "list by type" query
#[derive(Debug, Clone, Deserialize)]
pub struct PagedResponse<D> {
    #[serde(default)]
    pub page: u32,

    #[serde(default)]
    pub total_pages: u32,

    pub results: Vec<Document<D>>,

    /// Opaque URL of the next page; `None` means no further pages
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub next_page: Option<String>,
}

impl<D> PagedResponse<D> {
    /// Whether another page can be fetched
    pub fn has_next(&self) -> bool {
        self.next_page.is_some()
    }
}

/// Treat `null` and `""` the same way: no next page.
fn empty_string_as_none<'de, De>(deserializer: De) -> Result<Option<String>, De::Error>
where
    De: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}
