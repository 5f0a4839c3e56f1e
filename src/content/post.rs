//! Post models

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::cms::Document;
use crate::content::reading;
use crate::content::richtext::Block;

/// `data` fields of a post summary as stored in the CMS
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryData {
    pub title: String,
    pub subtitle: String,
    pub author: String,
}

/// `data` fields of a full post document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DetailData {
    pub title: String,
    pub author: String,
    pub banner: Banner,
    pub content: Vec<Section>,
}

/// Banner image reference
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Banner {
    pub url: String,
}

/// One content section: a heading followed by rich-text blocks
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Section {
    pub heading: String,
    pub body: Vec<Block>,
}

/// A post as it appears on the listing page
#[derive(Debug, Clone, Serialize)]
pub struct PostSummary {
    pub uid: String,
    pub first_publication_date: Option<DateTime<FixedOffset>>,
    pub title: String,
    pub subtitle: String,
    pub author: String,
}

impl From<Document<SummaryData>> for PostSummary {
    fn from(doc: Document<SummaryData>) -> Self {
        Self {
            uid: doc.uid.unwrap_or_default(),
            first_publication_date: doc.first_publication_date,
            title: doc.data.title,
            subtitle: doc.data.subtitle,
            author: doc.data.author,
        }
    }
}

/// A full post as it appears on its own page
#[derive(Debug, Clone)]
pub struct PostDetail {
    pub uid: String,
    pub first_publication_date: Option<DateTime<FixedOffset>>,
    pub title: String,
    pub banner_url: String,
    pub author: String,
    pub content: Vec<Section>,
}

impl PostDetail {
    /// Total whitespace-separated words across every section heading and
    /// every body block's text
    pub fn total_words(&self) -> usize {
        self.content
            .iter()
            .map(|section| {
                let heading_words = reading::word_count(&section.heading);
                let body_words: usize = section
                    .body
                    .iter()
                    .map(|block| reading::word_count(block.text()))
                    .sum();
                heading_words + body_words
            })
            .sum()
    }

    /// Estimated reading time in minutes at the given reading speed
    pub fn reading_time(&self, words_per_minute: usize) -> usize {
        reading::reading_time(self.total_words(), words_per_minute)
    }
}

impl From<Document<DetailData>> for PostDetail {
    fn from(doc: Document<DetailData>) -> Self {
        Self {
            uid: doc.uid.unwrap_or_default(),
            first_publication_date: doc.first_publication_date,
            title: doc.data.title,
            banner_url: doc.data.banner.url,
            author: doc.data.author,
            content: doc.data.content,
        }
    }
}
