//! Content model
//!
//! Post summaries and details as the blog uses them, converted from the
//! raw CMS document envelope, plus rich-text blocks and the reading-time
//! computation.

pub mod post;
pub mod reading;
pub mod richtext;

pub use post::{DetailData, PostDetail, PostSummary, Section, SummaryData};
pub use reading::{reading_time, word_count};
pub use richtext::Block;
