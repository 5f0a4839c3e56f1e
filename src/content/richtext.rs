//! Rich-text blocks
//!
//! The CMS stores post bodies as a sequence of typed blocks. The union of
//! block types is open-ended, so the model carries an explicit fallback
//! variant: anything unrecognized keeps its text and degrades to a plain
//! paragraph when rendered.

use serde::de::Deserializer;
use serde::{Deserialize, Serialize};

use crate::helpers::html_escape;

/// One rich-text block of a post body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Block {
    Paragraph { text: String },
    Preformatted { text: String },
    Heading1 { text: String },
    Heading2 { text: String },
    Heading3 { text: String },
    /// Catch-all for block types this renderer does not know
    Other { text: String },
}

impl Block {
    /// The plain text carried by this block
    pub fn text(&self) -> &str {
        match self {
            Block::Paragraph { text }
            | Block::Preformatted { text }
            | Block::Heading1 { text }
            | Block::Heading2 { text }
            | Block::Heading3 { text }
            | Block::Other { text } => text,
        }
    }

    /// Render the block as HTML
    ///
    /// Headings render one level below the section heading; preformatted
    /// and unknown blocks degrade to a plain paragraph.
    pub fn render_html(&self) -> String {
        let text = html_escape(self.text());
        match self {
            Block::Heading1 { .. } => format!("<h3>{}</h3>", text),
            Block::Heading2 { .. } => format!("<h4>{}</h4>", text),
            Block::Heading3 { .. } => format!("<h5>{}</h5>", text),
            Block::Paragraph { .. } | Block::Preformatted { .. } | Block::Other { .. } => {
                format!("<p>{}</p>", text)
            }
        }
    }
}

/// Wire shape of a block before the type tag is interpreted
#[derive(Deserialize)]
struct RawBlock {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    text: String,
}

impl<'de> Deserialize<'de> for Block {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawBlock::deserialize(deserializer)?;
        let text = raw.text;
        Ok(match raw.kind.as_str() {
            "paragraph" => Block::Paragraph { text },
            "preformatted" => Block::Preformatted { text },
            "heading1" => Block::Heading1 { text },
            "heading2" => Block::Heading2 { text },
            "heading3" => Block::Heading3 { text },
            _ => Block::Other { text },
        })
    }
}
