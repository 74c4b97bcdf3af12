//! Rich text model
//!
//! Marked-up catalog texts become a list of paragraphs; each paragraph is a
//! list of plain runs and inline-format nodes.

use serde::{Deserialize, Serialize};

pub const PARAGRAPH: &str = "paragraph";

/// Placeholder run for an empty paragraph
pub const EMPTY_PARAGRAPH: &str = "&nbsp;";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    pub format: String,
    pub value: Vec<Run>,
}

impl Paragraph {
    pub fn new(runs: Vec<Run>) -> Self {
        Self {
            format: PARAGRAPH.to_string(),
            value: runs,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Run {
    Text(String),
    Inline { format: String, value: Vec<String> },
}
