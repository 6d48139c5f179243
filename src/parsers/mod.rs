pub mod dom;
pub mod pattern;

#[cfg(test)]
mod tests;

use crate::results::PageSnapshot;
use serde::{Deserialize, Serialize};

/// Enum to represent the available feature extractors
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParserType {
    /// Tag-pattern scanning over the raw markup
    #[default]
    Pattern,
    /// Tree parsing with `scraper`
    Dom,
}

impl ParserType {
    pub fn name(&self) -> &'static str {
        match self {
            ParserType::Pattern => "pattern",
            ParserType::Dom => "dom",
        }
    }
}

/// Main parser that delegates to a specific extractor
pub struct Parser;

impl Parser {
    /// Build a snapshot with the given extractor
    ///
    /// Never fails: if the extractor cannot run, the snapshot degrades to
    /// title, metadata and text blocks with empty elements and structure.
    pub fn extract(html: &str, url: &str, parser_type: ParserType) -> PageSnapshot {
        let result = match parser_type {
            ParserType::Pattern => pattern::extract(html, url),
            ParserType::Dom => dom::extract(html, url),
        };

        match result {
            Ok(snapshot) => {
                ::log::debug!(
                    "{} parser: {} text blocks, {} elements, {} headings for {}",
                    parser_type.name(),
                    snapshot.text_blocks.len(),
                    snapshot.elements.len(),
                    snapshot.structure.headings.len(),
                    url
                );
                snapshot
            }
            Err(e) => {
                ::log::warn!(
                    "{} parser failed for {} ({}), using minimal snapshot",
                    parser_type.name(),
                    url,
                    e
                );
                pattern::extract_minimal(html, url)
            }
        }
    }
}
