// Re-export modules
pub mod aggregate;
pub mod comparators;
pub mod config;
pub mod error;
pub mod export;
pub mod fetch;
pub mod parsers;
pub mod progress;
pub mod results;
pub mod similarity;
pub mod store;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::CompareConfig;
pub use error::{Error, Result};
pub use fetch::{Fetcher, PageFetcher, Source, SourceKind};
pub use parsers::ParserType;
pub use progress::ProgressSink;
pub use results::{ComparisonResult, PageSnapshot, Verdict};

use config::DEFAULT_SUCCESS_THRESHOLD;
use parsers::Parser;

/// Extract a snapshot from raw HTML with the default extractor
pub fn extract(html: &str, url: &str) -> PageSnapshot {
    Parser::extract(html, url, ParserType::default())
}

/// Score how closely `current` matches `pre_go_live`
pub fn compare(pre_go_live: &PageSnapshot, current: &PageSnapshot) -> ComparisonResult {
    aggregate::compare(pre_go_live, current)
}

/// Main builder for comparing a pre-go-live page with its current version
#[derive(Debug, Clone)]
pub struct PageCompare {
    pre_go_live: String,
    current: String,
    threshold: u8,
    parser: ParserType,
    source_kind: SourceKind,
}

impl PageCompare {
    /// Create a new builder for the two sources (URLs or file paths)
    pub fn new(pre_go_live: impl Into<String>, current: impl Into<String>) -> Self {
        Self {
            pre_go_live: pre_go_live.into(),
            current: current.into(),
            threshold: DEFAULT_SUCCESS_THRESHOLD,
            parser: ParserType::default(),
            source_kind: SourceKind::default(),
        }
    }

    /// Set the minimum overall score for a PASS
    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the extractor run on both documents
    pub fn with_parser(mut self, parser: ParserType) -> Self {
        self.parser = parser;
        self
    }

    /// Force how both source strings are interpreted
    pub fn with_source_kind(mut self, source_kind: SourceKind) -> Self {
        self.source_kind = source_kind;
        self
    }

    /// Apply threshold, parser and source kind from a configuration
    pub fn with_config(mut self, config: &CompareConfig) -> Self {
        self.threshold = config.threshold();
        self.parser = config.parser;
        self.source_kind = config.source_type;
        self
    }

    /// Load configuration from a file
    pub fn with_config_file(self, path: impl AsRef<std::path::Path>) -> Result<Self> {
        let config = CompareConfig::from_file(path)?;
        Ok(self.with_config(&config))
    }

    /// Load configuration from a string
    pub fn with_config_str(self, config_str: &str) -> Result<Self> {
        let config = CompareConfig::from_json(config_str)?;
        Ok(self.with_config(&config))
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Fetch both pages concurrently, extract and compare them
    ///
    /// Reports progress 10 before fetching, 50 once both documents are in
    /// and 100 when the result is ready. A failed fetch aborts the run.
    pub async fn run<F, P>(&self, fetcher: &F, progress: &P) -> Result<ComparisonResult>
    where
        F: Fetcher,
        P: ProgressSink + ?Sized,
    {
        let pre_go_live = Source::detect(&self.pre_go_live, self.source_kind)?;
        let current = Source::detect(&self.current, self.source_kind)?;
        config::validate_threshold(i64::from(self.threshold))?;

        ::log::info!(
            "Comparing {} against {} with the {} extractor",
            pre_go_live.label(),
            current.label(),
            self.parser.name()
        );
        progress.on_progress(progress::FETCH_STARTED);

        let (pre_go_live_html, current_html) =
            tokio::try_join!(fetcher.fetch(&pre_go_live), fetcher.fetch(&current))?;
        progress.on_progress(progress::FETCH_COMPLETE);

        let pre_go_live_page = Parser::extract(&pre_go_live_html, &pre_go_live.label(), self.parser);
        let current_page = Parser::extract(&current_html, &current.label(), self.parser);
        let result = aggregate::compare(&pre_go_live_page, &current_page);

        ::log::info!(
            "Overall match {}% ({} at threshold {}%)",
            result.overall_score,
            result.verdict(self.threshold),
            self.threshold
        );
        progress.on_progress(progress::COMPARISON_COMPLETE);
        Ok(result)
    }
}
