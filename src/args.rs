use clap::{Parser, ValueEnum};
use page_compare::{ParserType, SourceKind};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "page-compare")]
#[command(about = "Scores how closely a pre-go-live page matches its current version")]
#[command(version)]
pub struct Args {
    /// Pre-go-live page (web URL or HTML file)
    pub pre_go_live: Option<String>,

    /// Current page (web URL or HTML file)
    pub current: Option<String>,

    /// Success threshold in percent (0-100)
    #[arg(short, long)]
    pub threshold: Option<i64>,

    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Feature extractor (pattern, dom)
    #[arg(short, long, value_enum)]
    pub parser: Option<ParserArg>,

    /// How sources are interpreted (auto, web, file)
    #[arg(short, long, value_enum)]
    pub source_type: Option<SourceTypeArg>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Export the result as a JSON report, optionally to the given file
    #[arg(short, long, num_args = 0..=1, default_missing_value = "")]
    pub export: Option<String>,

    /// Print the result as JSON instead of a summary
    #[arg(long)]
    pub json: bool,

    /// Do not save settings or the result
    #[arg(long)]
    pub no_save: bool,

    /// File holding saved settings and the last result
    #[arg(long)]
    pub state_file: Option<PathBuf>,

    /// Print the last saved result and exit
    #[arg(long, conflicts_with = "clear_results")]
    pub show_last: bool,

    /// Forget the last saved result and exit
    #[arg(long)]
    pub clear_results: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ParserArg {
    Pattern,
    Dom,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SourceTypeArg {
    Auto,
    Web,
    File,
}

/// Convert from CLI argument parser type to internal parser type
pub fn convert_parser(arg: ParserArg) -> ParserType {
    match arg {
        ParserArg::Pattern => ParserType::Pattern,
        ParserArg::Dom => ParserType::Dom,
    }
}

/// Convert from CLI argument source type to internal source kind
pub fn convert_source_type(arg: SourceTypeArg) -> SourceKind {
    match arg {
        SourceTypeArg::Auto => SourceKind::Auto,
        SourceTypeArg::Web => SourceKind::Web,
        SourceTypeArg::File => SourceKind::File,
    }
}
