use crate::error::{Error, Result};
use crate::fetch::SourceKind;
use crate::parsers::ParserType;
use crate::store::SavedSettings;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the state file location
pub const STATE_FILE_ENV: &str = "PAGE_COMPARE_STATE";

/// Threshold used when neither the caller nor saved settings provide one
pub const DEFAULT_SUCCESS_THRESHOLD: u8 = 80;

/// Configuration for a comparison run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompareConfig {
    /// Page as it looked before go-live (URL or file path)
    #[serde(default)]
    pub pre_go_live_url: Option<String>,

    /// Page as it looks now (URL or file path)
    #[serde(default)]
    pub current_url: Option<String>,

    /// Minimum overall score, in percent, for a PASS
    #[serde(default)]
    pub success_threshold: Option<u8>,

    /// Feature extractor to run on both documents
    #[serde(default)]
    pub parser: ParserType,

    /// How source strings are interpreted
    #[serde(default)]
    pub source_type: SourceKind,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// File holding saved settings and the last result
    #[serde(default = "default_state_file")]
    pub state_file: PathBuf,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            pre_go_live_url: None,
            current_url: None,
            success_threshold: None,
            parser: ParserType::default(),
            source_type: SourceKind::default(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            state_file: default_state_file(),
        }
    }
}

impl CompareConfig {
    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut file = File::open(path).map_err(|e| Error::io(path, e))?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| Error::io(path, e))?;

        let config = Self::from_json(&contents)?;
        ::log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a JSON string
    pub fn from_json(contents: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(contents)?;
        if let Some(threshold) = config.success_threshold {
            validate_threshold(i64::from(threshold))?;
        }
        if config.timeout_secs == 0 {
            return Err(Error::Config("timeout_secs must be greater than 0".into()));
        }
        Ok(config)
    }

    /// Fill sources and threshold that are still unset from saved settings
    pub fn with_saved_settings(mut self, saved: &SavedSettings) -> Self {
        if self.pre_go_live_url.is_none() && !saved.pre_go_live_url.is_empty() {
            self.pre_go_live_url = Some(saved.pre_go_live_url.clone());
        }
        if self.current_url.is_none() && !saved.current_url.is_empty() {
            self.current_url = Some(saved.current_url.clone());
        }
        if self.success_threshold.is_none() {
            self.success_threshold = Some(saved.success_threshold);
        }
        self
    }

    /// Threshold to judge the result against
    pub fn threshold(&self) -> u8 {
        self.success_threshold.unwrap_or(DEFAULT_SUCCESS_THRESHOLD)
    }

    /// State file path, honoring `PAGE_COMPARE_STATE`
    pub fn state_file_path(&self) -> PathBuf {
        match std::env::var(STATE_FILE_ENV) {
            Ok(path) if !path.is_empty() => PathBuf::from(path),
            _ => self.state_file.clone(),
        }
    }
}

/// Accept thresholds in 0..=100
pub fn validate_threshold(value: i64) -> Result<u8> {
    match u8::try_from(value) {
        Ok(threshold) if threshold <= 100 => Ok(threshold),
        _ => Err(Error::InvalidThreshold(value)),
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("page-compare/{}", env!("CARGO_PKG_VERSION"))
}

fn default_state_file() -> PathBuf {
    PathBuf::from(".page-compare.json")
}
