//! `.roastmerc` project configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::engines::EngineKind;
use crate::error::Result;
use crate::mode::Mode;
use crate::report::IssueType;

pub const CONFIG_FILE: &str = ".roastmerc";

/// Settings read from a `.roastmerc` file. Every key is optional.
///
/// `mode`, `engine` and `enabled_checks` stay as raw strings so that a typo
/// in the file can be reported by [`Config::validate`] instead of failing
/// the whole load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub mode: String,
    pub engine: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub generate_meme: bool,
    pub max_file_size: u64,
    pub ci: bool,
    pub ignore_patterns: Vec<String>,
    pub enabled_checks: Vec<String>,
    pub meme_output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Mode::default().as_str().into(),
            engine: EngineKind::Static.as_str().into(),
            model: None,
            generate_meme: false,
            max_file_size: 1_000_000,
            ci: false,
            ignore_patterns: [
                "node_modules/**",
                "dist/**",
                "build/**",
                ".git/**",
                "*.min.js",
                "*.bundle.js",
                "*.map",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            enabled_checks: IssueType::all().iter().map(|t| t.key().to_string()).collect(),
            meme_output_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Load from `path`. A missing file gives the defaults; an unreadable or
    /// malformed one is logged and also gives the defaults.
    pub fn load(path: &Path) -> Config {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Config::default();
        }
        match Self::read(path) {
            Ok(config) => config,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "could not load config, using defaults");
                Config::default()
            }
        }
    }

    fn read(path: &Path) -> Result<Config> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Problems worth telling the user about. Empty means the config is fine.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if !Mode::is_known(&self.mode) {
            let valid: Vec<&str> = Mode::all().iter().map(|m| m.as_str()).collect();
            problems.push(format!("Invalid mode: {}. Must be one of: {}", self.mode, valid.join(", ")));
        }

        if EngineKind::from_name(&self.engine).is_none() {
            let valid: Vec<&str> = EngineKind::all().iter().map(|e| e.as_str()).collect();
            problems.push(format!("Invalid engine: {}. Must be one of: {}", self.engine, valid.join(", ")));
        }

        let valid_checks: Vec<&str> = IssueType::all().iter().map(|t| t.key()).collect();
        for check in &self.enabled_checks {
            if IssueType::from_key(check).is_none() {
                problems.push(format!("Invalid check: {check}. Must be one of: {}", valid_checks.join(", ")));
            }
        }

        if self.max_file_size == 0 {
            problems.push("maxFileSize must be a positive number".into());
        }

        for pattern in &self.ignore_patterns {
            if let Err(err) = glob::Pattern::new(pattern) {
                problems.push(format!("Invalid ignore pattern {pattern}: {err}"));
            }
        }

        problems
    }

    pub fn mode(&self) -> Mode {
        Mode::from_name(&self.mode)
    }

    /// Recognized check names. Unknown names are dropped.
    pub fn enabled_checks(&self) -> Vec<IssueType> {
        self.enabled_checks
            .iter()
            .filter_map(|c| IssueType::from_key(c))
            .collect()
    }

    /// Compiled ignore patterns. Invalid globs are skipped.
    pub fn ignore_globs(&self) -> Vec<glob::Pattern> {
        self.ignore_patterns
            .iter()
            .filter_map(|p| glob::Pattern::new(p).ok())
            .collect()
    }

    /// Write the default config to `path`. Returns `false` without touching
    /// anything when the file already exists.
    pub fn create_default(path: &Path) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        let json = serde_json::to_string_pretty(&Config::default())?;
        std::fs::write(path, json + "\n")?;
        Ok(true)
    }
}
