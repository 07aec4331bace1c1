//! InScan Config - Pure configuration data structures
//!
//! This crate contains only data structures, no global state.
//! It serves as the shared configuration vocabulary across all InScan crates.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Errors raised while loading a configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Top-level scanner configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// Initial separator characters
    pub separators: Vec<char>,
    /// What a refill does when the underlying stream fails
    pub io_errors: IoErrorPolicy,
    /// Per-phase log levels
    pub log: LogConfig,
}

/// How an I/O failure during refill is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IoErrorPolicy {
    /// Log the failure and behave as if the stream ended
    #[default]
    Swallow,
    /// Return the failure to the caller
    Surface,
}

/// Log verbosity, mirrors the usual tracing levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Log configuration, one optional override per phase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// Default level for every phase
    pub global: LogLevel,
    pub reader: Option<LogLevel>,
    pub split: Option<LogLevel>,
    pub source: Option<LogLevel>,
}

/// Phases that emit log events
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Pulling lines off the stream
    Reader,
    /// Splitting a line into tokens
    Split,
    /// Queue and separator bookkeeping
    Source,
    Cli,
}

impl Phase {
    pub const ALL: [Phase; 4] = [Phase::Reader, Phase::Split, Phase::Source, Phase::Cli];

    /// Get the string name of the phase
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Reader => "reader",
            Phase::Split => "split",
            Phase::Source => "source",
            Phase::Cli => "cli",
        }
    }

    /// Get the log target name for this phase
    pub fn target(&self) -> String {
        format!("inscan::{}", self.as_str())
    }
}

impl LogLevel {
    /// Parse a level name, case-insensitive. "silent" maps to `Error`.
    pub fn parse(s: &str) -> Option<LogLevel> {
        match s.to_lowercase().as_str() {
            "silent" | "error" => Some(LogLevel::Error),
            "warn" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "trace" => Some(LogLevel::Trace),
            _ => None,
        }
    }
}

impl LogConfig {
    /// Get the effective level for a phase
    ///
    /// Falls back to `global` when the phase has no override.
    pub fn level_for(&self, phase: Phase) -> LogLevel {
        let specific = match phase {
            Phase::Reader => self.reader,
            Phase::Split => self.split,
            Phase::Source => self.source,
            Phase::Cli => None,
        };
        specific.unwrap_or(self.global)
    }
}

impl ScanConfig {
    /// Parse a JSON config document
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Read and parse a JSON config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            separators: vec![' '],
            io_errors: IoErrorPolicy::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            global: LogLevel::Info,
            reader: None,
            split: None,
            source: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_scan_config() {
        let cfg = ScanConfig::default();
        assert_eq!(cfg.separators, vec![' ']);
        assert_eq!(cfg.io_errors, IoErrorPolicy::Swallow);
        assert_eq!(cfg.log.global, LogLevel::Info);
    }

    #[test]
    fn test_log_level_for() {
        let cfg = LogConfig {
            global: LogLevel::Warn,
            reader: Some(LogLevel::Debug),
            split: None,
            source: None,
        };

        assert_eq!(cfg.level_for(Phase::Reader), LogLevel::Debug);
        assert_eq!(cfg.level_for(Phase::Split), LogLevel::Warn);
        assert_eq!(cfg.level_for(Phase::Cli), LogLevel::Warn);
    }

    #[test]
    fn test_phase_as_str() {
        assert_eq!(Phase::Reader.as_str(), "reader");
        assert_eq!(Phase::Source.target(), "inscan::source");
    }

    #[test]
    fn test_from_json_partial() {
        let cfg = ScanConfig::from_json_str(
            r#"{ "separators": ["-", " "], "io_errors": "surface" }"#,
        )
        .unwrap();
        assert_eq!(cfg.separators, vec!['-', ' ']);
        assert_eq!(cfg.io_errors, IoErrorPolicy::Surface);
        assert_eq!(cfg.log, LogConfig::default());
    }

    #[test]
    fn test_from_json_log_levels() {
        let cfg = ScanConfig::from_json_str(
            r#"{ "log": { "global": "warn", "split": "trace" } }"#,
        )
        .unwrap();
        assert_eq!(cfg.log.global, LogLevel::Warn);
        assert_eq!(cfg.log.level_for(Phase::Split), LogLevel::Trace);
        // 未给出的字段取默认值
        assert_eq!(cfg.separators, vec![' ']);
    }

    #[test]
    fn test_from_json_rejects_unknown_field() {
        let err = ScanConfig::from_json_str(r#"{ "separator": [","] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_from_json_rejects_multi_char_separator() {
        assert!(ScanConfig::from_json_str(r#"{ "separators": ["ab"] }"#).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = ScanConfig::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("here.json"));
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "separators": [","] }}"#).unwrap();

        let cfg = ScanConfig::load(file.path()).unwrap();
        assert_eq!(cfg.separators, vec![',']);
    }

    #[test]
    fn test_log_level_parse() {
        assert_eq!(LogLevel::parse("DEBUG"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse("silent"), Some(LogLevel::Error));
        assert_eq!(LogLevel::parse("loud"), None);
    }
}
