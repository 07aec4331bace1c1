//! CLI 配置
//!
//! 合并配置文件与命令行参数：命令行参数优先。

use std::path::PathBuf;

use inscan_config::{ConfigError, IoErrorPolicy, LogLevel, ScanConfig};
use tracing::Level;

use crate::logging::LogFormat;

/// 一次运行所需的全部配置
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub scan: ScanConfig,
    /// 输入文件，None 表示标准输入
    pub input: Option<PathBuf>,
    /// 遇到该单词（不区分大小写）时停止
    pub stop_word: String,
    pub log_format: LogFormat,
    pub log_file: Option<PathBuf>,
}

/// 来自命令行的覆盖项
#[derive(Debug, Default)]
pub struct Overrides {
    pub config: Option<PathBuf>,
    pub separators: Vec<char>,
    pub log_level: Option<LogLevel>,
    pub surface_io_errors: bool,
}

impl RunConfig {
    /// 读取配置文件（如有）并应用命令行覆盖项
    pub fn resolve(
        overrides: Overrides,
        input: Option<PathBuf>,
        stop_word: String,
        log_format: LogFormat,
        log_file: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let mut scan = match &overrides.config {
            Some(path) => ScanConfig::load(path)?,
            None => ScanConfig::default(),
        };
        if !overrides.separators.is_empty() {
            scan.separators = overrides.separators;
        }
        if let Some(level) = overrides.log_level {
            scan.log.global = level;
        }
        if overrides.surface_io_errors {
            scan.io_errors = IoErrorPolicy::Surface;
        }

        Ok(Self {
            scan,
            input,
            stop_word,
            log_format,
            log_file,
        })
    }
}

pub fn to_tracing_level(level: LogLevel) -> Level {
    match level {
        LogLevel::Error => Level::ERROR,
        LogLevel::Warn => Level::WARN,
        LogLevel::Info => Level::INFO,
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Trace => Level::TRACE,
    }
}
