//! CLI 日志系统初始化
//!
//! 基于 `tracing-subscriber` 实现分阶段日志控制。日志写到 stderr，stdout 留给演示输出。

use std::fs::File;
use std::io;
use std::path::Path;

use inscan_config::{LogConfig, Phase};
use tracing_subscriber::{
    filter::Targets, fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer,
};

use crate::config::to_tracing_level;

/// 日志输出格式
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogFormat {
    /// 彩色格式化（开发使用）
    Pretty,
    /// 紧凑格式
    #[default]
    Compact,
    /// JSON 格式（工具集成）
    Json,
}

/// 按阶段构建过滤规则
fn build_targets(log_config: &LogConfig) -> Targets {
    Phase::ALL.iter().fold(
        Targets::new().with_default(to_tracing_level(log_config.global)),
        |targets, phase| {
            targets.with_target(phase.target(), to_tracing_level(log_config.level_for(*phase)))
        },
    )
}

/// 使用指定格式和日志配置初始化日志系统
///
/// 指定 `file` 时同时追加写入该文件。
pub fn init_with_file(
    log_config: &LogConfig,
    format: LogFormat,
    file: Option<&Path>,
) -> io::Result<()> {
    let targets = build_targets(log_config);
    let stderr_layer = create_format_layer(format, io::stderr).with_filter(targets.clone());

    if let Some(path) = file {
        let file_handle = File::options().create(true).append(true).open(path)?;
        let file_layer = fmt::layer()
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(file_handle))
            .with_filter(targets);

        tracing_subscriber::registry()
            .with(stderr_layer)
            .with(file_layer)
            .init();
    } else {
        tracing_subscriber::registry().with(stderr_layer).init();
    }
    Ok(())
}

/// Create formatter layer based on format
fn create_format_layer<W, F>(
    format: LogFormat,
    make_writer: F,
) -> Box<dyn Layer<tracing_subscriber::Registry> + Send + Sync>
where
    W: io::Write + 'static,
    F: Fn() -> W + Send + Sync + 'static,
{
    match format {
        LogFormat::Pretty => fmt::layer()
            .pretty()
            .with_target(true)
            .with_writer(make_writer)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(false)
            .without_time()
            .with_writer(make_writer)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_target(true)
            .with_writer(make_writer)
            .boxed(),
    }
}
