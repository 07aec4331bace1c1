//! InScan - 惰性的、按分隔符切分的行 token 读取器
//!
//! 包装文件或交互式输入流，以拉取方式逐个提供 token，并附带数值解析辅助方法。
//!
//! # Architecture
//!
//! ```text
//! inscan-config/  - 纯配置数据（分隔符、I/O 错误策略、日志级别）
//! inscan-core/    - 行读取、切分、TokenSource 队列
//! inscan-cli/     - 演示驱动（命令行）
//! ```
//!
//! # Quick Start
//!
//! ```
//! use inscan::TokenSource;
//! use std::io::Cursor;
//!
//! let mut source = TokenSource::from_buf_read(Cursor::new("  a  b \n-3.14"), [' ']);
//! assert_eq!(source.next_token().unwrap().as_deref(), Some("a"));
//! assert_eq!(source.next_token().unwrap().as_deref(), Some("b"));
//! assert!(source.is_next_numeric().unwrap());
//! assert_eq!(source.next_f64().unwrap(), Some(-3.14));
//! source.close().unwrap();
//! ```

// 重导出常用类型
pub use inscan_config::{ConfigError, IoErrorPolicy, LogConfig, LogLevel, Phase, ScanConfig};
pub use inscan_core::{
    Buffered, LineReader, ScanError, ScanResult, SeparatorSet, TokenSource, Tokens,
};

/// 打开文件并按配置创建 TokenSource
///
/// # Example
/// ```no_run
/// use inscan::{open_with_config, ScanConfig};
///
/// let config = ScanConfig::load(std::path::Path::new("inscan.json")).unwrap();
/// let mut source = open_with_config("input.txt", &config).unwrap();
/// while let Some(token) = source.next_token().unwrap() {
///     println!("{}", token);
/// }
/// ```
pub fn open_with_config(
    path: impl AsRef<std::path::Path>,
    config: &ScanConfig,
) -> ScanResult<TokenSource> {
    let reader = LineReader::open(path.as_ref())?;
    Ok(TokenSource::with_config(reader, config))
}
