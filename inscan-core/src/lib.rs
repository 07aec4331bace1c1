//! InScan Core - 按分隔符切分的惰性 token 读取器
//!
//! 包装一个按行读取的字符流（文件或交互式输入），以拉取方式逐个提供 token：
//! - `reader`: 行读取（文件、标准输入、任意 `Read`/`BufRead`）
//! - `separators` / `split`: 可变分隔符集合与单行切分
//! - `numeric`: 数值 token 识别与解析
//! - `token_source`: 待处理队列与 peek/poll/迭代接口
//!
//! 库本身不输出任何内容，日志通过 `tracing` 发出（target 为 `inscan::*`）。

pub mod error;
pub mod numeric;
pub mod reader;
pub mod separators;
pub mod split;
pub mod token_source;

pub use error::{ScanError, ScanResult};
pub use numeric::{is_numeric, trim_token};
pub use reader::{LineReader, ReadOutcome};
pub use separators::SeparatorSet;
pub use split::split_line;
pub use token_source::{Buffered, TokenSource, Tokens};

// Re-export config types from inscan-config
pub use inscan_config::{IoErrorPolicy, Phase, ScanConfig};
