//! 扫描器错误类型

use std::path::PathBuf;

/// 扫描器错误
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// 路径无法打开
    #[error("cannot open '{}': {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 路径存在但不是普通文件（例如目录）
    #[error("'{}' is not a regular file", .path.display())]
    NotAFile { path: PathBuf },

    /// 读取行时的 I/O 失败（仅在 `IoErrorPolicy::Surface` 下返回）
    #[error("I/O error while reading line: {0}")]
    Io(#[from] std::io::Error),

    /// 数值解析失败
    #[error("cannot parse {token:?} as {target}: {reason}")]
    Parse {
        token: String,
        target: &'static str,
        reason: String,
    },

    /// 关闭后继续使用
    #[error("Stream closed")]
    Closed,
}

pub type ScanResult<T> = Result<T, ScanError>;

impl ScanError {
    pub fn is_closed(&self) -> bool {
        matches!(self, ScanError::Closed)
    }
}
