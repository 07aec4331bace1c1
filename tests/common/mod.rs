//! 测试辅助工具
//!
//! 提供临时文件与读取辅助函数

#![allow(dead_code)]

use std::io::Write;

use inscan::{ScanResult, TokenSource};
use tempfile::NamedTempFile;

/// 将内容写入临时文件，文件在返回值 drop 时删除
pub fn temp_input(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(content.as_bytes()).expect("write temp file");
    file.flush().expect("flush temp file");
    file
}

/// 打开临时文件作为 TokenSource
pub fn open_source(file: &NamedTempFile, separators: &[char]) -> TokenSource {
    TokenSource::open(file.path(), separators.iter().copied()).expect("open temp input")
}

/// 循环调用 next_token，直到连续 `max_empty_reads` 次返回 `None`
///
/// 单次 `None` 可能只是读到了空行，并不代表流已结束。
pub fn drain_by_next(source: &mut TokenSource, max_empty_reads: usize) -> ScanResult<Vec<String>> {
    let mut out = Vec::new();
    let mut empty_reads = 0;
    while empty_reads < max_empty_reads {
        match source.next_token()? {
            Some(token) => {
                empty_reads = 0;
                out.push(token);
            }
            None => empty_reads += 1,
        }
    }
    Ok(out)
}
