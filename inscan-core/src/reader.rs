//! 行读取器
//!
//! 将任意字节流（文件、标准输入、内存缓冲）统一为"读取下一行或报告结束"的接口。
//! `\n`、`\r` 与 `\r\n` 均视为行尾并被去除，非法 UTF-8 序列替换为 U+FFFD。

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

use tracing::{debug, trace};

use crate::error::{ScanError, ScanResult};

/// 单次读行的结果
#[derive(Debug)]
pub enum ReadOutcome {
    /// 读到一行（已去除行尾）
    Line(String),
    /// 流已结束
    Eof,
    /// 底层 I/O 失败
    Failed(io::Error),
}

/// 行读取器
///
/// 持有底层流的唯一所有权，drop 时释放资源。
pub struct LineReader {
    inner: Box<dyn BufRead>,
    buf: Vec<u8>,
    lines_read: usize,
    /// 上一行以 `\r` 结尾，下一次读取时跳过紧随的 `\n`
    skip_lf: bool,
}

impl LineReader {
    /// 从任意 `BufRead` 创建
    pub fn new<R: BufRead + 'static>(reader: R) -> Self {
        Self {
            inner: Box::new(reader),
            buf: Vec::new(),
            lines_read: 0,
            skip_lf: false,
        }
    }

    /// 从未缓冲的 `Read` 创建
    pub fn from_reader<R: Read + 'static>(reader: R) -> Self {
        Self::new(BufReader::new(reader))
    }

    /// 从已打开的文件创建
    pub fn from_file(file: File) -> Self {
        Self::from_reader(file)
    }

    /// 从标准输入创建（交互式，读行会阻塞）
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock())
    }

    /// 打开文件路径
    ///
    /// 路径不存在、不是普通文件或无法读取时立即返回错误。
    pub fn open(path: &Path) -> ScanResult<Self> {
        let meta = std::fs::metadata(path).map_err(|source| ScanError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        if !meta.is_file() {
            return Err(ScanError::NotAFile {
                path: path.to_path_buf(),
            });
        }
        let file = File::open(path).map_err(|source| ScanError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(target: "inscan::reader", "Opened {}", path.display());
        Ok(Self::from_file(file))
    }

    /// 已读取的行数
    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    /// 读取下一行
    ///
    /// 对交互式流会阻塞，直到有一整行或流结束。
    pub fn read_line(&mut self) -> ReadOutcome {
        self.buf.clear();
        match self.read_raw_line() {
            Ok(0) => {
                debug!(target: "inscan::reader", "End of stream after {} lines", self.lines_read);
                ReadOutcome::Eof
            }
            Ok(n) => {
                self.lines_read += 1;
                let line = String::from_utf8_lossy(&self.buf).into_owned();
                trace!(
                    target: "inscan::reader",
                    "Read line {} ({} bytes): {:?}",
                    self.lines_read,
                    n,
                    line
                );
                ReadOutcome::Line(line)
            }
            Err(e) => ReadOutcome::Failed(e),
        }
    }

    /// 读取到行尾（不含）为止，返回消耗的字节数；0 表示流结束
    ///
    /// `\r` 之后的 `\n` 留到下一次读取再跳过，避免交互式流在 `\r` 处阻塞。
    fn read_raw_line(&mut self) -> io::Result<usize> {
        let mut total = 0;
        loop {
            let available = match self.inner.fill_buf() {
                Ok(bytes) => bytes,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if available.is_empty() {
                return Ok(total);
            }
            if std::mem::take(&mut self.skip_lf) && available[0] == b'\n' {
                self.inner.consume(1);
                continue;
            }

            let end = available.iter().position(|&b| b == b'\n' || b == b'\r');
            let (used, terminator) = match end {
                Some(i) => {
                    self.buf.extend_from_slice(&available[..i]);
                    (i + 1, Some(available[i]))
                }
                None => {
                    self.buf.extend_from_slice(available);
                    (available.len(), None)
                }
            };
            self.inner.consume(used);
            total += used;

            match terminator {
                Some(b'\r') => {
                    self.skip_lf = true;
                    return Ok(total);
                }
                Some(_) => return Ok(total),
                None => {}
            }
        }
    }
}

impl std::fmt::Debug for LineReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineReader")
            .field("lines_read", &self.lines_read)
            .finish_non_exhaustive()
    }
}
