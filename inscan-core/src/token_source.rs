//! TokenSource：惰性的、按分隔符切分的 token 队列
//!
//! 所有读取类操作都先执行一次"补充"（refill）：队列为空时从流中读取恰好一行，
//! 切分后追加到队列，然后从队首（或队尾）取值。补充每次调用最多一行，
//! 即使该行没有产生任何 token 也不会继续读取下一行。
//!
//! # 示例
//!
//! ```
//! use inscan_core::TokenSource;
//! use std::io::Cursor;
//!
//! let mut source = TokenSource::from_buf_read(Cursor::new("12-34 56\nq"), ['-', ' ']);
//! assert_eq!(source.peek_i32().unwrap(), Some(12));
//! assert_eq!(source.next_token().unwrap().as_deref(), Some("12"));
//! assert_eq!(source.next_token().unwrap().as_deref(), Some("34"));
//! ```

use std::collections::VecDeque;
use std::fmt::Display;
use std::fs::File;
use std::io::{BufRead, Read};
use std::iter::FusedIterator;
use std::path::Path;
use std::str::FromStr;

use inscan_config::{IoErrorPolicy, ScanConfig};
use tracing::{debug, error, trace, warn};

use crate::error::{ScanError, ScanResult};
use crate::numeric::{is_numeric, parse_token};
use crate::reader::{LineReader, ReadOutcome};
use crate::separators::SeparatorSet;
use crate::split::split_line;

/// 单次补充的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fill {
    /// 队列非空，未读取
    Cached,
    /// 读取了一行，得到若干 token（可能为 0）
    Split(usize),
    /// 流已结束（或按策略吞掉了 I/O 错误）
    Exhausted,
}

/// 按行读取并切分的 token 源
///
/// 独占底层流；`close` 之后 `reader` 为 `None`，所有需要补充的操作返回 [`ScanError::Closed`]。
#[derive(Debug)]
pub struct TokenSource {
    reader: Option<LineReader>,
    separators: SeparatorSet,
    pending: VecDeque<String>,
    io_errors: IoErrorPolicy,
}

impl TokenSource {
    /// 从行读取器和初始分隔符创建。不会读取流。
    pub fn new(reader: LineReader, separators: impl IntoIterator<Item = char>) -> Self {
        Self {
            reader: Some(reader),
            separators: separators.into_iter().collect(),
            pending: VecDeque::new(),
            io_errors: IoErrorPolicy::default(),
        }
    }

    /// 按配置创建（分隔符和 I/O 错误策略）
    pub fn with_config(reader: LineReader, config: &ScanConfig) -> Self {
        let mut source = Self::new(reader, config.separators.iter().copied());
        source.io_errors = config.io_errors;
        source
    }

    /// 打开文件路径
    ///
    /// 文件不存在、不是普通文件或无法打开时立即失败。
    pub fn open(
        path: impl AsRef<Path>,
        separators: impl IntoIterator<Item = char>,
    ) -> ScanResult<Self> {
        Ok(Self::new(LineReader::open(path.as_ref())?, separators))
    }

    /// 从已打开的文件创建
    pub fn from_file(file: File, separators: impl IntoIterator<Item = char>) -> Self {
        Self::new(LineReader::from_file(file), separators)
    }

    /// 从任意字节流创建
    pub fn from_reader<R: Read + 'static>(
        reader: R,
        separators: impl IntoIterator<Item = char>,
    ) -> Self {
        Self::new(LineReader::from_reader(reader), separators)
    }

    /// 从已缓冲的流创建
    pub fn from_buf_read<R: BufRead + 'static>(
        reader: R,
        separators: impl IntoIterator<Item = char>,
    ) -> Self {
        Self::new(LineReader::new(reader), separators)
    }

    /// 从标准输入创建。读取会阻塞直到有一整行或输入结束。
    pub fn stdin(separators: impl IntoIterator<Item = char>) -> Self {
        Self::new(LineReader::stdin(), separators)
    }

    pub fn io_policy(&self) -> IoErrorPolicy {
        self.io_errors
    }

    pub fn set_io_policy(&mut self, policy: IoErrorPolicy) {
        self.io_errors = policy;
    }

    // ===== 分隔符管理 =====
    //
    // 只影响之后读取的行，队列中已有的 token 不会重新切分。

    pub fn add_separator(&mut self, separator: char) {
        if self.separators.insert(separator) {
            trace!(target: "inscan::source", "Added separator {:?}", separator);
        }
    }

    pub fn remove_separator(&mut self, separator: char) {
        if self.separators.remove(separator) {
            trace!(target: "inscan::source", "Removed separator {:?}", separator);
        }
    }

    pub fn clear_separators(&mut self) {
        trace!(target: "inscan::source", "Cleared {} separators", self.separators.len());
        self.separators.clear();
    }

    pub fn separators(&self) -> &SeparatorSet {
        &self.separators
    }

    // ===== 补充 =====

    fn fill(&mut self) -> ScanResult<Fill> {
        if !self.pending.is_empty() {
            return Ok(Fill::Cached);
        }

        let Some(reader) = self.reader.as_mut() else {
            warn!(target: "inscan::source", "Read attempted on closed token source");
            return Err(ScanError::Closed);
        };

        match reader.read_line() {
            ReadOutcome::Line(line) => {
                let tokens = split_line(&line, &self.separators);
                let count = tokens.len();
                debug!(
                    target: "inscan::split",
                    "Line {} split into {} tokens: {:?}",
                    reader.lines_read(),
                    count,
                    tokens
                );
                self.pending.extend(tokens);
                Ok(Fill::Split(count))
            }
            ReadOutcome::Eof => Ok(Fill::Exhausted),
            ReadOutcome::Failed(e) => match self.io_errors {
                IoErrorPolicy::Swallow => {
                    error!(target: "inscan::reader", "I/O error while reading line, treating as end of stream: {}", e);
                    Ok(Fill::Exhausted)
                }
                IoErrorPolicy::Surface => {
                    warn!(target: "inscan::reader", "I/O error while reading line: {}", e);
                    Err(ScanError::Io(e))
                }
            },
        }
    }

    // ===== 只读访问 =====

    /// 查看队首 token，不移除。补充后仍为空时返回 `None`。
    pub fn peek(&mut self) -> ScanResult<Option<&str>> {
        self.fill()?;
        Ok(self.pending.front().map(String::as_str))
    }

    pub fn peek_first(&mut self) -> ScanResult<Option<&str>> {
        self.peek()
    }

    /// 查看队尾 token，不移除
    pub fn peek_last(&mut self) -> ScanResult<Option<&str>> {
        self.fill()?;
        Ok(self.pending.back().map(String::as_str))
    }

    /// 查看队首 token 并解析，不移除。无 token 时返回 `None`，不做解析。
    pub fn peek_as<T>(&mut self) -> ScanResult<Option<T>>
    where
        T: FromStr,
        T::Err: Display,
    {
        match self.peek()? {
            Some(token) => parse_token(token).map(Some),
            None => Ok(None),
        }
    }

    pub fn peek_i32(&mut self) -> ScanResult<Option<i32>> {
        self.peek_as()
    }

    pub fn peek_i64(&mut self) -> ScanResult<Option<i64>> {
        self.peek_as()
    }

    pub fn peek_f64(&mut self) -> ScanResult<Option<f64>> {
        self.peek_as()
    }

    /// 队首 token 是否为整数或简单小数（`-?[0-9]+(\.[0-9]+)?`），不移除
    pub fn is_next_numeric(&mut self) -> ScanResult<bool> {
        self.fill()?;
        Ok(self.pending.front().is_some_and(|token| is_numeric(token)))
    }

    /// 补充后队列是否为空
    ///
    /// 对文件而言 `true` 表示已读到末尾（或刚读到一行没有 token 的行）；
    /// 对交互式输入会阻塞等待。
    pub fn is_empty(&mut self) -> ScanResult<bool> {
        self.fill()?;
        Ok(self.pending.is_empty())
    }

    /// 队列当前是否为空，不读取流
    pub fn is_cache_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// 队列中已缓存的 token 数量，不读取流
    pub fn cache_len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_closed(&self) -> bool {
        self.reader.is_none()
    }

    // ===== 消费访问 =====

    /// 移除并返回队首 token
    pub fn next_token(&mut self) -> ScanResult<Option<String>> {
        self.fill()?;
        Ok(self.pending.pop_front())
    }

    pub fn poll(&mut self) -> ScanResult<Option<String>> {
        self.next_token()
    }

    pub fn poll_first(&mut self) -> ScanResult<Option<String>> {
        self.next_token()
    }

    /// 移除并返回队尾 token
    pub fn poll_last(&mut self) -> ScanResult<Option<String>> {
        self.fill()?;
        Ok(self.pending.pop_back())
    }

    /// 移除队首 token 后再解析；解析失败时该 token 已被消费
    pub fn next_as<T>(&mut self) -> ScanResult<Option<T>>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.next_token()?
            .map(|token| parse_token(&token))
            .transpose()
    }

    pub fn next_i32(&mut self) -> ScanResult<Option<i32>> {
        self.next_as()
    }

    pub fn next_i64(&mut self) -> ScanResult<Option<i64>> {
        self.next_as()
    }

    pub fn next_f64(&mut self) -> ScanResult<Option<f64>> {
        self.next_as()
    }

    // ===== 迭代 =====

    /// 补充一次，然后逐个取出当前队列中的 token
    ///
    /// 只覆盖已缓存的内容（通常是一行），不会继续读取流。
    /// 读完整个流请使用 [`Self::tokens`] 或循环调用 [`Self::next_token`]。
    pub fn buffered(&mut self) -> ScanResult<Buffered<'_>> {
        self.fill()?;
        Ok(Buffered {
            queue: &mut self.pending,
        })
    }

    /// 遍历整个流直到结束，自动跳过不产生 token 的行
    ///
    /// 遇到第一个错误后停止。
    pub fn tokens(&mut self) -> Tokens<'_> {
        Tokens {
            source: self,
            done: false,
        }
    }

    /// 补充一次，并以 `[a, b, c]` 形式渲染当前队列
    pub fn render(&mut self) -> ScanResult<String> {
        self.fill()?;
        Ok(self.render_pending())
    }

    fn render_pending(&self) -> String {
        let items: Vec<&str> = self.pending.iter().map(String::as_str).collect();
        format!("[{}]", items.join(", "))
    }

    /// 关闭底层流，清空队列和分隔符集合
    ///
    /// 只能调用一次，再次调用返回 [`ScanError::Closed`]。
    pub fn close(&mut self) -> ScanResult<()> {
        let reader = self.reader.take().ok_or(ScanError::Closed)?;
        debug!(
            target: "inscan::source",
            "Closing token source after {} lines, dropping {} pending tokens",
            reader.lines_read(),
            self.pending.len()
        );
        drop(reader);
        self.pending.clear();
        self.separators.clear();
        Ok(())
    }
}

/// 以消费方式遍历当前已缓存的 token
///
/// 提前结束遍历时，未取出的 token 仍留在队列中。
#[derive(Debug)]
pub struct Buffered<'a> {
    queue: &'a mut VecDeque<String>,
}

impl Iterator for Buffered<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.queue.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.queue.len(), Some(self.queue.len()))
    }
}

impl ExactSizeIterator for Buffered<'_> {}

impl<'a> IntoIterator for &'a mut TokenSource {
    type Item = String;
    type IntoIter = Buffered<'a>;

    /// 与 [`TokenSource::buffered`] 相同；补充失败时记录日志并返回空迭代
    ///
    /// 关闭后的错误在这里观察不到，需要区分时改用 [`TokenSource::buffered`]。
    fn into_iter(self) -> Buffered<'a> {
        if let Err(e) = self.fill() {
            warn!(target: "inscan::source", "Refill before iteration failed: {}", e);
        }
        Buffered {
            queue: &mut self.pending,
        }
    }
}

/// 整个流上的 token 迭代器
#[derive(Debug)]
pub struct Tokens<'a> {
    source: &'a mut TokenSource,
    done: bool,
}

impl Iterator for Tokens<'_> {
    type Item = ScanResult<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            match self.source.fill() {
                Ok(Fill::Exhausted) => {
                    self.done = true;
                    return None;
                }
                Ok(Fill::Cached) | Ok(Fill::Split(_)) => {
                    if let Some(token) = self.source.pending.pop_front() {
                        return Some(Ok(token));
                    }
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

impl FusedIterator for Tokens<'_> {}
