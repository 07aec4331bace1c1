//! 按分隔符切分一行文本
//!
//! 从左到右扫描，遇到分隔符时输出非空片段；连续、前导、尾随分隔符都不会产生空 token。

use crate::separators::SeparatorSet;

/// 切分一行，按出现顺序返回 token
pub fn split_line(line: &str, separators: &SeparatorSet) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut start = 0;

    for (i, c) in line.char_indices() {
        if separators.contains(c) {
            if start < i {
                tokens.push(line[start..i].to_string());
            }
            start = i + c.len_utf8();
        }
    }
    if start < line.len() {
        tokens.push(line[start..].to_string());
    }

    tokens
}
