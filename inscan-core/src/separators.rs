//! 分隔符集合

use std::collections::HashSet;

/// 可变的分隔符集合，按码点精确匹配，不含重复
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeparatorSet {
    chars: HashSet<char>,
}

impl SeparatorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入分隔符，已存在时无操作
    ///
    /// 返回是否为新插入
    pub fn insert(&mut self, c: char) -> bool {
        self.chars.insert(c)
    }

    /// 移除分隔符，不存在时无操作
    pub fn remove(&mut self, c: char) -> bool {
        self.chars.remove(&c)
    }

    pub fn clear(&mut self) {
        self.chars.clear();
    }

    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// 按码点排序后的分隔符列表
    pub fn to_sorted_vec(&self) -> Vec<char> {
        let mut chars: Vec<char> = self.chars.iter().copied().collect();
        chars.sort_unstable();
        chars
    }
}

impl FromIterator<char> for SeparatorSet {
    fn from_iter<T: IntoIterator<Item = char>>(iter: T) -> Self {
        Self {
            chars: iter.into_iter().collect(),
        }
    }
}

impl Extend<char> for SeparatorSet {
    fn extend<T: IntoIterator<Item = char>>(&mut self, iter: T) {
        self.chars.extend(iter);
    }
}
