//! 平台适配层（终端输出）

mod cli;

pub use cli::{format_number, format_object, format_word, print_error, section_title};
