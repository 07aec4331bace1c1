//! CLI 格式化输出

use std::error::Error;

/// 打印错误及其完整原因链
pub fn print_error(e: &dyn Error) {
    eprintln!("❌ {}", e);
    let mut source = e.source();
    while let Some(cause) = source {
        eprintln!("   caused by: {}", cause);
        source = cause.source();
    }
}

/// 分节标题
pub fn section_title(title: &str) -> String {
    format!("_____ {} _____", title)
}

pub fn format_object(token: &str) -> String {
    format!("obj: {}", token)
}

pub fn format_number(n: f64) -> String {
    format!("num: {}", n)
}

pub fn format_word(token: &str) -> String {
    format!("str: {}", token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_items() {
        assert_eq!(format_number(3.5), "num: 3.5");
        assert_eq!(format_number(-2.0), "num: -2");
        assert_eq!(format_word("abc"), "str: abc");
        assert_eq!(format_object("x"), "obj: x");
        assert_eq!(section_title("walk"), "_____ walk _____");
    }
}
