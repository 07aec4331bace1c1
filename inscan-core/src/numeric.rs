//! 数值 token 的识别与解析

use std::fmt::Display;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ScanError, ScanResult};

/// 可选负号、数字、可选的小数部分。不支持指数、`+` 号和千分位。
static NUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?[0-9]+(\.[0-9]+)?$").expect("numeric pattern is valid"));

/// 去除首尾的空格与 ASCII 控制字符（码点 <= U+0020）
pub fn trim_token(token: &str) -> &str {
    token.trim_matches(|c: char| c <= ' ')
}

/// token（去除首尾空白后）是否为整数或简单小数
pub fn is_numeric(token: &str) -> bool {
    NUMERIC.is_match(trim_token(token))
}

/// 以字母开头的数值写法只接受 `Infinity` 与 `NaN`（可带符号）
fn is_unsupported_spelling(trimmed: &str) -> bool {
    let body = trimmed
        .strip_prefix(|c: char| c == '+' || c == '-')
        .unwrap_or(trimmed);
    body.starts_with(|c: char| c.is_ascii_alphabetic()) && body != "Infinity" && body != "NaN"
}

/// 将 token 解析为目标类型，失败时报告原 token 与目标类型
///
/// `inf`、`nan` 等小写写法会被拒绝。
pub fn parse_token<T>(token: &str) -> ScanResult<T>
where
    T: FromStr,
    T::Err: Display,
{
    let parse_error = |reason: String| ScanError::Parse {
        token: token.to_string(),
        target: std::any::type_name::<T>(),
        reason,
    };
    let trimmed = trim_token(token);
    if is_unsupported_spelling(trimmed) {
        return Err(parse_error("unsupported numeric spelling".to_string()));
    }
    trimmed.parse::<T>().map_err(|e| parse_error(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_numeric() {
        for ok in ["0", "42", "-3.14", " 7 ", "-0", "007.50"] {
            assert!(is_numeric(ok), "{:?} should be numeric", ok);
        }
        for bad in ["abc", "", "-", "1.", ".5", "+1", "1e5", "1,000", "--1", "1.2.3", "١٢"] {
            assert!(!is_numeric(bad), "{:?} should not be numeric", bad);
        }
    }

    #[test]
    fn test_trim_token() {
        assert_eq!(trim_token("\t 12\r"), "12");
        assert_eq!(trim_token("a b"), "a b");
    }

    #[test]
    fn test_parse_integers() {
        assert_eq!(parse_token::<i32>(" 42 ").unwrap(), 42);
        assert_eq!(parse_token::<i64>("-9000000000").unwrap(), -9_000_000_000);
    }

    #[test]
    fn test_parse_overflow() {
        let err = parse_token::<i32>("9000000000").unwrap_err();
        match err {
            ScanError::Parse { token, target, .. } => {
                assert_eq!(token, "9000000000");
                assert_eq!(target, "i32");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_parse_double() {
        assert_eq!(parse_token::<f64>("-3.14").unwrap(), -3.14);
        assert_eq!(parse_token::<f64>("1e3").unwrap(), 1000.0);
        assert!(parse_token::<f64>("abc").is_err());
    }

    #[test]
    fn test_parse_double_special_values() {
        assert_eq!(parse_token::<f64>("Infinity").unwrap(), f64::INFINITY);
        assert_eq!(parse_token::<f64>("-Infinity").unwrap(), f64::NEG_INFINITY);
        assert!(parse_token::<f64>("NaN").unwrap().is_nan());
        for bad in ["inf", "-inf", "nan", "infinity", "NAN"] {
            assert!(parse_token::<f64>(bad).is_err(), "{:?} should be rejected", bad);
        }
        // 类型后缀不被接受
        assert!(parse_token::<f64>("1.5d").is_err());
    }
}
