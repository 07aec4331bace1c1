//! InScan CLI - 演示驱动
//!
//! 打开文件（或标准输入），先以迭代方式消费首行，再展示下一行缓存的 token，然后逐个遍历：
//! 数值 token 打印为 `num: <值>`，其余打印为 `str: <token>`，遇到停止词或流结束时退出。

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use inscan_config::{ConfigError, LogLevel};
use inscan_core::{LineReader, ScanError, TokenSource};
use tracing::{debug, info};

mod config;
mod logging;
mod platform;

use crate::config::{Overrides, RunConfig};
use crate::logging::LogFormat;
use crate::platform::{format_number, format_object, format_word, print_error, section_title};

#[derive(Parser)]
#[command(
    name = "inscan",
    about = "Walk a file or stdin token by token",
    version
)]
struct Cli {
    /// Input file (reads stdin when omitted)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Separator character, may be repeated
    #[arg(short = 's', long = "separator", value_name = "CHAR")]
    separators: Vec<char>,

    /// JSON configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Log level: silent, error, warn, info, debug, trace
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    log_format: LogFormat,

    /// Also append logs to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Stop walking at this word (case-insensitive)
    #[arg(long, default_value = "q")]
    stop: String,

    /// Report read failures instead of treating them as end of input
    #[arg(long)]
    surface_io_errors: bool,

    /// Walk the whole stream, skipping lines without tokens
    #[arg(long)]
    all: bool,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("unknown log level '{0}'")]
    LogLevel(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("cannot open log file: {0}")]
    LogFile(#[source] io::Error),

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error("cannot write output: {0}")]
    Output(#[from] io::Error),
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        print_error(&e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let log_level = cli
        .log_level
        .as_deref()
        .map(|s| LogLevel::parse(s).ok_or_else(|| CliError::LogLevel(s.to_string())))
        .transpose()?;

    let overrides = Overrides {
        config: cli.config,
        separators: cli.separators,
        log_level,
        surface_io_errors: cli.surface_io_errors,
    };
    let config = RunConfig::resolve(overrides, cli.file, cli.stop, cli.log_format, cli.log_file)?;

    logging::init_with_file(&config.scan.log, config.log_format, config.log_file.as_deref())
        .map_err(CliError::LogFile)?;

    let reader = match &config.input {
        Some(path) => LineReader::open(path)?,
        None => LineReader::stdin(),
    };
    info!(
        target: "inscan::cli",
        "Reading {} with separators {:?}",
        config
            .input
            .as_ref()
            .map_or_else(|| "stdin".to_string(), |p| p.display().to_string()),
        config.scan.separators
    );
    let mut source = TokenSource::with_config(reader, &config.scan);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let count = if cli.all {
        walk_all(&mut source, &config.stop_word, &mut out)?
    } else {
        iterate_first_line(&mut source, &mut out)?;
        show_first_line(&mut source, &mut out)?;
        walk(&mut source, &config.stop_word, &mut out)?
    };
    out.flush()?;
    info!(target: "inscan::cli", "Walked {} tokens", count);

    source.close()?;
    Ok(())
}

/// 迭代一次：只补充一行并消费其全部 token
fn iterate_first_line(source: &mut TokenSource, out: &mut impl Write) -> Result<(), CliError> {
    writeln!(out, "{}", section_title("iterate"))?;
    for token in source.buffered()? {
        writeln!(out, "{}", format_object(&token))?;
    }
    Ok(())
}

/// 展示当前缓存：渲染、队首与队尾（不消费）
fn show_first_line(source: &mut TokenSource, out: &mut impl Write) -> Result<(), CliError> {
    writeln!(out, "{}", section_title("buffered"))?;
    writeln!(out, "tokens: {}", source.render()?)?;
    if let Some(first) = source.peek_first()? {
        writeln!(out, "peek_first: {}", first)?;
    }
    if let Some(last) = source.peek_last()? {
        writeln!(out, "peek_last: {}", last)?;
    }
    Ok(())
}

/// 逐个遍历直到停止词或 `is_empty`（对不含 token 的行同样停止）
fn walk(source: &mut TokenSource, stop: &str, out: &mut impl Write) -> Result<usize, CliError> {
    writeln!(out, "{}", section_title("walk"))?;
    let mut count = 0;
    while !source.is_empty()? {
        if source.is_next_numeric()? {
            if let Some(n) = source.next_f64()? {
                writeln!(out, "{}", format_number(n))?;
            }
        } else if let Some(token) = source.next_token()? {
            writeln!(out, "{}", format_word(&token))?;
            if is_stop_word(&token, stop) {
                debug!(target: "inscan::cli", "Stop word {:?} reached", token);
                return Ok(count + 1);
            }
        }
        count += 1;
    }
    Ok(count)
}

/// 遍历整个流，跳过不含 token 的行
fn walk_all(source: &mut TokenSource, stop: &str, out: &mut impl Write) -> Result<usize, CliError> {
    writeln!(out, "{}", section_title("all"))?;
    let mut count = 0;
    for token in source.tokens() {
        let token = token?;
        count += 1;
        if inscan_core::is_numeric(&token) {
            let n: f64 = inscan_core::numeric::parse_token(&token)?;
            writeln!(out, "{}", format_number(n))?;
        } else {
            writeln!(out, "{}", format_word(&token))?;
            if is_stop_word(&token, stop) {
                break;
            }
        }
    }
    Ok(count)
}

fn is_stop_word(token: &str, stop: &str) -> bool {
    token.to_lowercase() == stop.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn source(input: &'static str) -> TokenSource {
        TokenSource::from_buf_read(Cursor::new(input), ['-', ' '])
    }

    fn output(buf: Vec<u8>) -> Vec<String> {
        String::from_utf8(buf)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_walk_until_stop_word() {
        let mut src = source("12-34 abc\nQ 99\n");
        let mut buf = Vec::new();
        let count = walk(&mut src, "q", &mut buf).unwrap();

        assert_eq!(count, 4);
        assert_eq!(
            output(buf),
            vec!["_____ walk _____", "num: 12", "num: 34", "str: abc", "str: Q"]
        );
        // 停止词之后的 token 仍在队列中
        assert_eq!(src.next_token().unwrap().as_deref(), Some("99"));
    }

    #[test]
    fn test_walk_stops_at_blank_line() {
        let mut src = source("1\n\n2\n");
        let mut buf = Vec::new();
        assert_eq!(walk(&mut src, "q", &mut buf).unwrap(), 1);
    }

    #[test]
    fn test_walk_all_skips_blank_lines() {
        let mut src = source("1\n\n2.5 x\n");
        let mut buf = Vec::new();
        assert_eq!(walk_all(&mut src, "q", &mut buf).unwrap(), 3);
        assert_eq!(
            output(buf),
            vec!["_____ all _____", "num: 1", "num: 2.5", "str: x"]
        );
    }

    #[test]
    fn test_iterate_first_line_consumes_one_line() {
        let mut src = source("a-b 1\nc d\n");
        let mut buf = Vec::new();
        iterate_first_line(&mut src, &mut buf).unwrap();

        assert_eq!(
            output(buf),
            vec!["_____ iterate _____", "obj: a", "obj: b", "obj: 1"]
        );
        assert!(src.is_cache_empty());
        assert_eq!(src.peek().unwrap().as_deref(), Some("c"));
    }

    #[test]
    fn test_show_first_line_does_not_consume() {
        let mut src = source("a b c\n");
        let mut buf = Vec::new();
        show_first_line(&mut src, &mut buf).unwrap();

        assert_eq!(
            output(buf),
            vec!["_____ buffered _____", "tokens: [a, b, c]", "peek_first: a", "peek_last: c"]
        );
        assert_eq!(src.cache_len(), 3);
    }

    #[test]
    fn test_cli_parses_separators() {
        let cli = Cli::try_parse_from(["inscan", "in.txt", "-s", "-", "-s", ",", "--all"]).unwrap();
        assert_eq!(cli.file, Some(PathBuf::from("in.txt")));
        assert_eq!(cli.separators, vec!['-', ',']);
        assert!(cli.all);
        assert_eq!(cli.stop, "q");
    }

    #[test]
    fn test_unknown_log_level() {
        let cli = Cli::try_parse_from(["inscan", "--log-level", "loud"]).unwrap();
        assert!(matches!(run(cli), Err(CliError::LogLevel(_))));
    }
}
