use std::error::Error;
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;
use std::sync::{Mutex, OnceLock};

use backtrace::Backtrace;
use serde::Serialize;
use slog::{Drain, Level, LevelFilter, Logger, error, o};

use crate::utils::get_env;

#[derive(Serialize, Debug)]
pub struct StackFrame {
    func: String,
    source: String,
    line: u32,
}

static ROOT_LOGGER: OnceLock<Logger> = OnceLock::new();

/// Captures the current backtrace, keeping only the last two path components of each source file.
fn marshal_stack() -> Option<Vec<StackFrame>> {
    let bt = Backtrace::new();
    let mut frames = Vec::new();

    for frame in bt.frames() {
        for symbol in frame.symbols() {
            let func = symbol
                .name()
                .map(|n| n.to_string())
                .unwrap_or_else(|| "unknown".to_owned());
            let source = symbol
                .filename()
                .and_then(|p| p.to_str())
                .map(|s| {
                    let path = Path::new(s);
                    if let (Some(parent), Some(file)) = (path.parent(), path.file_name()) {
                        format!(
                            "{}/{}",
                            parent.file_name().unwrap_or_default().to_string_lossy(),
                            file.to_string_lossy()
                        )
                    } else {
                        s.to_owned()
                    }
                })
                .unwrap_or_else(|| "unknown".to_owned());
            let line = symbol.lineno().unwrap_or(0);

            frames.push(StackFrame { func, source, line });
        }
    }
    if frames.is_empty() { None } else { Some(frames) }
}

/// Flattens an error and its source chain into one message, e.g. `outer: inner`.
pub fn fmt_err(err: &(dyn Error + 'static)) -> String {
    let mut msg = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_msg = cause.to_string();
        if !msg.ends_with(&cause_msg) {
            msg.push_str(": ");
            msg.push_str(&cause_msg);
        }
        source = cause.source();
    }
    msg
}

fn parse_level(raw: &str) -> Level {
    Level::from_str(&raw.trim().to_ascii_uppercase()).unwrap_or(Level::Info)
}

/// Builds a JSON logger writing one record per line to `out`, dropping records below `level`.
fn build_logger<W: Write + Send + 'static>(out: W, level: Level) -> Logger {
    let drain = slog_json::Json::default(out).fuse();
    let drain = LevelFilter::new(drain, level).ignore_res();
    let drain = Mutex::new(drain).fuse();
    Logger::root(drain, o!("service" => env!("CARGO_PKG_NAME")))
}

/// Returns the process-wide JSON logger.
///
/// Records go to stderr so command output on stdout stays clean. The level
/// comes from `LOG_LEVEL` on first use and defaults to `info`.
pub fn get_logger() -> Logger {
    ROOT_LOGGER
        .get_or_init(|| {
            let level = parse_level(&get_env("LOG_LEVEL", Some("info")));
            build_logger(io::stderr(), level)
        })
        .clone()
}

/// Logs `err` at error level under `context`, with its source chain and the current stack trace.
pub fn error_context(logger: &Logger, context: &str, err: &(dyn Error + 'static)) {
    let stack_trace = marshal_stack()
        .and_then(|frames| serde_json::to_string(&frames).ok())
        .unwrap_or_default();
    error!(logger, "{}", context; "error" => fmt_err(err), "stack_trace" => stack_trace);
}
