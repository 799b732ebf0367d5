//! Utility functions for the CLI

use crate::error::{CliError, CliResult};
use colored::{ColoredString, Colorize};
use std::path::Path;
use std::time::Duration;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Env var switching log output to JSON lines
pub const JSON_LOGS_ENV: &str = "APIPROBE_JSON_LOGS";

/// Install the global subscriber. `RUST_LOG` wins over `fallback_level`
/// (normally the `LOG_LEVEL` setting).
pub fn init_tracing(fallback_level: &str) -> CliResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback_level.to_lowercase()))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let json_logs = std::env::var(JSON_LOGS_ENV)
        .map(|v| v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    let result = if json_logs {
        registry
            .with(fmt::layer().json().with_target(true).with_level(true))
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .try_init()
    };

    result.map_err(|e| CliError::General(format!("Failed to set tracing subscriber: {}", e)))
}

/// Utility for colored console output
pub struct ColoredOutput;

impl ColoredOutput {
    pub fn success(msg: &str) -> ColoredString {
        msg.green().bold()
    }

    pub fn error(msg: &str) -> ColoredString {
        msg.red().bold()
    }

    pub fn warning(msg: &str) -> ColoredString {
        msg.yellow().bold()
    }

    pub fn info(msg: &str) -> ColoredString {
        msg.blue()
    }

    pub fn dim(msg: &str) -> ColoredString {
        msg.dimmed()
    }

    pub fn highlight(msg: &str) -> ColoredString {
        msg.cyan().bold()
    }
}

/// Format duration in a human-readable way
pub fn format_duration(duration: Duration) -> String {
    let ms = duration.as_millis();
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.1}s", ms as f64 / 1000.0)
    } else {
        format!("{:.1}m", ms as f64 / 60_000.0)
    }
}

/// Truncate text to at most `max_len` characters, ending in an ellipsis
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Split `key<sep>value`, trimming both sides
pub fn parse_pair(raw: &str, sep: char) -> CliResult<(String, String)> {
    let (key, value) = raw.split_once(sep).ok_or_else(|| {
        CliError::InvalidArgument(format!("Expected 'key{}value', got '{}'", sep, raw))
    })?;
    let key = key.trim();
    if key.is_empty() {
        return Err(CliError::InvalidArgument(format!("Empty key in '{}'", raw)));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

/// Create parent directories if they don't exist
pub fn ensure_parent_dir(path: &Path) -> CliResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

pub fn write_output_data(path: &Path, content: &str) -> CliResult<()> {
    ensure_parent_dir(path)?;
    std::fs::write(path, content)?;
    Ok(())
}
