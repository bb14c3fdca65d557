//! Standardized logging utility for Trellis
//!
//! This module provides the `wlog!` macro which ensures coarse lifecycle logs
//! follow the `YYYY-MM-DD HH:MM:SS [MODULE] Message` format.
//! Fine-grained diagnostics go through `tracing` directly.

use std::fmt;

/// Timestamp layout shared by `wlog!` and the tracing subscriber.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[macro_export]
macro_rules! wlog {
    ($module:expr, $($arg:tt)*) => {
        $crate::util::logging::emit($module, format_args!($($arg)*))
    };
}

/// Standardized module identifiers
pub const MAIN: &str = "MAIN";
pub const DESKTOP: &str = "DESKTOP";
pub const TREE: &str = "TREE";
pub const LAYOUT: &str = "LAYOUT";
pub const INPUT: &str = "INPUT";
pub const WM: &str = "WM";
pub const RENDER: &str = "RENDER";
pub const PLATFORM: &str = "PLATFORM";

/// Render one lifecycle line without the trailing newline.
pub fn format_line(module: &str, message: fmt::Arguments<'_>) -> String {
    format!(
        "{} [{}] {}",
        chrono::Local::now().format(TIMESTAMP_FORMAT),
        module,
        message
    )
}

/// Write one lifecycle line to stderr.
pub fn emit(module: &str, message: fmt::Arguments<'_>) {
    eprintln!("{}", format_line(module, message));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_layout() {
        let line = format_line(WM, format_args!("Closed window {}", "Notes"));
        let (stamp, rest) = line.split_at(19);
        assert!(chrono::NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).is_ok());
        assert_eq!(rest, " [WM] Closed window Notes");
    }
}
