//! Terminal logging with colored module prefixes.
//!
//! Everything goes to stderr; stdout is reserved for the URLs and reports the
//! CLI prints, so `siteroute build ... | xargs curl` keeps working.
//!
//! ```ignore
//! log!("config"; "loaded {} sites", count);
//! debug!("resolve"; "unknown site reference {:?}, using default", reference);
//! ```

use crossterm::{
    execute,
    terminal::{Clear, ClearType},
};
use owo_colors::OwoColorize;
use std::{
    io::{Write, stderr},
    sync::atomic::{AtomicBool, Ordering},
};

/// Set from `--verbose`; gates [`debug!`](crate::debug).
static VERBOSE: AtomicBool = AtomicBool::new(false);

pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::Relaxed);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

// ============================================================================
// macros
// ============================================================================

/// Print a message under a `[module]` prefix.
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Like [`log!`], but only with `--verbose`.
///
/// The engine uses it to trace every step of the default fallback chain.
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// output
// ============================================================================

/// Which part of the crate a log line comes from, for coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    Config,
    Routing,
    Warning,
    Error,
    Other,
}

impl Source {
    fn of(module: &str) -> Self {
        match module.to_ascii_lowercase().as_str() {
            "config" | "validate" => Self::Config,
            "routing" | "resolve" | "template" | "switch" | "nav" => Self::Routing,
            "warning" => Self::Warning,
            "error" => Self::Error,
            _ => Self::Other,
        }
    }
}

#[inline]
pub fn log(module: &str, message: &str) {
    let prefix = prefix(module);

    let mut stderr = stderr().lock();
    execute!(stderr, Clear(ClearType::UntilNewLine)).ok();
    writeln!(stderr, "{prefix} {message}").ok();
    stderr.flush().ok();
}

fn prefix(module: &str) -> String {
    let tag = format!("[{module}]");
    match Source::of(module) {
        Source::Config => tag.bright_blue().bold().to_string(),
        Source::Routing => tag.bright_green().bold().to_string(),
        Source::Warning => tag.bright_yellow().bold().to_string(),
        Source::Error => tag.bright_red().bold().to_string(),
        Source::Other => tag.bright_magenta().bold().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_of_module() {
        assert_eq!(Source::of("Config"), Source::Config);
        assert_eq!(Source::of("template"), Source::Routing);
        assert_eq!(Source::of("switch"), Source::Routing);
        assert_eq!(Source::of("warning"), Source::Warning);
        assert_eq!(Source::of("cli"), Source::Other);
    }

    #[test]
    fn test_prefix_contains_module() {
        assert!(prefix("resolve").contains("[resolve]"));
    }

    #[test]
    fn test_verbose_toggle() {
        set_verbose(true);
        assert!(is_verbose());
        set_verbose(false);
        assert!(!is_verbose());
    }
}
