//! Logging façade over `tracing`.
//!
//! The `log_*!` macros build their message with [`message!`](crate::message)
//! and emit a `tracing` event carrying a `category` field. The message is only
//! built when the installed subscriber is interested in the level, so
//! arguments to a filtered-out call are never rendered.
//!
//! Filtering and output are whatever `tracing` subscriber the application
//! installs; this module keeps no state of its own.
//!
//! ## Examples
//!
//! ```rust
//! use failsafe::{hex, log_cat_warn, log_info};
//!
//! let code = 255;
//! log_info!("Server started on port", 8080);
//! log_cat_warn!("Network", "Connection failed with code", hex(code));
//! ```

use std::fmt;

/// Category attached to events logged without an explicit one.
pub const DEFAULT_CATEGORY: &str = "Application";

/// Severity of a log event.
///
/// `Fatal` has no `tracing` counterpart; it is emitted at `ERROR` with a
/// `fatal = true` field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl Level {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Fatal => "FATAL",
        }
    }

    /// The `tracing` level events of this severity are emitted at.
    #[must_use]
    pub const fn to_tracing(self) -> tracing::Level {
        match self {
            Level::Trace => tracing::Level::TRACE,
            Level::Debug => tracing::Level::DEBUG,
            Level::Info => tracing::Level::INFO,
            Level::Warn => tracing::Level::WARN,
            Level::Error | Level::Fatal => tracing::Level::ERROR,
        }
    }

    #[must_use]
    pub const fn is_fatal(self) -> bool {
        matches!(self, Level::Fatal)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the current subscriber would record an event at `level`.
#[must_use]
pub fn enabled(level: Level) -> bool {
    match level {
        Level::Trace => tracing::enabled!(tracing::Level::TRACE),
        Level::Debug => tracing::enabled!(tracing::Level::DEBUG),
        Level::Info => tracing::enabled!(tracing::Level::INFO),
        Level::Warn => tracing::enabled!(tracing::Level::WARN),
        Level::Error | Level::Fatal => tracing::enabled!(tracing::Level::ERROR),
    }
}

/// Emits an already built message.
///
/// For callers that pick the level at runtime; the macros are preferred when
/// the level is known, since they skip building the message.
///
/// # Examples
///
/// ```rust
/// use failsafe::log::{emit, Level};
///
/// for level in [Level::Info, Level::Fatal] {
///     emit(level, "Startup", &format!("{} event", level));
/// }
/// ```
pub fn emit(level: Level, category: &str, message: &str) {
    match level {
        Level::Trace => tracing::trace!(category, "{}", message),
        Level::Debug => tracing::debug!(category, "{}", message),
        Level::Info => tracing::info!(category, "{}", message),
        Level::Warn => tracing::warn!(category, "{}", message),
        Level::Error => tracing::error!(category, "{}", message),
        Level::Fatal => tracing::error!(category, fatal = true, "{}", message),
    }
}

#[doc(hidden)]
pub mod __private {
    pub use tracing;
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log_event {
    ($level:ident, $category:expr; fatal; $($arg:expr),+) => {
        if $crate::log::__private::tracing::enabled!($crate::log::__private::tracing::Level::$level) {
            let category: &str = $category;
            let message = $crate::message!($($arg),+);
            $crate::log::__private::tracing::event!(
                $crate::log::__private::tracing::Level::$level,
                category,
                fatal = true,
                "{}",
                message
            );
        }
    };
    ($level:ident, $category:expr; $($arg:expr),+) => {
        if $crate::log::__private::tracing::enabled!($crate::log::__private::tracing::Level::$level) {
            let category: &str = $category;
            let message = $crate::message!($($arg),+);
            $crate::log::__private::tracing::event!(
                $crate::log::__private::tracing::Level::$level,
                category,
                "{}",
                message
            );
        }
    };
}

/// Logs at trace level in the default category.
#[macro_export]
macro_rules! log_trace {
    ($($arg:expr),+ $(,)?) => {
        $crate::__log_event!(TRACE, $crate::log::DEFAULT_CATEGORY; $($arg),+)
    };
}

/// Logs at debug level in the default category.
#[macro_export]
macro_rules! log_debug {
    ($($arg:expr),+ $(,)?) => {
        $crate::__log_event!(DEBUG, $crate::log::DEFAULT_CATEGORY; $($arg),+)
    };
}

/// Logs at info level in the default category.
///
/// # Examples
///
/// ```rust
/// use failsafe::{log_info, truncated};
///
/// let results = vec![1.5, 2.7, 3.9, 4.2, 5.8];
/// log_info!("Processing complete. Results:", truncated(&results, 3));
/// ```
#[macro_export]
macro_rules! log_info {
    ($($arg:expr),+ $(,)?) => {
        $crate::__log_event!(INFO, $crate::log::DEFAULT_CATEGORY; $($arg),+)
    };
}

/// Logs at warn level in the default category.
#[macro_export]
macro_rules! log_warn {
    ($($arg:expr),+ $(,)?) => {
        $crate::__log_event!(WARN, $crate::log::DEFAULT_CATEGORY; $($arg),+)
    };
}

/// Logs at error level in the default category.
#[macro_export]
macro_rules! log_error {
    ($($arg:expr),+ $(,)?) => {
        $crate::__log_event!(ERROR, $crate::log::DEFAULT_CATEGORY; $($arg),+)
    };
}

/// Logs a fatal event in the default category.
///
/// The process is not terminated; deciding what happens after a fatal event
/// is left to the caller.
#[macro_export]
macro_rules! log_fatal {
    ($($arg:expr),+ $(,)?) => {
        $crate::__log_event!(ERROR, $crate::log::DEFAULT_CATEGORY; fatal; $($arg),+)
    };
}

/// Logs at trace level in `category`.
#[macro_export]
macro_rules! log_cat_trace {
    ($category:expr, $($arg:expr),+ $(,)?) => {
        $crate::__log_event!(TRACE, $category; $($arg),+)
    };
}

/// Logs at debug level in `category`.
#[macro_export]
macro_rules! log_cat_debug {
    ($category:expr, $($arg:expr),+ $(,)?) => {
        $crate::__log_event!(DEBUG, $category; $($arg),+)
    };
}

/// Logs at info level in `category`.
#[macro_export]
macro_rules! log_cat_info {
    ($category:expr, $($arg:expr),+ $(,)?) => {
        $crate::__log_event!(INFO, $category; $($arg),+)
    };
}

/// Logs at warn level in `category`.
#[macro_export]
macro_rules! log_cat_warn {
    ($category:expr, $($arg:expr),+ $(,)?) => {
        $crate::__log_event!(WARN, $category; $($arg),+)
    };
}

/// Logs at error level in `category`.
#[macro_export]
macro_rules! log_cat_error {
    ($category:expr, $($arg:expr),+ $(,)?) => {
        $crate::__log_event!(ERROR, $category; $($arg),+)
    };
}

/// Logs a fatal event in `category`.
#[macro_export]
macro_rules! log_cat_fatal {
    ($category:expr, $($arg:expr),+ $(,)?) => {
        $crate::__log_event!(ERROR, $category; fatal; $($arg),+)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_level_mapping() {
        assert_eq!(Level::Trace.to_tracing(), tracing::Level::TRACE);
        assert_eq!(Level::Warn.to_tracing(), tracing::Level::WARN);
        assert_eq!(Level::Fatal.to_tracing(), tracing::Level::ERROR);
        assert!(Level::Fatal.is_fatal());
        assert!(!Level::Error.is_fatal());
        assert!(Level::Debug < Level::Info);
        assert_eq!(Level::Fatal.to_string(), "FATAL");
    }

    #[test]
    fn test_filtered_level_skips_message() {
        let built = Cell::new(0);
        let expensive = || {
            built.set(built.get() + 1);
            "payload"
        };
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_writer(std::io::sink)
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            log_debug!("skipped", expensive());
            assert!(!enabled(Level::Debug));
            log_info!("kept", expensive());
            log_cat_fatal!("Startup", "fatal", expensive());
            assert!(enabled(Level::Fatal));
            assert!(enabled(Level::Warn) && enabled(Level::Info));
            assert!(!enabled(Level::Trace));
        });
        assert_eq!(built.get(), 2);
    }
}
