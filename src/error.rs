//! Error values for the diagnostics layer.
//!
//! An [`Error`] carries an [`ErrorKind`], a message built from renderable
//! values, the [`Location`] it was raised at, and optionally the error that
//! caused it. Chaining is explicit: wrapping an error with
//! [`Error::context`] records it as the cause of a new, outer error.
//!
//! ## Display
//!
//! An error with a location displays as `[file:line] message`; without one,
//! just the message. [`Error::trace`] renders the whole chain, one line per
//! error, each cause indented two more spaces:
//!
//! ```text
//! → [main.rs:45] Failed to initialize application
//!   → [config.rs:23] Failed to load config
//!     → [file_io.rs:89] File not found: app.json
//! ```
//!
//! ## Examples
//!
//! ```rust
//! use failsafe::{error, fail, ErrorKind, ResultExt};
//!
//! fn open(path: &str) -> failsafe::Result<()> {
//!     fail!(kind = ErrorKind::InvalidArgument; "File not found:", path)
//! }
//!
//! fn load() -> failsafe::Result<()> {
//!     open("app.json").context_with(|| error!("Failed to load config"))
//! }
//!
//! let err = load().unwrap_err();
//! assert_eq!(err.message(), "Failed to load config");
//! assert_eq!(err.cause().unwrap().kind(), ErrorKind::InvalidArgument);
//! assert_eq!(err.chain().count(), 2);
//! assert!(err.trace().contains("  → ["));
//! ```

use crate::Render;
use std::fmt;
use thiserror::Error;

/// Broad classification of an [`Error`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    #[default]
    Runtime,
    Logic,
    InvalidArgument,
    OutOfRange,
    Length,
    Domain,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Runtime => "runtime error",
            ErrorKind::Logic => "logic error",
            ErrorKind::InvalidArgument => "invalid argument",
            ErrorKind::OutOfRange => "out of range",
            ErrorKind::Length => "length error",
            ErrorKind::Domain => "domain error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A source position, displayed as `[file:line]` with the file name only.
///
/// # Examples
///
/// ```rust
/// use failsafe::Location;
///
/// let location = Location::new("src/net/server.rs", 120, 9);
/// assert_eq!(location.to_string(), "[server.rs:120]");
/// assert_eq!(location.file(), "src/net/server.rs");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Location {
    file: &'static str,
    line: u32,
    column: u32,
}

impl Location {
    #[must_use]
    pub const fn new(file: &'static str, line: u32, column: u32) -> Self {
        Location { file, line, column }
    }

    /// The location of the caller of the enclosing `#[track_caller]` function.
    #[must_use]
    #[track_caller]
    pub fn caller() -> Self {
        let caller = std::panic::Location::caller();
        Location::new(caller.file(), caller.line(), caller.column())
    }

    #[must_use]
    pub const fn file(&self) -> &'static str {
        self.file
    }

    /// The last path component of [`file`](Self::file), for either separator style.
    #[must_use]
    pub fn file_name(&self) -> &'static str {
        self.file.rsplit(['/', '\\']).next().unwrap_or(self.file)
    }

    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }

    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}:{}]", self.file_name(), self.line)
    }
}

impl Render for Location {
    fn render_to(&self, out: &mut String) {
        use fmt::Write as _;
        let _ = write!(out, "{}", self);
    }
}

struct LocationPrefix<'a>(&'a Option<Location>);

impl fmt::Display for LocationPrefix<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(location) => write!(f, "{} ", location),
            None => Ok(()),
        }
    }
}

/// A diagnostics error: kind, message, location and optional cause.
#[derive(Debug, Clone, Error)]
#[error("{}{}", LocationPrefix(.location), .message)]
pub struct Error {
    kind: ErrorKind,
    message: String,
    location: Option<Location>,
    #[source]
    source: Option<Box<Error>>,
}

impl Error {
    /// Creates an error with no location.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use failsafe::{Error, ErrorKind};
    ///
    /// let err = Error::new(ErrorKind::Domain, "sqrt of negative");
    /// assert_eq!(err.to_string(), "sqrt of negative");
    /// ```
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Error {
            kind,
            message: message.into(),
            location: None,
            source: None,
        }
    }

    /// Creates an error located at the caller.
    #[track_caller]
    pub fn here(kind: ErrorKind, message: impl Into<String>) -> Self {
        Error::new(kind, message).with_location(Location::caller())
    }

    #[must_use]
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    #[must_use]
    pub fn with_kind(mut self, kind: ErrorKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    /// The error this one wraps, if any.
    pub fn cause(&self) -> Option<&Error> {
        self.source.as_deref()
    }

    /// Makes `self` the cause of `outer` and returns `outer`.
    ///
    /// An existing cause of `outer` is kept at the end of the chain.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use failsafe::{Error, ErrorKind};
    ///
    /// let root = Error::new(ErrorKind::Runtime, "disk full");
    /// let err = root.context(Error::new(ErrorKind::Runtime, "save failed"));
    /// assert_eq!(err.to_string(), "save failed");
    /// assert_eq!(err.root_cause().message(), "disk full");
    /// ```
    #[must_use]
    pub fn context(self, mut outer: Error) -> Error {
        outer.source = Some(Box::new(match outer.source.take() {
            Some(existing) => self.context(*existing),
            None => self,
        }));
        outer
    }

    /// Iterates from this error down to its root cause.
    pub fn chain(&self) -> impl Iterator<Item = &Error> {
        std::iter::successors(Some(self), |err| err.cause())
    }

    pub fn root_cause(&self) -> &Error {
        self.chain().last().unwrap_or(self)
    }

    /// Renders the chain as `→ message` lines, each cause indented two more spaces.
    #[must_use]
    pub fn trace(&self) -> String {
        let mut out = String::new();
        for (depth, err) in self.chain().enumerate() {
            for _ in 0..depth {
                out.push_str("  ");
            }
            out.push_str("→ ");
            err.render_to(&mut out);
            out.push('\n');
        }
        out
    }

    /// Emits the trace as an error event.
    pub fn report(&self) {
        tracing::error!(
            category = "Exception",
            kind = self.kind.as_str(),
            "{}",
            self.trace().trim_end()
        );
    }
}

impl Render for Error {
    fn render_to(&self, out: &mut String) {
        if let Some(location) = &self.location {
            location.render_to(out);
            out.push(' ');
        }
        out.push_str(&self.message);
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::new(ErrorKind::Runtime, err.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::new(ErrorKind::Runtime, msg.to_string())
    }
}

/// Wraps the error of a `Result` as the cause of a new error.
pub trait ResultExt<T> {
    fn context(self, outer: Error) -> Result<T>;

    /// Like [`context`](Self::context), but builds the outer error only on failure.
    fn context_with<F>(self, outer: F) -> Result<T>
    where
        F: FnOnce() -> Error;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, outer: Error) -> Result<T> {
        self.map_err(|err| err.into().context(outer))
    }

    fn context_with<F>(self, outer: F) -> Result<T>
    where
        F: FnOnce() -> Error,
    {
        self.map_err(|err| err.into().context(outer()))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
