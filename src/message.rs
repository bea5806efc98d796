//! Message building.
//!
//! A message is the space-joined rendering of a list of heterogeneous values.
//! This is the only place where inter-argument separation happens; formatters
//! never insert the separator themselves.
//!
//! Most callers use the [`message!`](crate::message) macro. [`build_message`]
//! accepts a slice of trait objects for callers that assemble arguments at
//! runtime.
//!
//! ## Examples
//!
//! ```rust
//! use failsafe::{build_message, MessageBuilder, Render};
//!
//! assert_eq!(build_message(&[]), "");
//! assert_eq!(build_message(&[&"Count:", &42, &"Flag:", &true]), "Count: 42 Flag: true");
//!
//! let mut builder = MessageBuilder::new();
//! for path in ["/home/user", "/tmp", "/var/log"] {
//!     builder.push(path);
//! }
//! assert_eq!(builder.finish(), "/home/user /tmp /var/log");
//! ```

use crate::Render;

/// Accumulates rendered arguments separated by single spaces.
#[derive(Debug, Default)]
pub struct MessageBuilder {
    output: String,
    args: usize,
}

impl MessageBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder whose buffer can hold `capacity` bytes without reallocating.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        MessageBuilder {
            output: String::with_capacity(capacity),
            args: 0,
        }
    }

    /// Renders one argument followed by the separator.
    pub fn push<T: Render + ?Sized>(&mut self, value: &T) -> &mut Self {
        value.render_to(&mut self.output);
        self.output.push(' ');
        self.args += 1;
        self
    }

    /// Number of arguments pushed so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.args
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.args == 0
    }

    /// Returns the message with the separator after the last argument removed.
    #[must_use]
    pub fn finish(mut self) -> String {
        if self.args > 0 {
            self.output.pop();
        }
        self.output
    }
}

/// Joins the rendering of every argument with single spaces.
///
/// # Examples
///
/// ```rust
/// use failsafe::build_message;
///
/// let pair = (1, "one");
/// assert_eq!(build_message(&[&"pair:", &pair]), "pair: (1, one)");
/// ```
#[must_use]
pub fn build_message(args: &[&dyn Render]) -> String {
    let mut builder = MessageBuilder::with_capacity(args.len() * 8);
    for arg in args {
        builder.push(*arg);
    }
    builder.finish()
}
