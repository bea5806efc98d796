//! Configuration records for the presentation modifiers.
//!
//! This module provides the option types carried by the wrapper descriptors:
//!
//! - [`RadixOptions`] and [`Base`]: configuration for [`Radix`](crate::Radix)
//! - [`WindowOptions`]: configuration for [`Windowed`](crate::Windowed)
//! - [`CaseDirection`]: direction of a [`Case`](crate::Case) transform
//!
//! ## Examples
//!
//! ```rust
//! use failsafe::{message, radix_with, windowed_with, Base, RadixOptions, WindowOptions};
//!
//! let options = RadixOptions::new(Base::Hex).with_width(4).with_uppercase(true);
//! assert_eq!(message!(radix_with(0xbeef_u16, options)), "0xBEEF");
//!
//! let options = WindowOptions::new().with_max_items(2).with_delimiter(" | ");
//! assert_eq!(message!(windowed_with(&[1, 2, 3], options)), "[1 | 2 | ...]");
//! ```

/// Numeric base for a [`Radix`](crate::Radix) descriptor.
///
/// # Examples
///
/// ```rust
/// use failsafe::Base;
///
/// assert_eq!(Base::Hex.radix(), 16);
/// assert_eq!(Base::Octal.prefix(), "0");
/// assert_eq!(Base::Binary.prefix(), "0b");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Base {
    #[default]
    Hex,
    Octal,
    Binary,
}

impl Base {
    /// Returns the numeric radix (16, 8 or 2).
    #[must_use]
    pub const fn radix(self) -> u32 {
        match self {
            Base::Hex => 16,
            Base::Octal => 8,
            Base::Binary => 2,
        }
    }

    /// Returns the base prefix shown when `show_base` is set.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Base::Hex => "0x",
            Base::Octal => "0",
            Base::Binary => "0b",
        }
    }

    /// Number of bits encoded by a single digit.
    pub(crate) const fn bits_per_digit(self) -> u32 {
        match self {
            Base::Hex => 4,
            Base::Octal => 3,
            Base::Binary => 1,
        }
    }
}

/// Configuration for radix rendering.
///
/// `width` is the minimum digit count (0 for no padding). `group_size` only
/// applies to [`Base::Binary`] and `uppercase` only to [`Base::Hex`].
///
/// # Examples
///
/// ```rust
/// use failsafe::{Base, RadixOptions};
///
/// let options = RadixOptions::new(Base::Binary).with_width(8).with_group_size(4);
/// assert_eq!(options.width, 8);
/// assert!(options.show_base);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RadixOptions {
    pub base: Base,
    pub width: usize,
    pub show_base: bool,
    pub uppercase: bool,
    pub group_size: usize,
}

impl Default for RadixOptions {
    fn default() -> Self {
        RadixOptions {
            base: Base::default(),
            width: 0,
            show_base: true,
            uppercase: false,
            group_size: 4,
        }
    }
}

impl RadixOptions {
    /// Creates default options for the given base.
    #[must_use]
    pub fn new(base: Base) -> Self {
        RadixOptions {
            base,
            ..Default::default()
        }
    }

    /// Sets the minimum number of digits; shorter digit strings are zero-padded.
    #[must_use]
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Sets whether the base prefix (`0x`, `0`, `0b`) is shown.
    #[must_use]
    pub fn with_show_base(mut self, show_base: bool) -> Self {
        self.show_base = show_base;
        self
    }

    /// Sets uppercase hex digits.
    #[must_use]
    pub fn with_uppercase(mut self, uppercase: bool) -> Self {
        self.uppercase = uppercase;
        self
    }

    /// Sets the binary digit group size (0 disables grouping).
    #[must_use]
    pub fn with_group_size(mut self, group_size: usize) -> Self {
        self.group_size = group_size;
        self
    }
}

/// Direction of a case transform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CaseDirection {
    Upper,
    Lower,
}

/// Windowing and presentation options for a [`Windowed`](crate::Windowed) container.
///
/// The defaults render a container exactly like the dispatcher renders a
/// sequence: every element, `[` and `]` around, `", "` between.
///
/// # Examples
///
/// ```rust
/// use failsafe::WindowOptions;
///
/// let options = WindowOptions::new();
/// assert_eq!(options.max_items, None);
/// assert_eq!(options.start_index, 0);
/// assert_eq!(options.prefix, "[");
/// assert_eq!(options.ellipsis, "...");
///
/// let options = WindowOptions::new()
///     .with_max_items(3)
///     .with_start_index(1)
///     .with_brackets("{", "}")
///     .with_indices(true);
/// assert_eq!(options.max_items, Some(3));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WindowOptions {
    /// Maximum number of elements to show; `None` is unbounded.
    pub max_items: Option<usize>,
    /// Absolute index of the first element shown.
    pub start_index: usize,
    pub prefix: String,
    pub suffix: String,
    pub delimiter: String,
    pub ellipsis: String,
    /// Prefix each element with `[<absolute index>]: `.
    pub show_indices: bool,
    pub multiline: bool,
    pub indent: String,
}

impl Default for WindowOptions {
    fn default() -> Self {
        WindowOptions {
            max_items: None,
            start_index: 0,
            prefix: "[".to_string(),
            suffix: "]".to_string(),
            delimiter: ", ".to_string(),
            ellipsis: "...".to_string(),
            show_indices: false,
            multiline: false,
            indent: "  ".to_string(),
        }
    }
}

impl WindowOptions {
    /// Creates default options (unbounded, `[`/`]`, `", "` delimiter).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Limits the number of elements shown.
    #[must_use]
    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = Some(max_items);
        self
    }

    /// Sets the absolute index of the first element shown.
    #[must_use]
    pub fn with_start_index(mut self, start_index: usize) -> Self {
        self.start_index = start_index;
        self
    }

    /// Sets both the opening and the closing text.
    #[must_use]
    pub fn with_brackets(mut self, prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self.suffix = suffix.into();
        self
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    #[must_use]
    pub fn with_ellipsis(mut self, ellipsis: impl Into<String>) -> Self {
        self.ellipsis = ellipsis.into();
        self
    }

    #[must_use]
    pub fn with_indices(mut self, show_indices: bool) -> Self {
        self.show_indices = show_indices;
        self
    }

    /// Puts every element on its own line, prefixed with `indent`.
    #[must_use]
    pub fn with_multiline(mut self, indent: impl Into<String>) -> Self {
        self.multiline = true;
        self.indent = indent.into();
        self
    }

    /// Number of elements the window selects from a container of `size` elements.
    pub(crate) fn window_len(&self, size: usize) -> usize {
        if self.start_index >= size {
            return 0;
        }
        let remaining = size - self.start_index;
        self.max_items.map_or(remaining, |max| max.min(remaining))
    }
}
