//! The container formatter.
//!
//! [`Windowed`] renders a contiguous slice of a [`Collection`]'s entries with
//! configurable brackets, delimiter and truncation marker. The underlying
//! container is borrowed, never copied.
//!
//! ## Examples
//!
//! ```rust
//! use failsafe::{message, truncated, windowed};
//!
//! let data: Vec<i32> = (1..=10).collect();
//! assert_eq!(message!(truncated(&data, 3)), "[1, 2, 3, ...]");
//! assert_eq!(message!(windowed(&data).start_index(8)), "[9, 10]");
//! assert_eq!(message!(windowed(&data).start_index(20)), "[]");
//!
//! let fancy = windowed(&data).max_items(3).start_index(1).configure(|options| {
//!     options.prefix = "<<".into();
//!     options.suffix = ">>".into();
//!     options.delimiter = " | ".into();
//!     options.ellipsis = "etc...".into();
//!     options.show_indices = true;
//! });
//! assert_eq!(message!(fancy), "<<[1]: 2 | [2]: 3 | [3]: 4 | etc...>>");
//! ```

use crate::collection::Collection;
use crate::options::WindowOptions;
use crate::Render;
use std::fmt::Write as _;

/// A container paired with its window configuration.
#[derive(Clone, Debug)]
pub struct Windowed<C> {
    container: C,
    options: WindowOptions,
}

/// Wraps a container with the default window (every element, `[`/`]`).
#[must_use]
pub fn windowed<C: Collection>(container: C) -> Windowed<C> {
    windowed_with(container, WindowOptions::default())
}

/// Wraps a container with explicit options.
#[must_use]
pub fn windowed_with<C: Collection>(container: C, options: WindowOptions) -> Windowed<C> {
    Windowed { container, options }
}

/// Shows at most `max_items` elements, then an ellipsis.
///
/// # Examples
///
/// ```rust
/// use failsafe::{message, truncated};
///
/// assert_eq!(message!(truncated(&["x", "y", "z"], 2)), "[x, y, ...]");
/// assert_eq!(message!(truncated(&Vec::<i32>::new(), 5)), "[]");
/// ```
#[must_use]
pub fn truncated<C: Collection>(container: C, max_items: usize) -> Windowed<C> {
    windowed(container).max_items(max_items)
}

impl<C: Collection> Windowed<C> {
    #[must_use]
    pub fn max_items(mut self, max_items: usize) -> Self {
        self.options.max_items = Some(max_items);
        self
    }

    #[must_use]
    pub fn start_index(mut self, start_index: usize) -> Self {
        self.options.start_index = start_index;
        self
    }

    /// Adjusts the options in place.
    #[must_use]
    pub fn configure(mut self, configure: impl FnOnce(&mut WindowOptions)) -> Self {
        configure(&mut self.options);
        self
    }

    #[must_use]
    pub fn options(&self) -> &WindowOptions {
        &self.options
    }

    #[must_use]
    pub fn container(&self) -> &C {
        &self.container
    }

    fn line_break(&self, out: &mut String) {
        if self.options.multiline {
            out.push('\n');
            out.push_str(&self.options.indent);
        }
    }
}

impl<C: Collection> Render for Windowed<C> {
    fn render_to(&self, out: &mut String) {
        let options = &self.options;
        let size = self.container.entry_count();
        if options.start_index >= size {
            out.push_str(&options.prefix);
            out.push_str(&options.suffix);
            return;
        }

        let shown = options.window_len(size);
        let truncated = options.start_index + shown < size;

        out.push_str(&options.prefix);
        if options.multiline && shown > 0 {
            out.push('\n');
        }

        let window = self
            .container
            .entries()
            .enumerate()
            .skip(options.start_index)
            .take(shown);
        for (position, (index, entry)) in window.enumerate() {
            if position > 0 {
                out.push_str(&options.delimiter);
                if options.multiline {
                    out.push('\n');
                }
            }
            if options.multiline {
                out.push_str(&options.indent);
            }
            if options.show_indices {
                let _ = write!(out, "[{}]: ", index);
            }
            entry.render_to(out);
        }

        if truncated {
            if shown > 0 {
                out.push_str(&options.delimiter);
                self.line_break(out);
            }
            out.push_str(&options.ellipsis);
        }
        if options.multiline && (shown > 0 || truncated) {
            out.push('\n');
        }
        out.push_str(&options.suffix);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, BTreeSet, LinkedList};

    #[test]
    fn test_default_matches_dispatcher() {
        let data = vec![1, 2, 3];
        assert_eq!(windowed(&data).render(), data.render());
        assert_eq!(windowed(&Vec::<i32>::new()).render(), "[]");
    }

    #[test]
    fn test_truncation() {
        let data: Vec<i32> = (1..=10).collect();
        assert_eq!(truncated(&data, 3).render(), "[1, 2, 3, ...]");
        assert_eq!(truncated(&data, 10).render(), "[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]");
        assert_eq!(truncated(&data, 20).render(), "[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]");
        assert_eq!(truncated(&data, 0).render(), "[...]");
    }

    #[test]
    fn test_start_index() {
        let letters = ["x", "y", "z"];
        assert_eq!(windowed(&letters).start_index(1).max_items(10).render(), "[y, z]");
        assert_eq!(windowed(&letters).start_index(1).max_items(1).render(), "[y, ...]");
        assert_eq!(windowed(&letters).start_index(3).render(), "[]");
        assert_eq!(windowed(&letters).start_index(10).max_items(5).render(), "[]");
    }

    #[test]
    fn test_empty_ignores_presentation() {
        let empty: Vec<i32> = Vec::new();
        let rendered = windowed(&empty)
            .max_items(5)
            .configure(|options| {
                options.multiline = true;
                options.show_indices = true;
            })
            .render();
        assert_eq!(rendered, "[]");
    }

    #[test]
    fn test_maps_and_sets() {
        let map = BTreeMap::from([("a", 1), ("b", 2), ("c", 3)]);
        assert_eq!(truncated(&map, 2).render(), "[a: 1, b: 2, ...]");

        let set = BTreeSet::from([5, 6, 7]);
        let rendered = windowed(&set)
            .configure(|options| {
                options.prefix = "{".into();
                options.suffix = "}".into();
            })
            .render();
        assert_eq!(rendered, "{5, 6, 7}");

        let list = LinkedList::from([1, 2, 3, 4]);
        assert_eq!(windowed(&list).start_index(2).render(), "[3, 4]");
    }

    #[test]
    fn test_indices_are_absolute() {
        let data = [10, 20, 30, 40];
        let rendered = windowed(&data)
            .start_index(2)
            .configure(|options| options.show_indices = true)
            .render();
        assert_eq!(rendered, "[[2]: 30, [3]: 40]");
    }

    #[test]
    fn test_multiline() {
        let data = vec![1, 2, 3, 4, 5];
        let rendered = windowed(&data)
            .max_items(3)
            .configure(|options| {
                options.multiline = true;
                options.indent = "    ".into();
            })
            .render();
        assert_eq!(rendered, "[\n    1, \n    2, \n    3, \n    ...\n]");

        let rendered = windowed(&[1, 2])
            .configure(|options| options.multiline = true)
            .render();
        assert_eq!(rendered, "[\n  1, \n  2\n]");

        let rendered = windowed(&data)
            .max_items(0)
            .configure(|options| options.multiline = true)
            .render();
        assert_eq!(rendered, "[...\n]");
    }

    #[test]
    fn test_descriptor_borrows_or_owns() {
        let owned = windowed(vec![1, 2]).render();
        assert_eq!(owned, "[1, 2]");

        let data = vec![String::from("kept")];
        let descriptor = windowed(&data);
        assert_eq!(descriptor.container().len(), 1);
        assert_eq!(descriptor.options().max_items, None);
        assert_eq!(data[0], "kept");
    }
}
