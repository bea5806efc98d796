//! # failsafe
//!
//! A structured value formatter and the diagnostics toolkit built on it.
//!
//! ## What does it do?
//!
//! Any value whose type implements [`Render`] turns into human-readable text:
//! booleans as `true`/`false`, optionals as their value or `nullopt`, durations
//! with a unit suffix, timestamps in ISO-8601 UTC, maps as `{k: v}`, sets as
//! `{e}`, sequences as `[e]`, tuples as `(a, b)`, nested to any depth. Modifier
//! descriptors change how a value renders without copying it: [`hex`], [`oct`],
//! [`bin`] and [`radix`] for integers, [`upper`]/[`lower`] for case, and
//! [`windowed`]/[`truncated`] for long containers.
//!
//! The [`message!`] macro joins any number of renderable values with single
//! spaces. Errors, enforcement checks and log events all build their text
//! that way.
//!
//! ## Key Features
//!
//! - **Compile-time dispatch**: the shape of a value is decided by its `Render` impl;
//!   an unrenderable type is a compile error, never a runtime surprise
//! - **Zero-copy modifiers**: descriptors borrow or own the value and render lazily
//! - **serde bridge**: [`serialized`] renders any `T: Serialize` with the same rules
//! - **Diagnostics**: located [`Error`]s with cause chains, `enforce*!` checks that
//!   return `Result`, and `log_*!` macros emitting `tracing` events
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! failsafe = "0.1"
//! ```
//!
//! ### Building messages
//!
//! ```rust
//! use failsafe::{hex, message, truncated, upper};
//! use std::collections::BTreeMap;
//! use std::time::Duration;
//!
//! let mut config = BTreeMap::new();
//! config.insert("timeout", 30);
//! config.insert("retries", 3);
//!
//! assert_eq!(
//!     message!("Config:", config, "status", upper("ok"), "code", hex(255)),
//!     "Config: {retries: 3, timeout: 30} status OK code 0xff"
//! );
//!
//! let results = vec![1.5, 2.7, 3.9, 4.2, 5.8];
//! assert_eq!(message!("Results:", truncated(&results, 3)), "Results: [1.5, 2.7, 3.9, ...]");
//! assert_eq!(message!("took", Duration::from_millis(100)), "took 100ms");
//! ```
//!
//! ### Errors and enforcement
//!
//! ```rust
//! use failsafe::{enforce_in_range, enforce_valid_index, ErrorKind, ResultExt};
//!
//! fn pick(items: &[u32], index: usize) -> failsafe::Result<u32> {
//!     let index = enforce_valid_index!(index, items.len())?;
//!     enforce_in_range!(items[index], 1, 9, "item", index, "out of range:", items[index])?;
//!     Ok(items[index])
//! }
//!
//! let items = [3, 12];
//! assert_eq!(pick(&items, 0).unwrap(), 3);
//! assert_eq!(pick(&items, 1).unwrap_err().message(), "item 1 out of range: 12");
//!
//! let err = pick(&items, 5)
//!     .context_with(|| failsafe::error!("lookup failed"))
//!     .unwrap_err();
//! assert_eq!(err.root_cause().kind(), ErrorKind::OutOfRange);
//! ```
//!
//! ### Logging
//!
//! Log macros are lazy: when the installed `tracing` subscriber filters the
//! level out, the message arguments are never rendered.
//!
//! ```rust
//! use failsafe::{log_cat_warn, log_info};
//!
//! log_info!("Server started on port", 8080);
//! log_cat_warn!("Network", "retrying in", std::time::Duration::from_secs(5));
//! ```
//!
//! ## Safety Guarantees
//!
//! - Pointer-like values render their address and are never dereferenced
//! - Rendering never fails; the serde bridge reports serializer errors inline
//! - Wide strings are transcoded lossily, never rejected

pub mod case;
pub mod collection;
pub mod enforce;
pub mod error;
pub mod log;
pub mod macros;
pub mod message;
pub mod options;
pub mod radix;
pub mod render;
pub mod ser;
pub mod time;
pub mod window;

pub use case::{lower, upper, Case};
pub use collection::{Collection, CollectionKind, MapEntry};
pub use enforce::{Enforcement, Predicate, Truthy};
pub use error::{Error, ErrorKind, Location, Result, ResultExt};
pub use log::Level;
pub use message::{build_message, MessageBuilder};
pub use options::{Base, CaseDirection, RadixOptions, WindowOptions};
pub use radix::{bin, hex, oct, radix, radix_with, Integral, Radix, RadixInput, RadixSource};
pub use render::{display, wide, wide32, Displayed, Monostate, Render, Wide, Wide32};
pub use ser::{serialized, RenderSerializer, Serialized};
pub use time::{Span, SteadyTime, TimeUnit};
pub use window::{truncated, windowed, windowed_with, Windowed};

/// Renders a single value into a fresh string.
///
/// # Examples
///
/// ```rust
/// use failsafe::{render, oct};
/// use std::collections::BTreeSet;
///
/// let set: BTreeSet<_> = [3, 1, 2].into_iter().collect();
/// assert_eq!(render(&set), "{1, 2, 3}");
/// assert_eq!(render(&oct(8)), "010");
/// assert_eq!(render("plain"), "plain");
/// ```
#[must_use]
pub fn render<T: Render + ?Sized>(value: &T) -> String {
    value.render()
}
