/// Joins any number of renderable values into one message string.
///
/// Each argument is rendered with [`Render`](crate::Render) and followed by a
/// single space; the space after the last argument is dropped. With no
/// arguments the result is empty.
///
/// Arguments are borrowed, never moved or cloned.
///
/// # Examples
///
/// ```rust
/// use failsafe::{hex, message, upper};
///
/// assert_eq!(message!(), "");
/// assert_eq!(message!("Count:", 42, "Flag:", true), "Count: 42 Flag: true");
/// assert_eq!(message!("Error", upper("failed"), "code", hex(255)), "Error FAILED code 0xff");
///
/// let items = vec![1, 2, 3];
/// assert_eq!(message!("items:", items), "items: [1, 2, 3]");
/// assert_eq!(items.len(), 3);
/// ```
#[macro_export]
macro_rules! message {
    () => {
        ::std::string::String::new()
    };

    ($($arg:expr),+ $(,)?) => {{
        let mut builder = $crate::MessageBuilder::new();
        $(
            builder.push(&$arg);
        )+
        builder.finish()
    }};
}

/// Implements [`Render`](crate::Render) for types through their `Display` impl.
///
/// This is the fallback rendering rule: the value's own textual representation.
///
/// # Examples
///
/// ```rust
/// use failsafe::{message, render_via_display};
/// use std::fmt;
///
/// struct Port(u16);
///
/// impl fmt::Display for Port {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         write!(f, ":{}", self.0)
///     }
/// }
///
/// render_via_display!(Port);
///
/// assert_eq!(message!("listening on", Port(8080)), "listening on :8080");
/// assert_eq!(message!(vec![Port(1), Port(2)]), "[:1, :2]");
/// ```
#[macro_export]
macro_rules! render_via_display {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Render for $ty {
                fn render_to(&self, out: &mut ::std::string::String) {
                    use ::std::fmt::Write as _;
                    let _ = ::std::write!(out, "{}", self);
                }
            }
        )+
    };
}

/// Implements [`Render`](crate::Render) for an enum used as a sum type.
///
/// Alternatives listed before `;` must be single-field tuple variants; the
/// active one renders its value and the variant name is not printed.
/// Alternatives listed after `empty:` are unit variants and render as
/// `monostate`.
///
/// # Examples
///
/// ```rust
/// use failsafe::{message, render_sum_type};
/// use std::time::Duration;
///
/// enum Setting {
///     Unset,
///     Count(i64),
///     Name(String),
///     Timeout(Duration),
/// }
///
/// render_sum_type!(Setting { Count, Name, Timeout; empty: Unset });
///
/// assert_eq!(message!(Setting::Count(42)), "42");
/// assert_eq!(message!(Setting::Name("hello".into())), "hello");
/// assert_eq!(message!(Setting::Timeout(Duration::from_millis(500))), "500ms");
/// assert_eq!(message!(Setting::Unset), "monostate");
/// ```
#[macro_export]
macro_rules! render_sum_type {
    ($ty:ident { $($variant:ident),* $(,)? $(; empty: $($empty:ident),+ $(,)?)? }) => {
        impl $crate::Render for $ty {
            fn render_to(&self, out: &mut ::std::string::String) {
                match self {
                    $(
                        $ty::$variant(value) => $crate::Render::render_to(value, out),
                    )*
                    $($(
                        $ty::$empty => out.push_str("monostate"),
                    )+)?
                }
            }
        }
    };
}

/// Builds an [`Error`](crate::Error) located at the macro call site.
///
/// The message is built with [`message!`]. A leading `kind = ErrorKind::...;`
/// selects the kind, which otherwise is [`ErrorKind::Runtime`](crate::ErrorKind::Runtime).
///
/// # Examples
///
/// ```rust
/// use failsafe::{error, ErrorKind};
///
/// let err = error!(kind = ErrorKind::OutOfRange; "index", 7, "of", 3);
/// assert_eq!(err.kind(), ErrorKind::OutOfRange);
/// assert_eq!(err.message(), "index 7 of 3");
/// assert!(err.to_string().starts_with('['));
/// ```
#[macro_export]
macro_rules! error {
    (kind = $kind:expr; $($arg:expr),* $(,)?) => {
        $crate::Error::here($kind, $crate::message!($($arg),*))
    };
    ($($arg:expr),* $(,)?) => {
        $crate::Error::here($crate::ErrorKind::Runtime, $crate::message!($($arg),*))
    };
}

/// Returns early with an error built by [`error!`].
///
/// The error is converted with `Into`, so the enclosing function may return
/// any error type that implements `From<failsafe::Error>`.
#[macro_export]
macro_rules! fail {
    ($($t:tt)*) => {
        return ::std::result::Result::Err(::std::convert::Into::into($crate::error!($($t)*)))
    };
}

/// Returns early with an error when `cond` holds.
///
/// Without message arguments the error message is the condition's source text.
///
/// # Examples
///
/// ```rust
/// use failsafe::{fail_if, fail_unless};
///
/// fn ratio(num: u32, den: u32) -> failsafe::Result<u32> {
///     fail_if!(den == 0);
///     fail_unless!(num >= den, "ratio below one:", num, "/", den);
///     Ok(num / den)
/// }
///
/// assert_eq!(ratio(6, 3).unwrap(), 2);
/// assert_eq!(ratio(1, 0).unwrap_err().message(), "den == 0");
/// assert_eq!(ratio(1, 2).unwrap_err().message(), "ratio below one: 1 / 2");
/// ```
#[macro_export]
macro_rules! fail_if {
    ($cond:expr $(,)?) => {
        if $cond {
            $crate::fail!(stringify!($cond));
        }
    };
    ($cond:expr, $($t:tt)+) => {
        if $cond {
            $crate::fail!($($t)+);
        }
    };
}

/// Returns early with an error unless `cond` holds.
#[macro_export]
macro_rules! fail_unless {
    ($cond:expr $(,)?) => {
        if !($cond) {
            $crate::fail!(concat!("!(", stringify!($cond), ")"));
        }
    };
    ($cond:expr, $($t:tt)+) => {
        if !($cond) {
            $crate::fail!($($t)+);
        }
    };
}
