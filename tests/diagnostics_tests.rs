use failsafe::{
    enforce, enforce_eq, enforce_ge, enforce_in_range, enforce_le, enforce_not_null,
    enforce_valid_index, error, fail, fail_if, hex, log_cat_error, log_cat_info, log_debug,
    log_error, log_fatal, log_info, log_trace, log_warn, truncated, Error, ErrorKind, Location,
    Render, ResultExt,
};
use std::cell::Cell;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Capture {
    type Writer = Capture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn capture_logs(filter: &str, body: impl FnOnce()) -> String {
    let capture = Capture::default();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(capture.clone())
        .with_ansi(false)
        .without_time()
        .finish();
    tracing::subscriber::with_default(subscriber, body);
    capture.contents()
}

#[derive(Debug)]
enum AppError {
    Diagnostics(Error),
}

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        AppError::Diagnostics(err)
    }
}

fn read_config(path: &str) -> failsafe::Result<String> {
    fail!(kind = ErrorKind::InvalidArgument; "File not found:", path)
}

fn load_config() -> failsafe::Result<String> {
    read_config("app.json").context_with(|| error!("Failed to load config"))
}

fn initialize() -> failsafe::Result<String> {
    load_config().context_with(|| error!("Failed to initialize application"))
}

#[test]
fn test_error_chain_and_trace() {
    let err = initialize().unwrap_err();
    let messages: Vec<&str> = err.chain().map(Error::message).collect();
    assert_eq!(
        messages,
        [
            "Failed to initialize application",
            "Failed to load config",
            "File not found: app.json"
        ]
    );
    assert_eq!(err.root_cause().kind(), ErrorKind::InvalidArgument);

    let trace = err.trace();
    let lines: Vec<&str> = trace.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("→ [diagnostics_tests.rs:"));
    assert!(lines[0].ends_with("] Failed to initialize application"));
    assert!(lines[1].starts_with("  → [diagnostics_tests.rs:"));
    assert!(lines[2].starts_with("    → [diagnostics_tests.rs:"));
    assert!(lines[2].ends_with("File not found: app.json"));
}

#[test]
fn test_std_error_source() {
    let err = load_config().unwrap_err();
    let source = std::error::Error::source(&err).unwrap();
    assert!(source.to_string().ends_with("File not found: app.json"));
}

#[test]
fn test_fail_converts_into_caller_error() {
    fn parse(port: i64) -> Result<u16, AppError> {
        fail_if!(port < 0, kind = ErrorKind::Domain; "negative port", port);
        match u16::try_from(port) {
            Ok(port) => Ok(port),
            Err(_) => fail!(kind = ErrorKind::OutOfRange; "port", port, "exceeds", u16::MAX),
        }
    }

    assert_eq!(parse(8080).unwrap(), 8080);
    let AppError::Diagnostics(err) = parse(-1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Domain);
    assert_eq!(err.message(), "negative port -1");
    let AppError::Diagnostics(err) = parse(70000).unwrap_err();
    assert_eq!(err.message(), "port 70000 exceeds 65535");
}

#[test]
fn test_io_errors_join_chains() {
    let missing: io::Result<()> = Err(io::Error::new(io::ErrorKind::NotFound, "no such file"));
    let err = missing.context(error!("open failed")).unwrap_err();
    assert_eq!(err.cause().unwrap().message(), "no such file");
    assert!(err.cause().unwrap().location().is_none());
}

#[test]
fn test_error_renders_inside_messages() {
    let err = Error::new(ErrorKind::Runtime, "timeout").with_location(Location::new("src/net.rs", 12, 4));
    assert_eq!(failsafe::message!("caught", err), "caught [net.rs:12] timeout");
    assert_eq!(err.render(), err.to_string());
}

#[test]
fn test_enforce_suite() {
    fn validate(values: &[i32], index: usize) -> failsafe::Result<i32> {
        let index = enforce_valid_index!(index, values.len())?;
        let value = values[index];
        enforce_ge!(value, 0, "negative entry at", index)?;
        enforce_le!(value, 100)?;
        Ok(value)
    }

    let values = [5, -3, 250];
    assert_eq!(validate(&values, 0).unwrap(), 5);
    assert_eq!(validate(&values, 1).unwrap_err().message(), "negative entry at 1");
    assert_eq!(
        validate(&values, 2).unwrap_err().message(),
        "Enforcement failed: value <= 100 - Value must not exceed bound"
    );
    let err = validate(&values, 3).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfRange);
    assert_eq!(err.message(), "Index out of bounds: 3 not in [0, 3)");
}

#[test]
fn test_enforce_messages_use_formatter() {
    let data = vec![1, 2, 3, 4, 5];
    let err = enforce!(data.len() < 3, "too many items:", truncated(&data, 2)).unwrap_err();
    assert_eq!(err.message(), "too many items: [1, 2, ...]");

    let code = 255;
    let err = enforce_eq!(code, 0, "bad status", hex(code)).unwrap_err();
    assert_eq!(err.message(), "bad status 0xff");

    let err = enforce_in_range!(1.5, 0.0, 1.0).unwrap_err();
    assert_eq!(err.message(), "Enforcement failed: 1.5 in [0.0, 1.0] - Value must be in range");

    let handle: Option<&str> = None;
    assert_eq!(enforce_not_null!(handle).unwrap_err().message(), "Null pointer: handle");
}

#[test]
fn test_log_levels_and_categories() {
    let output = capture_logs("info", || {
        log_trace!("trace hidden");
        log_debug!("debug hidden");
        log_info!("Server started on port", 8080);
        log_warn!("disk at", 91, "percent");
        log_error!("request failed with", hex(500));
        log_cat_info!("Network", "connected to", "db-1");
        log_fatal!("giving up");
    });

    assert!(!output.contains("hidden"));
    assert!(output.contains("Server started on port 8080"));
    assert!(output.contains("disk at 91 percent"));
    assert!(output.contains("request failed with 0x1f4"));
    assert!(output.contains("connected to db-1"));
    assert!(output.contains("Network"));
    assert!(output.contains("Application"));
    assert!(output.contains("WARN"));

    let fatal = output.lines().find(|line| line.contains("giving up")).unwrap();
    assert!(fatal.contains("ERROR"));
    assert!(fatal.contains("fatal=true"));
}

#[test]
fn test_filtered_log_does_not_render_arguments() {
    let rendered = Cell::new(0);
    let expensive = || {
        rendered.set(rendered.get() + 1);
        "payload"
    };

    let output = capture_logs("error", || {
        log_info!("skipped", expensive());
        log_cat_error!("Storage", "kept", expensive());
    });
    assert_eq!(rendered.get(), 1);
    assert!(output.contains("kept payload"));
    assert!(!output.contains("skipped"));
}

#[test]
fn test_report_logs_the_trace() {
    let err = initialize().unwrap_err();
    let output = capture_logs("error", || err.report());
    assert!(output.contains("Exception"));
    assert!(output.contains("Failed to initialize application"));
    assert!(output.contains("File not found: app.json"));
}
