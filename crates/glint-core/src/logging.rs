//! Logging facilities for Glint.
//!
//! Glint uses the `tracing` crate for instrumentation. The library never
//! installs a subscriber; applications do:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("glint=debug,glint_core=info")
//!         .init();
//!
//!     // Your application code...
//! }
//! ```
//!
//! Lifecycle transitions are logged at `debug`, per-tick hot paths at
//! `trace`, and recoverable failures at `warn`.

/// Span names used throughout Glint for tracing.
pub mod span_names {
    /// Window tick span.
    pub const TICK: &str = "glint::tick";
    /// Window close pass span.
    pub const CLOSE_PASS: &str = "glint::close_pass";
    /// Asset queue flush span.
    pub const ASSET_FLUSH: &str = "glint::asset_flush";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core framework target.
    pub const CORE: &str = "glint_core";
    /// Handler list target.
    pub const SIGNAL: &str = "glint_core::signal";
    /// Object lifecycle target.
    pub const OBJECT: &str = "glint_core::object";
    /// Window and tick loop target.
    pub const WINDOW: &str = "glint::window";
    /// Asset and service lifecycle target.
    pub const ASSET: &str = "glint::asset";
    /// Layout resolution target.
    pub const LAYOUT: &str = "glint::layout";
    /// Hit-testing target.
    pub const BOUNDS: &str = "glint::bounds";
    /// Performance spans.
    pub const PERF: &str = "glint::perf";
}

/// A guard that records the duration of an operation as a tracing span.
///
/// The span stays entered until the guard is dropped.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "glint::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

/// Trace-level log on the core target.
#[macro_export]
macro_rules! glint_trace {
    ($($arg:tt)*) => {
        tracing::trace!(target: "glint_core", $($arg)*)
    };
}

/// Debug-level log on the core target.
#[macro_export]
macro_rules! glint_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: "glint_core", $($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perf_span() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        let _span = PerfSpan::new("test_operation");
        glint_debug!("inside perf span");
    }
}
