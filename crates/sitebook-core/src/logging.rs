//! Logging facilities for Sitebook.
//!
//! Sitebook uses the `tracing` crate for instrumentation. Nothing is printed
//! unless the application installs a subscriber:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("sitebook_net=debug,sitebook::typeahead=trace")
//!     .init();
//! ```
//!
//! Every subsystem logs under one of the [`targets`] so filters can be
//! applied per area.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core target.
    pub const CORE: &str = "sitebook_core";
    /// Observable stores and the application context.
    pub const STORE: &str = "sitebook_core::store";
    /// Signal emission.
    pub const SIGNAL: &str = "sitebook_core::signal";
    /// REST client.
    pub const REST_API: &str = "sitebook_net::rest_api";
    /// Resource access and id normalization.
    pub const RESOURCES: &str = "sitebook_net::resources";
    /// Typeahead overlay.
    pub const TYPEAHEAD: &str = "sitebook::typeahead";
    /// Dialogs and forms.
    pub const FORMS: &str = "sitebook::forms";
    /// Configuration loading.
    pub const CONFIG: &str = "sitebook::config";
    /// Performance spans.
    pub const PERF: &str = "sitebook::perf";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Useful for timing a fetch or a filter pass under a subscriber that
/// records span durations.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Enter a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "sitebook::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

/// Macros for common tracing patterns.
///
/// Thin wrappers around the `tracing` macros with the core target.
#[macro_export]
macro_rules! sitebook_trace {
    ($($arg:tt)*) => {
        tracing::trace!(target: "sitebook_core", $($arg)*)
    };
}

#[macro_export]
macro_rules! sitebook_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: "sitebook_core", $($arg)*)
    };
}

#[macro_export]
macro_rules! sitebook_info {
    ($($arg:tt)*) => {
        tracing::info!(target: "sitebook_core", $($arg)*)
    };
}

#[macro_export]
macro_rules! sitebook_warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: "sitebook_core", $($arg)*)
    };
}

#[macro_export]
macro_rules! sitebook_error {
    ($($arg:tt)*) => {
        tracing::error!(target: "sitebook_core", $($arg)*)
    };
}
