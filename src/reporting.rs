//! Collaborator seams for error reporting and usage analytics.
//!
//! Both sinks are fire-and-forget: nothing in the pipeline awaits them or
//! changes behavior based on what they do.

use std::error::Error;

/// Receives errors the pipeline decided to swallow or surface. The host app
/// typically forwards these to its crash reporter.
pub trait ErrorReporter: Send + Sync {
    fn notify(&self, error: &dyn Error);
}

/// Receives usage events. Instrumentation itself is the host's concern; this
/// crate only calls the seam.
pub trait AnalyticsSink: Send + Sync {
    fn track_event(&self, _name: &str) {}
    fn track_exception(&self, _message: &str) {}
}

/// Default sink: routes everything to the `log` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl ErrorReporter for LogReporter {
    fn notify(&self, error: &dyn Error) {
        log::error!("menu fetch error: {error}");
    }
}

impl AnalyticsSink for LogReporter {
    fn track_event(&self, name: &str) {
        log::debug!("event: {name}");
    }

    fn track_exception(&self, message: &str) {
        log::debug!("exception: {message}");
    }
}

/// Sink that drops everything. Handy in tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAnalytics;

impl AnalyticsSink for NullAnalytics {}

impl ErrorReporter for NullAnalytics {
    fn notify(&self, _error: &dyn Error) {}
}
