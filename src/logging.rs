//! Scoped logging lifecycle for testbed runs.
//!
//! Installing a logger returns an explicit [`LoggerHandle`] instead of
//! mutating a process-global registry; releasing the handle detaches the
//! subscriber again. The default filter keeps runs quiet at `error`.

use tracing::subscriber::DefaultGuard;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "error";

/// Options controlling the run logger.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LogSettings {
    /// Attach a console (stderr) layer with timestamp, thread name, and
    /// level, matching the original helper's console format.
    pub console: bool,
    /// Filter directives overriding the default `error` severity.
    pub filter: Option<String>,
}

/// Handle owning the scoped subscriber installed for a run.
#[derive(Debug)]
pub struct LoggerHandle {
    guard: Option<DefaultGuard>,
}

impl LoggerHandle {
    /// Detaches the run logger. Calling this more than once is a no-op.
    pub fn release(&mut self) {
        self.guard.take();
    }

    /// Returns true while the scoped subscriber is still attached.
    #[must_use]
    pub const fn is_attached(&self) -> bool {
        self.guard.is_some()
    }
}

/// Installs a scoped subscriber for the current thread.
///
/// The subscriber stays active until the returned handle is released or
/// dropped. Without the console layer, events are discarded after filter
/// evaluation.
#[must_use]
pub fn init(settings: &LogSettings) -> LoggerHandle {
    let directives = settings.filter.as_deref().unwrap_or(DEFAULT_FILTER);
    let filter =
        EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .with_level(true);

    let guard = if settings.console {
        tracing::subscriber::set_default(builder.with_writer(std::io::stderr).finish())
    } else {
        tracing::subscriber::set_default(builder.with_writer(std::io::sink).finish())
    };
    LoggerHandle { guard: Some(guard) }
}
