use parking_lot::Mutex;
use std::path::PathBuf;

/// A single diagnostic event emitted while scanning a corpus.
///
/// These are warnings, not errors: each one names the smallest unit that was
/// skipped while the rest of the run carried on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A file was skipped entirely because it could not be parsed.
    MalformedFile { path: PathBuf, error: String },
    /// A `<tu>` held a number of `<tuv>` children other than two.
    UnexpectedTuvCount { path: PathBuf, count: usize },
    /// A `<tu>` produced more than two usable segments and was dropped.
    OversizedUnit { path: PathBuf, segments: usize },
}

/// Sink for diagnostics. Injected so callers and tests can observe
/// structured events instead of scraping log output.
pub trait Reporter {
    fn report(&self, diag: Diagnostic);
}

/// Default sink: forwards every event to `tracing` at warn level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn report(&self, diag: Diagnostic) {
        match diag {
            Diagnostic::MalformedFile { path, error } => {
                tracing::warn!(path = %path.display(), %error, "skipping unparseable file");
            }
            Diagnostic::UnexpectedTuvCount { path, count } => {
                tracing::warn!(path = %path.display(), count, "translation unit with unexpected tuv count");
            }
            Diagnostic::OversizedUnit { path, segments } => {
                tracing::warn!(path = %path.display(), segments, "dropping oversized translation unit");
            }
        }
    }
}

/// Accumulates every event in memory, for assertions in tests and for
/// callers that want to attach skip reports to a corpus run.
#[derive(Debug, Default)]
pub struct CollectingReporter {
    events: Mutex<Vec<Diagnostic>>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Diagnostic> {
        self.events.lock().clone()
    }
}

impl Reporter for CollectingReporter {
    fn report(&self, diag: Diagnostic) {
        self.events.lock().push(diag);
    }
}
