use std::fmt;
use std::sync::Mutex;

/// Outcome categories emitted by the trek store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignalKind {
    Success,
    Error,
    Info,
}

/// An outcome notification carrying a short human-readable message. The
/// signal is the only externally visible result of a mutation.
#[derive(Clone, Debug, PartialEq)]
pub struct Signal {
    pub kind: SignalKind,
    pub message: String,
}

impl Signal {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: SignalKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: SignalKind::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: SignalKind::Info,
            message: message.into(),
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Presentation boundary for mutation outcomes. The store emits; the
/// collaborator decides how (or whether) to render.
pub trait SignalSink: Send + Sync {
    fn emit(&self, signal: Signal);
}

/// Collects signals in memory. Used by tests and headless embedding.
#[derive(Default)]
pub struct RecordingSink {
    signals: Mutex<Vec<Signal>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns and clears everything recorded so far.
    pub fn drain(&self) -> Vec<Signal> {
        self.signals
            .lock()
            .map(|mut signals| signals.drain(..).collect())
            .unwrap_or_default()
    }

    pub fn last(&self) -> Option<Signal> {
        self.signals
            .lock()
            .ok()
            .and_then(|signals| signals.last().cloned())
    }
}

impl SignalSink for RecordingSink {
    fn emit(&self, signal: Signal) {
        if let Ok(mut signals) = self.signals.lock() {
            signals.push(signal);
        }
    }
}
