//! Warning sink for user-facing diagnostics.
//!
//! The localizer reports conditions that are not errors (a missing index
//! being built, no reference matches at all) through a [`Diagnostics`]
//! value handed to it by the caller. The CLI forwards these to `tracing`;
//! tests capture them with [`CapturedDiagnostics`].

use std::cell::RefCell;

use tracing::warn;

/// Prefix attached to every diagnostic message
pub const PREFIX: &str = "[localize]";

pub trait Diagnostics {
    fn warn(&self, message: &str);
}

/// Forwards diagnostics to `tracing` at WARN level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn warn(&self, message: &str) {
        warn!("{PREFIX} {message}");
    }
}

/// Records diagnostics in memory
#[derive(Debug, Default)]
pub struct CapturedDiagnostics {
    messages: RefCell<Vec<String>>,
}

impl CapturedDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages received so far, prefixed
    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }
}

impl Diagnostics for CapturedDiagnostics {
    fn warn(&self, message: &str) {
        self.messages.borrow_mut().push(format!("{PREFIX} {message}"));
    }
}
