//! Process-wide reporting mask for engine diagnostics.
//!
//! Engines call [`report`] for everything they want to complain about; the
//! mask decides which severities reach `tracing`. Callers that know a
//! document will trigger noisy diagnostics narrow the mask with [`suppress`]
//! and get it back when the returned guard drops.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Notice,
    /// Pedantic complaints about markup the engine tolerates anyway.
    Strict,
    Deprecated,
}

impl Severity {
    pub const fn bit(self) -> u32 {
        match self {
            Self::Error => 1,
            Self::Warning => 1 << 1,
            Self::Notice => 1 << 2,
            Self::Strict => 1 << 3,
            Self::Deprecated => 1 << 4,
        }
    }

    const fn index(self) -> usize {
        self.bit().trailing_zeros() as usize
    }
}

/// Mask with every severity enabled.
pub const ALL: u32 = 0b1_1111;

static ERROR_REPORTING: AtomicU32 = AtomicU32::new(ALL);

/// Current reporting mask.
pub fn error_reporting() -> u32 {
    ERROR_REPORTING.load(Ordering::SeqCst)
}

/// Replace the reporting mask, returning the previous one.
pub fn set_error_reporting(mask: u32) -> u32 {
    ERROR_REPORTING.swap(mask & ALL, Ordering::SeqCst)
}

pub fn is_enabled(severity: Severity) -> bool {
    error_reporting() & severity.bit() != 0
}

/// Severities currently held off by live guards, with the number of guards
/// per severity and whether the bit was set before the first of them.
static SUPPRESSIONS: Mutex<[Suppression; 5]> = Mutex::new([Suppression::NONE; 5]);

#[derive(Debug, Clone, Copy)]
struct Suppression {
    count: usize,
    restore: bool,
}

impl Suppression {
    const NONE: Self = Self {
        count: 0,
        restore: false,
    };
}

fn suppressions() -> MutexGuard<'static, [Suppression; 5]> {
    SUPPRESSIONS.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Disable one severity until the guard is dropped.
///
/// Guards for the same severity may overlap and drop in any order: the bit
/// comes back when the last of them drops, and only if it was set when the
/// first one was taken.
#[must_use = "the mask is restored as soon as the guard is dropped"]
pub fn suppress(severity: Severity) -> ReportingGuard {
    let mut suppressions = suppressions();
    let previous = ERROR_REPORTING.fetch_and(!severity.bit(), Ordering::SeqCst);
    let entry = &mut suppressions[severity.index()];
    if entry.count == 0 {
        entry.restore = previous & severity.bit() != 0;
    }
    entry.count += 1;
    ReportingGuard { severity, previous }
}

/// Releases the suppression taken by [`suppress`] on drop, including during
/// unwinding.
#[derive(Debug)]
pub struct ReportingGuard {
    severity: Severity,
    previous: u32,
}

impl ReportingGuard {
    /// The mask as it was when this guard was taken.
    pub fn previous(&self) -> u32 {
        self.previous
    }
}

impl Drop for ReportingGuard {
    fn drop(&mut self) {
        let mut suppressions = suppressions();
        let entry = &mut suppressions[self.severity.index()];
        entry.count = entry.count.saturating_sub(1);
        if entry.count == 0 && entry.restore {
            ERROR_REPORTING.fetch_or(self.severity.bit(), Ordering::SeqCst);
        }
    }
}

/// Emit an engine diagnostic if its severity is currently enabled.
/// Returns whether it was emitted.
pub fn report(severity: Severity, message: impl fmt::Display) -> bool {
    if !is_enabled(severity) {
        return false;
    }
    match severity {
        Severity::Error => tracing::error!(target: "pdfview::engine", "{message}"),
        Severity::Warning => tracing::warn!(target: "pdfview::engine", "{message}"),
        Severity::Notice => tracing::info!(target: "pdfview::engine", "{message}"),
        Severity::Strict | Severity::Deprecated => {
            tracing::debug!(target: "pdfview::engine", severity = ?severity, "{message}")
        }
    }
    true
}
