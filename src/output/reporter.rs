//! `TerminalReporter` — Presentation-layer implementation of `ProgressReporter`.
//!
//! Wraps `&OutputContext` and implements the `application::ports::ProgressReporter`
//! trait so application services can emit progress events without depending on
//! any presentation type directly.

use owo_colors::OwoColorize as _;

use crate::application::ports::ProgressReporter;
use crate::output::OutputContext;

/// Terminal progress reporter that wraps an `OutputContext`.
///
/// - `step()` prints `"  → {message}"` (suppressed when `ctx.quiet`)
/// - `success()` prints `"  ✓ {message}"` (suppressed when `ctx.quiet`)
/// - `warn()` prints `"  ! {message}"` (suppressed when `ctx.quiet`)
pub struct TerminalReporter<'a> {
    ctx: &'a OutputContext,
}

impl<'a> TerminalReporter<'a> {
    /// Create a new `TerminalReporter` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }
}

impl ProgressReporter for TerminalReporter<'_> {
    fn step(&self, message: &str) {
        if !self.ctx.quiet {
            println!("  {} {message}", "→".cyan());
        }
    }

    fn success(&self, message: &str) {
        if !self.ctx.quiet {
            println!("  {} {message}", "✓".green());
        }
    }

    fn warn(&self, message: &str) {
        if !self.ctx.quiet {
            println!("  {} {message}", "!".yellow());
        }
    }
}

/// Spinner-backed reporter for single-step waits on a TTY.
///
/// `step()` swaps the spinner message, `success()` finishes with a
/// checkmark, `warn()` prints above the spinner without stopping it.
pub struct SpinnerReporter {
    pb: indicatif::ProgressBar,
}

impl SpinnerReporter {
    #[must_use]
    pub fn new(message: &str) -> Self {
        Self {
            pb: crate::output::progress::spinner(message),
        }
    }
}

impl ProgressReporter for SpinnerReporter {
    fn step(&self, message: &str) {
        self.pb.set_message(message.to_string());
    }

    fn success(&self, message: &str) {
        crate::output::progress::finish_ok(&self.pb, message);
    }

    fn warn(&self, message: &str) {
        self.pb.println(format!("  ! {message}"));
    }
}

/// The reporter a command hands to a service: spinner on a TTY, line
/// output otherwise.
pub enum Reporter<'a> {
    Terminal(TerminalReporter<'a>),
    Spinner(SpinnerReporter),
}

impl<'a> Reporter<'a> {
    #[must_use]
    pub fn for_wait(ctx: &'a OutputContext, message: &str) -> Reporter<'a> {
        if ctx.show_progress() {
            Reporter::Spinner(SpinnerReporter::new(message))
        } else {
            Reporter::Terminal(TerminalReporter::new(ctx))
        }
    }
}

impl ProgressReporter for Reporter<'_> {
    fn step(&self, message: &str) {
        match self {
            Reporter::Terminal(r) => r.step(message),
            Reporter::Spinner(r) => r.step(message),
        }
    }

    fn success(&self, message: &str) {
        match self {
            Reporter::Terminal(r) => r.success(message),
            Reporter::Spinner(r) => r.success(message),
        }
    }

    fn warn(&self, message: &str) {
        match self {
            Reporter::Terminal(r) => r.warn(message),
            Reporter::Spinner(r) => r.warn(message),
        }
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
