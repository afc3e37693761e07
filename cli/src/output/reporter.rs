//! `TerminalReporter`: Presentation-layer implementation of `Reporter`.
//!
//! Wraps `&OutputContext` and implements the `application::ports::Reporter`
//! trait so application services can emit log lines without depending on
//! any presentation type directly.

use std::cell::RefCell;

use indicatif::ProgressBar;

use crate::application::ports::Reporter;
use crate::output::{OutputContext, progress};

/// Terminal reporter that wraps an `OutputContext`.
///
/// On a TTY, `step()` shows a spinner that stays up until the next message
/// arrives; otherwise it prints `"  → {message}"`. Every other message
/// clears a running spinner first.
pub struct TerminalReporter<'a> {
    ctx: &'a OutputContext,
    spinner: RefCell<Option<ProgressBar>>,
}

impl<'a> TerminalReporter<'a> {
    /// Create a new `TerminalReporter` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self {
            ctx,
            spinner: RefCell::new(None),
        }
    }

    fn clear_spinner(&self) {
        if let Some(pb) = self.spinner.borrow_mut().take() {
            pb.finish_and_clear();
        }
    }
}

impl Drop for TerminalReporter<'_> {
    fn drop(&mut self) {
        self.clear_spinner();
    }
}

impl Reporter for TerminalReporter<'_> {
    fn step(&self, message: &str) {
        self.clear_spinner();
        if self.ctx.show_progress() {
            *self.spinner.borrow_mut() = Some(progress::spinner(message));
        } else {
            self.ctx.step(message);
        }
    }

    fn info(&self, message: &str) {
        self.clear_spinner();
        self.ctx.info(message);
    }

    fn success(&self, message: &str) {
        self.clear_spinner();
        self.ctx.success(message);
    }

    fn warn(&self, message: &str) {
        self.clear_spinner();
        self.ctx.warn(message);
    }

    fn error(&self, message: &str) {
        self.clear_spinner();
        self.ctx.error(message);
    }
}
