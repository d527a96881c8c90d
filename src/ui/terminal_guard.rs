//! Terminal state guard for guaranteed cleanup.
//!
//! This module provides a RAII guard that ensures terminal state is restored
//! when the application exits, whether normally, via early return, or panic.

use crossterm::{
    execute,
    terminal::{disable_raw_mode, LeaveAlternateScreen},
};
use std::io::{self, Write};

/// Guard that restores terminal state when dropped.
///
/// This ensures terminal cleanup happens regardless of how the application exits:
/// - Normal return
/// - Early `?` error propagation
/// - Panic (when combined with panic hook)
pub struct TerminalGuard {
    active: bool,
}

impl TerminalGuard {
    /// Create a new terminal guard.
    ///
    /// The guard should be created AFTER enabling raw mode and entering the
    /// alternate screen, so that Drop will undo them if needed.
    pub fn new() -> Self {
        Self { active: true }
    }

    /// Perform manual cleanup and prevent Drop from running cleanup again.
    pub fn cleanup(&mut self) -> anyhow::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        self.do_cleanup()
    }

    fn do_cleanup(&self) -> anyhow::Result<()> {
        let mut stdout = io::stdout();
        disable_raw_mode()?;
        execute!(stdout, LeaveAlternateScreen)?;
        stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.active {
            // Errors can't propagate out of Drop
            if let Err(e) = self.do_cleanup() {
                tracing::debug!(error = %e, "Terminal cleanup failed in Drop");
            }
        }
    }
}

/// Install a panic hook that restores terminal state before printing the panic message.
///
/// Call early in main(), before any terminal setup.
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let mut stdout = io::stdout();
        if let Err(e) = disable_raw_mode() {
            tracing::debug!(error = %e, "Failed to disable raw mode in panic hook");
        }
        if let Err(e) = execute!(stdout, LeaveAlternateScreen) {
            tracing::debug!(error = %e, "Failed to restore terminal screen in panic hook");
        }
        if let Err(e) = stdout.flush() {
            tracing::debug!(error = %e, "Failed to flush stdout after panic cleanup");
        }

        original_hook(panic_info);
    }));
}
