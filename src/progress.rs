//! Spinner shown on stderr while installed package metadata is read

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::debug;

const TICK_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// Spinner for the package read phase of an audit
///
/// The spinner is cleared when the guard is dropped, so a provider error
/// never leaves it on the terminal.
pub struct ReadProgress {
    bar: Option<ProgressBar>,
}

impl ReadProgress {
    /// Start reading from the named provider; `enabled` is false in quiet and JSON modes
    pub fn start(enabled: bool, provider: &str) -> Self {
        if !enabled {
            return Self { bar: None };
        }

        let style = ProgressStyle::default_spinner()
            .tick_chars(TICK_CHARS)
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        let bar = ProgressBar::new_spinner();
        bar.set_style(style);
        bar.set_message(format!("Reading installed packages ({})...", provider));
        bar.enable_steady_tick(Duration::from_millis(80));
        Self { bar: Some(bar) }
    }

    /// Whether a spinner is on screen
    pub fn is_visible(&self) -> bool {
        self.bar.is_some()
    }

    /// Clear the spinner once `count` packages were read
    pub fn finish(mut self, count: usize) {
        debug!("Read {} installed packages", count);
        self.clear();
    }

    fn clear(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

impl Drop for ReadProgress {
    fn drop(&mut self) {
        self.clear();
    }
}
