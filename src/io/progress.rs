//! Progress bars for the parallel phases

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::LazyLock;

static PHASE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{prefix:>10}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Coordinates one progress bar per phase of a run
///
/// When disabled every bar is hidden, so callers can report progress
/// unconditionally.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    enabled: bool,
    bars: Vec<ProgressBar>,
}

impl ProgressManager {
    /// Create a manager drawing to stderr, or a silent one
    pub fn new(enabled: bool) -> Self {
        let multi_progress = if enabled {
            MultiProgress::new()
        } else {
            MultiProgress::with_draw_target(ProgressDrawTarget::hidden())
        };
        Self {
            multi_progress,
            enabled,
            bars: Vec::new(),
        }
    }

    /// Whether bars are drawn
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Add a bar for a phase of `len` steps
    pub fn start_phase(&mut self, name: &str, len: usize) -> ProgressBar {
        let bar = if self.enabled {
            self.multi_progress.add(ProgressBar::new(len as u64))
        } else {
            ProgressBar::hidden()
        };
        bar.set_style(PHASE_STYLE.clone());
        bar.set_prefix(name.to_string());
        self.bars.push(bar.clone());
        bar
    }

    /// Mark a phase as done with a closing message
    pub fn finish_phase(bar: &ProgressBar, message: &str) {
        bar.finish_with_message(message.to_string());
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        for bar in &self.bars {
            if !bar.is_finished() {
                bar.finish_and_clear();
            }
        }
        let _ = self.multi_progress.clear();
    }
}
