//! Progress display for a running search

use dictsearch_engine::SearchState;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner that turns into a batch progress bar once retrieval starts.
///
/// Feed it every state the orchestrator publishes; it finishes itself on a
/// terminal state.
pub struct SearchProgress {
    bar: ProgressBar,
    batches_known: bool,
}

impl SearchProgress {
    /// Start with a spinner for `query`
    pub fn start(query: &str) -> Self {
        Self::with_bar(spinner(&format!("Looking up '{query}'")))
    }

    /// A display that draws nothing
    pub fn hidden() -> Self {
        Self::with_bar(ProgressBar::hidden())
    }

    fn with_bar(bar: ProgressBar) -> Self {
        Self {
            bar,
            batches_known: false,
        }
    }

    /// Reflect a published state
    pub fn update(&mut self, state: &SearchState) {
        match state {
            SearchState::Idle => {}
            SearchState::PartialInProgress { total_batches: 0, .. } => {
                self.bar.set_message("Discovering data structures");
            }
            SearchState::PartialInProgress {
                batch_index,
                total_batches,
                matches_so_far,
            } => {
                if !self.batches_known {
                    self.bar.set_length(*total_batches as u64);
                    self.bar.set_style(batch_style());
                    self.batches_known = true;
                }
                self.bar.set_position(*batch_index as u64);
                self.bar.set_message(format!("{matches_so_far} matching"));
            }
            SearchState::ExactHit { element } => {
                finish_success(&self.bar, &format!("Found {}", element.name));
            }
            SearchState::PartialResult { records } => {
                finish_success(&self.bar, &format!("{} matches", records.len()));
            }
            SearchState::NoMatch { .. } => finish_success(&self.bar, "No matches"),
            SearchState::Failed { reason } => finish_error(&self.bar, reason),
        }
    }

    /// Whether the display has finished
    pub fn is_finished(&self) -> bool {
        self.bar.is_finished()
    }

    /// Remove the display without a final message
    pub fn clear(&self) {
        self.bar.finish_and_clear();
    }
}

/// Create a spinner for indeterminate progress
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

fn batch_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] batch {pos}/{len} {msg} ({elapsed})")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓░")
}

/// Finish a progress bar with a success message
pub fn finish_success(pb: &ProgressBar, message: &str) {
    pb.finish_with_message(format!("✓ {message}"));
}

/// Finish a progress bar with an error message
pub fn finish_error(pb: &ProgressBar, message: &str) {
    pb.finish_with_message(format!("✗ {message}"));
}
