use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::time::Duration;

const COUNTER_TEMPLATE: &str = "[{elapsed_precise}] {bar:40.cyan/blue} {pos:>2}/{len:2} {msg}";
const SPINNER_TEMPLATE: &str = "[{elapsed_precise}] {spinner} {msg}";

/// Thin wrapper around indicatif so every phase of the walkthrough renders
/// the same way: one counter bar for the phase plus a spinner describing
/// the operation in flight.
pub struct ProgressTracker {
    progress_bar: ProgressBar,
}

impl ProgressTracker {
    pub fn create_multi() -> MultiProgress {
        MultiProgress::new()
    }

    /// Counter bar tracking `total` resources within a multi-progress display.
    pub fn add_to_multi(multi: &MultiProgress, total: u64, description: &str) -> Self {
        let progress_bar = multi.add(ProgressBar::new(total));
        progress_bar.set_style(
            ProgressStyle::with_template(COUNTER_TEMPLATE)
                .unwrap()
                .progress_chars("##-"),
        );
        progress_bar.set_message(description.to_string());
        progress_bar.enable_steady_tick(Duration::from_millis(100));

        Self { progress_bar }
    }

    /// Spinner for operations whose duration is unknown in advance.
    pub fn new_indeterminate(multi: &MultiProgress, description: &str) -> Self {
        let progress_bar = multi.add(ProgressBar::new_spinner());
        progress_bar.set_style(
            ProgressStyle::with_template(SPINNER_TEMPLATE)
                .unwrap()
                .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ "),
        );
        progress_bar.set_message(description.to_string());
        progress_bar.enable_steady_tick(Duration::from_millis(100));

        Self { progress_bar }
    }

    pub fn inc(&self, steps: u64) {
        self.progress_bar.inc(steps);
    }

    pub fn update_message(&self, msg: &str) {
        self.progress_bar.set_message(msg.to_string());
    }

    pub fn finish_with_message(&self, msg: &str) {
        self.progress_bar.finish_with_message(msg.to_string());
    }
}
