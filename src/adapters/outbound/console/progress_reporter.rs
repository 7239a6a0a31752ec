use crate::ports::outbound::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// StderrProgressReporter adapter for terminal status output
///
/// Shows the current fetch status on a stderr spinner and prints request
/// lines and warnings above it, so they stay visible after the spinner
/// clears.
pub struct StderrProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl StderrProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn with_spinner<F: FnOnce(&ProgressBar)>(&self, f: F) {
        let mut guard = self.spinner.lock().expect("spinner poisoned");
        let pb = guard.get_or_insert_with(|| {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg}")
                    .expect("Failed to set spinner template"),
            );
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        });
        f(pb);
    }
}

impl Default for StderrProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for StderrProgressReporter {
    fn report(&self, message: &str) {
        self.with_spinner(|pb| pb.set_message(message.to_string()));
    }

    fn request_line(&self, line: &str) {
        self.with_spinner(|pb| pb.println(line));
    }

    fn report_warning(&self, message: &str) {
        self.with_spinner(|pb| pb.println(format!("⚠️  {}", message)));
    }

    fn report_completion(&self, message: &str) {
        let mut guard = self.spinner.lock().expect("spinner poisoned");
        if let Some(pb) = guard.take() {
            pb.finish_and_clear();
        }
        eprintln!("✅ {}", message);
    }
}
