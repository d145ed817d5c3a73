//! Progress reporting for consensus fan-out

use colored::Colorize;
use conclave_application::ProgressNotifier;
use conclave_domain::Stance;
use indicatif::{ProgressBar, ProgressStyle};
use parking_lot::Mutex;

/// Reports progress with a single progress bar across all consultations
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn pair_status(model: &str, stance: &Stance, success: bool) -> String {
        if success {
            format!("{} {}:{}", "v".green(), model, stance)
        } else {
            format!("{} {}:{}", "x".red(), model, stance)
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_consultation_start(&self, total_pairs: usize) {
        let pb = ProgressBar::new(total_pairs as u64);
        pb.set_style(Self::bar_style());
        pb.set_prefix("Consulting");
        pb.set_message("Starting...");
        *self.bar.lock() = Some(pb);
    }

    fn on_pair_complete(&self, _index: usize, model: &str, stance: &Stance, success: bool) {
        if let Some(pb) = self.bar.lock().as_ref() {
            pb.set_message(Self::pair_status(model, stance, success));
            pb.inc(1);
        }
    }

    fn on_consultation_complete(&self, succeeded: usize, errored: usize) {
        if let Some(pb) = self.bar.lock().take() {
            let message = if errored == 0 {
                format!("{} responses", succeeded).green().to_string()
            } else {
                format!("{} responses, {} failed", succeeded, errored)
                    .yellow()
                    .to_string()
            };
            pb.finish_with_message(message);
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_consultation_start(&self, total_pairs: usize) {
        eprintln!(
            "{} {} ({} consultations)",
            "->".cyan(),
            "Consulting models".bold(),
            total_pairs
        );
    }

    fn on_pair_complete(&self, _index: usize, model: &str, stance: &Stance, success: bool) {
        if success {
            eprintln!("  {}", ProgressReporter::pair_status(model, stance, true));
        } else {
            eprintln!("  {} (failed)", ProgressReporter::pair_status(model, stance, false));
        }
    }

    fn on_consultation_complete(&self, _succeeded: usize, _errored: usize) {
        eprintln!();
    }
}
