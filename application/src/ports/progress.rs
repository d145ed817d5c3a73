//! Progress notification port
//!
//! Defines the interface for reporting progress during a consensus fan-out.

use conclave_domain::Stance;

/// Callback for progress updates during consultation
///
/// Implementations live in the presentation layer.
pub trait ProgressNotifier: Send + Sync {
    /// Called once before any pair is dispatched
    fn on_consultation_start(&self, total_pairs: usize);

    /// Called as each pair settles, in completion order
    fn on_pair_complete(&self, index: usize, model: &str, stance: &Stance, success: bool);

    /// Called after every pair has settled
    fn on_consultation_complete(&self, succeeded: usize, errored: usize);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_consultation_start(&self, _total_pairs: usize) {}
    fn on_pair_complete(&self, _index: usize, _model: &str, _stance: &Stance, _success: bool) {}
    fn on_consultation_complete(&self, _succeeded: usize, _errored: usize) {}
}
