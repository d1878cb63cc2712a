//! Progress sinks.

use storyloom_core::ProgressUpdate;
use storyloom_interface::ProgressSink;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Channel-backed progress sink.
///
/// The caller keeps the receiver and observes snapshots in emission order.
/// Dropping the receiver simply stops observation; the pipeline keeps running.
///
/// # Examples
///
/// ```
/// use storyloom_core::{ProgressUpdate, SessionStatus, Stage};
/// use storyloom_interface::ProgressSink;
/// use storyloom_pipeline::ProgressReporter;
///
/// let (reporter, mut updates) = ProgressReporter::channel();
/// reporter.report(ProgressUpdate::new(
///     Stage::Writing,
///     SessionStatus::Writing,
///     "Writing",
///     0,
///     10,
///     None,
///     vec![],
/// ));
/// assert_eq!(updates.try_recv().unwrap().message(), "Writing");
/// ```
#[derive(Debug, Clone)]
pub struct ProgressReporter {
    sender: mpsc::UnboundedSender<ProgressUpdate>,
}

impl ProgressReporter {
    /// Create a reporter and the receiver observing it.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ProgressUpdate>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl ProgressSink for ProgressReporter {
    fn report(&self, update: ProgressUpdate) {
        if self.sender.send(update).is_err() {
            debug!("Progress receiver dropped, update discarded");
        }
    }
}

/// Sink that writes each snapshot to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingProgress;

impl ProgressSink for TracingProgress {
    fn report(&self, update: ProgressUpdate) {
        info!(
            stage = %update.stage(),
            status = %update.status(),
            percent = update.percent(),
            "{}",
            update.message()
        );
    }
}
