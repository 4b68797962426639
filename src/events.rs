// Events that flow from background tasks back to the presenter loop
//
// The TUI owns all state; spawned tasks (contact submissions) report back
// through an mpsc channel carrying these events so the loop applies them
// on its own turn.

use crate::contact::transport::SubmissionResult;
use std::time::Duration;

/// Message delivered to the presenter event loop
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// A contact submission finished (either way)
    SubmissionFinished {
        result: SubmissionResult,
        elapsed: Duration,
    },
}

impl AppEvent {
    /// Short description for the log buffer
    pub fn summary(&self) -> String {
        match self {
            AppEvent::SubmissionFinished { result, elapsed } => {
                let outcome = if result.success {
                    "ok".to_string()
                } else {
                    format!("failed: {}", result.error_message())
                };
                format!("submission {} ({}ms)", outcome, elapsed.as_millis())
            }
        }
    }
}
