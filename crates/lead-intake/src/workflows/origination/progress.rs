use std::sync::Mutex;

use serde::Serialize;
use tokio::sync::mpsc::UnboundedSender;

/// Milestones a submission passes through, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionProgress {
    Authenticating,
    CreatingApplication,
    BuildingWorkflow,
    ExecutingWorkflow,
    Done,
}

impl SubmissionProgress {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Authenticating,
            Self::CreatingApplication,
            Self::BuildingWorkflow,
            Self::ExecutingWorkflow,
            Self::Done,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Authenticating => "Authenticating...",
            Self::CreatingApplication => "Creating loan application...",
            Self::BuildingWorkflow => "Building workflow...",
            Self::ExecutingWorkflow => "Executing workflow...",
            Self::Done => "Completing...",
        }
    }
}

/// Subscriber for submission milestones (form spinners, CLI output, tests).
pub trait ProgressObserver: Send + Sync {
    fn on_progress(&self, progress: SubmissionProgress);
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_progress(&self, _progress: SubmissionProgress) {}
}

/// Collects events so they can be returned alongside a result.
#[derive(Debug, Default)]
pub struct ProgressRecorder {
    events: Mutex<Vec<SubmissionProgress>>,
}

impl ProgressRecorder {
    pub fn events(&self) -> Vec<SubmissionProgress> {
        match self.events.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl ProgressObserver for ProgressRecorder {
    fn on_progress(&self, progress: SubmissionProgress) {
        match self.events.lock() {
            Ok(mut guard) => guard.push(progress),
            Err(poisoned) => poisoned.into_inner().push(progress),
        }
    }
}

/// Forwards events to a channel; a dropped receiver just stops delivery.
impl ProgressObserver for UnboundedSender<SubmissionProgress> {
    fn on_progress(&self, progress: SubmissionProgress) {
        let _ = self.send(progress);
    }
}
