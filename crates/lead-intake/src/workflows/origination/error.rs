use std::fmt;

use serde::Serialize;
use serde_json::Value;

use super::transport::TransportError;

/// The four calls of a submission, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStep {
    Authenticate,
    CreateApplication,
    BuildWorkflow,
    ExecuteWorkflow,
}

impl SubmissionStep {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Authenticate => "authenticate",
            Self::CreateApplication => "create_application",
            Self::BuildWorkflow => "build_workflow",
            Self::ExecuteWorkflow => "execute_workflow",
        }
    }
}

impl fmt::Display for SubmissionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Context for a step the platform answered but rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct StepFailure {
    pub step: SubmissionStep,
    pub reason: String,
    pub upstream_status: Option<u16>,
    pub body: Option<Value>,
}

impl StepFailure {
    pub fn new(step: SubmissionStep, reason: impl Into<String>) -> Self {
        Self {
            step,
            reason: reason.into(),
            upstream_status: None,
            body: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.upstream_status = Some(status);
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        if !body.is_null() {
            self.body = Some(body);
        }
        self
    }
}

impl fmt::Display for StepFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upstream_status {
            Some(status) => write!(f, "{} (step {}, HTTP {status})", self.reason, self.step),
            None => write!(f, "{} (step {})", self.reason, self.step),
        }
    }
}

/// First failure of a submission; later steps never run.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("authentication failed: {0}")]
    Auth(StepFailure),
    #[error("failed to create loan application: {0}")]
    Creation(StepFailure),
    #[error("failed to build workflow: {0}")]
    WorkflowBuild(StepFailure),
    #[error("failed to execute workflow: {0}")]
    WorkflowExecution(StepFailure),
    #[error("network error during {step}: {source}")]
    Network {
        step: SubmissionStep,
        #[source]
        source: TransportError,
    },
}

impl SubmissionError {
    /// Wraps a rejected step in the variant that belongs to it.
    pub fn rejected(failure: StepFailure) -> Self {
        match failure.step {
            SubmissionStep::Authenticate => Self::Auth(failure),
            SubmissionStep::CreateApplication => Self::Creation(failure),
            SubmissionStep::BuildWorkflow => Self::WorkflowBuild(failure),
            SubmissionStep::ExecuteWorkflow => Self::WorkflowExecution(failure),
        }
    }

    pub fn step(&self) -> SubmissionStep {
        match self {
            Self::Auth(failure)
            | Self::Creation(failure)
            | Self::WorkflowBuild(failure)
            | Self::WorkflowExecution(failure) => failure.step,
            Self::Network { step, .. } => *step,
        }
    }

    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::Auth(failure)
            | Self::Creation(failure)
            | Self::WorkflowBuild(failure)
            | Self::WorkflowExecution(failure) => failure.upstream_status,
            Self::Network { .. } => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Network { source, .. } if source.is_timeout())
    }
}
