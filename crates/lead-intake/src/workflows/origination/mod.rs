//! Lead submission against the loan-origination platform.
//!
//! A lead becomes an application through four dependent calls: a client
//! credential exchange, the short-application create, a workflow build, and
//! execution of the workflow's first step. The transport is a trait so the
//! chain can be exercised against scripted responses.

pub mod branches;
pub mod domain;
pub mod error;
pub mod payload;
pub mod progress;
pub mod router;
pub mod service;
pub mod transport;

#[cfg(test)]
mod tests;

pub use branches::{branches, resolve_pincode, Branch};
pub use domain::{
    ApplicantInput, ApplicantName, ApplicationId, AuthToken, LeadValidationError,
    SubmissionResult, WorkflowStepId, DEFAULT_LOAN_AMOUNT,
};
pub use error::{StepFailure, SubmissionError, SubmissionStep};
pub use payload::{ShortApplication, LEAD_CREATION_WORKFLOW};
pub use progress::{NoProgress, ProgressObserver, ProgressRecorder, SubmissionProgress};
pub use router::{lead_router, LeadReceipt, SUCCESS_MESSAGE};
pub use service::{ClientCredentials, LeadSubmissionService};
pub use transport::{
    Endpoint, HttpTransport, LendingTransport, TransportError, UpstreamResponse,
    HEADER_PLATFORM, HEADER_TENANT_DOMAIN, PLATFORM_EMPLOYEE_API,
};
