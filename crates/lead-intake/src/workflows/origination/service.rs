use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::branches::resolve_pincode;
use super::domain::{
    identifier, ApplicantInput, ApplicationId, AuthToken, SubmissionResult, WorkflowStepId,
};
use super::error::{StepFailure, SubmissionError, SubmissionStep};
use super::payload::{
    ClientCredentialsRequest, ShortApplication, WorkflowBuildRequest, WorkflowExecutionRequest,
};
use super::progress::{ProgressObserver, SubmissionProgress};
use super::transport::{Endpoint, LendingTransport, TransportError, UpstreamResponse};
use crate::config::LendingPlatformConfig;

/// Client identifier and secret exchanged for a bearer token.
#[derive(Clone)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl ClientCredentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

impl From<&LendingPlatformConfig> for ClientCredentials {
    fn from(config: &LendingPlatformConfig) -> Self {
        Self::new(config.client_id.clone(), config.client_secret.clone())
    }
}

impl fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Runs the authenticate → create → build → execute chain for one lead.
///
/// Each call needs the previous call's output, so the chain is strictly
/// sequential and stops at the first failure. Nothing is rolled back: an
/// application created upstream stays created when a later step fails.
pub struct LeadSubmissionService<T> {
    transport: Arc<T>,
    credentials: ClientCredentials,
}

impl<T> fmt::Debug for LeadSubmissionService<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LeadSubmissionService")
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

impl<T> LeadSubmissionService<T>
where
    T: LendingTransport + 'static,
{
    pub fn new(transport: Arc<T>, credentials: ClientCredentials) -> Self {
        Self {
            transport,
            credentials,
        }
    }

    /// Submit one lead, reporting each milestone to `progress` before it starts.
    pub async fn submit(
        &self,
        applicant: &ApplicantInput,
        progress: &dyn ProgressObserver,
    ) -> Result<SubmissionResult, SubmissionError> {
        progress.on_progress(SubmissionProgress::Authenticating);
        let token = self.authenticate().await?;

        progress.on_progress(SubmissionProgress::CreatingApplication);
        let (application_id, create) = self.create_application(&token, applicant).await?;
        info!(%application_id, "loan application created");

        progress.on_progress(SubmissionProgress::BuildingWorkflow);
        let (step_id, build) = self.build_workflow(&token, &application_id).await?;
        info!(%application_id, %step_id, "workflow built");

        progress.on_progress(SubmissionProgress::ExecutingWorkflow);
        let execute = self
            .execute_workflow(&token, &application_id, &step_id)
            .await?;
        info!(%application_id, "workflow executed");

        progress.on_progress(SubmissionProgress::Done);
        Ok(SubmissionResult {
            application_id,
            create,
            build,
            execute,
        })
    }

    async fn authenticate(&self) -> Result<AuthToken, SubmissionError> {
        let step = SubmissionStep::Authenticate;
        let request = ClientCredentialsRequest {
            client_id: &self.credentials.client_id,
            client_secret: &self.credentials.client_secret,
        };
        let response = self.call(step, Endpoint::ClientAuth, None, &request).await?;

        let token = response
            .body
            .pointer("/data/token")
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
            .map(AuthToken::new);

        match token {
            Some(token) => Ok(token),
            None => Err(rejection(step, "response did not include a token", response)),
        }
    }

    async fn create_application(
        &self,
        token: &AuthToken,
        applicant: &ApplicantInput,
    ) -> Result<(ApplicationId, Value), SubmissionError> {
        let step = SubmissionStep::CreateApplication;
        if resolve_pincode(&applicant.branch_code).is_empty() {
            warn!(
                branch_code = %applicant.branch_code,
                "branch has no pincode mapping; submitting with an empty pincode"
            );
        }

        let payload = ShortApplication::from_applicant(applicant);
        let response = self
            .call(step, Endpoint::ShortApplication, Some(token), &payload)
            .await?;

        match identifier(response.body.get("application_id")) {
            Some(id) => Ok((ApplicationId(id), response.body)),
            None => Err(rejection(
                step,
                "response did not include an application_id",
                response,
            )),
        }
    }

    async fn build_workflow(
        &self,
        token: &AuthToken,
        application_id: &ApplicationId,
    ) -> Result<(WorkflowStepId, Value), SubmissionError> {
        let step = SubmissionStep::BuildWorkflow;
        let request = WorkflowBuildRequest::lead_creation(application_id);
        let response = self
            .call(step, Endpoint::WorkflowBuild, Some(token), &request)
            .await?;

        let has_steps = response
            .body
            .pointer("/data/stages/0/steps")
            .and_then(Value::as_array)
            .is_some_and(|steps| !steps.is_empty());
        if !has_steps {
            return Err(rejection(
                step,
                "no stages or steps found in the workflow response",
                response,
            ));
        }

        match identifier(response.body.pointer("/data/stages/0/steps/0/id")) {
            Some(id) => Ok((WorkflowStepId(id), response.body)),
            None => Err(rejection(
                step,
                "first step ID not found in the workflow response",
                response,
            )),
        }
    }

    async fn execute_workflow(
        &self,
        token: &AuthToken,
        application_id: &ApplicationId,
        step_id: &WorkflowStepId,
    ) -> Result<Value, SubmissionError> {
        let request = WorkflowExecutionRequest::lead_creation(application_id, step_id);
        let response = self
            .call(
                SubmissionStep::ExecuteWorkflow,
                Endpoint::WorkflowExecution,
                Some(token),
                &request,
            )
            .await?;
        Ok(response.body)
    }

    /// Posts `body` and checks the HTTP status plus the `status == 1` sentinel
    /// every platform response carries.
    async fn call<B>(
        &self,
        step: SubmissionStep,
        endpoint: Endpoint,
        token: Option<&AuthToken>,
        body: &B,
    ) -> Result<UpstreamResponse, SubmissionError>
    where
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_value(body).map_err(|err| SubmissionError::Network {
            step,
            source: TransportError::InvalidRequest(err.to_string()),
        })?;

        debug!(%step, "calling lending platform");
        let response = self
            .transport
            .post(endpoint, token, body)
            .await
            .map_err(|source| {
                warn!(%step, error = %source, "lending platform unreachable");
                SubmissionError::Network { step, source }
            })?;

        if !response.is_success() {
            return Err(rejection(step, "unexpected HTTP status", response));
        }

        let sentinel = response.body.get("status").and_then(Value::as_f64);
        if sentinel != Some(1.0) {
            return Err(rejection(step, "response status was not 1", response));
        }

        Ok(response)
    }
}

fn rejection(step: SubmissionStep, reason: &str, response: UpstreamResponse) -> SubmissionError {
    warn!(%step, status = response.status, reason, "lending platform rejected request");
    SubmissionError::rejected(
        StepFailure::new(step, reason)
            .with_status(response.status)
            .with_body(response.body),
    )
}
