use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::error;

use super::branches::{branches, Branch};
use super::domain::{ApplicantInput, ApplicationId};
use super::progress::{ProgressRecorder, SubmissionProgress};
use super::service::LeadSubmissionService;
use super::transport::LendingTransport;
use crate::error::AppError;

pub const SUCCESS_MESSAGE: &str = "Loan request submitted successfully!";

/// Body returned once the whole chain succeeds.
#[derive(Debug, Clone, Serialize)]
pub struct LeadReceipt {
    pub message: &'static str,
    pub application_id: ApplicationId,
    pub progress: Vec<SubmissionProgress>,
    pub submitted_at: DateTime<Utc>,
}

/// Router builder exposing the lead form endpoints.
pub fn lead_router<T>(service: Arc<LeadSubmissionService<T>>) -> Router
where
    T: LendingTransport + 'static,
{
    Router::new()
        .route("/api/v1/leads", post(submit_handler::<T>))
        .route("/api/v1/branches", get(branches_handler))
        .with_state(service)
}

/// The chain runs on its own task so a browser that disconnects mid-submission
/// does not cancel calls already in flight upstream.
pub(crate) async fn submit_handler<T>(
    State(service): State<Arc<LeadSubmissionService<T>>>,
    Json(applicant): Json<ApplicantInput>,
) -> Result<(StatusCode, Json<LeadReceipt>), AppError>
where
    T: LendingTransport + 'static,
{
    applicant.validate()?;

    let recorder = Arc::new(ProgressRecorder::default());
    let task_recorder = recorder.clone();
    let submission = tokio::spawn(async move {
        service
            .submit(&applicant, task_recorder.as_ref())
            .await
    });

    let result = submission.await.map_err(|err| {
        error!(error = %err, "lead submission task aborted");
        AppError::Task(err.to_string())
    })??;

    Ok((
        StatusCode::CREATED,
        Json(LeadReceipt {
            message: SUCCESS_MESSAGE,
            application_id: result.application_id,
            progress: recorder.events(),
            submitted_at: Utc::now(),
        }),
    ))
}

pub(crate) async fn branches_handler() -> Json<Vec<Branch>> {
    Json(branches().collect())
}
