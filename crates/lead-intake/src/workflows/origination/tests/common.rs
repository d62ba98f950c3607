use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::response::Response;
use serde_json::{json, Value};

use crate::workflows::origination::domain::{ApplicantInput, AuthToken};
use crate::workflows::origination::service::{ClientCredentials, LeadSubmissionService};
use crate::workflows::origination::transport::{
    Endpoint, LendingTransport, TransportError, UpstreamResponse,
};

/// One request as the transport saw it.
#[derive(Debug, Clone)]
pub(super) struct RecordedCall {
    pub(super) endpoint: Endpoint,
    pub(super) bearer: Option<String>,
    pub(super) body: Value,
}

/// Transport answering each endpoint from a script and recording every call.
#[derive(Default)]
pub(super) struct ScriptedTransport {
    script: Mutex<HashMap<Endpoint, Result<UpstreamResponse, TransportError>>>,
    calls: Mutex<Vec<RecordedCall>>,
    latency: Mutex<Option<Duration>>,
}

impl ScriptedTransport {
    /// Platform that accepts every call: token "T1", application "A100", step "S1".
    pub(super) fn accepting() -> Self {
        let transport = Self::default();
        transport.respond(
            Endpoint::ClientAuth,
            ok(json!({ "status": 1, "data": { "token": "T1" } })),
        );
        transport.respond(
            Endpoint::ShortApplication,
            ok(json!({ "status": 1, "application_id": "A100" })),
        );
        transport.respond(
            Endpoint::WorkflowBuild,
            ok(json!({ "status": 1, "data": { "stages": [{ "steps": [{ "id": "S1" }] }] } })),
        );
        transport.respond(
            Endpoint::WorkflowExecution,
            ok(json!({ "status": 1, "message": "executed" })),
        );
        transport
    }

    pub(super) fn respond(&self, endpoint: Endpoint, response: UpstreamResponse) {
        self.script
            .lock()
            .expect("script mutex poisoned")
            .insert(endpoint, Ok(response));
    }

    /// Delay every answer by `latency` after the call is recorded.
    pub(super) fn slow(&self, latency: Duration) {
        *self.latency.lock().expect("latency mutex poisoned") = Some(latency);
    }

    pub(super) fn fail(&self, endpoint: Endpoint, error: TransportError) {
        self.script
            .lock()
            .expect("script mutex poisoned")
            .insert(endpoint, Err(error));
    }

    pub(super) fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("calls mutex poisoned").clone()
    }

    pub(super) fn endpoints(&self) -> Vec<Endpoint> {
        self.calls().into_iter().map(|call| call.endpoint).collect()
    }

    pub(super) fn call_count(&self) -> usize {
        self.calls.lock().expect("calls mutex poisoned").len()
    }
}

#[async_trait]
impl LendingTransport for ScriptedTransport {
    async fn post(
        &self,
        endpoint: Endpoint,
        token: Option<&AuthToken>,
        body: Value,
    ) -> Result<UpstreamResponse, TransportError> {
        self.calls
            .lock()
            .expect("calls mutex poisoned")
            .push(RecordedCall {
                endpoint,
                bearer: token.map(AuthToken::bearer),
                body,
            });

        let latency = *self.latency.lock().expect("latency mutex poisoned");
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        self.script
            .lock()
            .expect("script mutex poisoned")
            .get(&endpoint)
            .cloned()
            .unwrap_or_else(|| {
                Ok(UpstreamResponse {
                    status: 404,
                    body: Value::Null,
                })
            })
    }
}

pub(super) fn ok(body: Value) -> UpstreamResponse {
    UpstreamResponse { status: 200, body }
}

pub(super) fn applicant() -> ApplicantInput {
    ApplicantInput {
        full_name: "Mrs Asha Rao".to_string(),
        email: "a@x.com".to_string(),
        phone: "9999999999".to_string(),
        branch_code: "mumbai".to_string(),
        loan_amount: None,
        agreed_to_contact: true,
    }
}

pub(super) fn credentials() -> ClientCredentials {
    ClientCredentials::new("web-form", "s3cret")
}

pub(super) fn build_service(
    transport: ScriptedTransport,
) -> (LeadSubmissionService<ScriptedTransport>, Arc<ScriptedTransport>) {
    let transport = Arc::new(transport);
    let service = LeadSubmissionService::new(transport.clone(), credentials());
    (service, transport)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
