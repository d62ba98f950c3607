use super::common::*;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

use crate::workflows::origination::router::lead_router;
use crate::workflows::origination::transport::{Endpoint, UpstreamResponse};

fn post_lead(payload: Value) -> Request<Body> {
    Request::post("/api/v1/leads")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            serde_json::to_vec(&payload).expect("payload serializes"),
        ))
        .expect("request builds")
}

fn form_payload() -> Value {
    json!({
        "fullName": "Mrs Asha Rao",
        "email": "a@x.com",
        "phone": "9999999999",
        "branch": "mumbai",
        "agreed": true
    })
}

#[tokio::test]
async fn submit_route_returns_receipt() {
    let (service, transport) = build_service(ScriptedTransport::accepting());
    let router = lead_router(Arc::new(service));

    let response = router
        .oneshot(post_lead(form_payload()))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json_body(response).await;
    assert_eq!(body["application_id"], "A100");
    assert_eq!(body["message"], "Loan request submitted successfully!");
    assert_eq!(
        body["progress"],
        json!([
            "authenticating",
            "creating_application",
            "building_workflow",
            "executing_workflow",
            "done"
        ])
    );
    assert!(body["submitted_at"].is_string());
    assert_eq!(transport.call_count(), 4);
}

#[tokio::test]
async fn submit_route_requires_consent() {
    let (service, transport) = build_service(ScriptedTransport::accepting());
    let router = lead_router(Arc::new(service));

    let mut payload = form_payload();
    payload["agreed"] = json!(false);
    let response = router
        .oneshot(post_lead(payload))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("agree to be contacted"));
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn submit_route_maps_upstream_rejection_to_bad_gateway() {
    let transport = ScriptedTransport::accepting();
    transport.respond(
        Endpoint::ClientAuth,
        UpstreamResponse {
            status: 401,
            body: json!({ "message": "invalid client" }),
        },
    );
    let (service, _) = build_service(transport);
    let router = lead_router(Arc::new(service));

    let response = router
        .oneshot(post_lead(form_payload()))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = read_json_body(response).await;
    assert_eq!(body["step"], "authenticate");
    assert_eq!(body["upstream_status"], 401);
}

#[tokio::test]
async fn dropped_request_still_completes_upstream_chain() {
    let transport = ScriptedTransport::accepting();
    transport.slow(Duration::from_millis(50));
    let (service, transport) = build_service(transport);
    let router = lead_router(Arc::new(service));

    let outcome = tokio::time::timeout(
        Duration::from_millis(20),
        router.oneshot(post_lead(form_payload())),
    )
    .await;
    assert!(outcome.is_err(), "request should still be in flight");
    assert!(transport.call_count() < 4);

    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while transport.call_count() < 4 && tokio::time::Instant::now() < deadline {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    assert_eq!(
        transport.endpoints(),
        vec![
            Endpoint::ClientAuth,
            Endpoint::ShortApplication,
            Endpoint::WorkflowBuild,
            Endpoint::WorkflowExecution,
        ]
    );
}

#[tokio::test]
async fn branches_route_lists_table() {
    let (service, _) = build_service(ScriptedTransport::accepting());
    let router = lead_router(Arc::new(service));

    let response = router
        .oneshot(
            Request::get("/api/v1/branches")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    let branches = body.as_array().expect("branch list");
    assert_eq!(branches.len(), 35);
    assert!(branches.contains(&json!({ "code": "mumbai", "pincode": "400001" })));
}
