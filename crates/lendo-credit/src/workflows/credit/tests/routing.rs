use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    extract::State,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::workflows::credit::router::{evaluate_handler, EvaluateRequest};
use crate::workflows::credit::{CreditAssessmentService, RulebookConfig};

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    serde_json::from_slice(&bytes).expect("json body")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

fn post_json(uri: &str, payload: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request")
}

#[tokio::test]
async fn evaluates_posted_record() {
    let (service, _, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(post_json(
            "/api/v1/credit/decisions",
            json!({ "record": company_json(), "year": 2022 }),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["year"], 2022);
    assert_eq!(body["percentMet"], 66.67);
    assert_eq!(body["requiresRatioReview"], true);
}

#[tokio::test]
async fn posted_record_without_statements_is_unprocessable() {
    let (service, _, _) = build_service();
    let mut record = company_json();
    record
        .as_object_mut()
        .expect("object fixture")
        .remove("financialStatement");

    let response = evaluate_handler(
        State(Arc::new(service)),
        axum::Json(EvaluateRequest {
            record: serde_json::from_value(record).expect("parses"),
            year: None,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("financialStatement"));
}

#[tokio::test]
async fn company_decision_honors_year_query() {
    let (service, _, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .clone()
        .oneshot(get(&format!(
            "/api/v1/credit/companies/{ORGANIZATION_ID}/decision"
        )))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["year"], 2023);

    let response = router
        .oneshot(get(&format!(
            "/api/v1/credit/companies/{CR_NUMBER}/decision?year=2022"
        )))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["year"], 2022);
}

#[tokio::test]
async fn missing_year_and_unknown_company_are_not_found() {
    let (service, _, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .clone()
        .oneshot(get(&format!(
            "/api/v1/credit/companies/{ORGANIZATION_ID}/decision?year=2019"
        )))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = router
        .oneshot(get("/api/v1/credit/companies/org-404/decision"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "no matching company for `org-404`");
}

#[tokio::test]
async fn lists_decisions_for_every_year() {
    let (service, _, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(get(&format!(
            "/api/v1/credit/companies/{ORGANIZATION_ID}/decisions"
        )))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let years: Vec<i64> = body
        .as_array()
        .expect("array body")
        .iter()
        .filter_map(|decision| decision["year"].as_i64())
        .collect();
    assert_eq!(years, vec![2022, 2023]);
}

#[tokio::test]
async fn notify_accepts_and_records_notice() {
    let (service, _, notifier) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(post_json(
            &format!("/api/v1/credit/companies/{ORGANIZATION_ID}/notify"),
            json!({ "recipient": "credit@lendo.sa" }),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let body = body_json(response).await;
    assert_eq!(body["recipient"], "credit@lendo.sa");
    assert_eq!(body["summary"]["riskRating"], "Low");
    assert_eq!(notifier.sent().len(), 1);
}

#[tokio::test]
async fn notify_uses_requested_year() {
    let (service, _, notifier) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(post_json(
            &format!("/api/v1/credit/companies/{ORGANIZATION_ID}/notify"),
            json!({ "recipient": "credit@lendo.sa", "year": 2022 }),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let body = body_json(response).await;
    assert!(body["subject"]
        .as_str()
        .is_some_and(|subject| subject.contains("FY2022")));
    assert_eq!(notifier.sent().len(), 1);
}

#[tokio::test]
async fn notify_rejects_bad_recipient() {
    let (service, _, notifier) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(post_json(
            &format!("/api/v1/credit/companies/{ORGANIZATION_ID}/notify"),
            json!({ "recipient": "credit at lendo" }),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn transport_and_source_failures_map_to_upstream_statuses() {
    let offline = CreditAssessmentService::new(
        Arc::new(MemorySource::with(vec![company()])),
        Arc::new(OfflineNotifier),
        RulebookConfig::standard(),
    );
    let response = router_with_service(offline)
        .oneshot(post_json(
            &format!("/api/v1/credit/companies/{ORGANIZATION_ID}/notify"),
            json!({ "recipient": "credit@lendo.sa" }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let unavailable = CreditAssessmentService::new(
        Arc::new(UnavailableSource),
        Arc::new(MemoryNotifier::default()),
        RulebookConfig::standard(),
    );
    let response = router_with_service(unavailable)
        .oneshot(get(&format!(
            "/api/v1/credit/companies/{ORGANIZATION_ID}/decision"
        )))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
