use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Local;
use serde::Deserialize;
use serde_json::json;

use super::error::DecisionError;
use super::extraction::YearSelection;
use super::notification::{NotificationError, NotificationSender};
use super::record::CompanyRecord;
use super::service::{CreditAssessmentService, CreditServiceError};
use super::source::CompanySource;

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub record: CompanyRecord,
    #[serde(default)]
    pub year: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct YearQuery {
    pub year: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct NotifyRequest {
    pub recipient: String,
    #[serde(default)]
    pub year: Option<i32>,
}

/// Router builder exposing the credit decision endpoints.
pub fn credit_router<S, N>(service: Arc<CreditAssessmentService<S, N>>) -> Router
where
    S: CompanySource + 'static,
    N: NotificationSender + 'static,
{
    Router::new()
        .route("/api/v1/credit/decisions", post(evaluate_handler::<S, N>))
        .route(
            "/api/v1/credit/companies/:query/decision",
            get(company_decision_handler::<S, N>),
        )
        .route(
            "/api/v1/credit/companies/:query/decisions",
            get(company_decisions_handler::<S, N>),
        )
        .route(
            "/api/v1/credit/companies/:query/notify",
            post(notify_handler::<S, N>),
        )
        .with_state(service)
}

pub(crate) async fn evaluate_handler<S, N>(
    State(service): State<Arc<CreditAssessmentService<S, N>>>,
    axum::Json(request): axum::Json<EvaluateRequest>,
) -> Response
where
    S: CompanySource + 'static,
    N: NotificationSender + 'static,
{
    let selection = YearSelection::from(request.year);
    match service.assess_record(&request.record, selection) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn company_decision_handler<S, N>(
    State(service): State<Arc<CreditAssessmentService<S, N>>>,
    Path(query): Path<String>,
    Query(params): Query<YearQuery>,
) -> Response
where
    S: CompanySource + 'static,
    N: NotificationSender + 'static,
{
    match service.assess(&query, YearSelection::from(params.year)) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn company_decisions_handler<S, N>(
    State(service): State<Arc<CreditAssessmentService<S, N>>>,
    Path(query): Path<String>,
) -> Response
where
    S: CompanySource + 'static,
    N: NotificationSender + 'static,
{
    match service.assess_all_years(&query) {
        Ok(results) => (StatusCode::OK, axum::Json(results)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn notify_handler<S, N>(
    State(service): State<Arc<CreditAssessmentService<S, N>>>,
    Path(query): Path<String>,
    axum::Json(request): axum::Json<NotifyRequest>,
) -> Response
where
    S: CompanySource + 'static,
    N: NotificationSender + 'static,
{
    let today = Local::now().date_naive();
    match service.notify(
        &query,
        YearSelection::from(request.year),
        &request.recipient,
        today,
    ) {
        Ok(notice) => {
            let payload = json!({
                "recipient": notice.recipient,
                "subject": notice.subject,
                "generated_on": notice.generated_on,
                "summary": notice.summary,
            });
            (StatusCode::ACCEPTED, axum::Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

fn error_response(err: CreditServiceError) -> Response {
    let status = match &err {
        CreditServiceError::Decision(DecisionError::PeriodNotFound { .. })
        | CreditServiceError::Decision(DecisionError::AmbiguousOrganization { .. }) => {
            StatusCode::NOT_FOUND
        }
        CreditServiceError::Decision(DecisionError::MalformedRecord { .. })
        | CreditServiceError::Notification(NotificationError::InvalidRecipient(_)) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        CreditServiceError::Notification(NotificationError::Transport(_)) => {
            StatusCode::BAD_GATEWAY
        }
        CreditServiceError::Source(_) => StatusCode::SERVICE_UNAVAILABLE,
    };

    let payload = json!({
        "error": err.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
