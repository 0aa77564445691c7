use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use muster::analytics::{self, RosterFilter, RosterSummary};
use muster::assessment;
use muster::error::AppError;
use muster::planning::{
    planning_router, MissionId, PlanningError, PlanningRepository, PlanningService, ProgramId,
    RepositoryError,
};
use muster::roster::{PersonnelRecord, RandomFieldSampler, RosterImporter};
use muster::store::{DatasetSnapshot, DatasetStore, SessionStore, StoreError, UserAccount, UserStore};

use crate::infra::{deserialize_optional_date, AppState};

/// Shared dependencies for the roster, candidate, and auth endpoints. The
/// planning repository stays generic so tests can substitute their own; the
/// stores are injected behind their trait objects.
pub(crate) struct ApiContext<R> {
    pub(crate) planning: Arc<PlanningService<R>>,
    pub(crate) datasets: Arc<dyn DatasetStore>,
    pub(crate) users: Arc<dyn UserStore>,
    pub(crate) sessions: Arc<dyn SessionStore>,
}

impl<R> Clone for ApiContext<R> {
    fn clone(&self) -> Self {
        Self {
            planning: self.planning.clone(),
            datasets: self.datasets.clone(),
            users: self.users.clone(),
            sessions: self.sessions.clone(),
        }
    }
}

pub(crate) fn with_service_routes<R>(context: ApiContext<R>) -> Router
where
    R: PlanningRepository + 'static,
{
    planning_router(context.planning.clone())
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .merge(
            Router::new()
                .route("/api/v1/roster/ingest", post(roster_ingest_endpoint::<R>))
                .route("/api/v1/roster/report", post(roster_report_endpoint::<R>))
                .route(
                    "/api/v1/planning/missions/:mission_id/candidates",
                    post(mission_candidates_endpoint::<R>),
                )
                .route(
                    "/api/v1/planning/programs/:program_id/candidates",
                    post(program_candidates_endpoint::<R>),
                )
                .route("/api/v1/auth/register", post(register_endpoint::<R>))
                .route("/api/v1/auth/login", post(login_endpoint::<R>))
                .route("/api/v1/auth/logout", post(logout_endpoint::<R>))
                .with_state(context),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[derive(Debug, Deserialize)]
pub(crate) struct RosterIngestRequest {
    pub(crate) owner: String,
    pub(crate) csv: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct RosterIngestResponse {
    pub(crate) owner: String,
    pub(crate) uploaded_at: DateTime<Utc>,
    pub(crate) personnel: usize,
    pub(crate) anomalies: Vec<AnomalyView>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AnomalyView {
    pub(crate) row: usize,
    pub(crate) detail: String,
}

pub(crate) async fn roster_ingest_endpoint<R>(
    State(context): State<ApiContext<R>>,
    Json(request): Json<RosterIngestRequest>,
) -> Response
where
    R: PlanningRepository + 'static,
{
    let ingest = match RosterImporter::from_text(&request.csv, &mut RandomFieldSampler) {
        Ok(ingest) => ingest,
        Err(error) => return AppError::from(error).into_response(),
    };

    let anomalies: Vec<AnomalyView> = ingest
        .anomalies
        .iter()
        .map(|anomaly| AnomalyView {
            row: anomaly.row,
            detail: anomaly.kind.describe(),
        })
        .collect();
    let personnel = ingest.records.len();
    let uploaded_at = Utc::now();

    let snapshot = DatasetSnapshot {
        owner: request.owner.clone(),
        uploaded_at,
        records: ingest.records,
    };
    if let Err(error) = context.datasets.save(snapshot) {
        return store_error_response(error);
    }

    tracing::info!(
        owner = %request.owner,
        personnel,
        anomalies = anomalies.len(),
        "roster snapshot replaced"
    );

    (
        StatusCode::OK,
        Json(RosterIngestResponse {
            owner: request.owner,
            uploaded_at,
            personnel,
            anomalies,
        }),
    )
        .into_response()
}

#[derive(Debug, Deserialize)]
pub(crate) struct RosterReportRequest {
    #[serde(default)]
    pub(crate) owner: Option<String>,
    #[serde(default)]
    pub(crate) csv: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) today: Option<NaiveDate>,
    #[serde(default)]
    pub(crate) include_personnel: bool,
    #[serde(flatten)]
    pub(crate) filter: RosterFilter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum RosterDataSource {
    Upload,
    Snapshot,
}

#[derive(Debug, Serialize)]
pub(crate) struct RosterReportResponse {
    pub(crate) today: NaiveDate,
    pub(crate) data_source: RosterDataSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) uploaded_at: Option<DateTime<Utc>>,
    pub(crate) summary: RosterSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) personnel: Option<Vec<PersonnelDetailView>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct PersonnelDetailView {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) rank: String,
    pub(crate) specialization: String,
    pub(crate) training_score: f64,
    pub(crate) readiness_score: u8,
    pub(crate) attrition_risk: &'static str,
    pub(crate) recommendations: Vec<&'static str>,
}

fn personnel_detail(record: &PersonnelRecord, today: NaiveDate) -> PersonnelDetailView {
    PersonnelDetailView {
        id: record.id.clone(),
        name: record.name.clone(),
        rank: record.rank.clone(),
        specialization: record.specialization.clone(),
        training_score: record.training_score,
        readiness_score: assessment::readiness_score(record),
        attrition_risk: assessment::attrition_risk(record).label(),
        recommendations: assessment::training_recommendations(record, today),
    }
}

pub(crate) async fn roster_report_endpoint<R>(
    State(context): State<ApiContext<R>>,
    Json(request): Json<RosterReportRequest>,
) -> Response
where
    R: PlanningRepository + 'static,
{
    let RosterReportRequest {
        owner,
        csv,
        today,
        include_personnel,
        filter,
    } = request;

    let filter = filter.normalized();
    let today = today.unwrap_or_else(|| Local::now().date_naive());

    let (records, data_source, uploaded_at) = if let Some(csv) = csv {
        match RosterImporter::from_text(&csv, &mut RandomFieldSampler) {
            Ok(ingest) => (ingest.records, RosterDataSource::Upload, None),
            Err(error) => return AppError::from(error).into_response(),
        }
    } else if let Some(owner) = owner {
        match context.datasets.load(&owner) {
            Ok(Some(snapshot)) => (
                snapshot.records,
                RosterDataSource::Snapshot,
                Some(snapshot.uploaded_at),
            ),
            Ok(None) => {
                let payload = json!({ "error": format!("no stored roster for '{owner}'") });
                return (StatusCode::NOT_FOUND, Json(payload)).into_response();
            }
            Err(error) => return store_error_response(error),
        }
    } else {
        let payload = json!({ "error": "provide either 'csv' or 'owner'" });
        return (StatusCode::BAD_REQUEST, Json(payload)).into_response();
    };

    let summary = analytics::summarize(&records, &filter, today);
    let personnel = include_personnel.then(|| {
        records
            .iter()
            .filter(|record| filter.matches(record))
            .map(|record| personnel_detail(record, today))
            .collect()
    });

    (
        StatusCode::OK,
        Json(RosterReportResponse {
            today,
            data_source,
            uploaded_at,
            summary,
            personnel,
        }),
    )
        .into_response()
}

#[derive(Debug, Deserialize)]
pub(crate) struct CandidateRequest {
    pub(crate) owner: String,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) today: Option<NaiveDate>,
    #[serde(default = "default_candidate_limit")]
    pub(crate) limit: usize,
    #[serde(flatten)]
    pub(crate) filter: RosterFilter,
}

fn default_candidate_limit() -> usize {
    10
}

pub(crate) async fn mission_candidates_endpoint<R>(
    State(context): State<ApiContext<R>>,
    Path(mission_id): Path<String>,
    Json(request): Json<CandidateRequest>,
) -> Response
where
    R: PlanningRepository + 'static,
{
    let limit = request.limit;
    let (records, filter, today) = match load_candidate_inputs(&context, request) {
        Ok(inputs) => inputs,
        Err(response) => return response,
    };

    let id = MissionId(mission_id);
    match context
        .planning
        .mission_candidates(&id, &records, &filter, today, limit)
    {
        Ok(candidates) => (StatusCode::OK, Json(candidates)).into_response(),
        Err(error) => planning_error_response(error),
    }
}

pub(crate) async fn program_candidates_endpoint<R>(
    State(context): State<ApiContext<R>>,
    Path(program_id): Path<String>,
    Json(request): Json<CandidateRequest>,
) -> Response
where
    R: PlanningRepository + 'static,
{
    let limit = request.limit;
    let (records, filter, today) = match load_candidate_inputs(&context, request) {
        Ok(inputs) => inputs,
        Err(response) => return response,
    };

    let id = ProgramId(program_id);
    match context
        .planning
        .program_candidates(&id, &records, &filter, today, limit)
    {
        Ok(candidates) => (StatusCode::OK, Json(candidates)).into_response(),
        Err(error) => planning_error_response(error),
    }
}

fn load_candidate_inputs<R>(
    context: &ApiContext<R>,
    request: CandidateRequest,
) -> Result<(Vec<PersonnelRecord>, RosterFilter, NaiveDate), Response>
where
    R: PlanningRepository + 'static,
{
    let today = request
        .today
        .unwrap_or_else(|| Local::now().date_naive());
    let filter = request.filter.normalized();

    match context.datasets.load(&request.owner) {
        Ok(Some(snapshot)) => Ok((snapshot.records, filter, today)),
        Ok(None) => {
            let payload = json!({ "error": format!("no stored roster for '{}'", request.owner) });
            Err((StatusCode::NOT_FOUND, Json(payload)).into_response())
        }
        Err(error) => Err(store_error_response(error)),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RegisterRequest {
    pub(crate) username: String,
    #[serde(default)]
    pub(crate) display_name: String,
    pub(crate) password: String,
}

pub(crate) async fn register_endpoint<R>(
    State(context): State<ApiContext<R>>,
    Json(request): Json<RegisterRequest>,
) -> Response
where
    R: PlanningRepository + 'static,
{
    let account = UserAccount {
        username: request.username.clone(),
        display_name: request.display_name,
        password: request.password,
    };

    match context.users.register(account) {
        Ok(()) => (
            StatusCode::CREATED,
            Json(json!({ "username": request.username })),
        )
            .into_response(),
        Err(StoreError::Conflict) => (
            StatusCode::CONFLICT,
            Json(json!({ "error": "username already registered" })),
        )
            .into_response(),
        Err(error) => store_error_response(error),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginRequest {
    pub(crate) username: String,
    pub(crate) password: String,
}

pub(crate) async fn login_endpoint<R>(
    State(context): State<ApiContext<R>>,
    Json(request): Json<LoginRequest>,
) -> Response
where
    R: PlanningRepository + 'static,
{
    let account = match context.users.find(&request.username) {
        Ok(account) => account,
        Err(error) => return store_error_response(error),
    };

    let authenticated = account
        .map(|account| account.password == request.password)
        .unwrap_or(false);
    if !authenticated {
        let payload = json!({ "error": "invalid credentials" });
        return (StatusCode::UNAUTHORIZED, Json(payload)).into_response();
    }

    match context.sessions.open(&request.username) {
        Ok(token) => (
            StatusCode::OK,
            Json(json!({ "token": token, "username": request.username })),
        )
            .into_response(),
        Err(error) => store_error_response(error),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct LogoutRequest {
    pub(crate) token: String,
}

pub(crate) async fn logout_endpoint<R>(
    State(context): State<ApiContext<R>>,
    Json(request): Json<LogoutRequest>,
) -> Response
where
    R: PlanningRepository + 'static,
{
    match context.sessions.close(&request.token) {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "logged_out" }))).into_response(),
        Err(StoreError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "unknown session token" })),
        )
            .into_response(),
        Err(error) => store_error_response(error),
    }
}

fn store_error_response(error: StoreError) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": error.to_string() })),
    )
        .into_response()
}

fn planning_error_response(error: PlanningError) -> Response {
    let status = match &error {
        PlanningError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        PlanningError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        PlanningError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(json!({ "error": error.to_string() }))).into_response()
}
