use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use super::domain::{EnrollmentOutcome, MissionId, ProgramId};
use super::repository::{PlanningRepository, RepositoryError};
use super::service::{PlanningError, PlanningService};

/// Router builder exposing HTTP endpoints for planning entities and their
/// rosters. Candidate ranking needs a dataset snapshot and lives with the
/// API service, not here.
pub fn planning_router<R>(service: Arc<PlanningService<R>>) -> Router
where
    R: PlanningRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/planning/missions",
            post(create_mission_handler::<R>).get(list_missions_handler::<R>),
        )
        .route(
            "/api/v1/planning/missions/:mission_id/assignments",
            post(assign_handler::<R>),
        )
        .route(
            "/api/v1/planning/missions/:mission_id/assignments/:personnel_id",
            delete(unassign_handler::<R>),
        )
        .route(
            "/api/v1/planning/programs",
            post(create_program_handler::<R>).get(list_programs_handler::<R>),
        )
        .route(
            "/api/v1/planning/programs/:program_id/enrollments",
            post(enroll_handler::<R>),
        )
        .route(
            "/api/v1/planning/programs/:program_id/enrollments/:personnel_id",
            delete(withdraw_handler::<R>),
        )
        .route(
            "/api/v1/planning/medical",
            post(log_medical_handler::<R>),
        )
        .route(
            "/api/v1/planning/medical/:personnel_id",
            get(medical_history_handler::<R>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateMissionRequest {
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) objective: String,
    pub(crate) capacity: usize,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateProgramRequest {
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) focus: String,
    pub(crate) capacity: usize,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RosterMembershipRequest {
    pub(crate) personnel_id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MedicalEntryRequest {
    pub(crate) personnel_id: String,
    pub(crate) status: String,
    #[serde(default)]
    pub(crate) notes: String,
    pub(crate) recorded_on: NaiveDate,
}

async fn create_mission_handler<R>(
    State(service): State<Arc<PlanningService<R>>>,
    axum::Json(request): axum::Json<CreateMissionRequest>,
) -> Response
where
    R: PlanningRepository + 'static,
{
    match service.create_mission(request.name, request.objective, request.capacity) {
        Ok(mission) => (StatusCode::CREATED, axum::Json(mission)).into_response(),
        Err(error) => error_response(error),
    }
}

async fn list_missions_handler<R>(State(service): State<Arc<PlanningService<R>>>) -> Response
where
    R: PlanningRepository + 'static,
{
    match service.missions() {
        Ok(missions) => (StatusCode::OK, axum::Json(missions)).into_response(),
        Err(error) => error_response(error),
    }
}

async fn assign_handler<R>(
    State(service): State<Arc<PlanningService<R>>>,
    Path(mission_id): Path<String>,
    axum::Json(request): axum::Json<RosterMembershipRequest>,
) -> Response
where
    R: PlanningRepository + 'static,
{
    let id = MissionId(mission_id);
    match service.assign_to_mission(&id, &request.personnel_id) {
        Ok(outcome) => outcome_response(outcome),
        Err(error) => error_response(error),
    }
}

async fn unassign_handler<R>(
    State(service): State<Arc<PlanningService<R>>>,
    Path((mission_id, personnel_id)): Path<(String, String)>,
) -> Response
where
    R: PlanningRepository + 'static,
{
    let id = MissionId(mission_id);
    match service.unassign_from_mission(&id, &personnel_id) {
        Ok(true) => (StatusCode::OK, axum::Json(json!({ "removed": true }))).into_response(),
        Ok(false) => (
            StatusCode::NOT_FOUND,
            axum::Json(json!({ "removed": false })),
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

async fn create_program_handler<R>(
    State(service): State<Arc<PlanningService<R>>>,
    axum::Json(request): axum::Json<CreateProgramRequest>,
) -> Response
where
    R: PlanningRepository + 'static,
{
    match service.create_program(request.name, request.focus, request.capacity) {
        Ok(program) => (StatusCode::CREATED, axum::Json(program)).into_response(),
        Err(error) => error_response(error),
    }
}

async fn list_programs_handler<R>(State(service): State<Arc<PlanningService<R>>>) -> Response
where
    R: PlanningRepository + 'static,
{
    match service.programs() {
        Ok(programs) => (StatusCode::OK, axum::Json(programs)).into_response(),
        Err(error) => error_response(error),
    }
}

async fn enroll_handler<R>(
    State(service): State<Arc<PlanningService<R>>>,
    Path(program_id): Path<String>,
    axum::Json(request): axum::Json<RosterMembershipRequest>,
) -> Response
where
    R: PlanningRepository + 'static,
{
    let id = ProgramId(program_id);
    match service.enroll_in_program(&id, &request.personnel_id) {
        Ok(outcome) => outcome_response(outcome),
        Err(error) => error_response(error),
    }
}

async fn withdraw_handler<R>(
    State(service): State<Arc<PlanningService<R>>>,
    Path((program_id, personnel_id)): Path<(String, String)>,
) -> Response
where
    R: PlanningRepository + 'static,
{
    let id = ProgramId(program_id);
    match service.withdraw_from_program(&id, &personnel_id) {
        Ok(true) => (StatusCode::OK, axum::Json(json!({ "removed": true }))).into_response(),
        Ok(false) => (
            StatusCode::NOT_FOUND,
            axum::Json(json!({ "removed": false })),
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

async fn log_medical_handler<R>(
    State(service): State<Arc<PlanningService<R>>>,
    axum::Json(request): axum::Json<MedicalEntryRequest>,
) -> Response
where
    R: PlanningRepository + 'static,
{
    match service.log_medical(
        request.personnel_id,
        request.status,
        request.notes,
        request.recorded_on,
    ) {
        Ok(entry) => (StatusCode::CREATED, axum::Json(entry)).into_response(),
        Err(error) => error_response(error),
    }
}

async fn medical_history_handler<R>(
    State(service): State<Arc<PlanningService<R>>>,
    Path(personnel_id): Path<String>,
) -> Response
where
    R: PlanningRepository + 'static,
{
    match service.medical_history(&personnel_id) {
        Ok(entries) => (StatusCode::OK, axum::Json(entries)).into_response(),
        Err(error) => error_response(error),
    }
}

fn outcome_response(outcome: EnrollmentOutcome) -> Response {
    let status = if outcome.is_enrolled() {
        StatusCode::OK
    } else {
        StatusCode::CONFLICT
    };
    (status, axum::Json(outcome)).into_response()
}

fn error_response(error: PlanningError) -> Response {
    let status = match &error {
        PlanningError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        PlanningError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        PlanningError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, axum::Json(json!({ "error": error.to_string() }))).into_response()
}
