//! Planning stores: missions, training programs, and the medical log.
//!
//! Entities are user-created, hold personnel-id associations, and read
//! computed scores only to rank candidates. Enrollment reports a typed
//! outcome instead of silently clamping at capacity.

mod candidates;
pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use candidates::CandidateView;
pub use domain::{
    EnrollmentOutcome, MedicalLogEntry, Mission, MissionId, MissionStatus, ProgramId,
    ProgramStatus, TrainingProgram,
};
pub use repository::{PlanningRepository, RepositoryError};
pub use router::planning_router;
pub use service::{PlanningError, PlanningService};
