use super::domain::{MedicalLogEntry, Mission, MissionId, ProgramId, TrainingProgram};

/// Storage abstraction so the planning service can be exercised in
/// isolation; in-memory implementations live with the API service.
pub trait PlanningRepository: Send + Sync {
    fn insert_mission(&self, mission: Mission) -> Result<Mission, RepositoryError>;
    fn update_mission(&self, mission: Mission) -> Result<(), RepositoryError>;
    fn fetch_mission(&self, id: &MissionId) -> Result<Option<Mission>, RepositoryError>;
    fn missions(&self) -> Result<Vec<Mission>, RepositoryError>;

    fn insert_program(&self, program: TrainingProgram) -> Result<TrainingProgram, RepositoryError>;
    fn update_program(&self, program: TrainingProgram) -> Result<(), RepositoryError>;
    fn fetch_program(&self, id: &ProgramId) -> Result<Option<TrainingProgram>, RepositoryError>;
    fn programs(&self) -> Result<Vec<TrainingProgram>, RepositoryError>;

    fn insert_medical(&self, entry: MedicalLogEntry) -> Result<MedicalLogEntry, RepositoryError>;
    fn medical_for(&self, personnel_id: &str) -> Result<Vec<MedicalLogEntry>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
