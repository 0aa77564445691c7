use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;

use super::candidates::{rank_mission_candidates, rank_program_candidates, CandidateView};
use super::domain::{
    EnrollmentOutcome, MedicalLogEntry, Mission, MissionId, MissionStatus, ProgramId,
    ProgramStatus, TrainingProgram,
};
use super::repository::{PlanningRepository, RepositoryError};
use crate::analytics::RosterFilter;
use crate::roster::PersonnelRecord;

static MISSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static PROGRAM_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static MEDICAL_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_mission_id() -> MissionId {
    let id = MISSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    MissionId(format!("msn-{id:03}"))
}

fn next_program_id() -> ProgramId {
    let id = PROGRAM_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ProgramId(format!("prg-{id:03}"))
}

fn next_medical_id() -> String {
    let id = MEDICAL_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("med-{id:06}")
}

/// Service composing the planning repository with enrollment rules and
/// candidate ranking. Scores are consumed read-only; the service never
/// mutates personnel records.
pub struct PlanningService<R> {
    repository: Arc<R>,
}

impl<R> PlanningService<R>
where
    R: PlanningRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn create_mission(
        &self,
        name: String,
        objective: String,
        capacity: usize,
    ) -> Result<Mission, PlanningError> {
        let mission = Mission {
            id: next_mission_id(),
            name,
            objective,
            status: MissionStatus::Planned,
            capacity,
            roster: Vec::new(),
        };
        Ok(self.repository.insert_mission(mission)?)
    }

    pub fn create_program(
        &self,
        name: String,
        focus: String,
        capacity: usize,
    ) -> Result<TrainingProgram, PlanningError> {
        let program = TrainingProgram {
            id: next_program_id(),
            name,
            focus,
            status: ProgramStatus::Open,
            capacity,
            enrolled: Vec::new(),
        };
        Ok(self.repository.insert_program(program)?)
    }

    pub fn missions(&self) -> Result<Vec<Mission>, PlanningError> {
        Ok(self.repository.missions()?)
    }

    pub fn programs(&self) -> Result<Vec<TrainingProgram>, PlanningError> {
        Ok(self.repository.programs()?)
    }

    pub fn assign_to_mission(
        &self,
        id: &MissionId,
        personnel_id: &str,
    ) -> Result<EnrollmentOutcome, PlanningError> {
        let mut mission = self
            .repository
            .fetch_mission(id)?
            .ok_or(RepositoryError::NotFound)?;
        let outcome = mission.assign(personnel_id);
        if outcome.is_enrolled() {
            self.repository.update_mission(mission)?;
        }
        Ok(outcome)
    }

    pub fn unassign_from_mission(
        &self,
        id: &MissionId,
        personnel_id: &str,
    ) -> Result<bool, PlanningError> {
        let mut mission = self
            .repository
            .fetch_mission(id)?
            .ok_or(RepositoryError::NotFound)?;
        let removed = mission.unassign(personnel_id);
        if removed {
            self.repository.update_mission(mission)?;
        }
        Ok(removed)
    }

    pub fn enroll_in_program(
        &self,
        id: &ProgramId,
        personnel_id: &str,
    ) -> Result<EnrollmentOutcome, PlanningError> {
        let mut program = self
            .repository
            .fetch_program(id)?
            .ok_or(RepositoryError::NotFound)?;
        let outcome = program.enroll(personnel_id);
        if outcome.is_enrolled() {
            self.repository.update_program(program)?;
        }
        Ok(outcome)
    }

    pub fn withdraw_from_program(
        &self,
        id: &ProgramId,
        personnel_id: &str,
    ) -> Result<bool, PlanningError> {
        let mut program = self
            .repository
            .fetch_program(id)?
            .ok_or(RepositoryError::NotFound)?;
        let removed = program.withdraw(personnel_id);
        if removed {
            self.repository.update_program(program)?;
        }
        Ok(removed)
    }

    pub fn log_medical(
        &self,
        personnel_id: String,
        status: String,
        notes: String,
        recorded_on: NaiveDate,
    ) -> Result<MedicalLogEntry, PlanningError> {
        let entry = MedicalLogEntry {
            id: next_medical_id(),
            personnel_id,
            status,
            notes,
            recorded_on,
        };
        Ok(self.repository.insert_medical(entry)?)
    }

    pub fn medical_history(
        &self,
        personnel_id: &str,
    ) -> Result<Vec<MedicalLogEntry>, PlanningError> {
        Ok(self.repository.medical_for(personnel_id)?)
    }

    /// Rank assignment candidates for a mission against the given roster
    /// snapshot; most capable first.
    pub fn mission_candidates(
        &self,
        id: &MissionId,
        records: &[PersonnelRecord],
        filter: &RosterFilter,
        today: NaiveDate,
        limit: usize,
    ) -> Result<Vec<CandidateView>, PlanningError> {
        let mission = self
            .repository
            .fetch_mission(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(rank_mission_candidates(records, &mission, filter, today, limit))
    }

    /// Rank enrollment candidates for a program; neediest first.
    pub fn program_candidates(
        &self,
        id: &ProgramId,
        records: &[PersonnelRecord],
        filter: &RosterFilter,
        today: NaiveDate,
        limit: usize,
    ) -> Result<Vec<CandidateView>, PlanningError> {
        let program = self
            .repository
            .fetch_program(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(rank_program_candidates(records, &program, filter, today, limit))
    }
}

/// Error raised by the planning service.
#[derive(Debug, thiserror::Error)]
pub enum PlanningError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
