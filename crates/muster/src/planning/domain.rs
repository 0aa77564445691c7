use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for missions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MissionId(pub String);

/// Identifier wrapper for training programs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProgramId(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissionStatus {
    Planned,
    Active,
    Complete,
}

impl MissionStatus {
    pub const fn label(self) -> &'static str {
        match self {
            MissionStatus::Planned => "planned",
            MissionStatus::Active => "active",
            MissionStatus::Complete => "complete",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgramStatus {
    Open,
    InProgress,
    Completed,
}

impl ProgramStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ProgramStatus::Open => "open",
            ProgramStatus::InProgress => "in_progress",
            ProgramStatus::Completed => "completed",
        }
    }
}

/// A staffed operation holding personnel-id associations. No referential
/// integrity with the roster: a stale id is skipped by consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    pub id: MissionId,
    pub name: String,
    pub objective: String,
    pub status: MissionStatus,
    pub capacity: usize,
    pub roster: Vec<String>,
}

impl Mission {
    pub fn assign(&mut self, personnel_id: &str) -> EnrollmentOutcome {
        enroll_into(&mut self.roster, self.capacity, personnel_id)
    }

    pub fn unassign(&mut self, personnel_id: &str) -> bool {
        remove_from(&mut self.roster, personnel_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingProgram {
    pub id: ProgramId,
    pub name: String,
    pub focus: String,
    pub status: ProgramStatus,
    pub capacity: usize,
    pub enrolled: Vec<String>,
}

impl TrainingProgram {
    pub fn enroll(&mut self, personnel_id: &str) -> EnrollmentOutcome {
        enroll_into(&mut self.enrolled, self.capacity, personnel_id)
    }

    pub fn withdraw(&mut self, personnel_id: &str) -> bool {
        remove_from(&mut self.enrolled, personnel_id)
    }
}

/// One entry in the medical log; references a personnel id without
/// requiring it to exist in the current collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicalLogEntry {
    pub id: String,
    pub personnel_id: String,
    pub status: String,
    pub notes: String,
    pub recorded_on: NaiveDate,
}

/// Typed enrollment result: a full roster or a duplicate is reported, never
/// an error, and never grows the roster past capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum EnrollmentOutcome {
    Enrolled { remaining: usize },
    AlreadyEnrolled,
    AtCapacity,
}

impl EnrollmentOutcome {
    pub const fn is_enrolled(&self) -> bool {
        matches!(self, EnrollmentOutcome::Enrolled { .. })
    }
}

fn enroll_into(roster: &mut Vec<String>, capacity: usize, personnel_id: &str) -> EnrollmentOutcome {
    if roster.iter().any(|id| id == personnel_id) {
        return EnrollmentOutcome::AlreadyEnrolled;
    }
    if roster.len() >= capacity {
        return EnrollmentOutcome::AtCapacity;
    }
    roster.push(personnel_id.to_string());
    EnrollmentOutcome::Enrolled {
        remaining: capacity - roster.len(),
    }
}

fn remove_from(roster: &mut Vec<String>, personnel_id: &str) -> bool {
    let before = roster.len();
    roster.retain(|id| id != personnel_id);
    roster.len() != before
}
