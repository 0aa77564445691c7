use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;

use muster::planning::{
    MedicalLogEntry, Mission, MissionId, PlanningRepository, ProgramId, RepositoryError,
    TrainingProgram,
};
use muster::store::{DatasetSnapshot, DatasetStore, SessionStore, StoreError, UserAccount, UserStore};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Planning entities keep their creation order; lookups are linear over the
/// small in-memory sequences.
#[derive(Default)]
pub(crate) struct InMemoryPlanningRepository {
    missions: Mutex<Vec<Mission>>,
    programs: Mutex<Vec<TrainingProgram>>,
    medical: Mutex<Vec<MedicalLogEntry>>,
}

impl PlanningRepository for InMemoryPlanningRepository {
    fn insert_mission(&self, mission: Mission) -> Result<Mission, RepositoryError> {
        let mut guard = self.missions.lock().expect("mission mutex poisoned");
        if guard.iter().any(|existing| existing.id == mission.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(mission.clone());
        Ok(mission)
    }

    fn update_mission(&self, mission: Mission) -> Result<(), RepositoryError> {
        let mut guard = self.missions.lock().expect("mission mutex poisoned");
        match guard.iter_mut().find(|existing| existing.id == mission.id) {
            Some(existing) => {
                *existing = mission;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch_mission(&self, id: &MissionId) -> Result<Option<Mission>, RepositoryError> {
        let guard = self.missions.lock().expect("mission mutex poisoned");
        Ok(guard.iter().find(|mission| &mission.id == id).cloned())
    }

    fn missions(&self) -> Result<Vec<Mission>, RepositoryError> {
        let guard = self.missions.lock().expect("mission mutex poisoned");
        Ok(guard.clone())
    }

    fn insert_program(&self, program: TrainingProgram) -> Result<TrainingProgram, RepositoryError> {
        let mut guard = self.programs.lock().expect("program mutex poisoned");
        if guard.iter().any(|existing| existing.id == program.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(program.clone());
        Ok(program)
    }

    fn update_program(&self, program: TrainingProgram) -> Result<(), RepositoryError> {
        let mut guard = self.programs.lock().expect("program mutex poisoned");
        match guard.iter_mut().find(|existing| existing.id == program.id) {
            Some(existing) => {
                *existing = program;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch_program(&self, id: &ProgramId) -> Result<Option<TrainingProgram>, RepositoryError> {
        let guard = self.programs.lock().expect("program mutex poisoned");
        Ok(guard.iter().find(|program| &program.id == id).cloned())
    }

    fn programs(&self) -> Result<Vec<TrainingProgram>, RepositoryError> {
        let guard = self.programs.lock().expect("program mutex poisoned");
        Ok(guard.clone())
    }

    fn insert_medical(&self, entry: MedicalLogEntry) -> Result<MedicalLogEntry, RepositoryError> {
        let mut guard = self.medical.lock().expect("medical mutex poisoned");
        guard.push(entry.clone());
        Ok(entry)
    }

    fn medical_for(&self, personnel_id: &str) -> Result<Vec<MedicalLogEntry>, RepositoryError> {
        let guard = self.medical.lock().expect("medical mutex poisoned");
        Ok(guard
            .iter()
            .filter(|entry| entry.personnel_id == personnel_id)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub(crate) struct InMemoryDatasetStore {
    snapshots: Mutex<HashMap<String, DatasetSnapshot>>,
}

impl DatasetStore for InMemoryDatasetStore {
    fn save(&self, snapshot: DatasetSnapshot) -> Result<(), StoreError> {
        let mut guard = self.snapshots.lock().expect("dataset mutex poisoned");
        guard.insert(snapshot.owner.clone(), snapshot);
        Ok(())
    }

    fn load(&self, owner: &str) -> Result<Option<DatasetSnapshot>, StoreError> {
        let guard = self.snapshots.lock().expect("dataset mutex poisoned");
        Ok(guard.get(owner).cloned())
    }
}

#[derive(Default)]
pub(crate) struct InMemoryUserStore {
    accounts: Mutex<HashMap<String, UserAccount>>,
}

impl UserStore for InMemoryUserStore {
    fn register(&self, account: UserAccount) -> Result<(), StoreError> {
        let mut guard = self.accounts.lock().expect("user mutex poisoned");
        if guard.contains_key(&account.username) {
            return Err(StoreError::Conflict);
        }
        guard.insert(account.username.clone(), account);
        Ok(())
    }

    fn find(&self, username: &str) -> Result<Option<UserAccount>, StoreError> {
        let guard = self.accounts.lock().expect("user mutex poisoned");
        Ok(guard.get(username).cloned())
    }
}

#[derive(Default)]
pub(crate) struct InMemorySessionStore {
    sessions: Mutex<HashMap<String, String>>,
    sequence: AtomicU64,
}

impl SessionStore for InMemorySessionStore {
    fn open(&self, username: &str) -> Result<String, StoreError> {
        let token = format!("sess-{:08}", self.sequence.fetch_add(1, Ordering::Relaxed));
        let mut guard = self.sessions.lock().expect("session mutex poisoned");
        guard.insert(token.clone(), username.to_string());
        Ok(token)
    }

    fn resolve(&self, token: &str) -> Result<Option<String>, StoreError> {
        let guard = self.sessions.lock().expect("session mutex poisoned");
        Ok(guard.get(token).cloned())
    }

    fn close(&self, token: &str) -> Result<(), StoreError> {
        let mut guard = self.sessions.lock().expect("session mutex poisoned");
        match guard.remove(token) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound),
        }
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}
