//! In-memory implementation of the outbound ports for testing.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rust_decimal::Decimal;
use time::{macros::date, OffsetDateTime};

use crate::domain::{
    check_daily_cap, day_total,
    models::{
        NewProject, Project, ProjectId, TimeEntry, TimeEntryDraft, TimeEntryFilter, TimeEntryId,
        UserId, YearlyTarget,
    },
    ports::outbound::{ProjectRepository, TimeEntryRepository, YearlyTargetRepository},
    ProjectError, ReportError, TimeEntryError,
};

#[derive(Default)]
struct State {
    projects: BTreeMap<ProjectId, Project>,
    entries: BTreeMap<TimeEntryId, TimeEntry>,
    targets: HashMap<(UserId, i32), YearlyTarget>,
    next_project_id: i32,
    next_entry_id: i32,
    fail_writes: bool,
}

/// Mock store backed by in-memory maps, implementing every outbound port.
///
/// A single mutex guards all state, so the cap check and the write of
/// `insert_within_cap` / `update_within_cap` are atomic like the Postgres
/// adapter's locked transaction.
///
/// # Examples
///
/// ```ignore
/// let store = MockStore::new().with_project(1, "Acme", dec!(100)); // project id 1
/// let service = TimeEntryServiceImpl::new(Arc::new(store.clone()), Arc::new(store));
/// ```
#[derive(Clone, Default)]
pub struct MockStore {
    state: Arc<Mutex<State>>,
}

#[allow(dead_code)]
impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a project running through 2024. Ids are handed out from 1.
    pub fn with_project(self, owner_id: i32, name: &str, hourly_rate: Decimal) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.next_project_id += 1;
            let id = ProjectId::new(state.next_project_id);
            let now = OffsetDateTime::now_utc();
            state.projects.insert(
                id,
                Project {
                    id,
                    owner_id: UserId::new(owner_id),
                    name: name.to_string(),
                    hourly_rate,
                    start_date: date!(2024 - 01 - 01),
                    end_date: date!(2024 - 12 - 31),
                    created_at: now,
                    updated_at: now,
                },
            );
        }
        self
    }

    pub fn with_target(self, target: YearlyTarget) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state
                .targets
                .insert((target.user_id, target.year), target);
        }
        self
    }

    /// Make every write fail with a storage error.
    pub fn failing_writes(self) -> Self {
        self.state.lock().unwrap().fail_writes = true;
        self
    }

    /// All stored entries (for test assertions).
    pub fn all_entries(&self) -> Vec<TimeEntry> {
        self.state.lock().unwrap().entries.values().cloned().collect()
    }

    pub fn entry(&self, id: i32) -> Option<TimeEntry> {
        self.state
            .lock()
            .unwrap()
            .entries
            .get(&TimeEntryId::new(id))
            .cloned()
    }
}

impl State {
    fn owned_project(&self, owner_id: &UserId, id: &ProjectId) -> Option<&Project> {
        self.projects.get(id).filter(|p| p.owner_id == *owner_id)
    }
}

#[async_trait]
impl TimeEntryRepository for MockStore {
    async fn get(
        &self,
        user_id: &UserId,
        id: &TimeEntryId,
    ) -> Result<Option<TimeEntry>, TimeEntryError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .entries
            .get(id)
            .filter(|e| e.user_id == *user_id)
            .cloned())
    }

    async fn list(
        &self,
        user_id: &UserId,
        filter: &TimeEntryFilter,
    ) -> Result<Vec<TimeEntry>, TimeEntryError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .entries
            .values()
            .filter(|e| e.user_id == *user_id && filter.matches(e))
            .cloned()
            .collect())
    }

    async fn insert_within_cap(
        &self,
        user_id: &UserId,
        draft: &TimeEntryDraft,
    ) -> Result<TimeEntry, TimeEntryError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_writes {
            return Err(TimeEntryError::storage("connection reset"));
        }
        if state.owned_project(user_id, &draft.project_id).is_none() {
            return Err(TimeEntryError::ProjectNotFoundOrUnauthorized);
        }

        let current_total = day_total(state.entries.values(), *user_id, draft.date, None);
        check_daily_cap(current_total, draft.hours)?;

        state.next_entry_id += 1;
        let id = TimeEntryId::new(state.next_entry_id);
        let now = OffsetDateTime::now_utc();
        let entry = TimeEntry {
            id,
            user_id: *user_id,
            project_id: draft.project_id,
            date: draft.date,
            hours: draft.hours,
            description: draft.description.clone(),
            created_at: now,
            updated_at: now,
        };
        state.entries.insert(id, entry.clone());

        Ok(entry)
    }

    async fn update_within_cap(
        &self,
        user_id: &UserId,
        id: &TimeEntryId,
        draft: &TimeEntryDraft,
    ) -> Result<TimeEntry, TimeEntryError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_writes {
            return Err(TimeEntryError::storage("connection reset"));
        }
        if !state
            .entries
            .get(id)
            .is_some_and(|e| e.user_id == *user_id)
        {
            return Err(TimeEntryError::NotFound);
        }
        if state.owned_project(user_id, &draft.project_id).is_none() {
            return Err(TimeEntryError::ProjectNotFoundOrUnauthorized);
        }

        let current_total = day_total(state.entries.values(), *user_id, draft.date, Some(*id));
        check_daily_cap(current_total, draft.hours)?;

        let entry = state
            .entries
            .get_mut(id)
            .ok_or(TimeEntryError::NotFound)?;
        entry.project_id = draft.project_id;
        entry.date = draft.date;
        entry.hours = draft.hours;
        entry.description = draft.description.clone();
        entry.updated_at = OffsetDateTime::now_utc();

        Ok(entry.clone())
    }

    async fn delete(&self, user_id: &UserId, id: &TimeEntryId) -> Result<bool, TimeEntryError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_writes {
            return Err(TimeEntryError::storage("connection reset"));
        }
        if !state
            .entries
            .get(id)
            .is_some_and(|e| e.user_id == *user_id)
        {
            return Ok(false);
        }

        Ok(state.entries.remove(id).is_some())
    }
}

#[async_trait]
impl ProjectRepository for MockStore {
    async fn list(&self, owner_id: &UserId) -> Result<Vec<Project>, ProjectError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .projects
            .values()
            .filter(|p| p.owner_id == *owner_id)
            .cloned()
            .collect())
    }

    async fn get(
        &self,
        owner_id: &UserId,
        id: &ProjectId,
    ) -> Result<Option<Project>, ProjectError> {
        let state = self.state.lock().unwrap();
        Ok(state.owned_project(owner_id, id).cloned())
    }

    async fn insert(&self, project: &NewProject) -> Result<Project, ProjectError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_writes {
            return Err(ProjectError::storage("connection reset"));
        }

        state.next_project_id += 1;
        let id = ProjectId::new(state.next_project_id);
        let now = OffsetDateTime::now_utc();
        let stored = Project {
            id,
            owner_id: project.owner_id,
            name: project.name.clone(),
            hourly_rate: project.hourly_rate,
            start_date: project.start_date,
            end_date: project.end_date,
            created_at: now,
            updated_at: now,
        };
        state.projects.insert(id, stored.clone());

        Ok(stored)
    }

    async fn update(&self, project: &Project) -> Result<Project, ProjectError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_writes {
            return Err(ProjectError::storage("connection reset"));
        }

        let referenced = state.entries.values().any(|e| e.project_id == project.id);
        let stored = state
            .projects
            .get_mut(&project.id)
            .filter(|p| p.owner_id == project.owner_id)
            .ok_or(ProjectError::NotFound)?;
        if referenced && stored.name != project.name {
            return Err(ProjectError::InUse);
        }
        stored.name = project.name.clone();
        stored.hourly_rate = project.hourly_rate;
        stored.start_date = project.start_date;
        stored.end_date = project.end_date;
        stored.updated_at = OffsetDateTime::now_utc();

        Ok(stored.clone())
    }

    async fn delete(&self, owner_id: &UserId, id: &ProjectId) -> Result<bool, ProjectError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_writes {
            return Err(ProjectError::storage("connection reset"));
        }
        if state.owned_project(owner_id, id).is_none() {
            return Ok(false);
        }
        if state.entries.values().any(|e| e.project_id == *id) {
            return Err(ProjectError::InUse);
        }

        Ok(state.projects.remove(id).is_some())
    }

    async fn has_time_entries(&self, id: &ProjectId) -> Result<bool, ProjectError> {
        let state = self.state.lock().unwrap();
        Ok(state.entries.values().any(|e| e.project_id == *id))
    }

    async fn hourly_rates(
        &self,
        owner_id: &UserId,
    ) -> Result<HashMap<ProjectId, Decimal>, ProjectError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .projects
            .values()
            .filter(|p| p.owner_id == *owner_id)
            .map(|p| (p.id, p.hourly_rate))
            .collect())
    }
}

#[async_trait]
impl YearlyTargetRepository for MockStore {
    async fn get(&self, user_id: &UserId, year: i32) -> Result<Option<YearlyTarget>, ReportError> {
        let state = self.state.lock().unwrap();
        Ok(state.targets.get(&(*user_id, year)).cloned())
    }

    async fn upsert(&self, target: &YearlyTarget) -> Result<(), ReportError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_writes {
            return Err(ReportError::storage("connection reset"));
        }

        state
            .targets
            .insert((target.user_id, target.year), target.clone());
        Ok(())
    }
}
