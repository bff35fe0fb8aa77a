use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{
    models::{sort_newest_first, TimeEntry, TimeEntryDraft, TimeEntryFilter, TimeEntryId, UserId},
    ports::{
        inbound::TimeEntryService,
        outbound::{ProjectRepository, TimeEntryRepository},
    },
    TimeEntryError,
};

/// Implementation of the TimeEntryService inbound port.
///
/// Checks the shape of incoming entries and that the referenced project
/// belongs to the user, then hands the daily cap check and the write to the
/// repository, which performs both atomically.
pub struct TimeEntryServiceImpl<E, P> {
    entries: Arc<E>,
    projects: Arc<P>,
}

impl<E, P> TimeEntryServiceImpl<E, P> {
    pub fn new(entries: Arc<E>, projects: Arc<P>) -> Self {
        Self { entries, projects }
    }
}

impl<E: TimeEntryRepository, P: ProjectRepository> TimeEntryServiceImpl<E, P> {
    async fn ensure_project_owned(
        &self,
        user_id: &UserId,
        draft: &TimeEntryDraft,
    ) -> Result<(), TimeEntryError> {
        match self.projects.get(user_id, &draft.project_id).await? {
            Some(_) => Ok(()),
            None => Err(TimeEntryError::ProjectNotFoundOrUnauthorized),
        }
    }
}

#[async_trait]
impl<E: TimeEntryRepository, P: ProjectRepository> TimeEntryService for TimeEntryServiceImpl<E, P> {
    async fn create_entry(
        &self,
        user_id: &UserId,
        draft: TimeEntryDraft,
    ) -> Result<TimeEntry, TimeEntryError> {
        draft.validate()?;
        self.ensure_project_owned(user_id, &draft).await?;

        let entry = self.entries.insert_within_cap(user_id, &draft).await?;
        tracing::debug!(entry_id = %entry.id, %user_id, date = %entry.date, "time entry created");

        Ok(entry)
    }

    async fn update_entry(
        &self,
        user_id: &UserId,
        id: &TimeEntryId,
        draft: TimeEntryDraft,
    ) -> Result<TimeEntry, TimeEntryError> {
        draft.validate()?;
        if self.entries.get(user_id, id).await?.is_none() {
            return Err(TimeEntryError::NotFound);
        }
        self.ensure_project_owned(user_id, &draft).await?;

        let entry = self.entries.update_within_cap(user_id, id, &draft).await?;
        tracing::debug!(entry_id = %entry.id, %user_id, date = %entry.date, "time entry updated");

        Ok(entry)
    }

    async fn delete_entry(
        &self,
        user_id: &UserId,
        id: &TimeEntryId,
    ) -> Result<(), TimeEntryError> {
        // No cap check: removing hours can never push a day over the limit
        if !self.entries.delete(user_id, id).await? {
            return Err(TimeEntryError::NotFound);
        }

        tracing::debug!(entry_id = %id, %user_id, "time entry deleted");
        Ok(())
    }

    async fn get_entry(
        &self,
        user_id: &UserId,
        id: &TimeEntryId,
    ) -> Result<TimeEntry, TimeEntryError> {
        self.entries
            .get(user_id, id)
            .await?
            .ok_or(TimeEntryError::NotFound)
    }

    async fn list_entries(
        &self,
        user_id: &UserId,
        filter: &TimeEntryFilter,
    ) -> Result<Vec<TimeEntry>, TimeEntryError> {
        filter.bounds()?;

        let mut entries = self.entries.list(user_id, filter).await?;
        sort_newest_first(&mut entries);

        Ok(entries)
    }
}
