use async_trait::async_trait;

use crate::domain::{
    models::{TimeEntry, TimeEntryDraft, TimeEntryFilter, TimeEntryId, UserId},
    TimeEntryError,
};

/// Inbound port for recording billable hours.
///
/// This trait defines the use cases that HTTP handlers can invoke. The
/// `user_id` is the owner the caller has already been authorized to act for.
#[async_trait]
pub trait TimeEntryService: Send + Sync + 'static {
    /// Record a new entry.
    ///
    /// Orchestrates: shape validation → project ownership → daily cap → insert.
    async fn create_entry(
        &self,
        user_id: &UserId,
        draft: TimeEntryDraft,
    ) -> Result<TimeEntry, TimeEntryError>;

    /// Replace the fields of an existing entry, re-checking the daily cap
    /// for the (possibly new) date.
    async fn update_entry(
        &self,
        user_id: &UserId,
        id: &TimeEntryId,
        draft: TimeEntryDraft,
    ) -> Result<TimeEntry, TimeEntryError>;

    async fn delete_entry(&self, user_id: &UserId, id: &TimeEntryId)
        -> Result<(), TimeEntryError>;

    async fn get_entry(
        &self,
        user_id: &UserId,
        id: &TimeEntryId,
    ) -> Result<TimeEntry, TimeEntryError>;

    /// Entries matching `filter`, newest date first.
    async fn list_entries(
        &self,
        user_id: &UserId,
        filter: &TimeEntryFilter,
    ) -> Result<Vec<TimeEntry>, TimeEntryError>;
}
