//! Time entry repository port (outbound).
//!
//! Defines the interface for persisting time entries.

use async_trait::async_trait;

use crate::domain::{
    models::{TimeEntry, TimeEntryDraft, TimeEntryFilter, TimeEntryId, UserId},
    TimeEntryError,
};

/// Outbound port for time entry persistence.
///
/// Every method is scoped to the owning user: entries belonging to someone
/// else behave exactly like entries that do not exist.
#[async_trait]
pub trait TimeEntryRepository: Send + Sync + 'static {
    async fn get(
        &self,
        user_id: &UserId,
        id: &TimeEntryId,
    ) -> Result<Option<TimeEntry>, TimeEntryError>;

    /// Entries matching `filter`. No ordering is guaranteed.
    async fn list(
        &self,
        user_id: &UserId,
        filter: &TimeEntryFilter,
    ) -> Result<Vec<TimeEntry>, TimeEntryError>;

    /// Insert a new entry if it keeps the user's day within the daily cap.
    ///
    /// Implementations must read the day's total and write the entry
    /// atomically with respect to other writers for the same user and date,
    /// and must leave storage untouched when the cap check fails.
    async fn insert_within_cap(
        &self,
        user_id: &UserId,
        draft: &TimeEntryDraft,
    ) -> Result<TimeEntry, TimeEntryError>;

    /// Replace an entry's fields if the target day stays within the cap.
    ///
    /// The entry itself is excluded from the day's total. Same atomicity
    /// requirements as [`TimeEntryRepository::insert_within_cap`]. Returns
    /// [`TimeEntryError::NotFound`] for unknown or foreign entries.
    async fn update_within_cap(
        &self,
        user_id: &UserId,
        id: &TimeEntryId,
        draft: &TimeEntryDraft,
    ) -> Result<TimeEntry, TimeEntryError>;

    /// Returns `false` if no entry was deleted.
    async fn delete(&self, user_id: &UserId, id: &TimeEntryId) -> Result<bool, TimeEntryError>;
}
