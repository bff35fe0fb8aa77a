mod projects;
mod time_entries;
mod yearly_targets;

pub use projects::PostgresProjectRepository;
pub use time_entries::PostgresTimeEntryRepository;
pub use yearly_targets::PostgresYearlyTargetRepository;
