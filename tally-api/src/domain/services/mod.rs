mod projects;
mod reporting;
mod time_entries;

pub use projects::ProjectServiceImpl;
pub use reporting::ReportingServiceImpl;
pub use time_entries::TimeEntryServiceImpl;
