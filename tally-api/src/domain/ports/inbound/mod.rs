mod projects;
mod reporting;
mod time_entries;

pub use projects::*;
pub use reporting::*;
pub use time_entries::*;
