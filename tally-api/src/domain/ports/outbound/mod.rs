mod projects;
mod time_entries;
mod yearly_targets;

pub use projects::*;
pub use time_entries::*;
pub use yearly_targets::*;
