use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::UserId;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Display, EnumString)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[strum(ascii_case_insensitive, serialize = "admin")]
    Admin,
    #[strum(ascii_case_insensitive, serialize = "user")]
    User,
}

/// The caller of a request, as vouched for by the identity token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub role: Role,
}

impl Identity {
    pub fn new(user_id: impl Into<UserId>, role: Role) -> Self {
        Self {
            user_id: user_id.into(),
            role,
        }
    }
}
