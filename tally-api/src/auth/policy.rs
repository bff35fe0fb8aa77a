//! Capability checks applied before any business logic runs.

use serde::Serialize;
use strum::Display;

use super::AuthError;
use crate::domain::models::{Identity, Role, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Capability {
    ReadOwn,
    WriteOwn,
    ReadAny,
    WriteAny,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
}

fn capabilities(role: Role) -> &'static [Capability] {
    match role {
        Role::Admin => &[
            Capability::ReadOwn,
            Capability::WriteOwn,
            Capability::ReadAny,
            Capability::WriteAny,
        ],
        Role::User => &[Capability::ReadOwn, Capability::WriteOwn],
    }
}

fn required(identity: &Identity, access: Access, owner: &UserId) -> Capability {
    let own = identity.user_id == *owner;
    match (access, own) {
        (Access::Read, true) => Capability::ReadOwn,
        (Access::Write, true) => Capability::WriteOwn,
        (Access::Read, false) => Capability::ReadAny,
        (Access::Write, false) => Capability::WriteAny,
    }
}

/// Resolve the user whose data `identity` may act on.
///
/// Returns `owner` when the caller's role grants the capability for the
/// requested access.
pub fn authorize(identity: &Identity, access: Access, owner: UserId) -> Result<UserId, AuthError> {
    let needed = required(identity, access, &owner);
    if capabilities(identity.role).contains(&needed) {
        Ok(owner)
    } else {
        tracing::debug!(
            user_id = %identity.user_id,
            %owner,
            capability = %needed,
            "capability denied"
        );
        Err(AuthError::Forbidden(needed))
    }
}
