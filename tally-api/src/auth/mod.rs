mod backend;
mod extractor;
mod policy;

pub use backend::{AuthError, TokenVerifier};
pub use extractor::AuthUser;
pub use policy::{authorize, Access, Capability};

#[cfg(test)]
pub(crate) use backend::issue_token;
