use std::{ops::Deref, sync::Arc};

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use super::{authorize, Access, AuthError, TokenVerifier};
use crate::{
    domain::models::{Identity, UserId},
    routes::ApiError,
};

/// A custom Axum extractor that verifies the bearer token and yields the
/// caller's [`Identity`]. Returns 401 Unauthorized when the header is
/// missing or the token does not verify.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    identity: Identity,
}

impl AuthUser {
    /// The caller's own id, after checking the caller may `access` it.
    pub fn own(&self, access: Access) -> Result<UserId, ApiError> {
        self.on_behalf_of(access, self.identity.user_id)
    }

    /// `owner`'s id, after checking the caller may `access` their data.
    pub fn on_behalf_of(&self, access: Access, owner: UserId) -> Result<UserId, ApiError> {
        Ok(authorize(&self.identity, access, owner)?)
    }
}

impl Deref for AuthUser {
    type Target = Identity;

    fn deref(&self) -> &Self::Target {
        &self.identity
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    Arc<TokenVerifier>: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AuthError::MissingToken)?;

        let verifier = Arc::<TokenVerifier>::from_ref(state);
        let identity = verifier.verify(bearer.token())?;

        Ok(AuthUser { identity })
    }
}
