use axum::{
    RequestPartsExt,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};

use crate::error::AppError;
use crate::repositories::UserRepository;
use crate::state::AppState;
use crate::utils::jwt::TokenClaims;

/// Verified session principal of the calling user.
pub struct AuthClaims(pub TokenClaims);

impl<S> FromRequestParts<S> for AuthClaims
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);

        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| AppError::unauthenticated("Missing bearer token"))?;

        let mut claims = state
            .jwt
            .verify(bearer.token())
            .map_err(|e| AppError::unauthenticated(format!("Invalid session: {}", e)))?;

        let revoked = state
            .blacklist
            .check_jwt_in_blacklist(&claims.sub, bearer.token())
            .await?;
        if revoked {
            return Err(AppError::unauthenticated("Session has been revoked"));
        }

        // Roles come from the account, not from when the token was issued
        let user = UserRepository::new(&state.db)
            .find_by_id(claims.user_id()?)
            .await?
            .ok_or_else(|| AppError::unauthenticated("Account no longer exists"))?;
        claims.sync_with(&user);

        Ok(AuthClaims(claims))
    }
}
