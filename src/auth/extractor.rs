// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractors for authorization checks.
//!
//! Use `RequireAuthority` in handlers to demand an authority:
//!
//! ```rust,ignore
//! async fn my_handler(_: RequireAuthority<UserRole>) -> impl IntoResponse {
//!     // caller holds ROLE_USER
//! }
//! ```

use std::marker::PhantomData;

use axum::{extract::FromRequestParts, http::request::Parts};

use super::{current, Authority, AuthorizationContext, AuthError};

/// Extractor for the authorization context installed by the middleware.
///
/// Rejects with 401 when the request never went through extraction.
pub struct Auth(pub AuthorizationContext);

impl<S> FromRequestParts<S> for Auth
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthorizationContext>()
            .cloned()
            .map(Auth)
            .ok_or(AuthError::MissingClaims)
    }
}

/// Extractor that requires the current caller to hold `A`.
///
/// The check goes through the request-scoped accessor, so an anonymous
/// caller is refused with 403 like any other caller lacking the authority.
pub struct RequireAuthority<A: Authority>(PhantomData<A>);

impl<S, A> FromRequestParts<S> for RequireAuthority<A>
where
    S: Send + Sync,
    A: Authority,
{
    type Rejection = AuthError;

    async fn from_request_parts(_parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if !current::has_authority(A::NAME) {
            tracing::debug!(
                principal = %current::current_principal(),
                required = A::NAME,
                "Access denied"
            );
            return Err(AuthError::InsufficientPermissions);
        }

        Ok(RequireAuthority(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{extract_authorization_context, RawClaims, UserRole};
    use axum::http::Request;
    use serde_json::json;

    struct AuditorRole;

    impl Authority for AuditorRole {
        const NAME: &'static str = "ROLE_AUDITOR";
    }

    fn parts() -> Parts {
        Request::builder()
            .uri("/test")
            .body(())
            .unwrap()
            .into_parts()
            .0
    }

    fn user_context() -> AuthorizationContext {
        let claims = RawClaims::try_from(json!({
            "resource_access": { "app1": { "roles": ["USER"] } }
        }))
        .unwrap();
        extract_authorization_context(Some("alice"), &claims).unwrap()
    }

    #[tokio::test]
    async fn auth_requires_installed_context() {
        let mut parts = parts();
        let result = Auth::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AuthError::MissingClaims)));
    }

    #[tokio::test]
    async fn auth_reads_context_from_extensions() {
        let mut parts = parts();
        parts.extensions.insert(user_context());

        let Auth(ctx) = Auth::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(ctx.principal(), "alice");
    }

    #[tokio::test]
    async fn require_authority_allows_holder() {
        let result = current::scope(user_context(), async {
            let mut parts = parts();
            RequireAuthority::<UserRole>::from_request_parts(&mut parts, &()).await
        })
        .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn require_authority_rejects_missing_authority() {
        let result = current::scope(user_context(), async {
            let mut parts = parts();
            RequireAuthority::<AuditorRole>::from_request_parts(&mut parts, &()).await
        })
        .await;
        assert!(matches!(result, Err(AuthError::InsufficientPermissions)));
    }

    #[tokio::test]
    async fn require_authority_rejects_anonymous() {
        let mut parts = parts();
        let result = RequireAuthority::<UserRole>::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AuthError::InsufficientPermissions)));
    }
}
