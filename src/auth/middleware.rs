// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authorization middleware for Axum.
//!
//! The layers wrap the whole router; each one lets requests outside the
//! protected path prefix ([`SecurityConfig::protects`](crate::config::SecurityConfig::protects)) through untouched.
//! For protected requests:
//!
//! 1. a claims decoder (`forwarded`, or `dev` in development builds) turns
//!    the transport's verified token into [`VerifiedClaims`];
//! 2. [`install_authorization`] extracts the [`AuthorizationContext`] and
//!    runs the rest of the request inside its scope.
//!
//! A failed extraction rejects the request with 401; it never continues as
//! an unprivileged caller.

use axum::{
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    Router,
};

use super::{current, forwarded, AuthError, AuthorizationContext, VerifiedClaims};
use crate::state::AppState;

/// Apply the authorization layers to `router`.
///
/// ```rust,ignore
/// let app = auth::middleware::apply(routes, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    let router = router
        .layer(middleware::from_fn_with_state(
            state.clone(),
            install_authorization,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            forwarded::decode_forwarded_claims,
        ));

    #[cfg(feature = "dev")]
    let router = router.layer(middleware::from_fn_with_state(
        state,
        super::dev::decode_bearer_unverified,
    ));

    router
}

/// Extract the authorization context for a protected request and install it
/// for the downstream handler.
///
/// Requests outside the configured API path prefix pass through without a
/// context.
pub async fn install_authorization(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    if !state.security.protects(request.uri().path()) {
        return Ok(next.run(request).await);
    }

    let context = authorize(&state, request.extensions().get::<VerifiedClaims>())?;

    // middleware → extractor
    request.extensions_mut().insert(context.clone());

    Ok(current::scope(context, next.run(request)).await)
}

fn authorize(
    state: &AppState,
    verified: Option<&VerifiedClaims>,
) -> Result<AuthorizationContext, AuthError> {
    let verified = verified.ok_or_else(|| {
        tracing::warn!("Protected request carries no verified claims");
        AuthError::MissingClaims
    })?;

    state
        .extractor
        .extract(verified.principal.as_deref(), &verified.claims)
        .map_err(|err| {
            tracing::warn!(error = %err, "Rejecting authentication: claim extraction failed");
            AuthError::from(err)
        })
}
