// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Claims forwarded by the verifying gateway.
//!
//! The gateway in front of this service checks the token signature and
//! expiry, then forwards the JWT payload base64url-encoded in a request
//! header (`x-jwt-payload` by default). This layer decodes it into
//! [`VerifiedClaims`] for the authorization middleware. Requests without
//! the header, or outside the protected path prefix, pass through untouched.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine,
};

use super::{AuthError, RawClaims, VerifiedClaims};
use crate::state::AppState;

/// base64url, padded or not.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Middleware decoding the forwarded payload header.
pub async fn decode_forwarded_claims(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    if !state.security.protects(request.uri().path()) {
        return Ok(next.run(request).await);
    }

    let header = request
        .headers()
        .get(state.security.claims_header.as_str())
        .map(|value| value.to_str().map(str::to_owned));

    let encoded = match header {
        None => return Ok(next.run(request).await),
        Some(Ok(encoded)) => encoded,
        Some(Err(_)) => return Err(AuthError::InvalidAuthHeader),
    };

    let verified = decode_payload(&encoded)?;
    request.extensions_mut().insert(verified);

    Ok(next.run(request).await)
}

/// Decode a base64url JSON payload into verified claims.
pub fn decode_payload(encoded: &str) -> Result<VerifiedClaims, AuthError> {
    let bytes = PAYLOAD_ENGINE.decode(encoded.trim()).map_err(|e| {
        tracing::warn!(error = %e, "Forwarded claims are not valid base64url");
        AuthError::MalformedToken
    })?;

    let claims: RawClaims = serde_json::from_slice(&bytes).map_err(|e| {
        tracing::warn!(error = %e, "Forwarded claims are not a JSON object");
        AuthError::MalformedToken
    })?;

    Ok(VerifiedClaims::from_claims(claims))
}
