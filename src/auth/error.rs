// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication and claim-extraction errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Failure to derive an authorization context from verified claims.
///
/// Both variants fail closed: the request is rejected rather than served
/// with a reduced set of authorities.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClaimError {
    /// A required claim is absent from the token.
    #[error("expected claim '{0}' not found in token")]
    MissingClaim(String),
    /// A claim is present but does not have the expected shape.
    #[error("claim '{claim}' is malformed: {reason}")]
    MalformedClaim { claim: String, reason: String },
}

impl ClaimError {
    pub(crate) fn malformed(claim: impl Into<String>, reason: impl Into<String>) -> Self {
        ClaimError::MalformedClaim {
            claim: claim.into(),
            reason: reason.into(),
        }
    }
}

/// Authentication error type returned by the HTTP integration points.
#[derive(Debug)]
pub enum AuthError {
    /// No verified claims were attached to a protected request
    MissingClaims,
    /// Claims were present but could not be turned into an authorization context
    InvalidClaims(ClaimError),
    /// Invalid authorization or claims header format
    InvalidAuthHeader,
    /// Token or forwarded payload is malformed
    MalformedToken,
    /// Caller lacks the authority required by the operation
    InsufficientPermissions,
}

#[derive(Serialize)]
struct AuthErrorBody {
    error: String,
    error_code: String,
}

impl AuthError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingClaims => "missing_claims",
            AuthError::InvalidClaims(ClaimError::MissingClaim(_)) => "missing_claim",
            AuthError::InvalidClaims(ClaimError::MalformedClaim { .. }) => "malformed_claim",
            AuthError::InvalidAuthHeader => "invalid_auth_header",
            AuthError::MalformedToken => "malformed_token",
            AuthError::InsufficientPermissions => "insufficient_permissions",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingClaims
            | AuthError::InvalidClaims(_)
            | AuthError::InvalidAuthHeader
            | AuthError::MalformedToken => StatusCode::UNAUTHORIZED,
            AuthError::InsufficientPermissions => StatusCode::FORBIDDEN,
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingClaims => write!(f, "Verified token claims are required"),
            AuthError::InvalidClaims(err) => write!(f, "Token claims rejected: {err}"),
            AuthError::InvalidAuthHeader => write!(f, "Invalid authorization header format"),
            AuthError::MalformedToken => write!(f, "Token is malformed"),
            AuthError::InsufficientPermissions => {
                write!(f, "Insufficient permissions for this operation")
            }
        }
    }
}

impl std::error::Error for AuthError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AuthError::InvalidClaims(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ClaimError> for AuthError {
    fn from(err: ClaimError) -> Self {
        AuthError::InvalidClaims(err)
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(AuthErrorBody {
            error: self.to_string(),
            error_code: self.error_code().to_string(),
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn missing_claim_returns_401() {
        let err = AuthError::from(ClaimError::MissingClaim("resource_access".to_string()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(body["error_code"], "missing_claim");
        assert_eq!(
            body["error"],
            "Token claims rejected: expected claim 'resource_access' not found in token"
        );
    }

    #[test]
    fn malformed_claim_is_unauthorized() {
        let err = AuthError::from(ClaimError::malformed("resource_access", "expected an object"));
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.error_code(), "malformed_claim");
    }

    #[tokio::test]
    async fn insufficient_permissions_returns_403() {
        let response = AuthError::InsufficientPermissions.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
