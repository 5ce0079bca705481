// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Response structures used by the REST API. All types derive `Serialize`
//! and `ToSchema` for JSON handling and OpenAPI documentation.

use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::AuthorizationContext;

/// Liveness response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// The caller's authorization context as seen by this service.
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthorizationContextResponse {
    /// Principal name (`anonymous` when the token carried none)
    pub principal: String,
    /// Granted authorities, `ROLE_` prefixed
    pub authorities: Vec<String>,
    /// Clients the token is scoped to
    pub audiences: Vec<String>,
}

impl From<AuthorizationContext> for AuthorizationContextResponse {
    fn from(ctx: AuthorizationContext) -> Self {
        Self {
            principal: ctx.principal().to_string(),
            authorities: ctx.authorities().iter().cloned().collect(),
            audiences: ctx.audiences().iter().cloned().collect(),
        }
    }
}

/// Error body returned for authentication and authorization failures.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub error_code: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{extract_authorization_context, RawClaims};
    use serde_json::json;

    #[test]
    fn context_response_lists_sorted_sets() {
        let claims = RawClaims::try_from(json!({
            "resource_access": {
                "service-b": { "roles": ["viewer"] },
                "service-a": { "roles": ["viewer", "admin"] }
            }
        }))
        .unwrap();
        let ctx = extract_authorization_context(Some("jdoe"), &claims).unwrap();

        let response = AuthorizationContextResponse::from(ctx);
        assert_eq!(response.principal, "jdoe");
        assert_eq!(response.authorities, vec!["ROLE_admin", "ROLE_viewer"]);
        assert_eq!(response.audiences, vec!["service-a", "service-b"]);
    }
}
