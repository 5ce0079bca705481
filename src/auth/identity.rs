// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Base identity handed over by the verifying transport layer.

use super::claims::RawClaims;

/// Claims, in lookup order, that name the authenticated user.
///
/// The identity provider maps the account username to `user_name`;
/// `preferred_username` and `sub` cover providers without that mapper.
const PRINCIPAL_CLAIMS: [&str; 3] = ["user_name", "preferred_username", "sub"];

/// Claims whose signature and expiry were checked upstream, plus the
/// principal name resolved from the standard subject/username claims.
///
/// Whatever sits in front of the authorization middleware inserts this into
/// the request extensions.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedClaims {
    pub principal: Option<String>,
    pub claims: RawClaims,
}

impl VerifiedClaims {
    pub fn new(principal: Option<String>, claims: RawClaims) -> Self {
        Self { principal, claims }
    }

    /// Resolve the principal from the usual username claims.
    pub fn from_claims(claims: RawClaims) -> Self {
        let principal = PRINCIPAL_CLAIMS
            .iter()
            .filter_map(|key| claims.get_str(key))
            .find(|name| !name.trim().is_empty())
            .map(str::to_string);

        Self { principal, claims }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn claims(value: serde_json::Value) -> RawClaims {
        RawClaims::try_from(value).unwrap()
    }

    #[test]
    fn prefers_user_name_over_subject() {
        let verified = VerifiedClaims::from_claims(claims(json!({
            "sub": "f3a1c2",
            "preferred_username": "jdoe",
            "user_name": "john.doe"
        })));
        assert_eq!(verified.principal.as_deref(), Some("john.doe"));
    }

    #[test]
    fn falls_back_to_subject() {
        let verified = VerifiedClaims::from_claims(claims(json!({
            "sub": "alice",
            "user_name": ""
        })));
        assert_eq!(verified.principal.as_deref(), Some("alice"));
    }

    #[test]
    fn resolved_name_is_not_rewritten() {
        let verified = VerifiedClaims::from_claims(claims(json!({
            "preferred_username": "   ",
            "sub": " jdoe"
        })));
        assert_eq!(verified.principal.as_deref(), Some(" jdoe"));
    }

    #[test]
    fn no_identity_claims_means_no_principal() {
        let verified = VerifiedClaims::from_claims(claims(json!({ "resource_access": {} })));
        assert!(verified.principal.is_none());
    }
}
