// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Normalized authorization context.

use std::collections::BTreeSet;

use serde::Serialize;

/// Principal name reported for callers without an authenticated identity.
pub const ANONYMOUS: &str = "anonymous";

/// Principal, authorities and audiences derived from one verified token.
///
/// Only [`ClaimExtractor`](super::ClaimExtractor) can build one, so every
/// context that reaches request-scoped storage came out of a successful
/// extraction. It is created per request and must not be cached: the
/// next token may carry different roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorizationContext {
    principal: String,
    authorities: BTreeSet<String>,
    audiences: BTreeSet<String>,
}

impl AuthorizationContext {
    pub(crate) fn new(
        principal: Option<&str>,
        authorities: BTreeSet<String>,
        audiences: BTreeSet<String>,
    ) -> Self {
        let principal = principal
            .filter(|p| !p.trim().is_empty())
            .unwrap_or(ANONYMOUS)
            .to_string();

        Self {
            principal,
            authorities,
            audiences,
        }
    }

    /// Principal identifier, or [`ANONYMOUS`] when the transport layer
    /// supplied none.
    pub fn principal(&self) -> &str {
        &self.principal
    }

    pub fn authorities(&self) -> &BTreeSet<String> {
        &self.authorities
    }

    /// Client/service names the token is scoped to.
    pub fn audiences(&self) -> &BTreeSet<String> {
        &self.audiences
    }

    pub fn has_authority(&self, authority: &str) -> bool {
        self.authorities.contains(authority)
    }

    /// True when at least one of `authorities` was granted.
    pub fn has_any_authority(&self, authorities: &[&str]) -> bool {
        authorities.iter().any(|a| self.has_authority(a))
    }

    pub fn is_anonymous(&self) -> bool {
        self.principal == ANONYMOUS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn blank_principal_falls_back_to_anonymous() {
        let ctx = AuthorizationContext::new(Some("  "), BTreeSet::new(), BTreeSet::new());
        assert_eq!(ctx.principal(), ANONYMOUS);
        assert!(ctx.is_anonymous());

        let ctx = AuthorizationContext::new(None, BTreeSet::new(), BTreeSet::new());
        assert_eq!(ctx.principal(), ANONYMOUS);
    }

    #[test]
    fn principal_is_kept_verbatim() {
        let ctx = AuthorizationContext::new(Some(" jdoe"), BTreeSet::new(), BTreeSet::new());
        assert_eq!(ctx.principal(), " jdoe");
        assert!(!ctx.is_anonymous());
    }

    #[test]
    fn has_any_authority_matches_one_of() {
        let ctx = AuthorizationContext::new(
            Some("jdoe"),
            set(&["ROLE_viewer"]),
            set(&["service-a"]),
        );
        assert!(ctx.has_any_authority(&["ROLE_admin", "ROLE_viewer"]));
        assert!(!ctx.has_any_authority(&["ROLE_admin"]));
        assert!(!ctx.has_any_authority(&[]));
        assert!(!ctx.is_anonymous());
    }
}
