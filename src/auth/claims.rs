// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Verified token claims and authority derivation.
//!
//! The identity provider nests per-client roles under a resource-access
//! claim:
//!
//! ```json
//! {
//!   "sub": "jdoe",
//!   "resource_access": {
//!     "service-a": { "roles": ["admin", "viewer"] },
//!     "service-b": { "roles": ["viewer"] }
//!   }
//! }
//! ```
//!
//! Every child key of `resource_access` is an audience and every role under
//! it becomes a `ROLE_`-prefixed authority.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::context::AuthorizationContext;
use super::error::ClaimError;

/// Claim key holding per-client authorization data.
pub const RESOURCE_ACCESS_CLAIM: &str = "resource_access";

/// Key of the role list inside each resource-access entry.
pub const ROLES_CLAIM: &str = "roles";

/// Prefix prepended to every role name. Fixed: the authority guards are
/// named against it.
pub const AUTHORITY_PREFIX: &str = "ROLE_";

/// Decoded token payload.
///
/// Always a JSON object at the top level; nested values stay untyped until
/// the extractor inspects them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawClaims(Map<String, Value>);

impl RawClaims {
    pub fn new(claims: Map<String, Value>) -> Self {
        Self(claims)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// String-valued claim, `None` when absent or not a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl TryFrom<Value> for RawClaims {
    type Error = ClaimError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(claims) => Ok(Self(claims)),
            other => Err(ClaimError::malformed(
                "<root>",
                format!("expected an object, found {}", kind(&other)),
            )),
        }
    }
}

/// Derives [`AuthorizationContext`] values from verified claims.
///
/// Defaults to the `resource_access` / `roles` layout; the builder methods
/// adapt it to providers that name things differently. Authorities always
/// carry [`AUTHORITY_PREFIX`].
#[derive(Debug, Clone)]
pub struct ClaimExtractor {
    resource_access_key: String,
    roles_key: String,
}

impl Default for ClaimExtractor {
    fn default() -> Self {
        Self {
            resource_access_key: RESOURCE_ACCESS_CLAIM.to_string(),
            roles_key: ROLES_CLAIM.to_string(),
        }
    }
}

impl ClaimExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resource_access_key(mut self, key: impl Into<String>) -> Self {
        self.resource_access_key = key.into();
        self
    }

    pub fn with_roles_key(mut self, key: impl Into<String>) -> Self {
        self.roles_key = key.into();
        self
    }

    pub fn resource_access_key(&self) -> &str {
        &self.resource_access_key
    }

    pub fn roles_key(&self) -> &str {
        &self.roles_key
    }

    /// Build the authorization context for one request.
    ///
    /// `principal` is the identity the transport layer already resolved
    /// from the standard subject/username claims; it is not re-read from
    /// `claims`. A missing or blank principal becomes the anonymous
    /// sentinel.
    ///
    /// # Errors
    ///
    /// - [`ClaimError::MissingClaim`] when the resource-access claim is absent
    /// - [`ClaimError::MalformedClaim`] when it, an entry, or a role list has
    ///   the wrong shape
    pub fn extract(
        &self,
        principal: Option<&str>,
        claims: &RawClaims,
    ) -> Result<AuthorizationContext, ClaimError> {
        tracing::debug!(
            claims = ?claims.keys().collect::<Vec<_>>(),
            "Begin authorization context extraction"
        );

        let entries = self.resource_access(claims)?;

        let audiences: BTreeSet<String> = entries.keys().cloned().collect();

        let mut authorities = BTreeSet::new();
        for (audience, entry) in entries {
            for role in self.roles_of(audience, entry)? {
                authorities.insert(format!("{AUTHORITY_PREFIX}{role}"));
            }
        }

        let context = AuthorizationContext::new(principal, authorities, audiences);
        tracing::debug!(
            principal = %context.principal(),
            audiences = ?context.audiences(),
            authorities = ?context.authorities(),
            "End authorization context extraction"
        );
        Ok(context)
    }

    fn resource_access<'a>(&self, claims: &'a RawClaims) -> Result<&'a Map<String, Value>, ClaimError> {
        match claims.get(&self.resource_access_key) {
            None => Err(ClaimError::MissingClaim(self.resource_access_key.clone())),
            Some(Value::Object(entries)) => Ok(entries),
            Some(other) => Err(ClaimError::malformed(
                &self.resource_access_key,
                format!("expected an object, found {}", kind(other)),
            )),
        }
    }

    /// Role names granted under one audience. A missing role list grants
    /// nothing; anything other than a list of non-empty strings is rejected.
    fn roles_of<'a>(&self, audience: &str, entry: &'a Value) -> Result<Vec<&'a str>, ClaimError> {
        let path = || format!("{}.{}", self.resource_access_key, audience);

        let entry = match entry {
            Value::Object(entry) => entry,
            other => {
                return Err(ClaimError::malformed(
                    path(),
                    format!("expected an object, found {}", kind(other)),
                ))
            }
        };

        let roles = match entry.get(&self.roles_key) {
            None => return Ok(Vec::new()),
            Some(Value::Array(roles)) => roles,
            Some(other) => {
                return Err(ClaimError::malformed(
                    format!("{}.{}", path(), self.roles_key),
                    format!("expected an array, found {}", kind(other)),
                ))
            }
        };

        roles
            .iter()
            .map(|role| match role {
                Value::String(name) if !name.is_empty() => Ok(name.as_str()),
                Value::String(_) => Err(ClaimError::malformed(
                    format!("{}.{}", path(), self.roles_key),
                    "empty role name",
                )),
                other => Err(ClaimError::malformed(
                    format!("{}.{}", path(), self.roles_key),
                    format!("expected role names, found {}", kind(other)),
                )),
            })
            .collect()
    }
}

/// Extract with the default claim layout.
pub fn extract_authorization_context(
    principal: Option<&str>,
    claims: &RawClaims,
) -> Result<AuthorizationContext, ClaimError> {
    ClaimExtractor::default().extract(principal, claims)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
