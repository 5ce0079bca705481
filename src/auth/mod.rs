// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authorization Module
//!
//! Turns verified token claims into a request-scoped authorization context.
//!
//! ## Auth Flow
//!
//! 1. The gateway verifies the bearer token (signature, expiry, issuer)
//! 2. It forwards the token payload; `forwarded` decodes it into
//!    [`VerifiedClaims`] (principal + raw claims)
//! 3. `middleware` runs [`ClaimExtractor`]:
//!    - `resource_access` child keys → audiences
//!    - `resource_access.<client>.roles` → `ROLE_<name>` authorities
//! 4. The resulting [`AuthorizationContext`] is installed for the rest of the
//!    request; handlers read it through `current` or the extractors
//!
//! ## Security
//!
//! - A token without `resource_access` is rejected, never downgraded
//! - Malformed claim shapes are rejected the same way
//! - Contexts are per request and never cached

pub mod authority;
pub mod claims;
pub mod context;
pub mod current;
#[cfg(feature = "dev")]
pub mod dev;
pub mod error;
pub mod extractor;
pub mod forwarded;
pub mod identity;
pub mod middleware;

pub use authority::{Authority, UserRole};
pub use claims::{
    extract_authorization_context, ClaimExtractor, RawClaims, AUTHORITY_PREFIX,
    RESOURCE_ACCESS_CLAIM, ROLES_CLAIM,
};
pub use context::{AuthorizationContext, ANONYMOUS};
pub use current::{current_authorities, current_principal};
pub use error::{AuthError, ClaimError};
pub use extractor::{Auth, RequireAuthority};
pub use identity::VerifiedClaims;
