// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authorities required by protected operations.

/// An authority string an operation can demand.
///
/// Implemented by zero-sized marker types so the requirement is part of the
/// handler signature (see [`RequireAuthority`](super::RequireAuthority)).
pub trait Authority: Send + Sync + 'static {
    /// Full authority string, prefix included.
    const NAME: &'static str;
}

/// Regular application user (`ROLE_USER`).
#[derive(Debug, Clone, Copy)]
pub struct UserRole;

impl Authority for UserRole {
    const NAME: &'static str = "ROLE_USER";
}
