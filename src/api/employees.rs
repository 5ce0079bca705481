// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Employee endpoints.
//!
//! Each one requires `ROLE_USER` and answers from the request-scoped
//! authorization context.

use std::collections::BTreeSet;

use axum::Json;

use crate::auth::{current, Auth, RequireAuthority, UserRole};
use crate::models::AuthorizationContextResponse;

/// Name of the authenticated caller.
#[utoipa::path(
    get,
    path = "/api/v1/employees/username",
    tag = "Employees",
    responses(
        (status = 200, description = "Principal name", body = String),
        (status = 401, description = "Missing or rejected token claims", body = crate::models::ErrorResponse),
        (status = 403, description = "ROLE_USER required", body = crate::models::ErrorResponse),
    )
)]
pub async fn username(_: RequireAuthority<UserRole>) -> Json<String> {
    Json(current::current_principal())
}

/// Authorities granted to the caller.
#[utoipa::path(
    get,
    path = "/api/v1/employees/roles",
    tag = "Employees",
    responses(
        (status = 200, description = "Granted authorities", body = [String]),
        (status = 401, description = "Missing or rejected token claims", body = crate::models::ErrorResponse),
        (status = 403, description = "ROLE_USER required", body = crate::models::ErrorResponse),
    )
)]
pub async fn roles(_: RequireAuthority<UserRole>) -> Json<BTreeSet<String>> {
    Json(current::current_authorities())
}

/// Full authorization context of the caller, audiences included.
#[utoipa::path(
    get,
    path = "/api/v1/employees/me",
    tag = "Employees",
    responses(
        (status = 200, description = "Authorization context", body = AuthorizationContextResponse),
        (status = 401, description = "Missing or rejected token claims", body = crate::models::ErrorResponse),
        (status = 403, description = "ROLE_USER required", body = crate::models::ErrorResponse),
    )
)]
pub async fn me(
    _: RequireAuthority<UserRole>,
    Auth(ctx): Auth,
) -> Json<AuthorizationContextResponse> {
    Json(ctx.into())
}
