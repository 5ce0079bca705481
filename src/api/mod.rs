// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{routing::get, Json, Router};
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::{
    auth,
    models::{AuthorizationContextResponse, ErrorResponse, HealthResponse},
    state::AppState,
};

pub mod employees;
pub mod health;

pub fn router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/health/live", get(health::liveness))
        .route("/api-doc/openapi.json", get(openapi))
        .route("/api/v1/employees/username", get(employees::username))
        .route("/api/v1/employees/roles", get(employees::roles))
        .route("/api/v1/employees/me", get(employees::me));

    // API_MATCHER decides which of these paths need claims.
    let routes = if state.security.enabled {
        auth::middleware::apply(routes, state.clone())
    } else {
        tracing::warn!("Security disabled: API requests run without an authorization context");
        routes
    };

    routes
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::liveness,
        employees::username,
        employees::roles,
        employees::me
    ),
    components(
        schemas(
            HealthResponse,
            AuthorizationContextResponse,
            ErrorResponse
        )
    ),
    tags(
        (name = "Health", description = "Liveness probe"),
        (name = "Employees", description = "Caller identity and authorities")
    )
)]
struct ApiDoc;
