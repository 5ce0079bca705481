// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Resource Access Server - verified token claims to local authorization
//!
//! This crate turns the claims of an upstream-verified access token into a
//! request-scoped authorization context (principal, `ROLE_` authorities,
//! audiences) and exposes it to handlers.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Claim extraction, request-scoped context, guards
//! - `config` - Environment configuration
//! - `models` - API response types

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod state;
