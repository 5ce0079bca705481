// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::auth::ClaimExtractor;
use crate::config::{Config, SecurityConfig};

/// Shared, read-only application state. Nothing per-request lives here.
#[derive(Clone)]
pub struct AppState {
    pub extractor: Arc<ClaimExtractor>,
    pub security: Arc<SecurityConfig>,
}

impl AppState {
    pub fn new(extractor: ClaimExtractor, security: SecurityConfig) -> Self {
        Self {
            extractor: Arc::new(extractor),
            security: Arc::new(security),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.extractor.clone(), config.security.clone())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ClaimExtractor::default(), SecurityConfig::default())
    }
}
