// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Jyotisa Compute API: sidereal (Vedic) astrology over HTTP
//!
//! This crate provides an analytic ephemeris plus the panchanga, birth
//! chart, dasha, transit and muhurta calculations built on it.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::PanchangaService;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub panchanga_service: PanchangaService,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let panchanga_service = PanchangaService::new(config.panchanga_cache_capacity);
        Self {
            config,
            panchanga_service,
        }
    }
}
