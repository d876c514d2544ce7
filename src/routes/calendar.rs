// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Calendar routes: panchanga for a civil day and muhurta selection.

use crate::error::Result;
use crate::models::{Ayanamsha, MuhurtaReport, Panchanga};
use crate::services::muhurta::muhurta;
use crate::time_utils::{parse_date, parse_tz};
use crate::AppState;
use axum::{extract::State, routing::post, Json, Router};
use chrono_tz::Tz;
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

/// Rishikesh, the location used when a panchanga request omits one.
pub const DEFAULT_LAT: f64 = 30.0869;
pub const DEFAULT_LON: f64 = 78.2676;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/panchanga", post(post_panchanga))
        .route("/muhurta", post(post_muhurta))
}

/// Resolve the request zone, falling back to the configured default.
pub(crate) fn request_zone(state: &AppState, tz: Option<&str>) -> Result<Tz> {
    match tz {
        Some(name) => Ok(parse_tz(name)?),
        None => Ok(state.config.default_zone()),
    }
}

// ─── Panchanga ───────────────────────────────────────────────

fn default_lat() -> f64 {
    DEFAULT_LAT
}
fn default_lon() -> f64 {
    DEFAULT_LON
}

#[derive(Debug, Deserialize, Validate)]
pub struct PanchangaRequest {
    pub date_iso: String,
    #[serde(default = "default_lat")]
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    #[serde(default = "default_lon")]
    #[validate(range(min = -180.0, max = 180.0))]
    pub lon: f64,
    pub tz: Option<String>,
    #[serde(default)]
    pub ayanamsha: Ayanamsha,
}

/// Panchanga at local sunrise.
async fn post_panchanga(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PanchangaRequest>,
) -> Result<Json<Panchanga>> {
    req.validate()?;
    let date = parse_date(&req.date_iso)?;
    let tz = request_zone(&state, req.tz.as_deref())?;

    tracing::debug!(
        date = %date,
        lat = req.lat,
        lon = req.lon,
        tz = %tz,
        ayanamsha = req.ayanamsha.name(),
        "Computing panchanga"
    );

    let panchanga = state
        .panchanga_service
        .panchanga(date, req.lat, req.lon, tz, req.ayanamsha)?;
    Ok(Json(panchanga.as_ref().clone()))
}

// ─── Muhurta ─────────────────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
pub struct MuhurtaRequest {
    pub date_iso: String,
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lon: f64,
    pub tz: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub activity: String,
}

async fn post_muhurta(
    State(state): State<Arc<AppState>>,
    Json(req): Json<MuhurtaRequest>,
) -> Result<Json<MuhurtaReport>> {
    req.validate()?;
    let date = parse_date(&req.date_iso)?;
    let tz = request_zone(&state, req.tz.as_deref())?;

    let report = muhurta(date, req.lat, req.lon, tz, &req.activity)?;
    Ok(Json(report))
}
