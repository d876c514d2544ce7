// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Natal routes: birth chart, ascendant debug and dasha timelines.

use crate::error::{AppError, Result};
use crate::models::{Ayanamsha, BirthChart, BirthDebug, DashaMethod, DashaTimeline};
use crate::routes::calendar::request_zone;
use crate::services::chart::{birth_chart, birth_debug, parse_vargas};
use crate::services::dasha::dasha_timeline;
use crate::time_utils::{local_to_utc, parse_instant};
use crate::AppState;
use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/birth-chart", post(post_birth_chart))
        .route("/debug/birth", post(post_debug_birth))
        .route("/dasha", post(post_dasha))
}

fn default_vargas() -> Vec<String> {
    vec!["D1".to_string(), "D9".to_string(), "D10".to_string()]
}

#[derive(Debug, Deserialize, Validate)]
pub struct BirthChartRequest {
    pub dob_iso: String,
    /// `HH:MM`, `HH:MM:SS` or `h:MM AM/PM`
    pub tob_iso: String,
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    /// East positive
    #[validate(range(min = -180.0, max = 180.0))]
    pub lon: f64,
    pub tz: Option<String>,
    #[serde(default)]
    pub ayanamsha: Ayanamsha,
    #[serde(default = "default_vargas")]
    #[validate(length(max = 10))]
    pub vargas: Vec<String>,
}

async fn post_birth_chart(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BirthChartRequest>,
) -> Result<Json<BirthChart>> {
    req.validate()?;
    let tz = request_zone(&state, req.tz.as_deref())?;
    let birth = local_to_utc(&req.dob_iso, &req.tob_iso, tz)?;
    let vargas = parse_vargas(&req.vargas)?;

    tracing::debug!(
        birth = %birth,
        lat = req.lat,
        lon = req.lon,
        vargas = vargas.len(),
        "Computing birth chart"
    );

    Ok(Json(birth_chart(
        birth,
        req.lat,
        req.lon,
        tz,
        req.ayanamsha,
        &vargas,
    )))
}

#[derive(Debug, Deserialize, Validate)]
pub struct DebugBirthRequest {
    pub dob_iso: String,
    pub tob_iso: String,
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lon: f64,
    pub tz: Option<String>,
    #[serde(default)]
    pub ayanamsha: Ayanamsha,
}

/// Ascendant computed two ways, for diagnosing chart disagreements.
async fn post_debug_birth(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DebugBirthRequest>,
) -> Result<Json<BirthDebug>> {
    req.validate()?;
    let tz = request_zone(&state, req.tz.as_deref())?;
    let birth = local_to_utc(&req.dob_iso, &req.tob_iso, tz)?;
    Ok(Json(birth_debug(birth, req.lat, req.lon, req.ayanamsha)))
}

fn default_levels() -> u8 {
    3
}

#[derive(Debug, Deserialize, Validate)]
pub struct DashaRequest {
    /// Birth instant; a value without an offset is read in `tz`
    pub start_iso: String,
    #[serde(default)]
    pub method: DashaMethod,
    #[serde(default = "default_levels")]
    #[validate(range(min = 1, max = 3))]
    pub levels: u8,
    pub tz: Option<String>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lon: Option<f64>,
}

async fn post_dasha(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DashaRequest>,
) -> Result<Json<DashaTimeline>> {
    req.validate()?;
    let tz = request_zone(&state, req.tz.as_deref())?;
    let birth = parse_instant(&req.start_iso, tz)?;

    let location = match (req.lat, req.lon) {
        (Some(lat), Some(lon)) => Some((lat, lon)),
        (None, None) => None,
        _ => {
            return Err(AppError::BadRequest(
                "lat and lon must be given together".to_string(),
            ))
        }
    };

    tracing::debug!(
        birth = %birth,
        method = ?req.method,
        levels = req.levels,
        "Computing dasha timeline"
    );

    Ok(Json(dasha_timeline(
        birth, req.method, req.levels, tz, location,
    )?))
}
