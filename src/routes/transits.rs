// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Transit scan route.

use crate::error::Result;
use crate::models::TransitReport;
use crate::services::transits::{transits, MAX_MONTHS, MAX_ORB_DEG};
use crate::time_utils::parse_instant;
use crate::AppState;
use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/transits", post(post_transits))
}

fn default_months() -> u32 {
    12
}
fn default_orb() -> f64 {
    1.0
}

#[derive(Debug, Deserialize, Validate)]
pub struct TransitsRequest {
    /// Start instant; a value without an offset is read in the default zone
    pub from_iso: String,
    #[serde(default = "default_months")]
    #[validate(range(min = 1, max = MAX_MONTHS))]
    pub months: u32,
    #[serde(default = "default_orb")]
    #[validate(range(exclusive_min = 0.0, max = MAX_ORB_DEG))]
    pub orb_deg: f64,
}

async fn post_transits(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TransitsRequest>,
) -> Result<Json<TransitReport>> {
    req.validate()?;
    let from = parse_instant(&req.from_iso, state.config.default_zone())?;

    tracing::debug!(
        from = %from,
        months = req.months,
        orb_deg = req.orb_deg,
        "Scanning transits"
    );

    // Scanning years of daily samples is CPU bound.
    let report = tokio::task::spawn_blocking(move || transits(from, req.months, req.orb_deg))
        .await
        .map_err(|e| anyhow::anyhow!("transit scan task failed: {e}"))??;
    Ok(Json(report))
}
