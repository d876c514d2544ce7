// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Planetary period (dasha) timelines.

use crate::models::Body;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Dasha system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum DashaMethod {
    #[default]
    Vimshottari,
    Yogini,
    /// Jaimini Chara (sign-based) dasha
    CharA,
}

/// One period, with nested sub-periods down to the requested level.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DashaPeriod {
    /// Planet, yogini or sign ruling the period
    pub lord: String,
    /// Planet associated with the period lord
    pub planet: Body,
    /// 1 = mahadasha, 2 = antardasha, 3 = pratyantardasha
    pub level: u8,
    pub start: String,
    pub end: String,
    pub years: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sub_periods: Vec<DashaPeriod>,
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DashaTimeline {
    pub method: DashaMethod,
    pub birth: String,
    pub tz: String,
    pub moon_longitude: f64,
    pub moon_nakshatra: String,
    pub moon_pada: u8,
    /// Years of the first period remaining at birth
    pub balance_years: f64,
    pub periods: Vec<DashaPeriod>,
}
