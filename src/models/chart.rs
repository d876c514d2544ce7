// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Birth chart (rasi and divisional charts) response models.

use crate::models::panchanga::Location;
use crate::models::{Ayanamsha, Body};
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Sidereal placement of a graha.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PlanetPlacement {
    pub body: Body,
    pub longitude: f64,
    pub sign: String,
    pub sign_index: u8,
    pub degree_in_sign: f64,
    /// Whole-sign house counted from the ascendant
    pub house: u8,
    pub nakshatra: String,
    pub pada: u8,
    /// Degrees per day
    pub speed: f64,
    pub retrograde: bool,
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AscendantPlacement {
    pub longitude: f64,
    pub sign: String,
    pub sign_index: u8,
    pub degree_in_sign: f64,
    pub nakshatra: String,
    pub pada: u8,
}

/// Sign occupied by a point (ascendant or graha) in a divisional chart.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct VargaPlacement {
    pub point: String,
    pub sign: String,
    pub sign_index: u8,
    /// Whole-sign house from the varga ascendant
    pub house: u8,
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct VargaChart {
    /// "D9"
    pub varga: String,
    /// "Navamsa"
    pub title: String,
    pub placements: Vec<VargaPlacement>,
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct BirthChart {
    pub birth_utc: String,
    pub birth_local: String,
    pub location: Location,
    pub ayanamsha: Ayanamsha,
    pub ayanamsha_deg: f64,
    pub julian_day_ut: f64,
    pub ascendant: AscendantPlacement,
    pub planets: Vec<PlanetPlacement>,
    pub vargas: Vec<VargaChart>,
}

/// Ascendant computed two independent ways, for diagnosing birth data.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct BirthDebug {
    pub birth_utc: String,
    pub julian_day_ut: f64,
    pub ayanamsha: Ayanamsha,
    pub ayanamsha_deg: f64,
    pub sidereal_time_deg: f64,
    pub obliquity_deg: f64,
    pub ascendant_tropical: f64,
    pub ascendant_sidereal_by_subtract: f64,
    pub ascendant_sidereal_by_horizon: Option<f64>,
    /// Absolute difference between the two sidereal methods
    pub difference_deg: Option<f64>,
    pub ascendant_sign: String,
}
