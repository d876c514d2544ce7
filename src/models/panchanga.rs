// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Panchanga (Hindu calendar day) response model.

use crate::models::{Ayanamsha, Body};
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A location as echoed back in responses.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
    pub tz: String,
}

/// A span of local time, RFC3339 with offset.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TimeWindow {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Vara {
    pub name: String,
    pub lord: Body,
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Tithi {
    /// 1..30
    pub index: u8,
    pub name: String,
    /// "Shukla" (waxing) or "Krishna" (waning)
    pub paksha: String,
    pub ends_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Nakshatra {
    /// 1..27
    pub index: u8,
    pub name: String,
    pub pada: u8,
    /// Vimshottari lord
    pub lord: Body,
    pub ends_at: Option<String>,
}

/// Yoga or karana: a named limb with an end time.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Limb {
    pub index: u8,
    pub name: String,
    pub ends_at: Option<String>,
}

/// Full panchanga for a civil day, evaluated at local sunrise.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Panchanga {
    pub date: String,
    pub location: Location,
    pub ayanamsha: Ayanamsha,
    pub ayanamsha_deg: f64,
    pub sunrise: String,
    pub sunset: String,
    pub vara: Vara,
    pub tithi: Tithi,
    pub nakshatra: Nakshatra,
    pub yoga: Limb,
    pub karana: Limb,
    /// Sidereal longitudes at sunrise
    pub sun_longitude: f64,
    pub moon_longitude: f64,
    pub moon_sign: String,
    pub rahu_kalam: TimeWindow,
    pub yamaganda: TimeWindow,
    pub gulika_kalam: TimeWindow,
    pub abhijit_muhurta: TimeWindow,
}
