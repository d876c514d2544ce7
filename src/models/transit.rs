// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Transit (gochara) report models.

use crate::models::panchanga::TimeWindow;
use crate::models::Body;
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum TransitEventKind {
    /// Body enters a new sidereal sign
    Ingress,
    StationRetrograde,
    StationDirect,
    /// Two bodies within the orb
    Conjunction,
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TransitEvent {
    pub kind: TransitEventKind,
    pub time: String,
    pub body: Body,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other: Option<Body>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_sign: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sign: Option<String>,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub separation_deg: Option<f64>,
    /// Span during which a conjunction stays within the orb
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orb_window: Option<TimeWindow>,
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TransitPosition {
    pub body: Body,
    pub longitude: f64,
    pub sign: String,
    pub retrograde: bool,
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TransitReport {
    pub from: String,
    pub to: String,
    pub orb_deg: f64,
    /// Sidereal positions at `from`
    pub positions: Vec<TransitPosition>,
    pub events: Vec<TransitEvent>,
}
