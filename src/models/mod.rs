// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the API.

pub mod body;
pub mod chart;
pub mod dasha;
pub mod muhurta;
pub mod names;
pub mod panchanga;
pub mod transit;

pub use body::{Ayanamsha, Body};
pub use chart::{BirthChart, BirthDebug};
pub use dasha::{DashaMethod, DashaTimeline};
pub use muhurta::MuhurtaReport;
pub use panchanga::Panchanga;
pub use transit::TransitReport;
