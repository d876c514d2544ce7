// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - computation layer.

pub mod chart;
pub mod dasha;
pub mod ephemeris;
pub mod muhurta;
pub mod panchanga;
pub mod sun;
pub mod transits;
pub mod varga;

pub use chart::ChartError;
pub use dasha::DashaError;
pub use ephemeris::Ephemeris;
pub use panchanga::PanchangaService;
pub use sun::SunError;
pub use transits::TransitError;
