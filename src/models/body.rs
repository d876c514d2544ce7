// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Grahas (bodies) and sidereal zodiac reference frames.

use serde::{Deserialize, Serialize};
use std::fmt;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// The nine grahas used in Vedic charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Body {
    Sun,
    Moon,
    Mars,
    Mercury,
    Jupiter,
    Venus,
    Saturn,
    Rahu,
    Ketu,
}

impl Body {
    /// All bodies in traditional weekday-lord order, nodes last.
    pub const ALL: [Body; 9] = [
        Body::Sun,
        Body::Moon,
        Body::Mars,
        Body::Mercury,
        Body::Jupiter,
        Body::Venus,
        Body::Saturn,
        Body::Rahu,
        Body::Ketu,
    ];

    /// Bodies that can station (turn retrograde or direct).
    pub const STATIONING: [Body; 5] = [
        Body::Mars,
        Body::Mercury,
        Body::Jupiter,
        Body::Venus,
        Body::Saturn,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Mars => "Mars",
            Body::Mercury => "Mercury",
            Body::Jupiter => "Jupiter",
            Body::Venus => "Venus",
            Body::Saturn => "Saturn",
            Body::Rahu => "Rahu",
            Body::Ketu => "Ketu",
        }
    }

    /// Lunar nodes move retrograde by definition.
    pub fn is_node(self) -> bool {
        matches!(self, Body::Rahu | Body::Ketu)
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ayanamsha (precession offset) used to convert tropical to sidereal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Ayanamsha {
    #[default]
    Lahiri,
    Raman,
    Krishnamurti,
}

impl Ayanamsha {
    /// Ayanamsha at J2000.0 in degrees.
    pub fn value_at_j2000(self) -> f64 {
        match self {
            Ayanamsha::Lahiri => 23.857_092,
            Ayanamsha::Raman => 22.370_419,
            Ayanamsha::Krishnamurti => 23.760_240,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Ayanamsha::Lahiri => "Lahiri",
            Ayanamsha::Raman => "Raman",
            Ayanamsha::Krishnamurti => "Krishnamurti",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ayanamsha_serde_names() {
        let a: Ayanamsha = serde_json::from_str("\"Krishnamurti\"").unwrap();
        assert_eq!(a, Ayanamsha::Krishnamurti);
        assert!(serde_json::from_str::<Ayanamsha>("\"Fagan\"").is_err());
        assert_eq!(Ayanamsha::default(), Ayanamsha::Lahiri);
    }

    #[test]
    fn test_body_serializes_by_name() {
        assert_eq!(serde_json::to_string(&Body::Rahu).unwrap(), "\"Rahu\"");
        assert!(Body::Ketu.is_node());
        assert!(!Body::Saturn.is_node());
    }
}
