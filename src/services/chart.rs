// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Birth chart assembly: ascendant, graha placements, whole-sign houses
//! and divisional charts.

use crate::models::chart::{
    AscendantPlacement, BirthChart, BirthDebug, PlanetPlacement, VargaChart, VargaPlacement,
};
use crate::models::names::{sign_name, NAKSHATRA_NAMES};
use crate::models::panchanga::Location;
use crate::models::{Ayanamsha, Body};
use crate::services::ephemeris::{
    ascendant_by_horizon_search, ascendant_tropical_deg, degree_in_sign, greenwich_sidereal_deg,
    jd_tt, nakshatra_and_pada, norm180, norm360, sign_index, true_obliquity, whole_sign_house,
    Ephemeris,
};
use crate::services::varga::Varga;
use crate::time_utils::{format_local_rfc3339, format_utc_rfc3339, julian_day_ut};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Errors from chart assembly.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ChartError {
    #[error("Unsupported varga '{0}' (supported: D1, D2, D3, D4, D7, D9, D10, D12, D30, D60)")]
    UnknownVarga(String),
}

/// Parse requested varga names, dropping duplicates but keeping order.
pub fn parse_vargas(names: &[String]) -> Result<Vec<Varga>, ChartError> {
    let mut vargas: Vec<Varga> = Vec::with_capacity(names.len());
    for name in names {
        let varga: Varga = name.parse().map_err(ChartError::UnknownVarga)?;
        if !vargas.contains(&varga) {
            vargas.push(varga);
        }
    }
    Ok(vargas)
}

fn nakshatra_name(lon: f64) -> (String, u8) {
    let (idx, pada) = nakshatra_and_pada(lon);
    (NAKSHATRA_NAMES[usize::from(idx - 1)].to_string(), pada)
}

fn varga_chart(varga: Varga, asc: f64, planets: &[(Body, f64)]) -> VargaChart {
    let asc_sign = varga.sign_of(asc);
    let placement = |point: &str, sign: u8| VargaPlacement {
        point: point.to_string(),
        sign: sign_name(sign).to_string(),
        sign_index: sign,
        house: whole_sign_house(sign, asc_sign),
    };

    let mut placements = vec![placement("Ascendant", asc_sign)];
    placements.extend(
        planets
            .iter()
            .map(|&(body, lon)| placement(body.name(), varga.sign_of(lon))),
    );
    VargaChart {
        varga: varga.to_string(),
        title: varga.title().to_string(),
        placements,
    }
}

/// Build the sidereal birth chart for a UTC birth instant.
pub fn birth_chart(
    birth: DateTime<Utc>,
    lat: f64,
    lon: f64,
    tz: Tz,
    ayanamsha: Ayanamsha,
    vargas: &[Varga],
) -> BirthChart {
    let eph = Ephemeris::new(ayanamsha);
    let jd = julian_day_ut(birth);

    let asc = eph.ascendant(jd, lat, lon);
    let asc_sign = sign_index(asc);
    let (asc_nak, asc_pada) = nakshatra_name(asc);

    let planets: Vec<PlanetPlacement> = Body::ALL
        .iter()
        .map(|&body| {
            let pos = eph.position(body, jd);
            let sign = sign_index(pos.longitude);
            let (nakshatra, pada) = nakshatra_name(pos.longitude);
            PlanetPlacement {
                body,
                longitude: pos.longitude,
                sign: sign_name(sign).to_string(),
                sign_index: sign,
                degree_in_sign: degree_in_sign(pos.longitude),
                house: whole_sign_house(sign, asc_sign),
                nakshatra,
                pada,
                speed: pos.speed,
                retrograde: pos.retrograde,
            }
        })
        .collect();

    let longitudes: Vec<(Body, f64)> = planets.iter().map(|p| (p.body, p.longitude)).collect();
    let vargas = vargas
        .iter()
        .map(|&v| varga_chart(v, asc, &longitudes))
        .collect();

    tracing::debug!(
        julian_day = jd,
        ascendant = asc,
        ayanamsha = ayanamsha.name(),
        "Computed birth chart"
    );

    BirthChart {
        birth_utc: format_utc_rfc3339(birth),
        birth_local: format_local_rfc3339(birth, tz),
        location: Location {
            lat,
            lon,
            tz: tz.name().to_string(),
        },
        ayanamsha,
        ayanamsha_deg: eph.ayanamsha_deg(jd),
        julian_day_ut: jd,
        ascendant: AscendantPlacement {
            longitude: asc,
            sign: sign_name(asc_sign).to_string(),
            sign_index: asc_sign,
            degree_in_sign: degree_in_sign(asc),
            nakshatra: asc_nak,
            pada: asc_pada,
        },
        planets,
        vargas,
    }
}

/// Cross-check the ascendant by formula and by horizon search.
pub fn birth_debug(birth: DateTime<Utc>, lat: f64, lon: f64, ayanamsha: Ayanamsha) -> BirthDebug {
    let eph = Ephemeris::new(ayanamsha);
    let jd = julian_day_ut(birth);
    let ayan = eph.ayanamsha_deg(jd);

    let tropical = ascendant_tropical_deg(jd, lat, lon);
    let by_subtract = norm360(tropical - ayan);
    let by_horizon = ascendant_by_horizon_search(jd, lat, lon).map(|a| norm360(a - ayan));
    let difference = by_horizon.map(|h| norm180(h - by_subtract).abs());

    if let Some(diff) = difference {
        if diff > 0.01 {
            tracing::warn!(
                difference_deg = diff,
                lat,
                lon,
                "Ascendant methods disagree"
            );
        }
    }

    BirthDebug {
        birth_utc: format_utc_rfc3339(birth),
        julian_day_ut: jd,
        ayanamsha,
        ayanamsha_deg: ayan,
        sidereal_time_deg: norm360(greenwich_sidereal_deg(jd) + lon),
        obliquity_deg: true_obliquity(jd_tt(jd)),
        ascendant_tropical: tropical,
        ascendant_sidereal_by_subtract: by_subtract,
        ascendant_sidereal_by_horizon: by_horizon,
        difference_deg: difference,
        ascendant_sign: sign_name(sign_index(by_subtract)).to_string(),
    }
}
