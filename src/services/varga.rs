// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Divisional charts (vargas) with Parashari mapping rules.

use crate::services::ephemeris::{degree_in_sign, sign_index};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Varga {
    D1,
    D2,
    D3,
    D4,
    D7,
    D9,
    D10,
    D12,
    D30,
    D60,
}

impl Varga {
    pub fn title(self) -> &'static str {
        match self {
            Varga::D1 => "Rasi",
            Varga::D2 => "Hora",
            Varga::D3 => "Drekkana",
            Varga::D4 => "Chaturthamsa",
            Varga::D7 => "Saptamsa",
            Varga::D9 => "Navamsa",
            Varga::D10 => "Dasamsa",
            Varga::D12 => "Dwadasamsa",
            Varga::D30 => "Trimsamsa",
            Varga::D60 => "Shashtiamsa",
        }
    }

    fn divisions(self) -> u32 {
        match self {
            Varga::D1 => 1,
            Varga::D2 => 2,
            Varga::D3 => 3,
            Varga::D4 => 4,
            Varga::D7 => 7,
            Varga::D9 => 9,
            Varga::D10 => 10,
            Varga::D12 => 12,
            Varga::D30 => 30,
            Varga::D60 => 60,
        }
    }

    /// Sign (1..12) a sidereal longitude falls in for this varga.
    pub fn sign_of(self, lon: f64) -> u8 {
        let sign = sign_index(lon);
        let deg = degree_in_sign(lon);
        let odd = sign % 2 == 1;
        let n = self.divisions();
        let part = ((deg / (30.0 / f64::from(n))).floor() as u32).min(n - 1) as u8;

        match self {
            Varga::D1 => sign,
            Varga::D2 => match (odd, part) {
                (true, 0) | (false, 1) => 5,
                _ => 4,
            },
            Varga::D3 => advance(sign, part * 4),
            Varga::D4 => advance(sign, part * 3),
            Varga::D7 => advance(if odd { sign } else { advance(sign, 6) }, part),
            Varga::D9 => {
                let start = match sign % 4 {
                    1 => 1,  // fire signs start from Aries
                    2 => 10, // earth from Capricorn
                    3 => 7,  // air from Libra
                    _ => 4,  // water from Cancer
                };
                advance(start, part)
            }
            Varga::D10 => advance(if odd { sign } else { advance(sign, 8) }, part),
            Varga::D12 => advance(sign, part),
            Varga::D30 => trimsamsa(odd, deg),
            Varga::D60 => advance(sign, part),
        }
    }
}

/// Count `steps` signs forward from `sign` (1..12).
fn advance(sign: u8, steps: u8) -> u8 {
    (sign - 1 + steps) % 12 + 1
}

/// Trimsamsa uses unequal portions ruled by the five non-luminary planets.
fn trimsamsa(odd: bool, deg: f64) -> u8 {
    if odd {
        match deg {
            d if d < 5.0 => 1,
            d if d < 10.0 => 11,
            d if d < 18.0 => 9,
            d if d < 25.0 => 3,
            _ => 7,
        }
    } else {
        match deg {
            d if d < 5.0 => 2,
            d if d < 12.0 => 6,
            d if d < 20.0 => 12,
            d if d < 25.0 => 10,
            _ => 8,
        }
    }
}

impl fmt::Display for Varga {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "D{}", self.divisions())
    }
}

impl FromStr for Varga {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "D1" => Ok(Varga::D1),
            "D2" => Ok(Varga::D2),
            "D3" => Ok(Varga::D3),
            "D4" => Ok(Varga::D4),
            "D7" => Ok(Varga::D7),
            "D9" => Ok(Varga::D9),
            "D10" => Ok(Varga::D10),
            "D12" => Ok(Varga::D12),
            "D30" => Ok(Varga::D30),
            "D60" => Ok(Varga::D60),
            _ => Err(s.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navamsa_starts_by_element() {
        assert_eq!(Varga::D9.sign_of(0.0), 1); // Aries -> Aries
        assert_eq!(Varga::D9.sign_of(29.9), 9); // last navamsa of Aries -> Sagittarius
        assert_eq!(Varga::D9.sign_of(30.0), 10); // Taurus -> Capricorn
        assert_eq!(Varga::D9.sign_of(60.5), 7); // Gemini -> Libra
        assert_eq!(Varga::D9.sign_of(90.5), 4); // Cancer -> Cancer
        assert_eq!(Varga::D9.sign_of(359.9), 12); // Pisces ends in Pisces
    }

    #[test]
    fn test_hora_and_drekkana() {
        assert_eq!(Varga::D2.sign_of(10.0), 5);
        assert_eq!(Varga::D2.sign_of(20.0), 4);
        assert_eq!(Varga::D2.sign_of(40.0), 4);
        assert_eq!(Varga::D2.sign_of(50.0), 5);
        assert_eq!(Varga::D3.sign_of(25.0), 9);
        assert_eq!(Varga::D3.sign_of(345.0), 4); // Pisces 15° -> Cancer
    }

    #[test]
    fn test_dasamsa_and_saptamsa_even_signs() {
        assert_eq!(Varga::D10.sign_of(30.0), 10); // Taurus starts from 9th
        assert_eq!(Varga::D7.sign_of(30.0), 8); // Taurus starts from 7th
        assert_eq!(Varga::D10.sign_of(29.0), 10); // Aries last part
    }

    #[test]
    fn test_trimsamsa_portions() {
        assert_eq!(Varga::D30.sign_of(4.9), 1);
        assert_eq!(Varga::D30.sign_of(17.0), 9);
        assert_eq!(Varga::D30.sign_of(30.0 + 13.0), 12);
        assert_eq!(Varga::D30.sign_of(30.0 + 29.0), 8);
    }

    #[test]
    fn test_parse_varga_names() {
        assert_eq!("d9".parse::<Varga>(), Ok(Varga::D9));
        assert_eq!(" D60 ".parse::<Varga>(), Ok(Varga::D60));
        assert!("D5".parse::<Varga>().is_err());
        assert_eq!(Varga::D12.to_string(), "D12");
    }
}
