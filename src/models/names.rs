// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Traditional name tables for signs and panchanga limbs.

use crate::models::Body;
use chrono::Weekday;

pub const SIGN_NAMES: [&str; 12] = [
    "Aries",
    "Taurus",
    "Gemini",
    "Cancer",
    "Leo",
    "Virgo",
    "Libra",
    "Scorpio",
    "Sagittarius",
    "Capricorn",
    "Aquarius",
    "Pisces",
];

pub const TITHI_NAMES: [&str; 30] = [
    "Shukla Pratipada",
    "Shukla Dwitiya",
    "Shukla Tritiya",
    "Shukla Chaturthi",
    "Shukla Panchami",
    "Shukla Shashti",
    "Shukla Saptami",
    "Shukla Ashtami",
    "Shukla Navami",
    "Shukla Dashami",
    "Shukla Ekadashi",
    "Shukla Dwadashi",
    "Shukla Trayodashi",
    "Shukla Chaturdashi",
    "Purnima",
    "Krishna Pratipada",
    "Krishna Dwitiya",
    "Krishna Tritiya",
    "Krishna Chaturthi",
    "Krishna Panchami",
    "Krishna Shashti",
    "Krishna Saptami",
    "Krishna Ashtami",
    "Krishna Navami",
    "Krishna Dashami",
    "Krishna Ekadashi",
    "Krishna Dwadashi",
    "Krishna Trayodashi",
    "Krishna Chaturdashi",
    "Amavasya",
];

pub const NAKSHATRA_NAMES: [&str; 27] = [
    "Ashwini",
    "Bharani",
    "Krittika",
    "Rohini",
    "Mrigashira",
    "Ardra",
    "Punarvasu",
    "Pushya",
    "Ashlesha",
    "Magha",
    "Purva Phalguni",
    "Uttara Phalguni",
    "Hasta",
    "Chitra",
    "Swati",
    "Vishakha",
    "Anuradha",
    "Jyeshtha",
    "Mula",
    "Purva Ashadha",
    "Uttara Ashadha",
    "Shravana",
    "Dhanishtha",
    "Shatabhisha",
    "Purva Bhadrapada",
    "Uttara Bhadrapada",
    "Revati",
];

pub const YOGA_NAMES: [&str; 27] = [
    "Vishkambha",
    "Preeti",
    "Ayushman",
    "Saubhagya",
    "Shobhana",
    "Atiganda",
    "Sukarma",
    "Dhriti",
    "Shoola",
    "Ganda",
    "Vriddhi",
    "Dhruva",
    "Vyaghata",
    "Harshana",
    "Vajra",
    "Siddhi",
    "Vyatipat",
    "Variyan",
    "Parigha",
    "Shiva",
    "Siddha",
    "Sadhya",
    "Shubha",
    "Shukla",
    "Brahma",
    "Indra",
    "Vaidhriti",
];

/// The seven movable karanas, repeated eight times through the month.
pub const MOVABLE_KARANAS: [&str; 7] = [
    "Bava", "Balava", "Kaulava", "Taitila", "Garaja", "Vanija", "Vishti",
];

/// Name of karana `index` (0..60) counted from the new moon.
pub fn karana_name(index: usize) -> &'static str {
    match index {
        0 => "Kimstughna",
        1..=56 => MOVABLE_KARANAS[(index - 1) % 7],
        57 => "Shakuni",
        58 => "Chatushpada",
        _ => "Naga",
    }
}

/// Sign name for a 1-based sign index.
pub fn sign_name(sign: u8) -> &'static str {
    SIGN_NAMES[usize::from((sign.max(1) - 1) % 12)]
}

/// Traditional lord of a 1-based sign index (Scorpio → Mars, Aquarius → Saturn).
pub fn sign_lord(sign: u8) -> Body {
    match (sign.max(1) - 1) % 12 + 1 {
        1 | 8 => Body::Mars,
        2 | 7 => Body::Venus,
        3 | 6 => Body::Mercury,
        4 => Body::Moon,
        5 => Body::Sun,
        9 | 12 => Body::Jupiter,
        _ => Body::Saturn,
    }
}

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Lord of the weekday (vara).
pub fn weekday_lord(day: Weekday) -> Body {
    match day {
        Weekday::Sun => Body::Sun,
        Weekday::Mon => Body::Moon,
        Weekday::Tue => Body::Mars,
        Weekday::Wed => Body::Mercury,
        Weekday::Thu => Body::Jupiter,
        Weekday::Fri => Body::Venus,
        Weekday::Sat => Body::Saturn,
    }
}
