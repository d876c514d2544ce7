// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Muhurta selection: scores the day's panchanga for an activity and rates
//! each daytime muhurta.

use crate::models::muhurta::{Activity, DayAssessment, MuhurtaQuality, MuhurtaReport, MuhurtaWindow};
use crate::models::names::weekday_name;
use crate::models::panchanga::Location;
use crate::models::Ayanamsha;
use crate::services::panchanga::PanchangaDay;
use crate::services::sun::SunError;
use crate::time_utils::format_local_rfc3339;
use chrono::{DateTime, Duration, NaiveDate, Utc, Weekday};
use chrono_tz::Tz;

/// The fifteen daytime muhurtas; the eighth is Abhijit.
const DAY_MUHURTAS: [&str; 15] = [
    "Rudra",
    "Ahi",
    "Mitra",
    "Pitri",
    "Vasu",
    "Varaha",
    "Vishvedeva",
    "Abhijit",
    "Satamukhi",
    "Puruhuta",
    "Vahini",
    "Naktanakara",
    "Varuna",
    "Aryaman",
    "Bhaga",
];
const ABHIJIT_INDEX: usize = 7;
/// Brahma muhurta runs from 96 to 48 minutes before sunrise.
const BRAHMA_START_MINUTES: i64 = 96;
const BRAHMA_END_MINUTES: i64 = 48;

/// Favourable nakshatras (1..27) and weekdays for an activity.
fn favourable_for(activity: Activity) -> (&'static [u8], &'static [Weekday]) {
    use Weekday::*;
    match activity {
        Activity::Marriage => (&[4, 5, 10, 12, 13, 15, 17, 19, 21, 26, 27], &[Mon, Wed, Thu, Fri]),
        Activity::Travel => (&[1, 5, 7, 8, 13, 17, 22, 23, 27], &[Mon, Wed, Thu, Fri]),
        Activity::Business => (&[1, 4, 8, 12, 13, 14, 17, 21, 26, 27], &[Wed, Thu, Fri]),
        Activity::GrihaPravesh => (&[4, 5, 12, 14, 17, 21, 23, 24, 26, 27], &[Mon, Wed, Thu, Fri]),
        Activity::Education => (&[1, 5, 7, 8, 13, 14, 15, 22, 23, 24, 27], &[Sun, Wed, Thu, Fri]),
        Activity::Medical => (&[1, 5, 7, 8, 13, 17, 22, 27], &[Sun, Mon, Thu]),
        Activity::General => (&[1, 4, 5, 7, 8, 13, 14, 17, 22, 27], &[Mon, Wed, Thu, Fri]),
    }
}

/// Score the day's limbs for an activity.
pub fn assess_day(day: &PanchangaDay, activity: Activity) -> DayAssessment {
    let (nakshatras, weekdays) = favourable_for(activity);
    let mut score = 0;
    let mut favourable = Vec::new();
    let mut unfavourable = Vec::new();

    if nakshatras.contains(&day.nakshatra) {
        score += 2;
        favourable.push(format!("{} nakshatra suits this activity", day.nakshatra_name()));
    } else {
        score -= 1;
        unfavourable.push(format!("{} nakshatra is not recommended", day.nakshatra_name()));
    }

    if weekdays.contains(&day.weekday) {
        score += 1;
        favourable.push(format!("{} is a favourable weekday", weekday_name(day.weekday)));
    }

    let tithi_in_paksha = (day.tithi - 1) % 15 + 1;
    if day.tithi == 30 {
        score -= 3;
        unfavourable.push("Amavasya (new moon) tithi".to_string());
    } else if matches!(tithi_in_paksha, 4 | 9 | 14) {
        score -= 2;
        unfavourable.push(format!("{} is a rikta tithi", day.tithi_name()));
    } else if day.paksha() == "Shukla" {
        score += 1;
        favourable.push("Waxing moon (Shukla paksha)".to_string());
    }

    if day.karana_name() == "Vishti" {
        score -= 2;
        unfavourable.push("Vishti (Bhadra) karana at sunrise".to_string());
    }

    let verdict = match score {
        s if s >= 3 => "favourable",
        s if s >= 0 => "mixed",
        _ => "unfavourable",
    };

    DayAssessment {
        score,
        verdict: verdict.to_string(),
        favourable,
        unfavourable,
    }
}

fn overlaps(a: (DateTime<Utc>, DateTime<Utc>), b: (DateTime<Utc>, DateTime<Utc>)) -> bool {
    a.0 < b.1 && b.0 < a.1
}

/// Rate the fifteen daytime muhurtas plus Brahma muhurta.
pub fn rate_windows(day: &PanchangaDay, tz: Tz) -> Vec<MuhurtaWindow> {
    let fmt = |t: DateTime<Utc>| format_local_rfc3339(t, tz);
    let part = day.sun.day_length() / 15;

    let brahma_start = day.sun.sunrise - Duration::minutes(BRAHMA_START_MINUTES);
    let brahma_end = day.sun.sunrise - Duration::minutes(BRAHMA_END_MINUTES);
    let mut windows = vec![MuhurtaWindow {
        name: "Brahma".to_string(),
        start: fmt(brahma_start),
        end: fmt(brahma_end),
        quality: MuhurtaQuality::Good,
        reasons: vec!["Pre-dawn muhurta".to_string()],
    }];

    let dosha_periods = [
        ("Rahu Kalam", day.rahu_kalam),
        ("Yamaganda", day.yamaganda),
        ("Gulika Kalam", day.gulika_kalam),
    ];

    for (i, name) in DAY_MUHURTAS.iter().enumerate() {
        let start = day.sun.sunrise + part * i as i32;
        let span = (start, start + part);
        let mut reasons: Vec<String> = dosha_periods
            .iter()
            .filter(|(_, period)| overlaps(span, *period))
            .map(|(label, _)| format!("Overlaps {label}"))
            .collect();

        let quality = if !reasons.is_empty() {
            MuhurtaQuality::Avoid
        } else if i == ABHIJIT_INDEX {
            if day.weekday == Weekday::Wed {
                reasons.push("Abhijit is not used on Wednesday".to_string());
                MuhurtaQuality::Neutral
            } else {
                reasons.push("Abhijit muhurta".to_string());
                MuhurtaQuality::Excellent
            }
        } else {
            MuhurtaQuality::Good
        };

        windows.push(MuhurtaWindow {
            name: name.to_string(),
            start: fmt(span.0),
            end: fmt(span.1),
            quality,
            reasons,
        });
    }
    windows
}

/// Muhurta report for an activity on a civil day.
pub fn muhurta(
    date: NaiveDate,
    lat: f64,
    lon: f64,
    tz: Tz,
    activity_text: &str,
) -> Result<MuhurtaReport, SunError> {
    let activity = Activity::classify(activity_text);
    let day = PanchangaDay::compute(date, lat, lon, tz, Ayanamsha::Lahiri)?;
    let assessment = assess_day(&day, activity);
    let windows = rate_windows(&day, tz);
    let recommended = windows
        .iter()
        .filter(|w| matches!(w.quality, MuhurtaQuality::Excellent | MuhurtaQuality::Good))
        .map(|w| w.name.clone())
        .collect();

    tracing::debug!(
        ?activity,
        score = assessment.score,
        verdict = %assessment.verdict,
        "Assessed muhurta"
    );

    Ok(MuhurtaReport {
        date: date.format("%Y-%m-%d").to_string(),
        activity,
        requested_activity: activity_text.to_string(),
        location: Location {
            lat,
            lon,
            tz: tz.name().to_string(),
        },
        vara: weekday_name(day.weekday).to_string(),
        tithi: day.tithi_name().to_string(),
        nakshatra: day.nakshatra_name().to_string(),
        karana: day.karana_name().to_string(),
        sunrise: format_local_rfc3339(day.sun.sunrise, tz),
        sunset: format_local_rfc3339(day.sun.sunset, tz),
        assessment,
        windows,
        recommended,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(date: (i32, u32, u32)) -> PanchangaDay {
        let date = NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap();
        PanchangaDay::compute(date, 28.6139, 77.2090, chrono_tz::Asia::Kolkata, Ayanamsha::Lahiri)
            .unwrap()
    }

    #[test]
    fn test_windows_cover_daytime_and_flag_rahu_kalam() {
        let tz: Tz = "Asia/Kolkata".parse().unwrap();
        // 2024-06-17 is a Monday: Rahu Kalam is the second eighth of daytime.
        let d = day((2024, 6, 17));
        let windows = rate_windows(&d, tz);
        assert_eq!(windows.len(), 16);
        assert_eq!(windows[0].name, "Brahma");
        assert_eq!(windows[1].start, format_local_rfc3339(d.sun.sunrise, tz));

        // Second eighth spans muhurtas 2..4 (1-based) of fifteen.
        assert_eq!(windows[3].quality, MuhurtaQuality::Avoid);
        assert!(windows[3]
            .reasons
            .iter()
            .any(|r| r.contains("Rahu Kalam")));
        assert_eq!(windows[8].name, "Abhijit");
    }

    #[test]
    fn test_abhijit_not_used_on_wednesday() {
        let tz: Tz = "Asia/Kolkata".parse().unwrap();
        let d = day((2024, 6, 19));
        assert_eq!(d.weekday, Weekday::Wed);
        let abhijit = &rate_windows(&d, tz)[ABHIJIT_INDEX + 1];
        assert_ne!(abhijit.quality, MuhurtaQuality::Excellent);
    }

    /// Limbs at sunrise with placeholder times; only the scored fields vary.
    fn limbs(weekday: Weekday, tithi: u8, nakshatra: u8, karana: u8) -> PanchangaDay {
        let mut d = day((2024, 6, 20));
        d.weekday = weekday;
        d.tithi = tithi;
        d.nakshatra = nakshatra;
        d.karana = karana;
        d
    }

    #[test]
    fn test_assessment_rewards_favourable_day() {
        // Rohini on a Thursday in Shukla Dwitiya, Balava karana.
        let a = assess_day(&limbs(Weekday::Thu, 2, 4, 2), Activity::Marriage);
        assert_eq!(a.score, 4);
        assert_eq!(a.verdict, "favourable");
        assert!(a.unfavourable.is_empty());
        assert!(a
            .favourable
            .contains(&"Waxing moon (Shukla paksha)".to_string()));
    }

    #[test]
    fn test_assessment_penalises_amavasya() {
        let a = assess_day(&limbs(Weekday::Thu, 30, 4, 59), Activity::Marriage);
        // +2 nakshatra, +1 weekday, -3 Amavasya.
        assert_eq!(a.score, 0);
        assert_eq!(a.verdict, "mixed");
        assert_eq!(a.unfavourable, vec!["Amavasya (new moon) tithi".to_string()]);

        // Bharani on a Tuesday for a wedding.
        let a = assess_day(&limbs(Weekday::Tue, 30, 2, 59), Activity::Marriage);
        assert_eq!(a.score, -4);
        assert_eq!(a.verdict, "unfavourable");
        assert_eq!(a.unfavourable.len(), 2);
    }

    #[test]
    fn test_assessment_penalises_rikta_tithis() {
        for (tithi, karana) in [(4, 6), (9, 16), (14, 26), (19, 36), (24, 46), (29, 57)] {
            let d = limbs(Weekday::Thu, tithi, 4, karana);
            let a = assess_day(&d, Activity::Marriage);
            assert_eq!(a.score, 1, "tithi {tithi}");
            assert_eq!(
                a.unfavourable,
                vec![format!("{} is a rikta tithi", d.tithi_name())]
            );
            // Rikta replaces the Shukla bonus.
            assert_eq!(a.favourable.len(), 2);
        }
        let d = limbs(Weekday::Thu, 19, 4, 36);
        assert_eq!(
            assess_day(&d, Activity::Marriage).unfavourable[0],
            "Krishna Chaturthi is a rikta tithi"
        );
    }

    #[test]
    fn test_assessment_penalises_vishti_karana() {
        // Second half of Shukla Ashtami is Vishti.
        let d = limbs(Weekday::Thu, 8, 4, 14);
        assert_eq!(d.karana_name(), "Vishti");
        let a = assess_day(&d, Activity::Marriage);
        // +2 nakshatra, +1 weekday, +1 Shukla, -2 Vishti.
        assert_eq!(a.score, 2);
        assert_eq!(a.verdict, "mixed");
        assert_eq!(
            a.unfavourable,
            vec!["Vishti (Bhadra) karana at sunrise".to_string()]
        );
    }

    #[test]
    fn test_muhurta_report_uses_classified_activity() {
        let tz: Tz = "Asia/Kolkata".parse().unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 6, 20).unwrap();
        let report = muhurta(date, 28.6139, 77.2090, tz, "House warming").unwrap();
        assert_eq!(report.activity, Activity::GrihaPravesh);
        assert_eq!(report.vara, "Thursday");
        assert!(!report.recommended.is_empty());
    }
}
