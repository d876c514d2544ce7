// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Muhurta (electional timing) models.

use crate::models::panchanga::Location;
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Activity categories with distinct favourable nakshatras and weekdays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Activity {
    Marriage,
    Travel,
    Business,
    GrihaPravesh,
    Education,
    Medical,
    General,
}

impl Activity {
    /// Map free-form activity text onto a category; unknown text is
    /// treated as a general undertaking.
    pub fn classify(text: &str) -> Self {
        let lower = text.to_ascii_lowercase();
        let words: Vec<&str> = lower
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();
        // Phrases match a run of whole words.
        let has = |phrase: &str| {
            let parts: Vec<&str> = phrase.split(' ').collect();
            words.windows(parts.len()).any(|run| run == parts.as_slice())
        };
        let any = |phrases: &[&str]| phrases.iter().any(|p| has(p));
        if any(&["marriage", "wedding", "vivah", "vivaha", "engagement"]) {
            Activity::Marriage
        } else if any(&["travel", "journey", "trip", "yatra"]) {
            Activity::Travel
        } else if any(&["griha", "housewarming", "house warming", "new home", "move in"]) {
            Activity::GrihaPravesh
        } else if any(&["business", "shop", "contract", "venture", "trade", "deal"]) {
            Activity::Business
        } else if any(&["education", "study", "school", "vidya", "learning", "exam"]) {
            Activity::Education
        } else if any(&["medical", "surgery", "treatment", "health", "medicine"]) {
            Activity::Medical
        } else {
            Activity::General
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum MuhurtaQuality {
    Excellent,
    Good,
    Neutral,
    Avoid,
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MuhurtaWindow {
    pub name: String,
    pub start: String,
    pub end: String,
    pub quality: MuhurtaQuality,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub reasons: Vec<String>,
}

/// Day-level verdict from the panchanga limbs.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DayAssessment {
    pub score: i32,
    /// "favourable", "mixed" or "unfavourable"
    pub verdict: String,
    pub favourable: Vec<String>,
    pub unfavourable: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MuhurtaReport {
    pub date: String,
    pub activity: Activity,
    pub requested_activity: String,
    pub location: Location,
    pub vara: String,
    pub tithi: String,
    pub nakshatra: String,
    pub karana: String,
    pub sunrise: String,
    pub sunset: String,
    pub assessment: DayAssessment,
    pub windows: Vec<MuhurtaWindow>,
    /// Names of windows rated excellent or good
    pub recommended: Vec<String>,
}
