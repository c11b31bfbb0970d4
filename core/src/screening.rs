//! Denied-party screening.
//!
//! Scores a free-text party name against every sanctioned entity in the
//! reference set. Each entity yields at most one match; the first rule that
//! applies wins:
//!   1. Exact:   normalized names are equal             → 100
//!   2. Partial: either name contains the other         → 75
//!   3. Fuzzy:   shared words / longer word count × 60  → kept if ≥ 30
//!
//! Results are ordered by confidence, highest first. Ties keep the
//! reference-list order.

use crate::{
    reference::{ReferenceData, RestrictedCountry, SanctionedEntity, SanctionsSource, SanctionsSourceId},
    types::Confidence,
};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

// ── Constants ────────────────────────────────────────────────────────────────

const EXACT_CONFIDENCE: Confidence = 100;
const PARTIAL_CONFIDENCE: Confidence = 75;
const FUZZY_WEIGHT: f64 = 60.0;
const FUZZY_MIN_CONFIDENCE: Confidence = 30;

const HIGH_BAND_FLOOR: Confidence = 75;
const MEDIUM_BAND_FLOOR: Confidence = 50;

// ── Match records ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchType {
    Exact,
    Partial,
    Fuzzy,
}

impl MatchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchType::Exact => "EXACT",
            MatchType::Partial => "PARTIAL",
            MatchType::Fuzzy => "FUZZY",
        }
    }
}

/// Display band for a confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfidenceBand {
    High,
    Medium,
    Low,
}

impl ConfidenceBand {
    pub fn for_confidence(confidence: Confidence) -> Self {
        if confidence >= HIGH_BAND_FLOOR {
            ConfidenceBand::High
        } else if confidence >= MEDIUM_BAND_FLOOR {
            ConfidenceBand::Medium
        } else {
            ConfidenceBand::Low
        }
    }
}

/// A sanctioned entity that matched a screening query.
/// Serializes flat: the entity's fields plus `matchType` and `confidence`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreeningMatch {
    #[serde(flatten)]
    pub entity: SanctionedEntity,
    pub match_type: MatchType,
    pub confidence: Confidence,
}

impl ScreeningMatch {
    pub fn band(&self) -> ConfidenceBand {
        ConfidenceBand::for_confidence(self.confidence)
    }
}

// ── Engine ───────────────────────────────────────────────────────────────────

/// Stateless screening over a shared, immutable reference set.
#[derive(Debug, Clone)]
pub struct ScreeningEngine {
    reference: Arc<ReferenceData>,
}

impl ScreeningEngine {
    pub fn new(reference: Arc<ReferenceData>) -> Self {
        Self { reference }
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    /// Screen a party name against every sanctioned entity.
    ///
    /// A blank query returns no matches.
    pub fn screen_party(&self, query: &str) -> Vec<ScreeningMatch> {
        let normalized = normalize_name(query);
        if normalized.is_empty() {
            debug!("Screening skipped: blank query");
            return Vec::new();
        }

        let mut matches: Vec<ScreeningMatch> = self
            .reference
            .entities()
            .iter()
            .filter_map(|entity| {
                score_name(&normalized, &entity.name).map(|(match_type, confidence)| {
                    ScreeningMatch {
                        entity: entity.clone(),
                        match_type,
                        confidence,
                    }
                })
            })
            .collect();

        // sort_by is stable: equal confidences keep reference order.
        matches.sort_by(|a, b| b.confidence.cmp(&a.confidence));

        debug!(
            "Screened '{}' against {} entities: {} match(es)",
            normalized,
            self.reference.entities().len(),
            matches.len()
        );
        matches
    }

    /// Exact, case-sensitive lookup of a restricted country by ISO code.
    pub fn check_country_restrictions(&self, country_code: &str) -> Option<&RestrictedCountry> {
        self.reference
            .restricted_countries()
            .iter()
            .find(|c| c.code == country_code)
    }

    pub fn sanctions_source(&self, id: SanctionsSourceId) -> Option<&SanctionsSource> {
        self.reference.source(id)
    }
}

// ── Scoring ──────────────────────────────────────────────────────────────────

fn normalize_name(name: &str) -> String {
    name.trim().to_uppercase()
}

/// Score one entity name against an already-normalized query.
/// Returns `None` when no rule produces a match.
fn score_name(normalized_query: &str, entity_name: &str) -> Option<(MatchType, Confidence)> {
    let name = entity_name.to_uppercase();

    if name == normalized_query {
        return Some((MatchType::Exact, EXACT_CONFIDENCE));
    }

    if name.contains(normalized_query) || normalized_query.contains(name.as_str()) {
        return Some((MatchType::Partial, PARTIAL_CONFIDENCE));
    }

    let query_words: Vec<&str> = normalized_query.split_whitespace().collect();
    let entity_words: Vec<&str> = name.split_whitespace().collect();
    let entity_word_set: HashSet<&str> = entity_words.iter().copied().collect();

    // Repeated query words each count.
    let matching_words = query_words
        .iter()
        .filter(|w| entity_word_set.contains(*w))
        .count();
    if matching_words == 0 {
        return None;
    }

    let confidence = fuzzy_confidence(matching_words, query_words.len().max(entity_words.len()));
    (confidence >= FUZZY_MIN_CONFIDENCE).then_some((MatchType::Fuzzy, confidence))
}

/// `matching / total × 60`, rounded half-up.
fn fuzzy_confidence(matching_words: usize, total_words: usize) -> Confidence {
    let raw = matching_words as f64 / total_words as f64 * FUZZY_WEIGHT;
    (raw + 0.5).floor() as Confidence
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_wins_over_partial() {
        assert_eq!(
            score_name("SBERBANK", "Sberbank"),
            Some((MatchType::Exact, 100))
        );
    }

    #[test]
    fn containment_in_either_direction_is_partial() {
        assert_eq!(
            score_name("KOREA KWANGSON", "KOREA KWANGSON BANKING CORP"),
            Some((MatchType::Partial, 75))
        );
        assert_eq!(
            score_name("PJSC SBERBANK OF RUSSIA", "SBERBANK"),
            Some((MatchType::Partial, 75))
        );
    }

    #[test]
    fn word_overlap_scores_against_longer_name() {
        // 1 of 3 words → 20, below the floor.
        assert_eq!(score_name("ACME CORP", "RUSSIAN MILITARY CORP"), None);
        // 2 of 3 words → 40.
        assert_eq!(
            score_name("RUSSIAN NAVAL CORP", "RUSSIAN MILITARY CORP"),
            Some((MatchType::Fuzzy, 40))
        );
    }

    #[test]
    fn fuzzy_rounding_is_half_up() {
        assert_eq!(fuzzy_confidence(1, 8), 8); // 7.5
        assert_eq!(fuzzy_confidence(10, 21), 29); // 28.571…
        assert_eq!(fuzzy_confidence(1, 2), 30);
        assert_eq!(fuzzy_confidence(3, 3), 60);
    }

    #[test]
    fn bands_follow_badge_thresholds() {
        assert_eq!(ConfidenceBand::for_confidence(100), ConfidenceBand::High);
        assert_eq!(ConfidenceBand::for_confidence(75), ConfidenceBand::High);
        assert_eq!(ConfidenceBand::for_confidence(60), ConfidenceBand::Medium);
        assert_eq!(ConfidenceBand::for_confidence(49), ConfidenceBand::Low);
    }
}
