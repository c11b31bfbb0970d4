//! Static sanctions reference data.
//!
//! RULE: Reference data is built once and never mutated afterwards.
//! Everything downstream holds it behind an `Arc` and reads through slices.

use crate::{
    error::{DeskError, DeskResult},
    types::{CountryCode, EntityId},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ── Enumerations ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    Entity,
    Individual,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Entity => "ENTITY",
            EntityType::Individual => "INDIVIDUAL",
        }
    }
}

/// Issuing list a sanctioned entity was published on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SanctionsSourceId {
    OfacSdn,
    EuSanctions,
    UnConsolidated,
    UkSanctions,
}

impl SanctionsSourceId {
    pub fn as_str(&self) -> &'static str {
        match self {
            SanctionsSourceId::OfacSdn => "OFAC_SDN",
            SanctionsSourceId::EuSanctions => "EU_SANCTIONS",
            SanctionsSourceId::UnConsolidated => "UN_CONSOLIDATED",
            SanctionsSourceId::UkSanctions => "UK_SANCTIONS",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmbargoLevel {
    FullEmbargo,
    Partial,
}

impl EmbargoLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmbargoLevel::FullEmbargo => "FULL_EMBARGO",
            EmbargoLevel::Partial => "PARTIAL",
        }
    }
}

// ── Records ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SanctionedEntity {
    pub id: EntityId,
    /// Stored as published. Uppercased only when compared.
    pub name: String,
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    pub country: Option<CountryCode>,
    pub source: SanctionsSourceId,
    pub programs: Vec<String>,
    pub added_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestrictedCountry {
    pub code: CountryCode,
    pub name: String,
    pub level: EmbargoLevel,
    pub programs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SanctionsSource {
    pub id: SanctionsSourceId,
    pub name: String,
    /// Issuing jurisdiction label ("US", "EU", "UN", "UK").
    pub country: String,
    pub description: String,
}

// ── Reference set ────────────────────────────────────────────────────────────

/// The read-only sanctions reference set the screening engine scores against.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    sources: Vec<SanctionsSource>,
    entities: Vec<SanctionedEntity>,
    countries: Vec<RestrictedCountry>,
}

impl ReferenceData {
    /// Build a reference set, rejecting duplicate keys and blank names.
    /// List order is preserved; screening ties resolve in this order.
    pub fn new(
        sources: Vec<SanctionsSource>,
        entities: Vec<SanctionedEntity>,
        countries: Vec<RestrictedCountry>,
    ) -> DeskResult<Self> {
        let mut seen_sources = HashSet::new();
        for source in &sources {
            if !seen_sources.insert(source.id) {
                return Err(DeskError::DuplicateReference {
                    kind: "sanctions source",
                    key: source.id.as_str().to_string(),
                });
            }
        }

        let mut seen_ids = HashSet::new();
        for entity in &entities {
            if entity.name.trim().is_empty() {
                return Err(DeskError::BlankEntityName { entity_id: entity.id });
            }
            if !seen_ids.insert(entity.id) {
                return Err(DeskError::DuplicateReference {
                    kind: "entity id",
                    key: entity.id.to_string(),
                });
            }
        }

        let mut seen_codes = HashSet::new();
        for country in &countries {
            if !seen_codes.insert(country.code.clone()) {
                return Err(DeskError::DuplicateReference {
                    kind: "country code",
                    key: country.code.clone(),
                });
            }
        }

        Ok(Self {
            sources,
            entities,
            countries,
        })
    }

    pub fn sources(&self) -> &[SanctionsSource] {
        &self.sources
    }

    pub fn entities(&self) -> &[SanctionedEntity] {
        &self.entities
    }

    pub fn restricted_countries(&self) -> &[RestrictedCountry] {
        &self.countries
    }

    pub fn source(&self, id: SanctionsSourceId) -> Option<&SanctionsSource> {
        self.sources.iter().find(|s| s.id == id)
    }

    pub fn entity(&self, id: EntityId) -> Option<&SanctionedEntity> {
        self.entities.iter().find(|e| e.id == id)
    }
}
