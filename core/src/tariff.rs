//! HS-code tariff schedule: search, lookup, duty and landed cost.

use crate::error::{DeskError, DeskResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TariffUnit {
    /// Number of items.
    No,
    /// Dozens.
    Doz,
    Kg,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HsChapter {
    pub chapter: String,
    pub title: String,
}

/// One tariff line. Duty rates are ad valorem percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HsCode {
    pub code: String,
    pub description: String,
    pub chapter: String,
    #[serde(rename = "dutyUS")]
    pub duty_us: f64,
    #[serde(rename = "dutyEU")]
    pub duty_eu: f64,
    #[serde(rename = "dutyChina")]
    pub duty_china: f64,
    pub unit: TariffUnit,
}

/// Import market a duty rate is quoted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DutyDestination {
    #[serde(rename = "US")]
    UnitedStates,
    #[serde(rename = "EU")]
    EuropeanUnion,
    #[serde(rename = "CN")]
    China,
}

impl DutyDestination {
    /// Unrecognized destinations are quoted at the US rate.
    pub fn from_code(code: &str) -> Self {
        match code {
            "EU" => DutyDestination::EuropeanUnion,
            "CN" => DutyDestination::China,
            _ => DutyDestination::UnitedStates,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DutyDestination::UnitedStates => "US",
            DutyDestination::EuropeanUnion => "EU",
            DutyDestination::China => "CN",
        }
    }
}

impl HsCode {
    pub fn duty_rate(&self, destination: DutyDestination) -> f64 {
        match destination {
            DutyDestination::UnitedStates => self.duty_us,
            DutyDestination::EuropeanUnion => self.duty_eu,
            DutyDestination::China => self.duty_china,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DutyQuote {
    pub hs_code: String,
    pub description: String,
    pub rate: f64,
    pub duty_amount: f64,
    pub total_with_duty: f64,
}

/// Cost build-up for a shipment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandedCost {
    pub goods_value: f64,
    pub freight_cost: f64,
    pub customs_duty: f64,
    pub insurance: f64,
    pub other_costs: f64,
}

impl LandedCost {
    /// Customs duty comes from the quote; the other costs come from the order.
    pub fn from_quote(
        goods_value: f64,
        quote: &DutyQuote,
        freight_cost: f64,
        insurance: f64,
        other_costs: f64,
    ) -> Self {
        Self {
            goods_value,
            freight_cost,
            customs_duty: quote.duty_amount,
            insurance,
            other_costs,
        }
    }

    pub fn total(&self) -> f64 {
        self.goods_value + self.freight_cost + self.customs_duty + self.insurance + self.other_costs
    }
}

// ── Schedule ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct TariffSchedule {
    chapters: Vec<HsChapter>,
    codes: Vec<HsCode>,
}

impl TariffSchedule {
    pub fn new(chapters: Vec<HsChapter>, codes: Vec<HsCode>) -> DeskResult<Self> {
        let mut seen = HashSet::new();
        for hs in &codes {
            if !seen.insert(hs.code.clone()) {
                return Err(DeskError::DuplicateReference {
                    kind: "HS code",
                    key: hs.code.clone(),
                });
            }
        }
        Ok(Self { chapters, codes })
    }

    pub fn chapters(&self) -> &[HsChapter] {
        &self.chapters
    }

    pub fn codes(&self) -> &[HsCode] {
        &self.codes
    }

    pub fn chapter(&self, chapter: &str) -> Option<&HsChapter> {
        self.chapters.iter().find(|c| c.chapter == chapter)
    }

    /// Case-insensitive match on code or description. An empty query
    /// matches every line.
    pub fn search(&self, query: &str) -> Vec<&HsCode> {
        let needle = query.to_lowercase();
        self.codes
            .iter()
            .filter(|hs| hs.code.contains(&needle) || hs.description.to_lowercase().contains(&needle))
            .collect()
    }

    /// Listing filter: optional chapter restriction, optional text query.
    pub fn search_in_chapter(&self, query: &str, chapter: Option<&str>) -> Vec<&HsCode> {
        let mut results = if query.is_empty() {
            self.codes.iter().collect()
        } else {
            self.search(query)
        };
        if let Some(chapter) = chapter.filter(|c| !c.is_empty()) {
            results.retain(|hs| hs.chapter == chapter);
        }
        results
    }

    pub fn get(&self, code: &str) -> Option<&HsCode> {
        self.codes.iter().find(|hs| hs.code == code)
    }

    /// Quote import duty for `value` into `destination`. Unknown codes
    /// quote nothing.
    pub fn calculate_duty(&self, code: &str, value: f64, destination: DutyDestination) -> Option<DutyQuote> {
        let hs = self.get(code)?;
        let rate = hs.duty_rate(destination);
        let duty_amount = (value * rate) / 100.0;
        Some(DutyQuote {
            hs_code: hs.code.clone(),
            description: hs.description.clone(),
            rate,
            duty_amount,
            total_with_duty: value + duty_amount,
        })
    }
}
