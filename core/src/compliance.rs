//! Order review: route risk flags, partner screening and the desk-level
//! compliance score.
//!
//! Only route risk (origin or destination in a restricted country) counts
//! against the compliance score. Partner hits are reported alongside.

use crate::{
    reference::RestrictedCountry,
    screening::{ScreeningEngine, ScreeningMatch},
};
use serde::{Deserialize, Serialize};

const GREEN_SCORE_FLOOR: u8 = 90;
const YELLOW_SCORE_FLOOR: u8 = 70;

/// The order fields compliance cares about, as kept by the order register.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRoute {
    pub order_id: String,
    #[serde(default)]
    pub partner: Option<String>,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteLeg {
    Origin,
    Destination,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteFlag {
    pub leg: RouteLeg,
    pub country: RestrictedCountry,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderAssessment {
    pub order_id: String,
    pub route_flags: Vec<RouteFlag>,
    pub partner_matches: Vec<ScreeningMatch>,
}

impl OrderAssessment {
    pub fn has_route_risk(&self) -> bool {
        !self.route_flags.is_empty()
    }

    pub fn has_partner_hits(&self) -> bool {
        !self.partner_matches.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScoreBand {
    Green,
    Yellow,
    Red,
}

impl ScoreBand {
    pub fn for_score(score: u8) -> Self {
        if score >= GREEN_SCORE_FLOOR {
            ScoreBand::Green
        } else if score >= YELLOW_SCORE_FLOOR {
            ScoreBand::Yellow
        } else {
            ScoreBand::Red
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceSummary {
    pub orders_reviewed: usize,
    pub orders_with_risk: usize,
    /// Two parties (shipper and consignee) per order.
    pub parties_screened: usize,
    pub compliance_score: u8,
    pub score_band: ScoreBand,
    pub restricted_countries: usize,
}

pub struct OrderReviewer<'a> {
    engine: &'a ScreeningEngine,
}

impl<'a> OrderReviewer<'a> {
    pub fn new(engine: &'a ScreeningEngine) -> Self {
        Self { engine }
    }

    /// Resolve a free-text location to a restricted country.
    ///
    /// Country names are matched by containment first, in reference order
    /// ("Pyongyang, North Korea"). A bare two-letter code falls back to the
    /// exact code lookup.
    pub fn restricted_country_for(&self, location: &str) -> Option<&'a RestrictedCountry> {
        let engine: &'a ScreeningEngine = self.engine;
        engine
            .reference()
            .restricted_countries()
            .iter()
            .find(|c| location.contains(c.name.as_str()))
            .or_else(|| engine.check_country_restrictions(location.trim()))
    }

    pub fn route_flags(&self, order: &OrderRoute) -> Vec<RouteFlag> {
        let legs = [
            (RouteLeg::Origin, order.origin.as_deref()),
            (RouteLeg::Destination, order.destination.as_deref()),
        ];
        legs.into_iter()
            .filter_map(|(leg, location)| {
                let country = self.restricted_country_for(location?)?;
                Some(RouteFlag {
                    leg,
                    country: country.clone(),
                })
            })
            .collect()
    }

    pub fn assess(&self, order: &OrderRoute) -> OrderAssessment {
        let route_flags = self.route_flags(order);
        let partner_matches = order
            .partner
            .as_deref()
            .map(|p| self.engine.screen_party(p))
            .unwrap_or_default();

        OrderAssessment {
            order_id: order.order_id.clone(),
            route_flags,
            partner_matches,
        }
    }

    pub fn summarize(&self, orders: &[OrderRoute]) -> ComplianceSummary {
        let orders_with_risk = orders
            .iter()
            .filter(|o| !self.route_flags(o).is_empty())
            .count();
        let total = orders.len();
        let clean_share = (total - orders_with_risk) as f64 / total.max(1) as f64;
        let compliance_score = (clean_share * 100.0 + 0.5).floor() as u8;

        ComplianceSummary {
            orders_reviewed: total,
            orders_with_risk,
            parties_screened: total * 2,
            compliance_score,
            score_band: ScoreBand::for_score(compliance_score),
            restricted_countries: self.engine.reference().restricted_countries().len(),
        }
    }
}
