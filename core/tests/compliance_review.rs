//! Order review tests: route flags, partner screening, compliance score.

use tradedesk_core::{
    compliance::{OrderReviewer, OrderRoute, RouteLeg, ScoreBand},
    reference::EmbargoLevel,
    DeskConfig, MatchType, ScreeningEngine,
};

fn engine() -> ScreeningEngine {
    let config = DeskConfig::bundled().expect("bundled reference data");
    ScreeningEngine::new(config.sanctions)
}

fn order(id: &str, partner: Option<&str>, origin: &str, destination: &str) -> OrderRoute {
    OrderRoute {
        order_id: id.to_string(),
        partner: partner.map(str::to_string),
        origin: Some(origin.to_string()),
        destination: Some(destination.to_string()),
    }
}

#[test]
fn clean_route_has_no_flags() {
    let engine = engine();
    let reviewer = OrderReviewer::new(&engine);
    let assessment = reviewer.assess(&order("ORD-1", Some("Acme Trading"), "Shanghai, China", "Hamburg, Germany"));
    assert!(!assessment.has_route_risk());
    assert!(!assessment.has_partner_hits());
}

#[test]
fn country_name_in_location_flags_the_leg() {
    let engine = engine();
    let reviewer = OrderReviewer::new(&engine);
    let assessment = reviewer.assess(&order("ORD-2", None, "Rotterdam, Netherlands", "Havana, Cuba"));
    assert_eq!(assessment.route_flags.len(), 1);
    let flag = &assessment.route_flags[0];
    assert_eq!(flag.leg, RouteLeg::Destination);
    assert_eq!(flag.country.code, "CU");
    assert_eq!(flag.country.level, EmbargoLevel::FullEmbargo);
}

#[test]
fn bare_code_falls_back_to_code_lookup() {
    let engine = engine();
    let reviewer = OrderReviewer::new(&engine);
    let assessment = reviewer.assess(&order("ORD-3", None, "IR", "VE"));
    let codes: Vec<&str> = assessment.route_flags.iter().map(|f| f.country.code.as_str()).collect();
    assert_eq!(codes, vec!["IR", "VE"]);
    assert_eq!(assessment.route_flags[0].leg, RouteLeg::Origin);
}

#[test]
fn missing_locations_are_not_flagged() {
    let engine = engine();
    let reviewer = OrderReviewer::new(&engine);
    let assessment = reviewer.assess(&OrderRoute {
        order_id: "ORD-4".into(),
        ..Default::default()
    });
    assert!(assessment.route_flags.is_empty());
    assert!(assessment.partner_matches.is_empty());
}

#[test]
fn partner_is_screened() {
    let engine = engine();
    let reviewer = OrderReviewer::new(&engine);
    let assessment = reviewer.assess(&order("ORD-5", Some("Sberbank"), "Moscow", "Dubai"));
    assert!(assessment.has_partner_hits());
    assert_eq!(assessment.partner_matches[0].match_type, MatchType::Exact);
    // "Moscow" alone does not name a restricted country.
    assert!(!assessment.has_route_risk());
}

#[test]
fn compliance_score_counts_route_risk_only() {
    let engine = engine();
    let reviewer = OrderReviewer::new(&engine);
    let orders = vec![
        order("A", None, "Shanghai, China", "Los Angeles, USA"),
        order("B", Some("SBERBANK"), "Busan, South Korea", "Hamburg, Germany"),
        order("C", None, "Tehran, Iran", "Hamburg, Germany"),
        order("D", None, "Santos, Brazil", "Antwerp, Belgium"),
    ];
    let summary = reviewer.summarize(&orders);
    assert_eq!(summary.orders_reviewed, 4);
    assert_eq!(summary.orders_with_risk, 1);
    assert_eq!(summary.parties_screened, 8);
    assert_eq!(summary.compliance_score, 75);
    assert_eq!(summary.score_band, ScoreBand::Yellow);
    assert_eq!(summary.restricted_countries, 8);
}

#[test]
fn score_rounds_half_up() {
    let engine = engine();
    let reviewer = OrderReviewer::new(&engine);
    // 7 of 8 clean → 87.5 → 88.
    let mut orders: Vec<OrderRoute> = (0..7)
        .map(|i| order(&format!("OK-{i}"), None, "Santos, Brazil", "Antwerp, Belgium"))
        .collect();
    orders.push(order("RISK", None, "Minsk, Belarus", "Antwerp, Belgium"));
    let summary = reviewer.summarize(&orders);
    assert_eq!(summary.compliance_score, 88);
    assert_eq!(summary.score_band, ScoreBand::Yellow);
}

#[test]
fn empty_order_book_scores_zero() {
    let engine = engine();
    let reviewer = OrderReviewer::new(&engine);
    let summary = reviewer.summarize(&[]);
    assert_eq!(summary.orders_reviewed, 0);
    assert_eq!(summary.compliance_score, 0);
    assert_eq!(summary.score_band, ScoreBand::Red);
}

#[test]
fn order_route_reads_register_json() {
    let json = r#"{"orderId":"ORD-9","partner":"Acme","origin":"Yangon, Myanmar"}"#;
    let route: OrderRoute = serde_json::from_str(json).expect("deserialize order");
    assert_eq!(route.destination, None);

    let engine = engine();
    let reviewer = OrderReviewer::new(&engine);
    let flags = reviewer.route_flags(&route);
    assert_eq!(flags.len(), 1);
    assert_eq!(flags[0].country.code, "MM");
}
