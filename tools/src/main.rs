//! desk-runner: headless front end for the trade desk compliance core.
//!
//! Usage:
//!   desk-runner --screen "KOREA KWANGSON" --db screenings.db
//!   desk-runner --country KP
//!   desk-runner --duty 8528.72.64 --value 10000 --dest EU
//!   desk-runner --search-hs coffee
//!   desk-runner --screen SBERBANK --export matches.csv
//!   desk-runner --ipc-mode

use anyhow::Result;
use chrono::Utc;
use std::env;
use std::io::{self, BufRead, Write};
use tradedesk_core::{
    compliance::{OrderRoute, OrderReviewer},
    export,
    store::DeskStore,
    tariff::DutyDestination,
    DeskConfig, ScreeningEngine,
};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    Screen {
        name: String,
    },
    CheckCountry {
        code: String,
    },
    Duty {
        hs_code: String,
        value: f64,
        #[serde(default)]
        destination: Option<String>,
    },
    SearchHs {
        query: String,
        #[serde(default)]
        chapter: Option<String>,
    },
    ReviewOrders {
        orders: Vec<OrderRoute>,
    },
    History {
        #[serde(default = "default_history_limit")]
        limit: usize,
    },
    Quit,
}

fn default_history_limit() -> usize {
    20
}

#[derive(serde::Serialize)]
struct HistoryEntry {
    screening_id: String,
    query: String,
    screened_at: String,
    match_count: i64,
    top_confidence: Option<u8>,
}

struct Desk {
    config: DeskConfig,
    engine: ScreeningEngine,
    store: DeskStore,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let db = string_arg(&args, "--db").unwrap_or(":memory:");
    let data_dir = string_arg(&args, "--data-dir");

    let config = match data_dir {
        Some(dir) => DeskConfig::load(dir)?,
        None => DeskConfig::bundled()?,
    };
    let store = if db == ":memory:" {
        DeskStore::in_memory()?
    } else {
        DeskStore::open(db)?
    };
    store.migrate()?;

    let engine = ScreeningEngine::new(config.sanctions.clone());
    let desk = Desk {
        config,
        engine,
        store,
    };

    if ipc_mode {
        return run_ipc_loop(&desk);
    }

    println!("Trade Desk: desk-runner");
    println!("  db:        {db}");
    println!("  data_dir:  {}", data_dir.unwrap_or("(bundled)"));
    println!();

    if let Some(name) = string_arg(&args, "--screen") {
        let matches = desk.engine.screen_party(name);
        desk.store.record_screening(name, &matches, Utc::now())?;
        print_matches(&desk, name, &matches);

        if let Some(path) = string_arg(&args, "--export") {
            if matches.is_empty() {
                println!("  (nothing to export)");
            } else {
                let file = std::fs::File::create(path)?;
                export::write_matches_csv(&matches, file)?;
                println!("  exported {} match(es) to {path}", matches.len());
            }
        }
    }

    if let Some(code) = string_arg(&args, "--country") {
        match desk.engine.check_country_restrictions(code) {
            Some(c) => println!(
                "{code}: RESTRICTED, {} ({}) programs: {}",
                c.name,
                c.level.as_str(),
                c.programs.join(", ")
            ),
            None => println!("{code}: not restricted"),
        }
    }

    if let Some(hs_code) = string_arg(&args, "--duty") {
        let value = parse_arg(&args, "--value", 0.0f64);
        let dest = DutyDestination::from_code(string_arg(&args, "--dest").unwrap_or("US"));
        match desk.config.tariff.calculate_duty(hs_code, value, dest) {
            Some(q) => {
                println!("=== DUTY QUOTE ===");
                println!("  HS code:        {}", q.hs_code);
                println!("  description:    {}", q.description);
                println!("  destination:    {}", dest.as_str());
                println!("  duty rate:      {}%", q.rate);
                println!("  goods value:    ${value:.2}");
                println!("  duty amount:    ${:.2}", q.duty_amount);
                println!("  total w/ duty:  ${:.2}", q.total_with_duty);
            }
            None => println!("HS code {hs_code} not found"),
        }
    }

    if let Some(query) = string_arg(&args, "--search-hs") {
        let results = desk.config.tariff.search(query);
        println!("=== HS SEARCH '{query}' ({} result(s)) ===", results.len());
        for hs in results {
            println!(
                "  {} | {} | US {}% EU {}% CN {}%",
                hs.code, hs.description, hs.duty_us, hs.duty_eu, hs.duty_china
            );
        }
    }

    Ok(())
}

fn run_ipc_loop(desk: &Desk) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{}", err_json)?;
                stdout.flush()?;
                continue;
            }
        };

        let response = match cmd {
            IpcCommand::Quit => break,
            IpcCommand::Screen { name } => {
                let matches = desk.engine.screen_party(&name);
                let screening_id = desk.store.record_screening(&name, &matches, Utc::now())?;
                serde_json::json!({ "screening_id": screening_id, "matches": matches })
            }
            IpcCommand::CheckCountry { code } => {
                serde_json::json!({ "restriction": desk.engine.check_country_restrictions(&code) })
            }
            IpcCommand::Duty {
                hs_code,
                value,
                destination,
            } => {
                let dest = DutyDestination::from_code(destination.as_deref().unwrap_or("US"));
                match desk.config.tariff.calculate_duty(&hs_code, value, dest) {
                    Some(quote) => serde_json::to_value(quote)?,
                    None => {
                        log::warn!("Duty requested for unknown HS code {hs_code}");
                        serde_json::json!({ "error": format!("unknown HS code {hs_code}") })
                    }
                }
            }
            IpcCommand::SearchHs { query, chapter } => {
                let results = desk.config.tariff.search_in_chapter(&query, chapter.as_deref());
                serde_json::json!({ "codes": results })
            }
            IpcCommand::ReviewOrders { orders } => {
                let reviewer = OrderReviewer::new(&desk.engine);
                let assessments: Vec<_> = orders.iter().map(|o| reviewer.assess(o)).collect();
                serde_json::json!({
                    "summary": reviewer.summarize(&orders),
                    "assessments": assessments,
                })
            }
            IpcCommand::History { limit } => {
                let entries: Vec<HistoryEntry> = desk
                    .store
                    .recent_screenings(limit)?
                    .into_iter()
                    .map(|row| HistoryEntry {
                        screening_id: row.screening_id,
                        query: row.query,
                        screened_at: row.screened_at,
                        match_count: row.match_count,
                        top_confidence: row.top_confidence,
                    })
                    .collect();
                serde_json::json!({ "screenings": entries })
            }
        };
        writeln!(stdout, "{}", response)?;
        stdout.flush()?;
    }
    Ok(())
}

fn print_matches(desk: &Desk, name: &str, matches: &[tradedesk_core::ScreeningMatch]) {
    if matches.is_empty() {
        println!("No matches found: \"{name}\" did not match any sanctions entries.");
        return;
    }
    println!("=== {} POTENTIAL MATCH(ES) FOR \"{name}\" ===", matches.len());
    for m in matches {
        let source = desk
            .engine
            .sanctions_source(m.entity.source)
            .map(|s| s.name.as_str())
            .unwrap_or(m.entity.source.as_str());
        println!(
            "  {:<30} {:>3}% {:<7} {:?} | {} | {} | {} | added {}",
            m.entity.name,
            m.confidence,
            m.match_type.as_str(),
            m.band(),
            m.entity.country.as_deref().unwrap_or("N/A"),
            source,
            m.entity.programs.join(", "),
            m.entity.added_date
        );
    }
}

fn string_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
