//! # Demo Data Dump
//!
//! Loads the demo data set and prints the derived view as JSON.
//!
//! ## Usage
//! ```bash
//! # Derive against today's date
//! cargo run -p multiluz-store --bin seed
//!
//! # Pin the reference date
//! cargo run -p multiluz-store --bin seed -- --today 2023-11-10
//! ```

use std::env;
use std::process::ExitCode;

use chrono::{NaiveDate, Utc};
use serde::Serialize;

use multiluz_core::commission::derive_commissions;
use multiluz_core::order::derive_orders;
use multiluz_core::{AppConfiguration, CalculatedCommission, CalculatedOrder, StatusPolicy};
use multiluz_store::seed::demo_store;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Snapshot {
    today: NaiveDate,
    config: AppConfiguration,
    orders: Vec<CalculatedOrder>,
    commissions: Vec<CalculatedCommission>,
}

fn parse_today(args: &[String]) -> Result<NaiveDate, String> {
    match args.iter().position(|a| a == "--today") {
        Some(i) => {
            let raw = args.get(i + 1).ok_or("--today needs a YYYY-MM-DD value")?;
            NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| format!("invalid --today {raw}: {e}"))
        }
        None => Ok(Utc::now().date_naive()),
    }
}

fn run() -> Result<String, String> {
    let args: Vec<String> = env::args().collect();
    let today = parse_today(&args)?;

    let store = demo_store(today).map_err(|e| e.to_string())?;
    let orders = derive_orders(
        &store.orders().list(),
        &store.payments().list(),
        today,
        &StatusPolicy::default(),
    );
    let commissions = derive_commissions(&store.commissions().list(), &orders);

    let snapshot = Snapshot {
        today,
        config: store.config().get(),
        orders,
        commissions,
    };
    serde_json::to_string_pretty(&snapshot).map_err(|e| e.to_string())
}

fn main() -> ExitCode {
    match run() {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("seed: {e}");
            ExitCode::FAILURE
        }
    }
}
