//! # Multiluz Back-Office Entry Point
//!
//! ## Usage
//! ```bash
//! # Overview for the first profile (Admin in the demo data)
//! cargo run -p multiluz-backoffice
//!
//! # Act as a salesperson with an explicit config file
//! cargo run -p multiluz-backoffice -- --as USR-003 --config ./backoffice.toml
//! ```

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use multiluz_backoffice::{init_tracing, run, RunOptions};

fn parse_args(args: &[String]) -> Result<RunOptions, String> {
    let mut options = RunOptions::default();
    let mut iter = args.iter().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let path = iter.next().ok_or("--config needs a path")?;
                options.config_path = Some(PathBuf::from(path));
            }
            "--as" => {
                let id = iter.next().ok_or("--as needs a profile id")?;
                options.acting_profile = Some(id.clone());
            }
            other => return Err(format!("unknown argument: {other}")),
        }
    }

    Ok(options)
}

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = env::args().collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("multiluz-backoffice: {e}");
            return ExitCode::from(2);
        }
    };

    match run(options) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("multiluz-backoffice: {e}");
            ExitCode::FAILURE
        }
    }
}
