//! `pmemo` command-line entry point.
//!
//! # Responsibility
//! - Build [`CoreConfig`] from flags/env once at startup.
//! - Act as the request boundary: validate input, call services, print JSON.
//!
//! # Invariants
//! - Service failures print an `{"status", "detail"}` payload and exit 1.
//! - Startup failures (config, logging, database) exit 2.

mod args;
mod commands;

use anyhow::Context;
use args::Cli;
use clap::Parser;
use log::{info, warn};
use pmemo_core::db::open_db;
use pmemo_core::{init_logging, ErrorResponse};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("pmemo: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = cli.core_config();
    let user = cli.caller()?;
    if config.logging.dir.is_some() {
        init_logging(&config.logging).map_err(anyhow::Error::msg)?;
    }

    let conn = open_db(&config.database).context("failed to open database")?;
    let command_name = cli.command.name();
    info!(
        "event=cli_command module=cli status=start command={} user={}",
        command_name, user
    );

    match commands::execute(&conn, user, cli.command)? {
        Ok(payload) => {
            println!("{}", serde_json::to_string_pretty(&payload)?);
            info!("event=cli_command module=cli status=ok command={command_name}");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            let response = ErrorResponse::from(&err);
            warn!(
                "event=cli_command module=cli status=error command={} http_status={} error={}",
                command_name, response.status, err
            );
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(ExitCode::from(1))
        }
    }
}
