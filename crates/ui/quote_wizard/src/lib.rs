//! Terminal front end of the InsureQuick quote wizard.
//!
//! `run` is the whole binary: install error hooks and the file logger, load
//! the configuration, then either drive the interactive TUI or one of the
//! headless commands.

pub mod action;
pub mod app;
pub mod cli;
pub mod components;
pub mod config;
pub mod errors;
pub mod headless;
pub mod logging;
pub mod pages;
pub mod tui;

use std::process::ExitCode;

use color_eyre::Result;
use quote_core::PlanCatalog;

use crate::app::App;
use crate::cli::{Cli, Cmd, RunArgs};
use crate::config::Config;

pub async fn run(cli: Cli) -> Result<ExitCode> {
    crate::errors::init()?;
    crate::config::ensure_data_and_config_dirs_exist()?;
    crate::logging::init()?;

    let mut config = Config::new()?;
    let catalog = PlanCatalog::standard();

    match cli.cmd.unwrap_or(Cmd::Run(RunArgs::default())) {
        Cmd::Run(args) => {
            config.apply_args(&args);
            let mut app = App::new(config, catalog)?;
            app.run().await?;
        }
        Cmd::Plans { json } => headless::plans(&catalog, json, &mut std::io::stdout())?,
        Cmd::Validate {
            path,
            step,
            year,
            json,
        } => {
            if !headless::validate(&path, step, year, json, &mut std::io::stdout())? {
                return Ok(ExitCode::FAILURE);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
