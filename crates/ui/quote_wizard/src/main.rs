use std::process::ExitCode;

use clap::Parser;
use color_eyre::Result;
use quote_wizard::cli::Cli;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Cli::parse();
    quote_wizard::run(args).await
}
