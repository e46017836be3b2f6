use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "quote-wizard",
    version,
    about = "InsureQuick motor insurance quote wizard"
)]
pub struct Cli {
    /// Defaults to `run`.
    #[command(subcommand)]
    pub cmd: Option<Cmd>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Cmd {
    /// Run the interactive TUI
    Run(RunArgs),
    /// Print the plan catalog
    Plans {
        #[arg(long)]
        json: bool,
    },
    /// Check an answers file (JSON object keyed by field name) without the TUI
    Validate {
        path: PathBuf,
        /// Only check this step (1-5)
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
        step: Option<u8>,
        /// Reference year for the vehicle year and age rules
        #[arg(long, value_parser = clap::value_parser!(i32).range(1900..=9999))]
        year: Option<i32>,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct RunArgs {
    /// Ticks per second
    #[arg(short, long, value_name = "FLOAT")]
    pub tick_rate: Option<f64>,
    /// Frames per second
    #[arg(short, long, value_name = "FLOAT")]
    pub frame_rate: Option<f64>,
    /// Processing delay between Next and the step change
    #[arg(long, value_name = "MS")]
    pub delay_ms: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_run() {
        let cli = Cli::try_parse_from(["quote-wizard"]).unwrap();
        assert_eq!(cli.cmd, None);
    }

    #[test]
    fn run_flags() {
        let cli =
            Cli::try_parse_from(["quote-wizard", "run", "-t", "2", "--delay-ms", "10"]).unwrap();
        assert_eq!(
            cli.cmd,
            Some(Cmd::Run(RunArgs {
                tick_rate: Some(2.0),
                frame_rate: None,
                delay_ms: Some(10),
            }))
        );
    }

    #[test]
    fn validate_rejects_out_of_range_step() {
        assert!(Cli::try_parse_from(["quote-wizard", "validate", "a.json", "--step", "6"]).is_err());
        let cli = Cli::try_parse_from([
            "quote-wizard",
            "validate",
            "a.json",
            "--step",
            "2",
            "--json",
        ])
        .unwrap();
        assert_eq!(
            cli.cmd,
            Some(Cmd::Validate {
                path: PathBuf::from("a.json"),
                step: Some(2),
                year: None,
                json: true,
            })
        );
    }

    #[test]
    fn validate_year_is_bounded() {
        for year in ["2147483647", "-2147483648", "1899", "10000"] {
            assert!(
                Cli::try_parse_from(["quote-wizard", "validate", "a.json", "--year", year]).is_err(),
                "{year}"
            );
        }
        let cli = Cli::try_parse_from(["quote-wizard", "validate", "a.json", "--year", "2030"])
            .unwrap();
        assert!(matches!(cli.cmd, Some(Cmd::Validate { year: Some(2030), .. })));
    }
}
