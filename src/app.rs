//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - resolves them into an `ExtrapolationConfig`
//! - runs the extrapolation pipeline
//! - prints the report
//! - writes optional exports

use clap::Parser;

use crate::cli::Cli;
use crate::domain::{ExtrapolationConfig, StationSelector};
use crate::error::ItrfError;

pub mod pipeline;

/// Entry point for the `itrf` binary.
pub fn run() -> Result<(), ItrfError> {
    let cli = Cli::parse();
    let config = config_from_args(&cli)?;

    let run = pipeline::run_extrapolation(&config)?;

    print!(
        "{}",
        crate::report::format_run_summary(&run.frame, &run.solutions, &run.unmatched)
    );

    if let Some(path) = &config.export_csv {
        crate::io::export::write_results_csv(path, &run.solutions)?;
    }
    if let Some(path) = &config.export_json {
        crate::io::export::write_results_json(path, &run.frame, &run.solutions)?;
    }

    Ok(())
}

/// Resolve CLI arguments into the pipeline configuration.
fn config_from_args(cli: &Cli) -> Result<ExtrapolationConfig, ItrfError> {
    let epoch = crate::time::Epoch::from_query_str(&cli.epoch)?;

    let mut selectors: Vec<StationSelector> =
        cli.station.iter().map(|s| StationSelector::id(s)).collect();
    selectors.extend(cli.domes.iter().map(|d| StationSelector::domes(d)));

    Ok(ExtrapolationConfig {
        ssc_path: cli.ssc.clone(),
        psd_path: cli.psd.clone(),
        epoch,
        selectors,
        export_csv: cli.export.clone(),
        export_json: cli.export_json.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_resolve_to_selectors_and_epoch() {
        let cli = Cli::parse_from([
            "itrf",
            "--ssc",
            "cat.ssc",
            "--epoch",
            "2017:143",
            "-s",
            "gras",
            "-d",
            "20805M002",
        ]);
        let config = config_from_args(&cli).unwrap();
        assert_eq!(config.epoch.year(), 2017);
        assert_eq!(
            config.selectors,
            vec![
                StationSelector::id("GRAS"),
                StationSelector::domes("20805M002")
            ]
        );
        assert!(config.psd_path.is_none());
    }

    #[test]
    fn bad_epoch_is_a_usage_error() {
        let cli = Cli::parse_from(["itrf", "--ssc", "cat.ssc", "--epoch", "143:2017", "-s", "GRAS"]);
        assert!(matches!(
            config_from_args(&cli),
            Err(ItrfError::Usage { .. })
        ));
    }
}
