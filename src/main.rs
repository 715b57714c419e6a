//! `prm`: score a patient JSON document from the command line.
//!
//! Prints the hospitalisation probability on stdout. With `--verbose`, the
//! parsed record and its log-odds are listed first.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use hch_prm::application::ScoringService;
use hch_prm::config::LogMode;
use hch_prm::{logging, Assessment, PatientRiskRecord, ScoreEngine};

#[derive(Parser, Debug)]
#[command(
    name = "prm",
    version,
    about = "Health Care Homes hospitalisation risk (PRM) calculator"
)]
struct Cli {
    /// Patient JSON document
    #[arg(short, long, value_name = "FILE", env = "PRM_DATA")]
    data: PathBuf,

    /// Print the parsed patient record and log-odds before the score
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let _guard =
        logging::init_from_env(LogMode::Stderr, "warn").context("failed to initialise logging")?;

    let file = File::open(&cli.data)
        .with_context(|| format!("cannot read {}", cli.data.display()))?;

    let service = ScoringService::<ScoreEngine>::default();
    let (record, assessment) = service
        .assess_reader(BufReader::new(file))
        .with_context(|| format!("cannot score {}", cli.data.display()))?;

    report(&mut io::stdout().lock(), &record, &assessment, cli.verbose)?;
    Ok(())
}

fn report<W: Write>(
    out: &mut W,
    record: &PatientRiskRecord,
    assessment: &Assessment,
    verbose: bool,
) -> io::Result<()> {
    if verbose {
        writeln!(out, "{record}")?;
        writeln!(out, "{assessment}")?;
    }
    writeln!(out, "{:?}", assessment.probability)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_short_flags() {
        let cli = Cli::try_parse_from(["prm", "-d", "patient.json", "-v"]).expect("valid args");
        assert_eq!(cli.data, PathBuf::from("patient.json"));
        assert!(cli.verbose);
    }

    #[test]
    fn test_report_prints_probability_last() {
        let record = PatientRiskRecord::new();
        let assessment = Assessment::new(1.0, 36.188348860924);

        let mut out = Vec::new();
        report(&mut out, &record, &assessment, false).expect("write");
        assert_eq!(String::from_utf8(out).expect("utf8"), "1.0\n");

        let mut out = Vec::new();
        report(&mut out, &record, &assessment, true).expect("write");
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.starts_with(&format!("{record}\n")));
        assert!(text.ends_with("probability=1.0 (log-odds 36.188349)\n1.0\n"));
    }
}
