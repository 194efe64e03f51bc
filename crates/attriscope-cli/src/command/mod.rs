use std::path::{Path, PathBuf};

use attriscope_model::RecordSet;
use clap::{Args, Parser, Subcommand};

use crate::data::{self, IngestOptions};

mod compare;
mod rates;
mod report;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What analysis to run
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Outcome rates grouped by one or more key attributes
    Rates(#[clap(flatten)] rates::RatesArg),
    /// Cohort measure comparison aligned to the rate ordering
    Compare(#[clap(flatten)] compare::CompareArg),
    /// The standard attrition report over one record file
    Report(#[clap(flatten)] report::ReportArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Rates(arg) => rates::run(&arg),
        Mode::Compare(arg) => compare::run(&arg),
        Mode::Report(arg) => report::run(&arg),
    }
}

/// Input arguments shared by every subcommand.
#[derive(Debug, Clone, Args)]
pub(crate) struct InputArg {
    /// Records data file path (JSON array of flat objects)
    records_file: PathBuf,
    /// Outcome attribute to encode as the binary flag
    #[arg(long, default_value = "Attrition", value_name = "ATTRIBUTE")]
    outcome: String,
    /// Level of the outcome attribute that counts as positive
    #[arg(long, default_value = "Yes", value_name = "LEVEL")]
    positive_level: String,
    /// Identifier attribute to drop during ingestion (repeatable)
    #[arg(long = "drop", value_name = "ATTRIBUTE")]
    drop: Vec<String>,
}

impl InputArg {
    pub(crate) fn load(&self) -> anyhow::Result<RecordSet> {
        eprintln!("Loading records from {}...", self.records_file.display());
        let options = IngestOptions {
            outcome_attribute: self.outcome.clone(),
            positive_level: self.positive_level.clone(),
            drop: self.drop.clone(),
        };
        let records = data::load_records(&self.records_file, &options)?;
        eprintln!("Loaded {} records", records.len());
        Ok(records)
    }

    pub(crate) fn records_file(&self) -> &Path {
        &self.records_file
    }
}
