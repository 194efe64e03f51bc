use std::path::PathBuf;

use attriscope_analysis::{
    grouped_rates::GroupedRateTable,
    long_form::{self, LongFormRow},
};
use serde::Serialize;

use crate::{command::InputArg, util};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct RatesArg {
    #[clap(flatten)]
    input: InputArg,
    /// Key attribute to group by (repeatable for multi-key grouping)
    #[arg(long = "key", value_name = "ATTRIBUTE", required = true)]
    keys: Vec<String>,
    /// Also emit the melted long-form rows
    #[arg(long)]
    long: bool,
    /// Output file path (stdout when absent)
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct RatesDocument {
    rates: GroupedRateTable,
    #[serde(skip_serializing_if = "Option::is_none")]
    long_form: Option<Vec<LongFormRow>>,
}

pub fn run(arg: &RatesArg) -> anyhow::Result<()> {
    let records = arg.input.load()?;

    eprintln!("Computing outcome rates by {}...", arg.keys.join(", "));
    let keys: Vec<&str> = arg.keys.iter().map(String::as_str).collect();
    let rates = GroupedRateTable::compute(&records, &keys)?;
    eprintln!("Computed {} partitions", rates.rows.len());

    let long_form = if arg.long {
        Some(long_form::melt(&rates, &keys)?)
    } else {
        None
    };

    util::write_json(arg.output.as_ref(), &RatesDocument { rates, long_form })
}
