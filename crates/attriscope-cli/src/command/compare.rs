use std::path::PathBuf;

use attriscope_analysis::{cohort::CohortComparisonTable, grouped_rates::GroupedRateTable};
use serde::Serialize;

use crate::{command::InputArg, util};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct CompareArg {
    #[clap(flatten)]
    input: InputArg,
    /// Key attribute to group by
    #[arg(long, value_name = "ATTRIBUTE")]
    key: String,
    /// Measure attribute to compare between outcome cohorts
    #[arg(long, value_name = "ATTRIBUTE")]
    measure: String,
    /// Output file path (stdout when absent)
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct CompareDocument {
    rates: GroupedRateTable,
    comparison: CohortComparisonTable,
}

pub fn run(arg: &CompareArg) -> anyhow::Result<()> {
    let records = arg.input.load()?;

    eprintln!("Computing outcome rates by {}...", arg.key);
    let rates = GroupedRateTable::compute(&records, &[arg.key.as_str()])?;

    eprintln!("Comparing {} between outcome cohorts...", arg.measure);
    let comparison = CohortComparisonTable::compute(&records, &arg.key, &arg.measure)?
        .align_to(&rates.key_order())?;

    util::write_json(arg.output.as_ref(), &CompareDocument { rates, comparison })
}
