use std::path::PathBuf;

use attriscope_analysis::{
    cohort::CohortComparisonTable,
    grouped_rates::GroupedRateTable,
    long_form::{self, LongFormRow},
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{command::InputArg, util};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ReportArg {
    #[clap(flatten)]
    input: InputArg,
    /// Role key for the rate and income analyses
    #[arg(long, default_value = "JobRole", value_name = "ATTRIBUTE")]
    role_key: String,
    /// Measure compared between outcome cohorts per role
    #[arg(long, default_value = "MonthlyIncome", value_name = "ATTRIBUTE")]
    income_measure: String,
    /// Distance key for the commute analysis
    #[arg(long, default_value = "DistanceFromHome", value_name = "ATTRIBUTE")]
    distance_key: String,
    /// Satisfaction / performance key melted into long-form series (repeatable)
    #[arg(
        long = "satisfaction-key",
        value_name = "ATTRIBUTE",
        default_values_t = [
            "EnvironmentSatisfaction".to_string(),
            "JobSatisfaction".to_string(),
            "RelationshipSatisfaction".to_string(),
            "JobInvolvement".to_string(),
            "PerformanceRating".to_string(),
            "WorkLifeBalance".to_string(),
        ]
    )]
    satisfaction_keys: Vec<String>,
    /// Travel-frequency key for the travel and education analysis
    #[arg(long, default_value = "BusinessTravel", value_name = "ATTRIBUTE")]
    travel_key: String,
    /// Education-field key for the travel and education analysis
    #[arg(long, default_value = "EducationField", value_name = "ATTRIBUTE")]
    education_key: String,
    /// Output file path (stdout when absent)
    #[arg(long)]
    output: Option<PathBuf>,
}

/// The standard attrition report: every derived table in one document.
#[derive(Debug, Serialize)]
struct AttritionReport {
    generated_at: DateTime<Utc>,
    source: String,
    records: usize,
    /// Outcome rates per role, sorted by descending rate.
    rates_by_role: GroupedRateTable,
    /// Income comparison per role, aligned to the rate ordering so the two
    /// tables read side by side.
    income_by_role: CohortComparisonTable,
    rates_by_distance: GroupedRateTable,
    /// One long-form series per satisfaction / performance metric.
    satisfaction_long_form: Vec<LongFormRow>,
    rates_by_travel_and_education: GroupedRateTable,
}

pub fn run(arg: &ReportArg) -> anyhow::Result<()> {
    let records = arg.input.load()?;

    eprintln!("Computing outcome rates by {}...", arg.role_key);
    let rates_by_role = GroupedRateTable::compute(&records, &[arg.role_key.as_str()])?;

    eprintln!("Comparing {} between outcome cohorts...", arg.income_measure);
    let income_by_role =
        CohortComparisonTable::compute(&records, &arg.role_key, &arg.income_measure)?
            .align_to(&rates_by_role.key_order())?;

    eprintln!("Computing outcome rates by {}...", arg.distance_key);
    let rates_by_distance = GroupedRateTable::compute(&records, &[arg.distance_key.as_str()])?;

    eprintln!(
        "Computing outcome rates by {}...",
        arg.satisfaction_keys.join(", ")
    );
    let satisfaction_keys: Vec<&str> =
        arg.satisfaction_keys.iter().map(String::as_str).collect();
    let satisfaction_rates = GroupedRateTable::compute(&records, &satisfaction_keys)?;
    let satisfaction_long_form = long_form::melt(&satisfaction_rates, &satisfaction_keys)?;

    eprintln!(
        "Computing outcome rates by {} and {}...",
        arg.travel_key, arg.education_key
    );
    let rates_by_travel_and_education = GroupedRateTable::compute(
        &records,
        &[arg.travel_key.as_str(), arg.education_key.as_str()],
    )?;

    let report = AttritionReport {
        generated_at: Utc::now(),
        source: arg.input.records_file().display().to_string(),
        records: records.len(),
        rates_by_role,
        income_by_role,
        rates_by_distance,
        satisfaction_long_form,
        rates_by_travel_and_education,
    };
    util::write_json(arg.output.as_ref(), &report)
}
