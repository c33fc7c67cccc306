use anyhow::Result;
use tracing::info;

use crate::cli::StatsArgs;
use crate::commands::merge::{print_statistics, read_merged_csv};
use crate::stats::StatisticsReport;

pub fn run(args: StatsArgs) -> Result<()> {
    let records = read_merged_csv(&args.merged_path)?;
    info!(
        path = %args.merged_path.display(),
        records = records.len(),
        "loaded merged table"
    );

    let statistics = (!records.is_empty()).then(|| StatisticsReport::compute(&records));
    print_statistics(statistics.as_ref(), args.json)
}
