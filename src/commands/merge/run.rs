use super::*;

pub fn run(args: MergeArgs) -> Result<()> {
    let config = PipelineConfig::from_args(&args)?;
    let outcome = run_pipeline(&config)?;
    print_statistics(outcome.statistics.as_ref(), args.json)
}

#[derive(Debug)]
pub(super) struct PipelineOutcome {
    pub sources: Vec<SourceTable>,
    pub merged: MergedTable,
    pub statistics: Option<StatisticsReport>,
    pub output_written: bool,
}

pub(super) fn run_pipeline(config: &PipelineConfig) -> Result<PipelineOutcome> {
    info!(
        source_count = config.sources.len(),
        output = %config.output_path.display(),
        keep_blank_identifiers = config.dedup.keep_blank_identifiers,
        "starting merge"
    );

    let parser = FieldParser::new()?;
    let sources = config
        .sources
        .iter()
        .map(|descriptor| process_source(&parser, descriptor))
        .collect::<Vec<SourceTable>>();

    let merged = merge_tables(
        sources.iter().map(|source| source.records.as_slice()),
        config.dedup,
    );
    info!(
        concatenated = merged.concatenated,
        merged = merged.records.len(),
        duplicates_removed = merged.duplicates_removed,
        "merged sources"
    );
    if merged.blank_identifiers_collapsed > 0 {
        warn!(
            blank_identifier_records = merged.blank_identifier_records,
            collapsed = merged.blank_identifiers_collapsed,
            "records without an EPIC number were collapsed into one"
        );
    }

    let (statistics, output_written) = if merged.is_empty() {
        warn!("no records extracted from any source; merged table not written");
        (None, false)
    } else {
        write_merged_csv(&config.output_path, &merged.records)?;
        let statistics = StatisticsReport::compute(&merged.records);
        info!(
            total = statistics.total,
            female = StatisticsReport::count_for(&statistics.gender, Gender::F.as_str()),
            male = StatisticsReport::count_for(&statistics.gender, Gender::M.as_str()),
            unique_households = statistics.unique_households,
            "computed statistics"
        );
        (Some(statistics), true)
    };

    let outcome = PipelineOutcome {
        sources,
        merged,
        statistics,
        output_written,
    };

    if let Some(report_path) = &config.report_path {
        let report = build_run_report(config, &outcome);
        write_json_pretty(report_path, &report)?;
        info!(path = %report_path.display(), "wrote merge run report");
    }

    Ok(outcome)
}

pub(super) fn build_run_report(config: &PipelineConfig, outcome: &PipelineOutcome) -> MergeRunReport {
    let mut warnings = outcome
        .sources
        .iter()
        .filter_map(|source| {
            source.failure_reason.as_ref().map(|reason| {
                format!("source {} skipped: {reason}", source.descriptor.display_name())
            })
        })
        .collect::<Vec<String>>();

    if outcome.merged.blank_identifiers_collapsed > 0 {
        warnings.push(format!(
            "{} records without an EPIC number were dropped as duplicates",
            outcome.merged.blank_identifiers_collapsed
        ));
    }
    if !outcome.output_written {
        warnings.push("no data extracted; merged table not written".to_string());
    }

    MergeRunReport {
        report_version: REPORT_VERSION,
        generated_at: now_utc_string(),
        output_path: outcome
            .output_written
            .then(|| config.output_path.display().to_string()),
        keep_blank_identifiers: config.dedup.keep_blank_identifiers,
        sources: outcome.sources.iter().map(SourceTable::summary).collect(),
        counts: MergeCounts {
            source_count: outcome.sources.len(),
            failed_source_count: outcome
                .sources
                .iter()
                .filter(|source| source.status == SourceStatus::Failed)
                .count(),
            concatenated_records: outcome.merged.concatenated,
            merged_records: outcome.merged.records.len(),
            duplicates_removed: outcome.merged.duplicates_removed,
            blank_identifier_records: outcome.merged.blank_identifier_records,
            blank_identifiers_collapsed: outcome.merged.blank_identifiers_collapsed,
        },
        statistics: outcome.statistics.clone(),
        warnings,
    }
}
