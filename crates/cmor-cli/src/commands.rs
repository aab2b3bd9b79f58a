use std::time::Instant;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{info, info_span, warn};

use cmor_model::{FileNameSchema, Frequency};
use cmor_validate::{BatchOptions, BatchSummary, validate_batch};

use cmor_cli::discovery::list_data_files;
use cmor_cli::manifest;

use crate::cli::{SchemaArg, ValidateArgs};
use crate::summary::apply_table_style;

pub fn run_frequencies() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Code", "Date token", "Example"]);
    apply_table_style(&mut table);
    let frequencies = [
        Frequency::Annual,
        Frequency::Decadal,
        Frequency::Yearly,
        Frequency::Monthly,
        Frequency::Daily,
        Frequency::SixHourly,
        Frequency::ThreeHourly,
        Frequency::OneHourly,
        Frequency::Hourly,
        Frequency::SubHourly,
        Frequency::Fixed,
    ];
    for frequency in frequencies {
        let (layout, example) = match frequency.date_token_width() {
            Some(4) => ("YYYY", "1850"),
            Some(6) => ("YYYYMM", "185001"),
            Some(8) => ("YYYYMMDD", "18500101"),
            Some(12) => ("YYYYMMDDhhmm", "185001010600"),
            Some(_) => ("YYYYMMDDhhmmss", "18500101060000"),
            None => ("-", "-"),
        };
        table.add_row(vec![frequency.as_code(), layout, example]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_validate(args: &ValidateArgs) -> Result<BatchSummary> {
    let schema = match args.schema {
        SchemaArg::FiveField => FileNameSchema::LegacyFiveField,
        SchemaArg::SixField => FileNameSchema::SixFieldGridded,
    };
    let span = info_span!("validate", data_path = %args.data_path.display());
    let _guard = span.enter();

    let paths = if args.single_file {
        vec![args.data_path.clone()]
    } else {
        list_data_files(&args.data_path, &args.suffix)?
    };
    if paths.is_empty() {
        warn!(
            data_path = %args.data_path.display(),
            suffix = %args.suffix,
            "no data files found"
        );
    }

    let start = Instant::now();
    let summary = validate_batch(
        &paths,
        BatchOptions {
            schema,
            time_invariant: args.fixed,
        },
        &manifest::open_source,
    );
    info!(
        checked = summary.checked,
        failed = summary.failures.len(),
        duration_ms = start.elapsed().as_millis(),
        "validation complete"
    );

    if let Some(report_path) = &args.report {
        let report = serde_json::to_string_pretty(&summary).context("serialize report")?;
        std::fs::write(report_path, report)
            .with_context(|| format!("write report {}", report_path.display()))?;
        info!(report = %report_path.display(), "report written");
    }

    Ok(summary)
}
