//! Discovery, sidecar loading and batch validation over a real directory.

use std::path::Path;

use tempfile::TempDir;

use cmor_cli::discovery::list_data_files;
use cmor_cli::manifest::{open_source, sidecar_path};
use cmor_model::FileNameSchema;
use cmor_validate::{BatchOptions, validate_batch};

const GOOD_SIDECAR: &str = r#"{
    "variable": "tas",
    "time": {
        "units": "days since 2015-01-01",
        "calendar": "360_day",
        "points": [0.5, 1.5],
        "bounds": [[0.0, 1.0], [1.0, 2.0]]
    },
    "variable_attributes": { "units": "K" },
    "global_attributes": { "institution_id": "MOHC", "activity_id": "HighResMIP" },
    "data": { "shape": [2], "values": [284.1, 284.9] }
}"#;

fn write_data_file(dir: &Path, name: &str, sidecar: Option<&str>) {
    let data_path = dir.join(name);
    std::fs::write(&data_path, b"").unwrap();
    if let Some(content) = sidecar {
        std::fs::write(sidecar_path(&data_path), content).unwrap();
    }
}

#[test]
fn validates_a_directory_of_sidecar_backed_files() {
    let dir = TempDir::new().unwrap();
    write_data_file(
        dir.path(),
        "tas_day_Monty_hist_r1i1p1_gn_20150101-20150102.nc",
        Some(GOOD_SIDECAR),
    );
    // No sidecar, so its contents cannot be read.
    write_data_file(
        dir.path(),
        "pr_day_Monty_hist_r1i1p1_gn_20150101-20150102.nc",
        None,
    );

    let paths = list_data_files(dir.path(), ".nc").unwrap();
    assert_eq!(paths.len(), 2);

    let summary = validate_batch(
        &paths,
        BatchOptions {
            schema: FileNameSchema::SixFieldGridded,
            time_invariant: false,
        },
        &open_source,
    );
    assert_eq!(summary.checked, 2);
    assert_eq!(summary.failures.len(), 1);
    assert!(
        summary.failures[0]
            .path
            .to_str()
            .unwrap()
            .contains("pr_day")
    );
    assert!(summary.failures[0].message.contains("unable to extract metadata"));
}

#[test]
fn report_serializes_to_json() {
    let dir = TempDir::new().unwrap();
    write_data_file(
        dir.path(),
        "tas_day_Monty_hist_r1i1p1_gn_20150101-20150102.nc",
        Some(GOOD_SIDECAR),
    );
    let paths = list_data_files(dir.path(), ".nc").unwrap();
    let summary = validate_batch(
        &paths,
        BatchOptions {
            schema: FileNameSchema::SixFieldGridded,
            time_invariant: false,
        },
        &open_source,
    );
    assert!(summary.passed());

    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["checked"], 1);
    assert!(json["failures"].as_array().unwrap().is_empty());
}
