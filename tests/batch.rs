mod common;

use angle_inspector::batch::{BatchOptions, BatchOutcome, BatchRunner};
use angle_inspector::diagnostics::BatchReport;
use angle_inspector::image::io::{load_color_image, save_color_image, write_json_file};
use angle_inspector::{InspectionParams, InspectionPipeline, Verdict};
use common::synthetic_image::{blank_rgb, corner_rgb};
use std::collections::HashSet;
use std::path::PathBuf;

fn runner(output_dir: PathBuf, parallel: bool, debug_dir: Option<PathBuf>) -> BatchRunner {
    let pipeline = InspectionPipeline::new(InspectionParams::default()).unwrap();
    BatchRunner::new(
        pipeline,
        BatchOptions {
            output_dir,
            parallel,
            output_format: None,
            debug_dir,
        },
    )
}

#[test]
fn missing_file_does_not_abort_the_batch() {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("part.png");
    save_color_image(&corner_rgb(240, 500, 80, 30), &good).unwrap();
    let missing = dir.path().join("missing.png");
    let out_dir = dir.path().join("Processed");
    let debug_dir = dir.path().join("edges");

    let summary = runner(out_dir.clone(), false, Some(debug_dir.clone()))
        .run(&[missing.clone(), good.clone()]);

    assert_eq!(summary.len(), 2);
    assert_eq!(summary.entries[0].path, missing);
    assert!(matches!(summary.entries[0].outcome, BatchOutcome::LoadFailed { .. }));
    assert_eq!((summary.measured(), summary.passed(), summary.errors()), (1, 1, 1));

    match &summary.entries[1].outcome {
        BatchOutcome::Measured {
            measurement,
            output,
        } => {
            assert_eq!(measurement.verdict, Verdict::Pass);
            assert_eq!(output, &out_dir.join("part.png"));
            let saved = load_color_image(output).unwrap();
            assert_eq!(saved.dimensions(), (240, 100));
        }
        other => panic!("expected a measurement, got {other:?}"),
    }
    assert!(debug_dir.join("part_edges.png").exists());
    assert!(!debug_dir.join("missing_edges.png").exists());
}

#[test]
fn parallel_run_keeps_input_order_and_writes_nothing_for_blank_images() {
    let dir = tempfile::tempdir().unwrap();
    let mut paths = Vec::new();
    for i in 0..4 {
        let path = dir.path().join(format!("img_{i}.png"));
        let image = if i % 2 == 0 {
            corner_rgb(240, 500, 80, 30)
        } else {
            blank_rgb(240, 500)
        };
        save_color_image(&image, &path).unwrap();
        paths.push(path);
    }
    let out_dir = dir.path().join("out");

    let summary = runner(out_dir.clone(), true, None).run(&paths);
    let order: Vec<&PathBuf> = summary.entries.iter().map(|e| &e.path).collect();
    assert_eq!(order, paths.iter().collect::<Vec<_>>());
    assert_eq!((summary.passed(), summary.unmeasured()), (2, 2));
    assert!(out_dir.join("img_0.png").exists());
    assert!(!out_dir.join("img_1.png").exists());

    let report_path = dir.path().join("report.json");
    write_json_file(&report_path, &BatchReport::from_summary(&summary)).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(json["passed"], 2);
    assert_eq!(json["images"][1]["status"], "insufficient_lines");
}

#[test]
fn same_name_in_two_folders_is_written_twice_in_parallel() {
    let dir = tempfile::tempdir().unwrap();
    let mut paths = Vec::new();
    for line in ["line_a", "line_b"] {
        let path = dir.path().join(line).join("part.png");
        save_color_image(&corner_rgb(240, 500, 80, 30), &path).unwrap();
        paths.push(path);
    }
    let out_dir = dir.path().join("out");

    let summary = runner(out_dir.clone(), true, None).run(&paths);
    let outputs: Vec<&PathBuf> = summary
        .entries
        .iter()
        .map(|e| match &e.outcome {
            BatchOutcome::Measured { output, .. } => output,
            other => panic!("expected a measurement, got {other:?}"),
        })
        .collect();
    assert_eq!(outputs.iter().collect::<HashSet<_>>().len(), 2);
    assert_eq!(outputs[0], &out_dir.join("part.png"));
    assert_eq!(outputs[1], &out_dir.join("part_2.png"));
    for output in outputs {
        assert_eq!(load_color_image(output).unwrap().dimensions(), (240, 100));
    }
}
