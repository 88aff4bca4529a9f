use angle_inspector::batch::{BatchOutcome, BatchRunner};
use angle_inspector::config::load_config;
use angle_inspector::diagnostics::BatchReport;
use angle_inspector::image::io::write_json_file;
use angle_inspector::InspectionPipeline;
use log::{info, warn};
use std::env;
use std::path::{Path, PathBuf};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let mut args = env::args().skip(1);
    let config_path = args.next().ok_or_else(usage)?;
    let mut config = load_config(Path::new(&config_path)).map_err(|e| e.to_string())?;
    config.images.extend(args.map(PathBuf::from));
    if config.images.is_empty() {
        return Err(format!("No images given in {config_path} or on the command line"));
    }

    let params = config.to_params().map_err(|e| e.to_string())?;
    let pipeline = InspectionPipeline::new(params).map_err(|e| e.to_string())?;
    let runner = BatchRunner::new(pipeline, config.batch_options());
    info!(
        "Inspecting {} image(s), {} band, output to {}",
        config.images.len(),
        runner.pipeline().params().region,
        runner.options().output_dir.display()
    );

    let summary = runner.run(&config.images);
    for entry in &summary.entries {
        let name = entry.path.display();
        match &entry.outcome {
            BatchOutcome::Measured {
                measurement,
                output,
            } => {
                println!(
                    "{name}: angle = {:.2} deg -> {}",
                    measurement.angle_deg, measurement.verdict
                );
                println!("  saved {}", output.display());
            }
            BatchOutcome::SaveFailed { measurement, error } => {
                println!(
                    "{name}: angle = {:.2} deg -> {} (not saved: {error})",
                    measurement.angle_deg, measurement.verdict
                );
            }
            BatchOutcome::InsufficientLines { found } => {
                println!("{name}: not enough lines detected ({found} found)");
            }
            BatchOutcome::Rejected { reason } => println!("{name}: rejected: {reason}"),
            BatchOutcome::LoadFailed { error } => println!("{name}: unreadable: {error}"),
        }
    }
    println!(
        "{} image(s): {} pass, {} fail, {} without measurement, {} error(s)",
        summary.len(),
        summary.passed(),
        summary.failed(),
        summary.unmeasured(),
        summary.errors()
    );

    if let Some(report_path) = &config.report_json {
        match write_json_file(report_path, &BatchReport::from_summary(&summary)) {
            Ok(()) => println!("Report written to {}", report_path.display()),
            Err(err) => warn!("{err}"),
        }
    }
    Ok(())
}

fn usage() -> String {
    "Usage: angle_inspector <config.json> [image ...]".to_string()
}
