use std::path::PathBuf;

use accrep::{analyze, render, validate_labels, write_report, ConfusionMatrix, DEFAULT_REPORT_NAME};
use anyhow::Context;
use serde::Deserialize;

/// On-disk input: two aligned label vectors.
#[derive(Deserialize)]
struct LabelFile {
    truth: Vec<f64>,
    predicted: Vec<f64>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = pico_args::Arguments::from_env();
    let labels_path: PathBuf = args
        .value_from_str("--labels")
        .context("expected --labels <file.json>")?;
    let out_path = match args.opt_value_from_str::<_, PathBuf>("--out")? {
        Some(path) => Some(path),
        None if args.contains("--write") => Some(PathBuf::from(DEFAULT_REPORT_NAME)),
        None => None,
    };

    let raw = std::fs::read_to_string(&labels_path)
        .with_context(|| format!("failed to read {}", labels_path.display()))?;
    let labels: LabelFile = serde_json::from_str(&raw)
        .context("label file must be {\"truth\": [...], \"predicted\": [...]}")?;

    let rows = analyze(&labels.truth, &labels.predicted)?;

    // Inputs are valid past this point; log the overall accuracy alongside
    // the per-class table.
    let truth = validate_labels(&labels.truth, "true")?;
    let predicted = validate_labels(&labels.predicted, "predicted")?;
    let matrix = ConfusionMatrix::tabulate(&truth, &predicted);
    log::info!(
        "{} observations, {} classes, overall accuracy {:.3}",
        labels.truth.len(),
        matrix.n_rows(),
        matrix.accuracy()
    );

    let document = render(&rows);
    print!("{document}");

    if let Some(path) = out_path {
        write_report(&rows, &path)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        log::info!("wrote {}", path.display());
    }

    Ok(())
}
