use serde::{Serialize, Serializer};
use std::fmt;

use crate::error::AnalysisError;
use crate::labels::{validate_labels, ClassLabel};
use crate::matrix::ConfusionMatrix;

/// A per-class rate that may be structurally undefined.
///
/// `Absent` marks a class missing from one side of the confusion matrix;
/// it is distinct from a computed zero and renders as `n/a`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Metric {
    Value(f64),
    Absent,
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Value(v) => write!(f, "{v}"),
            Metric::Absent => write!(f, "n/a"),
        }
    }
}

impl Serialize for Metric {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Metric::Value(v) => serializer.serialize_f64(*v),
            Metric::Absent => serializer.serialize_str("n/a"),
        }
    }
}

/// One slot in the top-confused ranking.
///
/// `None` means fewer than five distinct confusions exist for the class
/// (or the class was never predicted at all) and renders as `n/a`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rank(pub Option<ClassLabel>);

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(label) => label.fmt(f),
            None => write!(f, "n/a"),
        }
    }
}

impl Serialize for Rank {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Some(label) => label.serialize(serializer),
            None => serializer.serialize_str("n/a"),
        }
    }
}

/// One row of the per-class accuracy report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassRow {
    /// The class identifier, as observed in the true-label vector.
    pub class: ClassLabel,
    /// Fraction of this class's true observations predicted as this
    /// class, rounded to 3 significant digits. 0 when the class never
    /// appears among the predictions.
    pub true_positive_rate: f64,
    /// Fraction of predictions of this class that were actually this
    /// class, rounded to 3 significant digits; `Absent` when the class
    /// was never predicted.
    pub positive_predictive_value: Metric,
    /// Number of ground-truth observations of this class.
    pub frequency: usize,
    /// The five classes most often predicted in place of this one,
    /// descending by confusion rate. Ties break toward the lower label;
    /// classes never confused with this one are not listed.
    pub top_confused: [Rank; 5],
}

/// Rounds to three significant digits.
fn round_sig3(value: f64) -> f64 {
    if value == 0.0 {
        return 0.0;
    }
    let magnitude = value.abs().log10().floor();
    let scale = 10f64.powf(2.0 - magnitude);
    (value * scale).round() / scale
}

/// Computes the per-class accuracy report for two aligned label vectors.
///
/// Returns one row per distinct value in `truth`, sorted by true positive
/// rate descending (stable among ties). Fails fast on non-finite labels
/// or mismatched lengths; a class absent from one vector is reported with
/// `n/a` / 0 sentinels, never as an error.
pub fn analyze(truth: &[f64], predicted: &[f64]) -> Result<Vec<ClassRow>, AnalysisError> {
    if truth.len() != predicted.len() {
        return Err(AnalysisError::LengthMismatch {
            truth: truth.len(),
            predicted: predicted.len(),
        });
    }
    let truth = validate_labels(truth, "true")?;
    let predicted = validate_labels(predicted, "predicted")?;

    let matrix = ConfusionMatrix::tabulate(&truth, &predicted);

    let mut rows = Vec::with_capacity(matrix.n_rows());
    for class in matrix.row_labels() {
        let frequency = matrix.row_total(class);

        if !matrix.contains_column(class) {
            rows.push(ClassRow {
                class,
                true_positive_rate: 0.0,
                positive_predictive_value: Metric::Absent,
                frequency,
                top_confused: [Rank(None); 5],
            });
            continue;
        }

        let rate = round_sig3(matrix.count(class, class) as f64 / frequency as f64);
        let ppv = round_sig3(matrix.diagonal_column_rate(class));

        // Columns iterate in ascending label order, so a stable sort by
        // descending rate leaves ties ordered by ascending label.
        let mut confusions: Vec<(ClassLabel, f64)> = matrix
            .row_rates(class)
            .filter(|&(other, rate)| other != class && rate > 0.0)
            .collect();
        confusions.sort_by(|a, b| b.1.total_cmp(&a.1));

        let mut top_confused = [Rank(None); 5];
        for (slot, &(other, _)) in top_confused.iter_mut().zip(confusions.iter()) {
            *slot = Rank(Some(other));
        }

        rows.push(ClassRow {
            class,
            true_positive_rate: rate,
            positive_predictive_value: Metric::Value(ppv),
            frequency,
            top_confused,
        });
    }

    // Stable sort: rows with equal rates keep their matrix row order.
    rows.sort_by(|a, b| b.true_positive_rate.total_cmp(&a.true_positive_rate));

    log::debug!("report covers {} classes", rows.len());
    Ok(rows)
}
