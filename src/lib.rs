//! Per-class accuracy reporting for multi-class classifiers.
//!
//! Builds a confusion matrix from two aligned numeric label vectors and
//! derives one report row per true class: true positive rate, positive
//! predictive value, ground-truth frequency, and the five classes most
//! frequently confused with it. The report can be serialized as a LaTeX
//! table document.

pub mod error;
pub mod labels;
pub mod matrix;
pub mod render;
pub mod report;

pub use error::AnalysisError;
pub use labels::{validate_labels, ClassLabel};
pub use matrix::ConfusionMatrix;
pub use render::{render, write_report, DEFAULT_REPORT_NAME};
pub use report::{analyze, ClassRow, Metric, Rank};
