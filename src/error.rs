use thiserror::Error;

/// Errors reported by the accuracy analyzer.
///
/// A class present in one vector but absent from the other is not an
/// error; it is carried through the report as an `n/a` sentinel.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// A label vector contained a NaN or infinite value.
    #[error("{vector} label vector contains a non-finite value")]
    InvalidInput { vector: &'static str },
    /// The two label vectors are not element-wise aligned.
    #[error("label vectors differ in length ({truth} true labels, {predicted} predicted)")]
    LengthMismatch { truth: usize, predicted: usize },
}
