use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::AnalysisError;

/// A numeric class label used as a categorical key.
///
/// Wraps a finite `f64`; equality and hashing go through the bit pattern,
/// which is sound once non-finite values are rejected at construction.
/// Negative zero is normalized to zero so `0.0` and `-0.0` key the same
/// class.
#[derive(Debug, Clone, Copy)]
pub struct ClassLabel(f64);

impl ClassLabel {
    /// Returns `None` for NaN or infinite values.
    pub fn new(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        Some(Self(if value == 0.0 { 0.0 } else { value }))
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl PartialEq for ClassLabel {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for ClassLabel {}

impl Hash for ClassLabel {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl PartialOrd for ClassLabel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ClassLabel {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for ClassLabel {
    /// Integral labels render without a trailing `.0` (`1.0` displays as `1`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 && self.0.abs() < 1e15 {
            write!(f, "{}", self.0 as i64)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl Serialize for ClassLabel {
    /// Labels serialize as their display string.
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Validates a raw label vector, rejecting non-finite values.
///
/// `vector` names the failing input in the resulting error message.
pub fn validate_labels(
    values: &[f64],
    vector: &'static str,
) -> Result<Vec<ClassLabel>, AnalysisError> {
    values
        .iter()
        .map(|&v| ClassLabel::new(v).ok_or(AnalysisError::InvalidInput { vector }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn display_drops_trailing_fraction_for_integral_labels() {
        assert_eq!(ClassLabel::new(1.0).unwrap().to_string(), "1");
        assert_eq!(ClassLabel::new(-3.0).unwrap().to_string(), "-3");
        assert_eq!(ClassLabel::new(2.5).unwrap().to_string(), "2.5");
    }

    #[test]
    fn rejects_non_finite_values() {
        assert!(ClassLabel::new(f64::NAN).is_none());
        assert!(ClassLabel::new(f64::INFINITY).is_none());
        assert!(ClassLabel::new(f64::NEG_INFINITY).is_none());
    }

    #[test]
    fn negative_zero_keys_the_same_class_as_zero() {
        assert_eq!(ClassLabel::new(-0.0).unwrap(), ClassLabel::new(0.0).unwrap());
    }

    #[test]
    fn validate_names_the_failing_vector() {
        let err = validate_labels(&[1.0, f64::NAN], "predicted").unwrap_err();
        assert!(err.to_string().contains("predicted"));
    }

    #[test]
    fn labels_sort_numerically() {
        let mut labels: Vec<ClassLabel> = [3.0, -1.0, 2.5, 0.0]
            .iter()
            .map(|&v| ClassLabel::new(v).unwrap())
            .collect();
        labels.sort_unstable();
        let shown: Vec<String> = labels.iter().map(ClassLabel::to_string).collect();
        assert_eq!(shown, vec!["-1", "0", "2.5", "3"]);
    }
}
