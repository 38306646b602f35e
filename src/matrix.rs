use indexmap::{IndexMap, IndexSet};

use crate::labels::ClassLabel;

/// Cross-tabulation of true class vs. predicted class observation counts.
///
/// Rows are keyed by the distinct values observed in the true vector,
/// columns by the distinct values observed in the predicted vector; the
/// two key sets may differ. Both are held in ascending label order, and
/// cells never observed are simply absent from the inner maps.
#[derive(Debug, Clone)]
pub struct ConfusionMatrix {
    rows: IndexMap<ClassLabel, IndexMap<ClassLabel, usize>>,
    columns: IndexSet<ClassLabel>,
    total: usize,
}

impl ConfusionMatrix {
    /// Counts co-occurrences of each (true, predicted) label pair.
    ///
    /// The slices must be equal length; `analyze` checks this before
    /// tabulating.
    pub fn tabulate(truth: &[ClassLabel], predicted: &[ClassLabel]) -> Self {
        debug_assert_eq!(truth.len(), predicted.len());

        let mut row_keys: Vec<ClassLabel> = truth
            .iter()
            .copied()
            .collect::<IndexSet<ClassLabel>>()
            .into_iter()
            .collect();
        row_keys.sort_unstable();

        let mut columns: Vec<ClassLabel> = predicted
            .iter()
            .copied()
            .collect::<IndexSet<ClassLabel>>()
            .into_iter()
            .collect();
        columns.sort_unstable();

        let mut rows: IndexMap<ClassLabel, IndexMap<ClassLabel, usize>> = row_keys
            .into_iter()
            .map(|label| (label, IndexMap::new()))
            .collect();

        for (&t, &p) in truth.iter().zip(predicted.iter()) {
            *rows[&t].entry(p).or_insert(0) += 1;
        }

        log::debug!(
            "tabulated {} observations into {} true x {} predicted classes",
            truth.len(),
            rows.len(),
            columns.len()
        );

        Self {
            rows,
            columns: columns.into_iter().collect(),
            total: truth.len(),
        }
    }

    /// Row keys (distinct true classes) in ascending label order.
    pub fn row_labels(&self) -> impl Iterator<Item = ClassLabel> + '_ {
        self.rows.keys().copied()
    }

    /// Column keys (distinct predicted classes) in ascending label order.
    pub fn column_labels(&self) -> impl Iterator<Item = ClassLabel> + '_ {
        self.columns.iter().copied()
    }

    /// Whether `class` was ever predicted.
    pub fn contains_column(&self, class: ClassLabel) -> bool {
        self.columns.contains(&class)
    }

    /// Observation count for the (true, predicted) cell; 0 if never observed.
    pub fn count(&self, truth: ClassLabel, predicted: ClassLabel) -> usize {
        self.rows
            .get(&truth)
            .and_then(|row| row.get(&predicted))
            .copied()
            .unwrap_or(0)
    }

    /// Ground-truth observation count for `class` (row sum).
    pub fn row_total(&self, class: ClassLabel) -> usize {
        self.rows
            .get(&class)
            .map(|row| row.values().sum())
            .unwrap_or(0)
    }

    /// Prediction count for `class` (column sum).
    pub fn column_total(&self, class: ClassLabel) -> usize {
        self.rows.values().filter_map(|row| row.get(&class)).sum()
    }

    /// Row-normalized rates for `class` over every column, in column order.
    ///
    /// Each entry is the fraction of the class's true observations
    /// predicted as that column's class.
    pub fn row_rates(&self, class: ClassLabel) -> impl Iterator<Item = (ClassLabel, f64)> + '_ {
        let total = self.row_total(class);
        self.column_labels().map(move |predicted| {
            let rate = if total == 0 {
                0.0
            } else {
                self.count(class, predicted) as f64 / total as f64
            };
            (predicted, rate)
        })
    }

    /// Column-normalized rate at the diagonal: of all predictions of
    /// `class`, the fraction that were actually `class`.
    pub fn diagonal_column_rate(&self, class: ClassLabel) -> f64 {
        let total = self.column_total(class);
        if total == 0 {
            return 0.0;
        }
        self.count(class, class) as f64 / total as f64
    }

    /// Fraction of all observations predicted correctly.
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let correct: usize = self
            .rows
            .keys()
            .map(|&label| self.count(label, label))
            .sum();
        correct as f64 / self.total as f64
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::validate_labels;
    use pretty_assertions::assert_eq;

    fn matrix(truth: &[f64], predicted: &[f64]) -> ConfusionMatrix {
        let truth = validate_labels(truth, "true").unwrap();
        let predicted = validate_labels(predicted, "predicted").unwrap();
        ConfusionMatrix::tabulate(&truth, &predicted)
    }

    fn label(v: f64) -> ClassLabel {
        ClassLabel::new(v).unwrap()
    }

    #[test]
    fn tabulates_pair_counts() {
        let m = matrix(&[1.0, 1.0, 1.0, 2.0, 2.0, 3.0], &[1.0, 2.0, 1.0, 2.0, 2.0, 1.0]);
        assert_eq!(m.count(label(1.0), label(1.0)), 2);
        assert_eq!(m.count(label(1.0), label(2.0)), 1);
        assert_eq!(m.count(label(2.0), label(2.0)), 2);
        assert_eq!(m.count(label(3.0), label(1.0)), 1);
        assert_eq!(m.count(label(3.0), label(2.0)), 0);
    }

    #[test]
    fn row_and_column_keys_come_from_their_own_vectors() {
        let m = matrix(&[1.0, 1.0, 1.0, 2.0, 2.0, 3.0], &[1.0, 2.0, 1.0, 2.0, 2.0, 1.0]);
        let rows: Vec<String> = m.row_labels().map(|l| l.to_string()).collect();
        let cols: Vec<String> = m.column_labels().map(|l| l.to_string()).collect();
        assert_eq!(rows, vec!["1", "2", "3"]);
        assert_eq!(cols, vec!["1", "2"]);
        assert!(!m.contains_column(label(3.0)));
    }

    #[test]
    fn keys_are_sorted_regardless_of_observation_order() {
        let m = matrix(&[3.0, 1.0, 2.0, 1.0], &[2.0, 3.0, 1.0, 1.0]);
        let rows: Vec<String> = m.row_labels().map(|l| l.to_string()).collect();
        assert_eq!(rows, vec!["1", "2", "3"]);
    }

    #[test]
    fn totals_and_accuracy() {
        let m = matrix(&[1.0, 1.0, 1.0, 2.0, 2.0, 3.0], &[1.0, 2.0, 1.0, 2.0, 2.0, 1.0]);
        assert_eq!(m.row_total(label(1.0)), 3);
        assert_eq!(m.row_total(label(3.0)), 1);
        assert_eq!(m.column_total(label(1.0)), 3);
        assert_eq!(m.column_total(label(2.0)), 3);
        // 4 of 6 on the diagonal
        assert!((m.accuracy() - 4.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn row_rates_cover_every_column() {
        let m = matrix(&[1.0, 1.0, 1.0, 2.0, 2.0, 3.0], &[1.0, 2.0, 1.0, 2.0, 2.0, 1.0]);
        let rates: Vec<(String, f64)> = m
            .row_rates(label(1.0))
            .map(|(l, r)| (l.to_string(), r))
            .collect();
        assert_eq!(rates.len(), 2);
        assert_eq!(rates[0].0, "1");
        assert!((rates[0].1 - 2.0 / 3.0).abs() < 1e-12);
        assert!((rates[1].1 - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn empty_input_yields_empty_matrix() {
        let m = matrix(&[], &[]);
        assert_eq!(m.n_rows(), 0);
        assert_eq!(m.n_columns(), 0);
        assert_eq!(m.accuracy(), 0.0);
    }
}
