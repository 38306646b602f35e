use chrono::{Local, NaiveDate};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::report::ClassRow;

/// Conventional file name for the rendered report.
pub const DEFAULT_REPORT_NAME: &str = "category_accuracy.tex";

/// 9 columns: class, rate, ppv, frequency, five confusion ranks.
const COLUMN_LAYOUT: &str = "|l|r|r|r|r|r|r|r|r|";

/// Serializes the report rows into a LaTeX table document.
///
/// Pure serialization: the output depends only on the rows' values and
/// order, plus the current date stamped into the leading comment line.
pub fn render(rows: &[ClassRow]) -> String {
    render_dated(rows, Local::now().date_naive())
}

fn render_dated(rows: &[ClassRow], date: NaiveDate) -> String {
    let mut doc = String::new();
    doc.push_str(&format!(
        "% Per-category accuracy report, generated {}\n",
        date.format("%Y-%m-%d")
    ));
    doc.push_str("\\begin{table}[h]\n");
    doc.push_str(&format!("\\begin{{tabular}}{{{COLUMN_LAYOUT}}}\n"));
    doc.push_str("\\hline\n");
    doc.push_str(
        "Class & True Positive & Positive & True & \
         \\multicolumn{5}{c|}{Top Mistaken Classes} \\\\\n",
    );
    doc.push_str(" & Rate & Predictive Value & Frequency & (1) & (2) & (3) & (4) & (5) \\\\\n");
    doc.push_str("\\hline\n");

    for row in rows {
        let mut fields = vec![
            row.class.to_string(),
            row.true_positive_rate.to_string(),
            row.positive_predictive_value.to_string(),
            row.frequency.to_string(),
        ];
        fields.extend(row.top_confused.iter().map(|rank| rank.to_string()));
        doc.push_str(&fields.join(" & "));
        doc.push_str(" \\\\\n");
    }

    doc.push_str("\\hline\n");
    doc.push_str("\\end{tabular}\n");
    doc.push_str("\\caption{Per-category accuracy}\n");
    doc.push_str("\\end{table}\n");
    doc
}

/// Writes the rendered document to `path`, replacing any existing file.
///
/// The rows themselves are untouched by this step; a write failure leaves
/// the in-memory report intact.
pub fn write_report(rows: &[ClassRow], path: &Path) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(render(rows).as_bytes())
}
