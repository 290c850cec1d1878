// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tabular datasets loaded from CSV or spreadsheet files, with summary
//! statistics.

use std::collections::HashMap;
use std::path::Path;

use atrium_core::AtriumError;
use calamine::{open_workbook_auto, Data, Reader};

/// A table of string cells with named columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub source: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Dataset {
    /// Parse a CSV file with a header row. Ragged rows are an error.
    pub fn from_csv_path(path: &Path) -> Result<Self, AtriumError> {
        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(path)
            .map_err(csv_error)?;
        Self::from_csv_reader(reader, crate::file_name(path))
    }

    pub fn from_csv_str(content: &str, source: impl Into<String>) -> Result<Self, AtriumError> {
        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(content.as_bytes());
        Self::from_csv_reader(reader, source.into())
    }

    /// Read the first sheet of an Excel workbook. Its first row is the
    /// header; fully empty rows are dropped.
    pub fn from_xlsx_path(path: &Path) -> Result<Self, AtriumError> {
        let mut workbook = open_workbook_auto(path).map_err(sheet_error)?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| AtriumError::Dataset("workbook has no sheets".into()))?
            .map_err(sheet_error)?;

        let mut rows = range.rows().map(|row| row.iter().map(cell_to_string).collect::<Vec<_>>());
        let columns: Vec<String> = rows
            .next()
            .unwrap_or_default()
            .into_iter()
            .map(|h| h.trim().to_string())
            .collect();
        let rows = rows
            .filter(|row| row.iter().any(|cell| !cell.is_empty()))
            .collect();
        Self::from_records(crate::file_name(path), columns, rows)
    }

    fn from_csv_reader<R: std::io::Read>(
        mut reader: csv::Reader<R>,
        source: String,
    ) -> Result<Self, AtriumError> {
        let columns: Vec<String> = reader
            .headers()
            .map_err(csv_error)?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let rows = reader
            .records()
            .map(|record| {
                record
                    .map(|r| r.iter().map(str::to_string).collect())
                    .map_err(csv_error)
            })
            .collect::<Result<Vec<Vec<String>>, _>>()?;

        Self::from_records(source, columns, rows)
    }

    fn from_records(
        source: String,
        columns: Vec<String>,
        rows: Vec<Vec<String>>,
    ) -> Result<Self, AtriumError> {
        if columns.iter().all(String::is_empty) {
            return Err(AtriumError::Dataset("no columns to parse from file".into()));
        }
        Ok(Self {
            source,
            columns,
            rows,
        })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Column names rendered as a bracketed, quoted list: `['a', 'b']`.
    pub fn column_list(&self) -> String {
        let quoted: Vec<String> = self.columns.iter().map(|c| format!("'{c}'")).collect();
        format!("[{}]", quoted.join(", "))
    }

    /// Values of column `idx`, skipping empty cells.
    fn cells(&self, idx: usize) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .filter_map(move |row| row.get(idx))
            .map(|cell| cell.trim())
            .filter(|cell| !cell.is_empty())
    }

    /// Parsed values of column `idx` if every non-empty cell is a number.
    fn numeric_values(&self, idx: usize) -> Option<Vec<f64>> {
        let values: Option<Vec<f64>> = self.cells(idx).map(|c| c.parse::<f64>().ok()).collect();
        values.filter(|v| !v.is_empty())
    }

    /// Summary statistics table.
    ///
    /// Numeric columns get count, mean, std, min, quartiles and max. When no
    /// column is numeric, every column gets count, unique, top and freq.
    pub fn describe(&self) -> String {
        let numeric: Vec<(&str, Vec<f64>)> = self
            .columns
            .iter()
            .enumerate()
            .filter_map(|(i, name)| self.numeric_values(i).map(|v| (name.as_str(), v)))
            .collect();

        if numeric.is_empty() {
            return self.describe_categorical();
        }

        let labels = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];
        let stats: Vec<Vec<String>> = numeric
            .iter()
            .map(|(_, values)| numeric_summary(values).iter().map(|v| format_stat(*v)).collect())
            .collect();
        let headers: Vec<&str> = numeric.iter().map(|(name, _)| *name).collect();
        render_table(&headers, &labels, &stats)
    }

    fn describe_categorical(&self) -> String {
        let labels = ["count", "unique", "top", "freq"];
        let stats: Vec<Vec<String>> = (0..self.columns.len())
            .map(|i| {
                let mut counts: HashMap<&str, usize> = HashMap::new();
                let mut first_seen: Vec<&str> = Vec::new();
                for cell in self.cells(i) {
                    let n = counts.entry(cell).or_insert(0);
                    if *n == 0 {
                        first_seen.push(cell);
                    }
                    *n += 1;
                }
                let total: usize = counts.values().sum();
                // First value wins ties, in first-seen order.
                let top = first_seen
                    .iter()
                    .map(|v| (*v, counts[v]))
                    .fold(None::<(&str, usize)>, |best, (v, n)| match best {
                        Some((_, bn)) if bn >= n => best,
                        _ => Some((v, n)),
                    });
                vec![
                    total.to_string(),
                    first_seen.len().to_string(),
                    top.map(|(v, _)| v.to_string()).unwrap_or_else(|| "NaN".into()),
                    top.map(|(_, n)| n.to_string()).unwrap_or_else(|| "NaN".into()),
                ]
            })
            .collect();
        let headers: Vec<&str> = self.columns.iter().map(String::as_str).collect();
        render_table(&headers, &labels, &stats)
    }

    /// The first `n` rows re-encoded as CSV, header included.
    pub fn sample_csv(&self, n: usize) -> Result<String, AtriumError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&self.columns).map_err(csv_error)?;
        for row in self.rows.iter().take(n) {
            writer.write_record(row).map_err(csv_error)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| AtriumError::Dataset(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| AtriumError::Dataset(e.to_string()))
    }
}

fn csv_error(e: csv::Error) -> AtriumError {
    AtriumError::Dataset(e.to_string())
}

fn sheet_error(e: calamine::Error) -> AtriumError {
    AtriumError::Dataset(e.to_string())
}

/// Whole floats print without a fractional part, so `1500.0` reads `1500`.
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => (*f as i64).to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.to_string(),
        Data::Error(e) => format!("#ERR:{e:?}"),
    }
}

/// count, mean, std (sample), min, 25%, 50%, 75%, max.
fn numeric_summary(values: &[f64]) -> [f64; 8] {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len() as f64;
    let mean = sorted.iter().sum::<f64>() / n;
    let std = if sorted.len() < 2 {
        f64::NAN
    } else {
        (sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0)).sqrt()
    };

    [
        n,
        mean,
        std,
        sorted[0],
        quantile(&sorted, 0.25),
        quantile(&sorted, 0.5),
        quantile(&sorted, 0.75),
        sorted[sorted.len() - 1],
    ]
}

/// Linear-interpolated quantile of sorted, non-empty `values`.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * frac
}

fn format_stat(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{value:.6}")
    }
}

/// Stat labels down the left, one right-aligned column per header.
fn render_table(headers: &[&str], labels: &[&str], columns: &[Vec<String>]) -> String {
    let label_width = labels.iter().map(|l| l.len()).max().unwrap_or(0);
    let widths: Vec<usize> = headers
        .iter()
        .zip(columns)
        .map(|(h, col)| {
            col.iter()
                .map(|c| c.chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut lines = Vec::with_capacity(labels.len() + 1);
    let mut header = " ".repeat(label_width);
    for (h, &w) in headers.iter().zip(&widths) {
        header.push_str(&format!("  {h:>w$}"));
    }
    lines.push(header);

    for (row, label) in labels.iter().enumerate() {
        let mut line = format!("{label:<label_width$}");
        for (col, &w) in columns.iter().zip(&widths) {
            line.push_str(&format!("  {:>w$}", col[row]));
        }
        lines.push(line);
    }
    lines.join("\n")
}
