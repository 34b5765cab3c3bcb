//! Presentation of extraction results: plain lines, a bordered table, or a
//! CSV file.

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use console::measure_text_width;

use crate::config::{Config, DATETIME_FORMAT};
use crate::error::Result;
use crate::files::write_atomic;
use crate::modes::Mode;
use crate::types::{ExtractionResult, ResultRow};

/// Widest a table cell may grow before its text is wrapped.
const MAX_CELL_WIDTH: usize = 60;

/// Alternative output selected with `--output`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Bordered table on stdout.
    Pretty,
    /// CSV file in the results directory.
    File,
}

/// Print or save `results` according to `output`.
///
/// Returns the path of the written file in `file` mode.
pub fn control_output(
    results: &ExtractionResult,
    output: Option<OutputMode>,
    mode: Mode,
    config: &Config,
) -> Result<Option<PathBuf>> {
    match output {
        None => {
            print!("{}", render_plain(results));
            Ok(None)
        }
        Some(OutputMode::Pretty) => {
            print!("{}", render_table(results));
            Ok(None)
        }
        Some(OutputMode::File) => {
            let path = file_output(results, mode, &config.results_dir())?;
            println!("Results saved to {}", path.display());
            Ok(Some(path))
        }
    }
}

/// Each line with its fields separated by single spaces.
pub fn render_plain(results: &ExtractionResult) -> String {
    results
        .lines()
        .map(|row| format!("{}\n", row.join(" ")))
        .collect()
}

/// Bordered, left-aligned table with the header set apart.
///
/// ```text
/// +--------+-------+
/// | Status | Count |
/// +--------+-------+
/// | Final  | 2     |
/// +--------+-------+
/// ```
pub fn render_table(results: &ExtractionResult) -> String {
    let wrapped: Vec<Vec<Vec<String>>> = results
        .lines()
        .map(|row| row.iter().map(|cell| wrap_cell(cell)).collect())
        .collect();

    let mut widths = vec![0; results.width()];
    for row in &wrapped {
        for (width, cell) in widths.iter_mut().zip(row) {
            let cell_width = cell.iter().map(|line| measure_text_width(line)).max().unwrap_or(0);
            *width = (*width).max(cell_width);
        }
    }

    let border: String = widths
        .iter()
        .map(|width| format!("+{}", "-".repeat(width + 2)))
        .collect::<String>()
        + "+\n";

    let mut out = border.clone();
    for (index, row) in wrapped.iter().enumerate() {
        let height = row.iter().map(Vec::len).max().unwrap_or(1).max(1);
        for line in 0..height {
            for (cell, width) in row.iter().zip(&widths) {
                let text = cell.get(line).map(String::as_str).unwrap_or("");
                let padding = width - measure_text_width(text);
                out.push_str(&format!("| {text}{} ", " ".repeat(padding)));
            }
            out.push_str("|\n");
        }
        if index == 0 {
            out.push_str(&border);
        }
    }
    if wrapped.len() > 1 {
        out.push_str(&border);
    }
    out
}

fn wrap_cell(cell: &str) -> Vec<String> {
    textwrap::wrap(cell, MAX_CELL_WIDTH)
        .into_iter()
        .map(|line| line.into_owned())
        .collect()
}

/// CSV with every field quoted and `\n` line endings.
pub fn render_csv(results: &ExtractionResult) -> String {
    results.lines().map(csv_line).collect()
}

fn csv_line(row: &ResultRow) -> String {
    let fields: Vec<String> = row
        .iter()
        .map(|field| format!("\"{}\"", field.replace('"', "\"\"")))
        .collect();
    format!("{}\n", fields.join(","))
}

/// Write `results` as `{mode}_{timestamp}.csv` into `results_dir`.
pub fn file_output(results: &ExtractionResult, mode: Mode, results_dir: &Path) -> Result<PathBuf> {
    let now = chrono::Local::now().format(DATETIME_FORMAT);
    let path = results_dir.join(format!("{mode}_{now}.csv"));

    write_atomic(&path, render_csv(results).as_bytes())?;

    tracing::info!(path = %path.display(), "Results file saved");
    Ok(path)
}
