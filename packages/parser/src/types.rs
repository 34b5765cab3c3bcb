//! Core data types produced by the extraction routines.

use crate::error::{ParserError, Result};

/// Ordered string fields of one output line.
pub type ResultRow = Vec<String>;

/// Tabular result of an extraction: a header plus data rows, all of the same
/// width, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    header: ResultRow,
    rows: Vec<ResultRow>,
}

impl ExtractionResult {
    pub fn new(header: &[&str]) -> Self {
        Self {
            header: header.iter().map(|field| field.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a data row. Fails when its width differs from the header's.
    pub fn push(&mut self, row: ResultRow) -> Result<()> {
        if row.len() != self.header.len() {
            return Err(ParserError::RowWidth {
                expected: self.header.len(),
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn width(&self) -> usize {
        self.header.len()
    }

    /// Number of data rows (the header is not counted).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Header followed by every data row.
    pub fn lines(&self) -> impl Iterator<Item = &ResultRow> {
        std::iter::once(&self.header).chain(self.rows.iter())
    }
}

/// Label of the synthesized sum line.
pub const TOTAL_LABEL: &str = "Total";

/// Count of PEPs per actual status, in order of first appearance.
///
/// The total is derived from the counts on every read, never stored.
///
/// # Examples
/// ```
/// use pydocs_parser::types::PepTally;
///
/// let mut tally = PepTally::default();
/// tally.record("Final");
/// tally.record("Active");
/// tally.record("Final");
/// assert_eq!(tally.count("Final"), 2);
/// assert_eq!(tally.total(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PepTally {
    counts: Vec<(String, usize)>,
}

impl PepTally {
    pub fn record(&mut self, status: &str) {
        match self.counts.iter_mut().find(|(label, _)| label == status) {
            Some((_, count)) => *count += 1,
            None => self.counts.push((status.to_string(), 1)),
        }
    }

    pub fn count(&self, status: &str) -> usize {
        self.counts
            .iter()
            .find(|(label, _)| label == status)
            .map_or(0, |(_, count)| *count)
    }

    pub fn counts(&self) -> &[(String, usize)] {
        &self.counts
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, count)| count).sum()
    }

    /// Tabular form: one line per status, then the total.
    pub fn to_result(&self) -> ExtractionResult {
        let mut result = ExtractionResult::new(&["Status", "Count"]);
        let lines = self
            .counts
            .iter()
            .map(|(label, count)| vec![label.clone(), count.to_string()])
            .chain(std::iter::once(vec![
                TOTAL_LABEL.to_string(),
                self.total().to_string(),
            ]));
        // Every line is two fields wide, like the header.
        result.rows.extend(lines);
        result
    }
}
