//! CSV parsing and table pagination
//!
//! The priority workflow previews uploaded CSV data ten rows at a time. The
//! input format is deliberately naive: comma-delimited text, first row is
//! the header, no quoting or escaping. Rows are not forced to the header's
//! column count; ragged rows render as-is.

use crate::constants::pagination::ROWS_PER_PAGE;
use crate::error::{Result, ShelfError};

/// Parsed tabular data with a fixed page size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvTable {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Parse comma-delimited text; the first row becomes the header
    ///
    /// # Errors
    ///
    /// Returns `ShelfError::Csv` if the input contains no rows at all.
    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text.trim().lines();
        let header_line = lines
            .next()
            .filter(|l| !l.is_empty())
            .ok_or_else(|| ShelfError::Csv {
                message: "CSV input is empty".into(),
            })?;

        let split = |line: &str| line.split(',').map(|cell| cell.to_string()).collect();
        let header = split(header_line);
        let rows = lines.map(split).collect();

        Ok(Self { header, rows })
    }

    /// Column names from the first row
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// All data rows (header excluded)
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Total pages at the fixed page size; zero for a header-only table
    pub fn total_pages(&self) -> usize {
        self.rows.len().div_ceil(ROWS_PER_PAGE)
    }

    /// Data rows for a 1-based page number, clamped to the table bounds
    ///
    /// Page 1 returns the first ten data rows; the last page may be short.
    /// Out-of-range requests clamp to the nearest valid page rather than
    /// failing, matching the prev/next buttons' behavior.
    pub fn page(&self, page: usize) -> &[Vec<String>] {
        if self.rows.is_empty() {
            return &[];
        }
        let page = page.clamp(1, self.total_pages());
        let start = (page - 1) * ROWS_PER_PAGE;
        let end = (start + ROWS_PER_PAGE).min(self.rows.len());
        &self.rows[start..end]
    }
}
