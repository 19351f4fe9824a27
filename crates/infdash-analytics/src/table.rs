//! In-memory string table and its CSV reader/writer.
//!
//! Every row has exactly as many cells as the header: short rows are padded
//! with empty cells and surplus cells are dropped on insertion.

use std::io::{Read, Write};
use std::path::Path;

use crate::error::TableError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    #[must_use]
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// Build a table from string slices; handy for fixtures.
    #[must_use]
    pub fn from_rows(headers: &[&str], rows: &[&[&str]]) -> Self {
        let mut table = Self::new(headers.iter().map(|h| (*h).to_string()).collect());
        for row in rows {
            table.push_row(row.iter().map(|c| (*c).to_string()).collect());
        }
        table
    }

    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn push_row(&mut self, mut row: Vec<String>) {
        if row.len() != self.headers.len() {
            tracing::debug!(
                expected = self.headers.len(),
                got = row.len(),
                "row width differs from header; padding or truncating"
            );
            row.resize(self.headers.len(), String::new());
        }
        self.rows.push(row);
    }

    /// Position of the first column whose trimmed name equals `name`,
    /// ignoring ASCII case.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        let wanted = name.trim();
        self.headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(wanted))
    }

    /// Cell at (`row`, `col`), or `""` when out of bounds.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map_or("", String::as_str)
    }

    /// All cells of the named column, in row order.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let col = self.column_index(name)?;
        Some(self.rows.iter().map(|r| r[col].as_str()).collect())
    }

    pub fn rename_column(&mut self, col: usize, name: &str) {
        if let Some(header) = self.headers.get_mut(col) {
            *header = name.to_string();
        }
    }

    /// Overwrite the named column (matched case-insensitively, header renamed
    /// to `name`) or append it when absent.
    ///
    /// `values` shorter than the table are padded with empty cells.
    pub fn set_column(&mut self, name: &str, values: Vec<String>) {
        let mut values = values;
        values.resize(self.rows.len(), String::new());

        if let Some(col) = self.column_index(name) {
            self.headers[col] = name.to_string();
            for (row, value) in self.rows.iter_mut().zip(values) {
                row[col] = value;
            }
        } else {
            self.headers.push(name.to_string());
            for (row, value) in self.rows.iter_mut().zip(values) {
                row.push(value);
            }
        }
    }

    /// Keep only the listed columns, in the listed order.
    #[must_use]
    pub fn project(&self, columns: &[usize]) -> Self {
        let mut out = Self::new(columns.iter().map(|&c| self.headers[c].clone()).collect());
        for row in &self.rows {
            out.rows.push(columns.iter().map(|&c| row[c].clone()).collect());
        }
        out
    }

    /// Read a headed CSV file.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Read`] if the file cannot be opened or parsed.
    pub fn read_csv(path: &Path) -> Result<Self, TableError> {
        let reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(path)
            .map_err(|e| TableError::Read {
                path: path.display().to_string(),
                source: e,
            })?;
        Self::read_all(reader).map_err(|e| TableError::Read {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// Read a headed CSV from any reader.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Csv`] on malformed CSV or invalid UTF-8.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, TableError> {
        let reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        Ok(Self::read_all(reader)?)
    }

    fn read_all<R: Read>(mut reader: csv::Reader<R>) -> Result<Self, csv::Error> {
        let headers = reader.headers()?.iter().map(str::to_string).collect();
        let mut table = Self::new(headers);
        for record in reader.records() {
            let record = record?;
            table.push_row(record.iter().map(str::to_string).collect());
        }
        Ok(table)
    }

    /// Write the table, header first, to a CSV file.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Write`] if the file cannot be created or written.
    pub fn write_csv(&self, path: &Path) -> Result<(), TableError> {
        let wrap = |e: csv::Error| TableError::Write {
            path: path.display().to_string(),
            source: e,
        };
        let mut writer = csv::Writer::from_path(path).map_err(wrap)?;
        self.write_records(&mut writer).map_err(wrap)?;
        writer.flush()?;
        Ok(())
    }

    /// Write the table as CSV to any writer.
    ///
    /// # Errors
    ///
    /// Returns [`TableError`] if serialization or the underlying write fails.
    pub fn to_writer<W: Write>(&self, writer: W) -> Result<(), TableError> {
        let mut writer = csv::Writer::from_writer(writer);
        self.write_records(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    fn write_records<W: Write>(&self, writer: &mut csv::Writer<W>) -> Result<(), csv::Error> {
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        Ok(())
    }
}
