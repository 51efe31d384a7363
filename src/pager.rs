//! Raw row viewing in fixed-size windows.

use std::sync::Arc;

use arrow::{
    array::{ArrayRef, StringArray, UInt64Array},
    datatypes::{DataType, Field, Schema},
    error::ArrowError,
    record_batch::RecordBatch,
    util::pretty::pretty_format_batches,
};

use crate::data::{TripRecord, TripTable};

/// Walks a table front to back, one page per call.
///
/// The cursor starts at 0, only moves forward and never passes the row count.
#[derive(Debug)]
pub struct Paginator<'a> {
    table: &'a TripTable,
    page_size: usize,
    cursor: usize,
}

/// A contiguous window of rows.
#[derive(Debug)]
pub struct Page<'a> {
    /// Table position of the first row.
    pub start: usize,
    pub rows: &'a [TripRecord],
    /// The window ends at the last row of the table.
    pub at_end: bool,
}

impl<'a> Paginator<'a> {
    pub fn new(table: &'a TripTable, page_size: usize) -> Self {
        Self {
            table,
            page_size: page_size.max(1),
            cursor: 0,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The next window, or `None` once every row has been handed out.
    pub fn next_page(&mut self) -> Option<Page<'a>> {
        let len = self.table.len();
        if self.cursor >= len {
            return None;
        }
        let start = self.cursor;
        let end = start.saturating_add(self.page_size).min(len);
        self.cursor = end;
        Some(Page {
            start,
            rows: &self.table.rows[start..end],
            at_end: end == len,
        })
    }
}

impl Page<'_> {
    /// `Displaying lines 0 -> 1`, positions inclusive.
    pub fn caption(&self) -> String {
        format!(
            "Displaying lines {} -> {}",
            self.start,
            self.start + self.rows.len().saturating_sub(1)
        )
    }

    /// Text table of the page: a `#` position column followed by every source column.
    pub fn render(&self, headers: &[String]) -> Result<String, ArrowError> {
        let mut fields = vec![Field::new("#", DataType::UInt64, false)];
        fields.extend(
            headers
                .iter()
                .map(|h| Field::new(h.as_str(), DataType::Utf8, true)),
        );

        let positions = (self.start..self.start + self.rows.len()).map(|i| i as u64);
        let mut columns: Vec<ArrayRef> = vec![Arc::new(UInt64Array::from_iter_values(positions))];
        for idx in 0..headers.len() {
            let cells: Vec<Option<&str>> = self
                .rows
                .iter()
                .map(|r| r.fields.get(idx).map(String::as_str).filter(|s| !s.is_empty()))
                .collect();
            columns.push(Arc::new(StringArray::from(cells)));
        }

        let batch = RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?;
        Ok(pretty_format_batches(&[batch])?.to_string())
    }
}
