use tracing::trace;

use super::column::Column;
use super::reader::decode_page;
use crate::engine::errors::ColumnError;
use crate::engine::types::Value;

/// Sequential cursor over a [`Column`], one value per row slot.
///
/// Pages are decoded lazily, one at a time. Readers never mutate the column,
/// so any number of them can run concurrently.
pub struct ColumnReader<'a> {
    column: &'a Column,
    next_page: usize,
    current: Vec<Value>,
    pos: usize,
    failed: bool,
}

impl<'a> ColumnReader<'a> {
    pub fn new(column: &'a Column) -> Self {
        Self {
            column,
            next_page: 0,
            current: Vec::new(),
            pos: 0,
            failed: false,
        }
    }

    /// Fills `buf` from the current page and returns how many slots were
    /// written. Returns `Err(EndOfData)` once every row has been read; an empty
    /// `buf` reads nothing and is not an end signal.
    pub fn read(&mut self, buf: &mut [Value]) -> Result<usize, ColumnError> {
        if buf.is_empty() {
            return Ok(0);
        }
        loop {
            let available = self.current.len() - self.pos;
            if available > 0 {
                let n = available.min(buf.len());
                for (slot, value) in buf.iter_mut().zip(&mut self.current[self.pos..self.pos + n]) {
                    *slot = std::mem::take(value);
                }
                self.pos += n;
                return Ok(n);
            }
            if self.next_page >= self.column.pages.len() {
                return Err(ColumnError::EndOfData);
            }
            if let Err(e) = self.load_page(self.next_page) {
                e.log_error();
                return Err(e);
            }
            self.next_page += 1;
        }
    }

    fn load_page(&mut self, index: usize) -> Result<(), ColumnError> {
        let info = &self.column.info;
        let values = decode_page(
            index,
            &self.column.pages[index],
            info.value_type,
            info.compression,
        )?;
        if tracing::enabled!(tracing::Level::TRACE) {
            trace!(
                target: "logcol::reader",
                column = %info.name,
                page = index,
                rows = values.len(),
                "Decoded page"
            );
        }
        self.current = values;
        self.pos = 0;
        Ok(())
    }

    /// Reads every remaining row.
    pub fn read_all(&mut self) -> Result<Vec<Value>, ColumnError> {
        let mut out = Vec::new();
        for value in self.by_ref() {
            out.push(value?);
        }
        Ok(out)
    }
}

impl Iterator for ColumnReader<'_> {
    type Item = Result<Value, ColumnError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let mut slot = [Value::Null];
        match self.read(&mut slot) {
            Ok(_) => {
                let [value] = slot;
                Some(Ok(value))
            }
            Err(ColumnError::EndOfData) => None,
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}
