//! Catalog input and result exports.
//!
//! - SSC station/velocity catalog reader (`ssc`)
//! - PSD earthquake catalog reader (`psd`)
//! - result exports (CSV/JSON) (`export`)
//!
//! Both catalogs are fixed-column ASCII formats published by the ITRS centre;
//! the readers are strict (a malformed line aborts the scan with file/line
//! context) and perform a single top-to-bottom pass per query.

use std::io::BufRead;

use crate::error::ItrfError;

pub mod export;
pub mod psd;
pub mod ssc;

pub use export::*;
pub use psd::*;
pub use ssc::*;

/// A line-oriented catalog stream that tracks the current line number for
/// error reporting.
pub struct CatalogLines<R> {
    file: String,
    reader: R,
    line_no: usize,
}

impl<R: BufRead> CatalogLines<R> {
    /// `file` is a display label only (path or fixture name).
    pub fn new(reader: R, file: impl Into<String>) -> Self {
        CatalogLines {
            file: file.into(),
            reader,
            line_no: 0,
        }
    }

    /// Read the next line, without its terminator. `Ok(None)` at end of
    /// stream.
    pub fn next_line(&mut self) -> Result<Option<String>, ItrfError> {
        let mut buf = String::new();
        let n = self
            .reader
            .read_line(&mut buf)
            .map_err(|e| ItrfError::Io {
                path: self.file.clone(),
                message: e.to_string(),
            })?;
        if n == 0 {
            return Ok(None);
        }
        self.line_no += 1;
        while buf.ends_with('\n') || buf.ends_with('\r') {
            buf.pop();
        }
        Ok(Some(buf))
    }

    /// Line number of the most recently read line (1-based).
    pub fn line_no(&self) -> usize {
        self.line_no
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn format_err(&self, message: impl Into<String>) -> ItrfError {
        ItrfError::catalog(self.file.clone(), self.line_no, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn tracks_line_numbers_and_strips_terminators() {
        let mut lines = CatalogLines::new(Cursor::new("a\r\nb\nlast"), "test");
        assert_eq!(lines.next_line().unwrap().as_deref(), Some("a"));
        assert_eq!(lines.next_line().unwrap().as_deref(), Some("b"));
        assert_eq!(lines.line_no(), 2);
        assert_eq!(lines.next_line().unwrap().as_deref(), Some("last"));
        assert_eq!(lines.next_line().unwrap(), None);
        assert_eq!(lines.line_no(), 3);
    }
}
