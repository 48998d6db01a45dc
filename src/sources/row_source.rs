//! Lazy row source over delimited text.
//!
//! Tokenizing is delegated to the `csv` crate. The only thing added on top is a
//! check for a quoted field that is still open when the input ends, which the
//! tokenizer would otherwise silently close.

use crate::config::Dialect;
use crate::core::Row;
use crate::error::{Error, Result};
use csv::{ReaderBuilder, StringRecord};
use std::io::{self, Read};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuoteState {
    StartField,
    InField,
    InQuoted,
    InQuotedEscape,
    QuoteInQuoted,
}

/// Read adapter that follows quoting as the bytes go by.
pub struct QuoteTracker<R> {
    inner: R,
    dialect: Dialect,
    state: QuoteState,
    eof: bool,
}

impl<R: Read> QuoteTracker<R> {
    pub fn new(inner: R, dialect: Dialect) -> Self {
        Self {
            inner,
            dialect,
            state: QuoteState::StartField,
            eof: false,
        }
    }

    /// True once the input is exhausted inside a quoted field.
    pub fn is_unterminated(&self) -> bool {
        self.eof && matches!(self.state, QuoteState::InQuoted | QuoteState::InQuotedEscape)
    }

    fn advance(&mut self, byte: u8) {
        let Dialect { delimiter, quote, escape } = self.dialect;
        let terminator = byte == b'\n' || byte == b'\r';

        self.state = match self.state {
            QuoteState::StartField if Some(byte) == quote => QuoteState::InQuoted,
            QuoteState::StartField | QuoteState::InField | QuoteState::QuoteInQuoted
                if byte == delimiter || terminator =>
            {
                QuoteState::StartField
            }
            QuoteState::QuoteInQuoted if Some(byte) == quote => QuoteState::InQuoted,
            QuoteState::StartField | QuoteState::InField | QuoteState::QuoteInQuoted => {
                QuoteState::InField
            }
            QuoteState::InQuoted if Some(byte) == escape => QuoteState::InQuotedEscape,
            QuoteState::InQuoted if Some(byte) == quote => QuoteState::QuoteInQuoted,
            QuoteState::InQuoted | QuoteState::InQuotedEscape => QuoteState::InQuoted,
        };
    }
}

impl<R: Read> Read for QuoteTracker<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        if n == 0 && !buf.is_empty() {
            self.eof = true;
        }
        for &byte in &buf[..n] {
            self.advance(byte);
        }
        Ok(n)
    }
}

/// Produces rows one at a time until the input is exhausted.
///
/// Blank lines are skipped and rows may have any number of cells.
pub struct RowSource<R: Read> {
    reader: csv::Reader<QuoteTracker<R>>,
    record: StringRecord,
    rows_read: u64,
    exhausted: bool,
}

impl<R: Read> RowSource<R> {
    pub fn new(input: R, dialect: Dialect) -> Self {
        let reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(dialect.delimiter)
            .quoting(dialect.quote.is_some())
            .quote(dialect.quote.unwrap_or(b'"'))
            .escape(dialect.escape)
            .double_quote(true)
            .from_reader(QuoteTracker::new(input, dialect));

        Self {
            reader,
            record: StringRecord::new(),
            rows_read: 0,
            exhausted: false,
        }
    }

    /// Reads the next row, `Ok(None)` once the input is exhausted.
    pub fn next_row(&mut self) -> Result<Option<Row>> {
        if self.exhausted {
            return Ok(None);
        }

        let number = self.rows_read + 1;
        let more = match self.reader.read_record(&mut self.record) {
            Ok(more) => more,
            Err(err) => {
                self.exhausted = true;
                return Err(with_row(Error::from(err), number));
            }
        };

        if self.reader.get_ref().is_unterminated() {
            self.exhausted = true;
            return Err(Error::Parse {
                row: number,
                message: "unterminated quoted field at end of input".to_string(),
            });
        }

        if !more {
            self.exhausted = true;
            return Ok(None);
        }

        self.rows_read = number;
        Ok(Some(Row::new(number, self.record.iter().map(str::to_string).collect())))
    }

    /// Number of rows produced so far, the header row included.
    pub fn rows_read(&self) -> u64 {
        self.rows_read
    }
}

fn with_row(err: Error, row: u64) -> Error {
    match err {
        Error::Parse { message, .. } => Error::Parse { row, message },
        other => other,
    }
}

impl<R: Read> Iterator for RowSource<R> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_row().transpose()
    }
}
