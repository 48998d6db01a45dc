//! Input side of the pipeline: turning delimited text into rows.

pub mod row_source;

pub use row_source::{QuoteTracker, RowSource};
