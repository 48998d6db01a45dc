//! # tarql
//!
//! tarql turns CSV and TSV input into RDF by applying one SPARQL CONSTRUCT
//! template to every row of the input.
//!
//! Each row's cells are bound to variables named after the header (or `?a`, `?b`,
//! ... when there is no header), the template is evaluated with those bindings and
//! the resulting triples are streamed out as Turtle or N-Triples.
//!
//! ## Features
//!
//! - Streaming over unbounded input, one row in memory at a time
//! - Lenient binding of ragged rows
//! - Bounded sliding-window suppression of duplicate triples
//! - Turtle output keeps the prefixes declared in the template
//!
//! ## Example
//!
//! ```rust,no_run
//! use tarql::config::TransformConfig;
//! use tarql::execution::Pipeline;
//! use tarql::querying::{OxigraphEvaluator, Template};
//!
//! fn example() -> tarql::Result<()> {
//!     let template = Template::new(
//!         r#"PREFIX ex: <http://example.org/>
//!            CONSTRUCT { ?person ex:name ?name }
//!            WHERE { BIND(IRI(CONCAT("http://example.org/person/", ?id)) AS ?person) }"#,
//!     )?;
//!     let evaluator = OxigraphEvaluator::new(&template)?;
//!     let mut pipeline = Pipeline::new(TransformConfig::default(), evaluator);
//!     pipeline.run("id,name\n1,Ann\n".as_bytes(), std::io::stdout())?;
//!     Ok(())
//! }
//! ```

#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]

/// Configuration structures and utilities
pub mod config;

/// Core data structures and types
pub mod core;

/// Error types and result definitions
pub mod error;

/// Pipeline orchestration and output
pub mod execution;

/// Template parsing and evaluation
pub mod querying;

/// Tabular input
pub mod sources;

/// Operators over the stream of produced triples
pub mod stream;

// Re-export commonly used types
pub use error::{Error, Result};
