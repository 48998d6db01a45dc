//! Template evaluation.
//!
//! The pipeline only sees the [`QueryEvaluator`] trait. [`OxigraphEvaluator`] is
//! the SPARQL implementation used by the binary, tests plug in stubs.

pub mod oxigraph_adapter;
pub mod query_processing;
pub mod template;

pub use oxigraph_adapter::{OxigraphError, OxigraphEvaluator};
pub use query_processing::QueryEvaluator;
pub use template::Template;
