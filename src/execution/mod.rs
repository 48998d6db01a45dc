//! Execution Module
//!
//! This module drives a transformation run from tabular input to serialized triples.
//!
//! # Components
//!
//! - **Pipeline** - Orchestrates reading, binding, evaluation and deduplication row by row
//! - **Emitter** - Serializes accepted triples incrementally
//!
//! # Example
//!
//! ```ignore
//! use tarql::config::TransformConfig;
//! use tarql::execution::Pipeline;
//! use tarql::querying::{OxigraphEvaluator, Template};
//!
//! let template = Template::from_file("people.rq")?;
//! let evaluator = OxigraphEvaluator::new(&template)?;
//! let mut pipeline = Pipeline::new(TransformConfig::default(), evaluator);
//!
//! let metrics = pipeline.run(std::io::stdin().lock(), std::io::stdout().lock())?;
//! println!("Emitted {} triples", metrics.triples_emitted);
//! ```

pub mod emitter;
pub mod pipeline;

// Re-export main types for convenience
pub use emitter::Emitter;
pub use pipeline::{Pipeline, PipelineMetrics, PipelineState};
