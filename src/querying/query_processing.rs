use crate::core::BindingSet;
use oxigraph::model::Triple;
use std::error::Error;

/// Evaluates the construct template against the bindings of one row.
///
/// Implementations hold the template and nothing that outlives a row, so the
/// same evaluator can be called for every row of the input. An empty result is
/// a success.
pub trait QueryEvaluator {
    type EvaluatorError: Error + 'static;

    fn evaluate(&self, bindings: &BindingSet<'_>) -> Result<Vec<Triple>, Self::EvaluatorError>;

    /// Namespace prefixes declared by the template, `(name, iri)` in declaration order.
    fn prefixes(&self) -> &[(String, String)] {
        &[]
    }
}
