//! Oxigraph-based template evaluator.
//!
//! The template is parsed once into its algebra. For every row the bound cells are
//! joined in front of the WHERE pattern as a single-row `VALUES` block of plain
//! string literals, so they are visible both to the pattern and to the CONSTRUCT
//! template. The rewritten query runs against an empty store that lives for the
//! whole run.
//!
//! # Example
//!
//! ```ignore
//! use tarql::core::{Header, Row, VariableBinder};
//! use tarql::querying::{OxigraphEvaluator, QueryEvaluator, Template};
//!
//! let template = Template::new(r#"
//!     PREFIX ex: <http://example.org/>
//!     CONSTRUCT { ?person ex:name ?name }
//!     WHERE { BIND(IRI(CONCAT("http://example.org/person/", ?id)) AS ?person) }
//! "#)?;
//! let evaluator = OxigraphEvaluator::new(&template)?;
//!
//! let header = Header::from_names(&["id", "name"]);
//! let row = Row::new(2, vec!["1".to_string(), "Ann".to_string()]);
//! let triples = evaluator.evaluate(&VariableBinder::new().bind(&header, &row))?;
//! ```

use crate::core::BindingSet;
use crate::error::{Error, Result};
use crate::querying::query_processing::QueryEvaluator;
use crate::querying::template::Template;
use log::debug;
use oxigraph::model::{Literal, Triple};
use oxigraph::sparql::{QueryResults, SparqlEvaluator};
use oxigraph::store::Store;
use spargebra::algebra::GraphPattern;
use spargebra::term::GroundTerm;
use spargebra::{Query, SparqlParser};

#[derive(Debug, thiserror::Error)]
#[error("Oxigraph error: {0}")]
pub struct OxigraphError(String);

impl From<oxigraph::store::StorageError> for OxigraphError {
    fn from(err: oxigraph::store::StorageError) -> Self {
        OxigraphError(err.to_string())
    }
}

impl From<oxigraph::sparql::QueryEvaluationError> for OxigraphError {
    fn from(err: oxigraph::sparql::QueryEvaluationError) -> Self {
        OxigraphError(err.to_string())
    }
}

impl From<oxigraph::sparql::SparqlSyntaxError> for OxigraphError {
    fn from(err: oxigraph::sparql::SparqlSyntaxError) -> Self {
        OxigraphError(err.to_string())
    }
}

pub struct OxigraphEvaluator {
    query: Query,
    store: Store,
    prefixes: Vec<(String, String)>,
}

impl OxigraphEvaluator {
    /// Parses the template and checks that it is a CONSTRUCT query.
    ///
    /// The check also runs the query once without bindings against the empty store,
    /// so anything that fails regardless of the row data surfaces here as a template
    /// error.
    pub fn new(template: &Template) -> Result<Self> {
        let query = SparqlParser::new()
            .parse_query(template.text())
            .map_err(|e| Error::Template(e.to_string()))?;

        let form = match &query {
            Query::Construct { .. } => None,
            Query::Select { .. } => Some("SELECT"),
            Query::Ask { .. } => Some("ASK"),
            Query::Describe { .. } => Some("DESCRIBE"),
        };
        if let Some(form) = form {
            return Err(Error::Template(format!(
                "expected a CONSTRUCT query, got a {} query",
                form
            )));
        }

        let store = Store::new().map_err(|e| Error::Template(e.to_string()))?;
        SparqlEvaluator::new()
            .parse_query(&query.to_string())
            .map_err(|e| Error::Template(e.to_string()))?
            .on_store(&store)
            .execute()
            .map_err(|e| Error::Template(e.to_string()))?;

        debug!("Prepared template with {} prefixes", template.prefixes().len());

        Ok(Self {
            query,
            store,
            prefixes: template.prefixes().to_vec(),
        })
    }

    /// The template query with the row's bound cells joined in front of its pattern.
    fn bind(&self, bindings: &BindingSet<'_>) -> Query {
        let mut query = self.query.clone();
        let (variables, values): (Vec<_>, Vec<_>) = bindings
            .bound()
            .map(|(variable, value)| {
                let literal = GroundTerm::Literal(Literal::new_simple_literal(value));
                (variable.clone(), Some(literal))
            })
            .unzip();

        if variables.is_empty() {
            return query;
        }

        if let Query::Construct { pattern, .. } = &mut query {
            let empty = GraphPattern::Bgp {
                patterns: Vec::new(),
            };
            let inner = std::mem::replace(pattern, empty);
            *pattern = GraphPattern::Join {
                left: Box::new(GraphPattern::Values {
                    variables,
                    bindings: vec![values],
                }),
                right: Box::new(inner),
            };
        }
        query
    }
}

impl QueryEvaluator for OxigraphEvaluator {
    type EvaluatorError = OxigraphError;

    fn evaluate(
        &self,
        bindings: &BindingSet<'_>,
    ) -> std::result::Result<Vec<Triple>, OxigraphError> {
        let query = SparqlEvaluator::new().parse_query(&self.bind(bindings).to_string())?;

        match query.on_store(&self.store).execute()? {
            QueryResults::Graph(triples) => {
                let mut result = Vec::new();
                for triple in triples {
                    result.push(triple?);
                }
                Ok(result)
            }
            _ => Err(OxigraphError("template did not produce a graph".to_string())),
        }
    }

    fn prefixes(&self) -> &[(String, String)] {
        &self.prefixes
    }
}
