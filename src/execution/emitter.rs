//! Incremental serialization of accepted triples.
//!
//! Triples are written as they are accepted, nothing is buffered beyond what the
//! serializer needs to group consecutive triples in Turtle. `finish` closes the
//! last statement and flushes the writer, so zero emitted triples still yields a
//! valid document.

use crate::config::OutputFormat;
use crate::error::{Error, Result};
use log::debug;
use oxigraph::io::{RdfFormat, RdfSerializer, WriterQuadSerializer};
use oxigraph::model::Triple;
use std::io::Write;

pub struct Emitter<W: Write> {
    serializer: WriterQuadSerializer<W>,
    format: OutputFormat,
    emitted: u64,
}

impl<W: Write> Emitter<W> {
    /// Opens the output in the given encoding. Prefixes only matter for Turtle.
    pub fn start(format: OutputFormat, prefixes: &[(String, String)], writer: W) -> Result<Self> {
        let mut serializer = RdfSerializer::from_format(rdf_format(format));
        if format == OutputFormat::Turtle {
            for (name, iri) in prefixes {
                serializer = serializer.with_prefix(name.as_str(), iri.as_str()).map_err(|e| {
                    Error::Template(format!("invalid prefix {}: <{}>: {}", name, iri, e))
                })?;
            }
        }

        debug!("Emitter started with format {:?}", format);

        Ok(Self {
            serializer: serializer.for_writer(writer),
            format,
            emitted: 0,
        })
    }

    pub fn emit(&mut self, triple: &Triple) -> Result<()> {
        self.serializer.serialize_triple(triple)?;
        self.emitted += 1;
        Ok(())
    }

    /// Writes any closing syntax and hands the flushed writer back.
    pub fn finish(self) -> Result<W> {
        let emitted = self.emitted;
        let mut writer = self.serializer.finish()?;
        writer.flush()?;
        debug!("Emitter finished after {} triples", emitted);
        Ok(writer)
    }

    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }
}

fn rdf_format(format: OutputFormat) -> RdfFormat {
    match format {
        OutputFormat::NTriples => RdfFormat::NTriples,
        OutputFormat::Turtle => RdfFormat::Turtle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxigraph::model::{Literal, NamedNode};

    fn triple(name: &str, age: &str) -> Triple {
        Triple::new(
            NamedNode::new(format!("http://example.org/person/{}", name)).unwrap(),
            NamedNode::new("http://example.org/hasAge").unwrap(),
            Literal::new_simple_literal(age),
        )
    }

    #[test]
    fn test_ntriples_lines() {
        let mut emitter = Emitter::start(OutputFormat::NTriples, &[], Vec::new()).unwrap();
        emitter.emit(&triple("Ann", "30")).unwrap();
        emitter.emit(&triple("Bo", "40")).unwrap();
        assert_eq!(emitter.emitted(), 2);

        let output = String::from_utf8(emitter.finish().unwrap()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "<http://example.org/person/Ann> <http://example.org/hasAge> \"30\" ."
        );
    }

    #[test]
    fn test_turtle_uses_prefixes() {
        let prefixes = vec![("ex".to_string(), "http://example.org/".to_string())];
        let mut emitter = Emitter::start(OutputFormat::Turtle, &prefixes, Vec::new()).unwrap();
        emitter.emit(&triple("Ann", "30")).unwrap();

        let output = String::from_utf8(emitter.finish().unwrap()).unwrap();
        assert!(output.contains("@prefix ex: <http://example.org/>"));
        assert!(output.contains("ex:hasAge"));
        assert!(output.trim_end().ends_with('.'));
    }

    #[test]
    fn test_empty_output_is_valid() {
        let emitter = Emitter::start(OutputFormat::NTriples, &[], Vec::new()).unwrap();
        assert!(emitter.finish().unwrap().is_empty());

        let emitter = Emitter::start(OutputFormat::Turtle, &[], Vec::new()).unwrap();
        assert!(String::from_utf8(emitter.finish().unwrap()).unwrap().trim().is_empty());
    }
}
