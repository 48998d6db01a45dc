use crate::error::{Error, Result};
use regex::Regex;
use std::fs;
use std::path::Path;

/// The user supplied CONSTRUCT query, kept as text together with its prefixes.
#[derive(Debug, Clone)]
pub struct Template {
    text: String,
    prefixes: Vec<(String, String)>,
}

impl Template {
    pub fn new(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(Error::Template("the query template is empty".to_string()));
        }
        let prefixes = extract_prefixes(&text)?;
        Ok(Self { text, prefixes })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            Error::Template(format!("cannot read query file {}: {}", path.display(), e))
        })?;
        Self::new(text)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn prefixes(&self) -> &[(String, String)] {
        &self.prefixes
    }
}

fn extract_prefixes(text: &str) -> Result<Vec<(String, String)>> {
    let prefix_regex = Regex::new(r"(?i)\bPREFIX\s+([A-Za-z][\w.\-]*)?:\s*<([^>\s]*)>")
        .map_err(|e| Error::Template(e.to_string()))?;

    let mut prefixes: Vec<(String, String)> = Vec::new();
    for line in text.lines() {
        let line = strip_comment(line);
        for captures in prefix_regex.captures_iter(line) {
            let name = captures.get(1).map_or("", |m| m.as_str()).to_string();
            let iri = captures[2].to_string();
            // A redeclared prefix takes the last IRI, as the query parser does.
            if let Some(existing) = prefixes.iter_mut().find(|(n, _)| *n == name) {
                existing.1 = iri;
            } else {
                prefixes.push((name, iri));
            }
        }
    }
    Ok(prefixes)
}

fn strip_comment(line: &str) -> &str {
    let mut in_iri = false;
    for (index, c) in line.char_indices() {
        match c {
            '<' => in_iri = true,
            '>' => in_iri = false,
            '#' if !in_iri => return &line[..index],
            _ => {}
        }
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_prefixes() {
        let template = Template::new(
            r"
            PREFIX ex: <http://example.org/>
            prefix foaf:<http://xmlns.com/foaf/0.1/>
            PREFIX : <http://example.org/default#>
            CONSTRUCT { ?s ex:name ?name } WHERE { BIND(IRI(?id) AS ?s) }
            ",
        )
        .unwrap();

        assert_eq!(
            template.prefixes(),
            &[
                ("ex".to_string(), "http://example.org/".to_string()),
                ("foaf".to_string(), "http://xmlns.com/foaf/0.1/".to_string()),
                (String::new(), "http://example.org/default#".to_string()),
            ]
        );
    }

    #[test]
    fn test_commented_prefix_is_ignored() {
        let template = Template::new(
            "# PREFIX old: <http://old.example/>\n\
             PREFIX ex: <http://example.org/ns#> # trailing\n\
             CONSTRUCT {} WHERE {}",
        )
        .unwrap();
        assert_eq!(template.prefixes().len(), 1);
        assert_eq!(template.prefixes()[0].1, "http://example.org/ns#");
    }

    #[test]
    fn test_empty_template_is_rejected() {
        assert!(matches!(Template::new("  \n"), Err(Error::Template(_))));
    }

    #[test]
    fn test_missing_file() {
        let err = Template::from_file("/nonexistent/query.rq").unwrap_err();
        assert_eq!(err.stage(), "template");
    }
}
