//! Configuration structures and utilities

use crate::error::{Error, Result};
use std::path::PathBuf;

/// Output encoding of the produced graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One triple per line, no framing
    NTriples,
    /// Turtle with the template's prefixes
    #[default]
    Turtle,
}

/// A single character option that may also be switched off.
///
/// Parsed from either one character or a named alias such as `tab` or `none`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharOption {
    Char(char),
    Disabled,
}

impl CharOption {
    /// Parses a delimiter value (`comma`, `tab` or one character).
    pub fn delimiter(value: &str) -> Result<Self> {
        Self::parse(value, "delimiter", &[("comma", Some(',')), ("tab", Some('\t'))])
    }

    /// Parses an escape character value (`backslash`, `none` or one character).
    pub fn escape(value: &str) -> Result<Self> {
        Self::parse(value, "escape char", &[("backslash", Some('\\')), ("none", None)])
    }

    /// Parses a quote character value (`singlequote`, `doublequote`, `none` or one character).
    pub fn quote(value: &str) -> Result<Self> {
        Self::parse(
            value,
            "quote char",
            &[("singlequote", Some('\'')), ("doublequote", Some('"')), ("none", None)],
        )
    }

    fn parse(value: &str, description: &str, aliases: &[(&str, Option<char>)]) -> Result<Self> {
        if let Some((_, mapped)) = aliases.iter().find(|(name, _)| *name == value) {
            return Ok(mapped.map_or(CharOption::Disabled, CharOption::Char));
        }

        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(CharOption::Char(c)),
            _ => {
                let names: Vec<&str> = aliases.iter().map(|(name, _)| *name).collect();
                Err(Error::Config(format!(
                    "'{}' is not a valid {} - not a single character or one of {:?}",
                    value, description, names
                )))
            }
        }
    }

    pub fn as_char(&self) -> Option<char> {
        match self {
            CharOption::Char(c) => Some(*c),
            CharOption::Disabled => None,
        }
    }
}

/// Dialect the tokenizer is driven with, reduced to bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialect {
    pub delimiter: u8,
    pub quote: Option<u8>,
    pub escape: Option<u8>,
}

/// Configuration for one transformation run
#[derive(Debug, Clone)]
pub struct TransformConfig {
    /// Input file, `None` reads standard input
    pub input: Option<PathBuf>,
    /// Output file, `None` writes standard output
    pub output: Option<PathBuf>,
    /// Explicit delimiter, `None` means the default comma
    pub delimiter: Option<CharOption>,
    /// Tab shorthand, mutually exclusive with `delimiter`
    pub tab: bool,
    pub escape: CharOption,
    pub quote: CharOption,
    /// Dedup window size, 0 disables deduplication
    pub dedup_window: usize,
    pub output_format: OutputFormat,
    pub has_header: bool,
    /// Fail the run on the first row evaluation error instead of skipping the row
    pub strict: bool,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            input: None,
            output: None,
            delimiter: None,
            tab: false,
            escape: CharOption::Char('\\'),
            quote: CharOption::Char('"'),
            dedup_window: 0,
            output_format: OutputFormat::Turtle,
            has_header: true,
            strict: false,
        }
    }
}

impl TransformConfig {
    /// Checks the options for contradictions and resolves the tokenizer dialect.
    pub fn validate(&self) -> Result<Dialect> {
        let delimiter = match (self.tab, self.delimiter) {
            (true, Some(_)) => {
                return Err(Error::Config(
                    "a delimiter and the tab flag cannot both be given".to_string(),
                ))
            }
            (true, None) => '\t',
            (false, Some(CharOption::Char(c))) => c,
            (false, Some(CharOption::Disabled)) => {
                return Err(Error::Config("the delimiter cannot be disabled".to_string()))
            }
            (false, None) => ',',
        };

        let delimiter = ascii_byte(delimiter, "delimiter")?;
        let quote = self.quote.as_char().map(|c| ascii_byte(c, "quote char")).transpose()?;
        let escape = self.escape.as_char().map(|c| ascii_byte(c, "escape char")).transpose()?;

        if quote == Some(delimiter) || escape == Some(delimiter) {
            return Err(Error::Config(
                "the delimiter must differ from the quote and escape characters".to_string(),
            ));
        }
        if quote.is_some() && quote == escape {
            return Err(Error::Config("the quote and escape characters must differ".to_string()));
        }
        if [Some(delimiter), quote, escape].iter().flatten().any(|b| *b == b'\n' || *b == b'\r') {
            return Err(Error::Config(
                "line terminators cannot be used as dialect characters".to_string(),
            ));
        }

        Ok(Dialect {
            delimiter,
            quote,
            escape,
        })
    }
}

fn ascii_byte(c: char, description: &str) -> Result<u8> {
    if c.is_ascii() {
        Ok(c as u8)
    } else {
        Err(Error::Config(format!("{} '{}' must be a single ASCII character", description, c)))
    }
}
