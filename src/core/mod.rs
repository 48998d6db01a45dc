//! Core data structures and types for tarql
//!
//! A [`Row`] is what the tokenizer hands out, a [`Header`] names its columns and a
//! [`BindingSet`] ties the two together for exactly one row.

use oxigraph::model::Variable;
use regex::Regex;
use std::collections::HashSet;

/// One record of tabular input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// 1-based record number in the input, the header row included
    pub number: u64,
    pub cells: Vec<String>,
}

impl Row {
    pub fn new(number: u64, cells: Vec<String>) -> Self {
        Self { number, cells }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.cells.get(index).map(String::as_str)
    }
}

/// Ordered, immutable list of variable names, one per column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    variables: Vec<Variable>,
}

impl Header {
    /// Builds the header from a header row.
    ///
    /// Each run of characters that are not word characters becomes a single `_`,
    /// surrounding whitespace included. Empty or still illegal names fall back to the
    /// positional name of the column and repeated names are suffixed with `_2`, `_3`, ...
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Self {
        let illegal = Regex::new(r"[^\w_]+").ok();
        let mut seen = HashSet::new();
        let mut variables = Vec::with_capacity(names.len());

        for (index, raw) in names.iter().enumerate() {
            let variable = illegal
                .as_ref()
                .and_then(|illegal| sanitize(illegal, raw.as_ref()))
                .unwrap_or_else(|| positional(index));
            let mut candidate = variable.clone();
            let mut suffix = 2;
            while !seen.insert(candidate.as_str().to_string()) {
                candidate = Variable::new_unchecked(format!("{}_{}", variable.as_str(), suffix));
                suffix += 1;
            }
            variables.push(candidate);
        }

        Self { variables }
    }

    /// Synthetic header `a, b, c, ...` for inputs without a header row.
    pub fn synthetic(columns: usize) -> Self {
        Self {
            variables: (0..columns).map(positional).collect(),
        }
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn names(&self) -> Vec<&str> {
        self.variables.iter().map(Variable::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

/// Converts a 0-based column index to its synthetic name (`0 -> a`, `25 -> z`, `26 -> aa`).
pub fn to_letters(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'a' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

fn positional(index: usize) -> Variable {
    Variable::new_unchecked(to_letters(index))
}

fn sanitize(illegal: &Regex, raw: &str) -> Option<Variable> {
    let cleaned = illegal.replace_all(raw, "_");
    if cleaned.is_empty() {
        return None;
    }
    Variable::new(cleaned.into_owned()).ok()
}

/// Variable bindings of a single row.
///
/// Borrows the header and the row, so it lives exactly as long as the row does.
/// Every header variable has an entry; variables without a cell are unbound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingSet<'a> {
    entries: Vec<(&'a Variable, Option<&'a str>)>,
}

impl<'a> BindingSet<'a> {
    pub fn new(entries: Vec<(&'a Variable, Option<&'a str>)>) -> Self {
        Self { entries }
    }

    /// Value of a variable: `None` if the variable is unknown, `Some(None)` if unbound.
    pub fn get(&self, name: &str) -> Option<Option<&'a str>> {
        self.entries.iter().find(|(var, _)| var.as_str() == name).map(|(_, value)| *value)
    }

    /// All entries in header order, unbound ones included.
    pub fn iter(&self) -> impl Iterator<Item = (&'a Variable, Option<&'a str>)> + '_ {
        self.entries.iter().copied()
    }

    /// Only the entries that carry a value.
    pub fn bound(&self) -> impl Iterator<Item = (&'a Variable, &'a str)> + '_ {
        self.entries.iter().filter_map(|(var, value)| value.map(|v| (*var, v)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub mod binder;
pub use binder::VariableBinder;
