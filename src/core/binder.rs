use super::{BindingSet, Header, Row};
use log::warn;

/// Maps the cells of a row onto the header's variables.
///
/// Binding is lenient: missing trailing cells leave their variables unbound and
/// cells beyond the header are dropped with a warning. Empty or whitespace-only
/// cells are unbound as well.
#[derive(Debug, Clone, Default)]
pub struct VariableBinder {
    ragged_rows: u64,
}

impl VariableBinder {
    pub fn new() -> Self {
        Self { ragged_rows: 0 }
    }

    pub fn bind<'a>(&mut self, header: &'a Header, row: &'a Row) -> BindingSet<'a> {
        if row.len() > header.len() {
            self.ragged_rows += 1;
            warn!(
                "Row {} has {} cells but the header names {}, ignoring the extra cells",
                row.number,
                row.len(),
                header.len()
            );
        } else if row.len() < header.len() {
            self.ragged_rows += 1;
        }

        let entries = header
            .variables()
            .iter()
            .enumerate()
            .map(|(index, variable)| (variable, row.get(index).filter(|cell| is_bound(cell))))
            .collect();

        BindingSet::new(entries)
    }

    /// Rows whose length differed from the header so far.
    pub fn ragged_rows(&self) -> u64 {
        self.ragged_rows
    }
}

fn is_bound(cell: &str) -> bool {
    !cell.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Row {
        Row::new(2, cells.iter().map(|c| c.to_string()).collect())
    }

    #[test]
    fn test_bind_full_row() {
        let header = Header::from_names(&["name", "age"]);
        let row = row(&["Ann", "30"]);
        let mut binder = VariableBinder::new();

        let bindings = binder.bind(&header, &row);
        let pairs: Vec<_> = bindings.iter().map(|(v, value)| (v.as_str(), value)).collect();
        assert_eq!(pairs, vec![("name", Some("Ann")), ("age", Some("30"))]);
        assert_eq!(binder.ragged_rows(), 0);
    }

    #[test]
    fn test_short_row_leaves_variables_unbound() {
        let header = Header::from_names(&["name", "age", "city"]);
        let row = row(&["Bo"]);
        let mut binder = VariableBinder::new();

        let bindings = binder.bind(&header, &row);
        assert_eq!(bindings.get("name"), Some(Some("Bo")));
        assert_eq!(bindings.get("age"), Some(None));
        assert_eq!(bindings.get("city"), Some(None));
        assert_eq!(binder.ragged_rows(), 1);
    }

    #[test]
    fn test_long_row_drops_extra_cells() {
        let header = Header::synthetic(2);
        let row = row(&["x", "y", "z"]);
        let mut binder = VariableBinder::new();

        let bindings = binder.bind(&header, &row);
        assert_eq!(bindings.len(), 2);
        assert_eq!(bindings.get("b"), Some(Some("y")));
        assert_eq!(bindings.get("c"), None);
    }

    #[test]
    fn test_blank_cells_are_unbound() {
        let header = Header::from_names(&["name", "note", "city"]);
        let row = row(&["Ann", "", " \t "]);
        let mut binder = VariableBinder::new();

        let bindings = binder.bind(&header, &row);
        assert_eq!(bindings.get("note"), Some(None));
        assert_eq!(bindings.get("city"), Some(None));
        assert_eq!(bindings.bound().count(), 1);
        assert_eq!(binder.ragged_rows(), 0);
    }

    #[test]
    fn test_padded_cell_keeps_its_whitespace() {
        let header = Header::from_names(&["name"]);
        let row = row(&[" Ann "]);

        assert_eq!(VariableBinder::new().bind(&header, &row).get("name"), Some(Some(" Ann ")));
    }
}
