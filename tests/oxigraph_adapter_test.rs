use oxigraph::model::{Literal, NamedNode, Term};
use tarql::core::{Header, Row, VariableBinder};
use tarql::querying::{OxigraphEvaluator, QueryEvaluator, Template};
use tarql::Error;

/// Helper to evaluate a template against one row
fn evaluate(template: &str, names: &[&str], cells: &[&str]) -> Vec<oxigraph::model::Triple> {
    let evaluator = OxigraphEvaluator::new(&Template::new(template).unwrap()).unwrap();
    let header = Header::from_names(names);
    let row = Row::new(2, cells.iter().map(|c| c.to_string()).collect());
    let mut binder = VariableBinder::new();
    evaluator.evaluate(&binder.bind(&header, &row)).unwrap()
}

#[test]
fn test_cells_are_bound_as_plain_literals() {
    let triples = evaluate(
        r#"
        PREFIX ex: <http://example.org/>
        CONSTRUCT { ex:row ex:value ?v }
        WHERE { BIND(?value AS ?v) }
        "#,
        &["value"],
        &["42"],
    );

    assert_eq!(triples.len(), 1);
    assert_eq!(triples[0].object, Term::from(Literal::new_simple_literal("42")));
}

#[test]
fn test_expressions_can_convert_cells() {
    let triples = evaluate(
        r#"
        PREFIX ex: <http://example.org/>
        PREFIX xsd: <http://www.w3.org/2001/XMLSchema#>
        CONSTRUCT { ?item ex:price ?price ; ex:label ?label }
        WHERE {
            BIND(IRI(CONCAT("http://example.org/item/", ?sku)) AS ?item)
            BIND(xsd:decimal(?cost) AS ?price)
            BIND(STRLANG(?title, "en") AS ?label)
        }
        "#,
        &["sku", "cost", "title"],
        &["A1", "9.50", "Widget"],
    );

    assert_eq!(triples.len(), 2);
    let item = NamedNode::new("http://example.org/item/A1").unwrap();
    assert!(triples.iter().all(|t| t.subject.to_string() == item.to_string()));
    assert!(triples.iter().any(|t| t.object.to_string().contains("XMLSchema#decimal")));
    assert!(triples.iter().any(|t| t.object.to_string() == "\"Widget\"@en"));
}

#[test]
fn test_multiple_triples_per_row() {
    let triples = evaluate(
        r#"
        PREFIX ex: <http://example.org/>
        CONSTRUCT {
            ?person a ex:Person ;
                ex:name ?label ;
                ex:city ?town .
        }
        WHERE {
            BIND(IRI(CONCAT("http://example.org/person/", ?id)) AS ?person)
            BIND(?name AS ?label)
            BIND(?city AS ?town)
        }
        "#,
        &["id", "name", "city"],
        &["7", "Ann", "Ghent"],
    );

    assert_eq!(triples.len(), 3);
}

#[test]
fn test_column_variables_used_directly_in_template() {
    let triples = evaluate(
        r#"
        PREFIX ex: <http://example.org/>
        CONSTRUCT { ?p ex:name ?name ; ex:hasAge ?age }
        WHERE { BIND(IRI(CONCAT("http://example.org/person/", ?name)) AS ?p) }
        "#,
        &["name", "age"],
        &["Ann", "30"],
    );

    assert_eq!(triples.len(), 2);
    let person = NamedNode::new("http://example.org/person/Ann").unwrap();
    assert!(triples.iter().all(|t| t.subject.to_string() == person.to_string()));
    assert!(triples.iter().any(|t| t.object == Term::from(Literal::new_simple_literal("Ann"))));
    assert!(triples.iter().any(|t| t.object == Term::from(Literal::new_simple_literal("30"))));
}

#[test]
fn test_blank_cell_leaves_its_variable_unbound() {
    let triples = evaluate(
        r#"
        PREFIX ex: <http://example.org/>
        CONSTRUCT { ?s ex:name ?name }
        WHERE { BIND(IRI(CONCAT("http://example.org/person/", ?id)) AS ?s) }
        "#,
        &["id", "name"],
        &["  ", "Ann"],
    );

    assert!(triples.is_empty());
}

#[test]
fn test_unbound_optional_parts_are_dropped() {
    let triples = evaluate(
        r#"
        PREFIX ex: <http://example.org/>
        CONSTRUCT { ex:row ex:a ?x ; ex:b ?y }
        WHERE { BIND(?first AS ?x) BIND(?second AS ?y) }
        "#,
        &["first", "second"],
        &["only"],
    );

    assert_eq!(triples.len(), 1);
    assert_eq!(triples[0].object.to_string(), "\"only\"");
}

#[test]
fn test_ask_query_is_rejected() {
    let template = Template::new("ASK { ?s ?p ?o }").unwrap();
    match OxigraphEvaluator::new(&template) {
        Err(Error::Template(message)) => assert!(message.contains("CONSTRUCT")),
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("ASK query accepted"),
    }
}
