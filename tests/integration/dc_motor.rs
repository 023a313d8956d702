//! Transformations over the DCMotor example model.

use super::fixture;
use modelica_transformer::edit::EditError;
use modelica_transformer::select::describe_matches;
use modelica_transformer::{
    replace_component_argument_value, ComponentDeclarationSelector, ConnectSelector, EditOp,
    ModelicaParser, PathSelector, SelectError, Selector, SourceParser, TransformError,
    Transformation, Transformer,
};
use std::fs;

fn dc_motor() -> String {
    fs::read_to_string(fixture("DCMotor.mo")).unwrap()
}

#[test]
fn change_component_argument() {
    let original = dc_motor();
    let mut transformer = Transformer::new();
    transformer.add(replace_component_argument_value("EM", "k", "8"));

    let result = transformer.execute_file(fixture("DCMotor.mo")).unwrap();

    assert_eq!(result, original.replace("EM(k=1)", "EM(k=8)"));
    assert_eq!(transformer.edits().len(), 1);
}

#[test]
fn comment_after_component_declaration() {
    let original = dc_motor();
    let mut transformer = Transformer::new();
    transformer.add(Transformation::new(
        ComponentDeclarationSelector::new("load"),
        EditOp::insert_after(" \"This is a comment for load...\""),
    ));

    let result = transformer.execute(&original).unwrap();

    assert_eq!(
        result,
        original.replace(
            "load(J=1, phi(start=0));",
            "load(J=1, phi(start=0)) \"This is a comment for load...\";"
        )
    );
}

#[test]
fn delete_connection() {
    let original = dc_motor();
    let mut transformer = Transformer::new();
    transformer.add(Transformation::new(
        ConnectSelector::new("EM.flange", "load.flange_a"),
        EditOp::delete(),
    ));

    let result = transformer.execute(&original).unwrap();

    assert_eq!(result, original.replace("connect(EM.flange, load.flange_a)", ""));
}

#[test]
fn batch_of_disjoint_transformations_is_order_independent() {
    let original = dc_motor();
    let build = |reversed: bool| {
        let mut items = vec![
            replace_component_argument_value("R1", "R", "12"),
            replace_component_argument_value("DC", "V", "48"),
            replace_component_argument_value("load", "start", "0.1"),
            Transformation::new(
                ConnectSelector::new("G.p", "DC.n"),
                EditOp::insert_before("// grounded\n  "),
            ),
        ];
        if reversed {
            items.reverse();
        }
        let mut transformer = Transformer::new();
        for item in items {
            transformer.add(item);
        }
        transformer
    };

    let forward = build(false).execute(&original).unwrap();
    let backward = build(true).execute(&original).unwrap();

    assert_eq!(forward, backward);
    let expected = original
        .replace("R1(R=10)", "R1(R=12)")
        .replace("DC(V=60,", "DC(V=48,")
        .replace("phi(start=0)", "phi(start=0.1)")
        .replace("  connect(DC.n, G.p);", "  // grounded\n  connect(DC.n, G.p);");
    assert_eq!(forward, expected);
}

#[test]
fn output_still_parses() {
    let mut transformer = Transformer::new();
    transformer
        .add(replace_component_argument_value("EM", "k", "8"))
        .add(Transformation::new(
            ComponentDeclarationSelector::new("load"),
            EditOp::insert_after(" \"driven inertia\""),
        ));

    let result = transformer.execute(&dc_motor()).unwrap();
    assert!(ModelicaParser::new().parse(&result).is_ok());
}

#[test]
fn nested_selection_overlap_is_rejected() {
    let mut transformer = Transformer::new();
    transformer
        .add(replace_component_argument_value("EM", "k", "8"))
        .add(Transformation::new(
            ComponentDeclarationSelector::new("EM"),
            EditOp::replace("EM(k=2)"),
        ));

    let err = transformer.execute(&dc_motor()).unwrap_err();
    assert!(matches!(err, TransformError::Edit(EditError::Overlap { .. })));
}

#[test]
fn unknown_component_suggests_a_name() {
    let mut transformer = Transformer::new();
    transformer.add(Transformation::new(
        ComponentDeclarationSelector::new("laod"),
        EditOp::delete(),
    ));

    match transformer.execute(&dc_motor()).unwrap_err() {
        TransformError::Select {
            source: SelectError::NoMatch { suggestion, .. },
            ..
        } => assert_eq!(suggestion.as_deref(), Some("load")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn path_selects_every_connection() {
    let tree = ModelicaParser::new().parse(&dc_motor()).unwrap();
    let connects = PathSelector::parse("equation_section.connect_clause")
        .unwrap()
        .select(tree.root())
        .unwrap();
    assert_eq!(connects.len(), 6);

    let touching_dc_n = PathSelector::parse("connect_clause[component_reference=DC.n]")
        .unwrap()
        .select(tree.root())
        .unwrap();
    let texts: Vec<_> = touching_dc_n.iter().map(|n| n.text()).collect();
    assert_eq!(texts, vec!["connect(EM.n, DC.n)", "connect(DC.n, G.p)"]);
}

#[test]
fn debug_view_of_declaration() {
    let tree = ModelicaParser::new().parse(&dc_motor()).unwrap();
    let selector = ComponentDeclarationSelector::new("DC");
    let nodes = selector.select(tree.root()).unwrap();
    let out = describe_matches(&selector.describe(), &nodes);

    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "Selector: component-declaration(DC)");
    assert_eq!(lines[1], "[1] component_declaration");
    assert!(lines[2].starts_with("    declaration"));
    assert!(lines[2].ends_with("| comment"));
    // The annotation text is collapsed and truncated
    assert!(lines[3].contains("DC(V=60, startTime=0.5)"));
    assert!(lines[3].ends_with(".."));
}
