//! The same selectors and edits over a tree-sitter grammar.

use modelica_transformer::{
    Edit, EditOp, Node, ParseError, PathSelector, SourceParser, TransformError, Transformation,
    TreeSitterParser, Transformer,
};

const SOURCE: &str = "fn hello() {}\n\nfn world() {\n    hello();\n}\n";

fn rename_to_greet(node: Node<'_>) -> Edit {
    let name = node.children_by_field("name").next().unwrap_or(node);
    Edit::for_node(name, Some("greet".to_string()))
}

#[test]
fn rename_function_definition() {
    let mut transformer = Transformer::with_parser(TreeSitterParser::rust().unwrap());
    transformer.add(Transformation::new(
        PathSelector::parse("function_item[name=hello]").unwrap(),
        rename_to_greet,
    ));

    let out = transformer.execute(SOURCE).unwrap();
    assert_eq!(out, "fn greet() {}\n\nfn world() {\n    hello();\n}\n");
}

#[test]
fn delete_call_statement() {
    let mut transformer = Transformer::with_parser(TreeSitterParser::rust().unwrap());
    transformer.add(Transformation::new(
        PathSelector::parse("function_item[name=world].expression_statement").unwrap(),
        EditOp::delete(),
    ));

    let out = transformer.execute(SOURCE).unwrap();
    assert_eq!(out, "fn hello() {}\n\nfn world() {\n    \n}\n");
}

#[test]
fn syntax_errors_abort() {
    let mut transformer = Transformer::with_parser(TreeSitterParser::rust().unwrap());
    let err = transformer.execute("fn broken( {").unwrap_err();
    assert!(matches!(err, TransformError::Parse(ParseError::Syntax { .. })));
}

#[test]
fn boxed_parser_is_a_source_parser() {
    let parser: Box<dyn SourceParser> = Box::new(TreeSitterParser::rust().unwrap());
    let mut transformer = Transformer::with_parser(parser);
    transformer.add(Transformation::new(
        PathSelector::parse("function_item[name=hello].block").unwrap(),
        EditOp::replace("{ println!(\"hi\"); }"),
    ));
    let out = transformer.execute(SOURCE).unwrap();
    assert!(out.starts_with("fn hello() { println!(\"hi\"); }\n"));
}
