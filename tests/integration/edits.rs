//! Edit placement over hand-built and parsed trees.

use modelica_transformer::tree::TreeBuilder;
use modelica_transformer::{
    apply_edits, Edit, EditFactory, EditOp, Node, PathSelector, Selector, Span, SyntaxTree,
    Transformation, Transformer,
};

/// `root` spanning the whole text with a single `word` child at `span`.
fn tree_with_word(source: &str, span: Span) -> SyntaxTree {
    let mut builder = TreeBuilder::new();
    builder.start_node("root", None);
    builder.token("word", Some("word"), span);
    builder.finish_node_spanning(Span::new(0, source.len()));
    builder.finish(source).unwrap()
}

#[test]
fn insert_after_inclusive_range() {
    let source = "abcdefghijklmno";
    // Inclusive [10, 12] is "klm"
    let tree = tree_with_word(source, Span::new(10, 13));
    let mut transformer = Transformer::new();
    transformer.add(Transformation::new(
        PathSelector::parse("word").unwrap(),
        EditOp::insert_after("!"),
    ));

    let out = transformer.execute_tree(&tree).unwrap();
    assert_eq!(out, "abcdefghijklm!no");
    assert_eq!(out.replace('!', ""), source);
}

#[test]
fn deletion_removes_exactly_the_node() {
    let source = "abcdefghijklmno";
    let tree = tree_with_word(source, Span::new(3, 6));
    let word = PathSelector::parse("word").unwrap().select(tree.root()).unwrap()[0];
    assert_eq!(word.text(), "def");

    let out = apply_edits(source, &[EditOp::delete().make(word)]).unwrap();
    assert_eq!(out, "abcghijklmno");
}

#[test]
fn single_character_node_is_deleted() {
    let source = "abc";
    let tree = tree_with_word(source, Span::new(1, 2));
    let word = tree.root().children().next().unwrap();
    let out = apply_edits(source, &[EditOp::delete().make(word)]).unwrap();
    assert_eq!(out, "ac");
}

#[test]
fn single_replace() {
    let mut transformer = Transformer::new();
    transformer.add(Transformation::new(
        PathSelector::parse("declaration[IDENT=x].expression").unwrap(),
        EditOp::replace("2"),
    ));
    assert_eq!(
        transformer.execute("model M Real x = 1; end M;").unwrap(),
        "model M Real x = 2; end M;"
    );
}

fn double_value(node: Node<'_>) -> Edit {
    let value: f64 = node.text().parse().unwrap_or(0.0);
    Edit::for_node(node, Some((value * 2.0).to_string()))
}

#[test]
fn function_edit_factory() {
    let mut transformer = Transformer::new();
    transformer.add(Transformation::new(
        PathSelector::parse("element_modification[name=R].expression").unwrap(),
        double_value,
    ));
    let out = transformer
        .execute("model M Resistor a(R=5); Resistor b(R=1.5); end M;")
        .unwrap();
    assert_eq!(out, "model M Resistor a(R=10); Resistor b(R=3); end M;");
}

#[test]
fn multibyte_text_is_preserved() {
    let source = "model M \"Widerstand \u{3a9}\" Real x = 1; end M;";
    let mut transformer = Transformer::new();
    transformer.add(Transformation::new(
        PathSelector::parse("declaration[IDENT=x].expression").unwrap(),
        EditOp::replace("\u{3c0}"),
    ));
    assert_eq!(
        transformer.execute(source).unwrap(),
        "model M \"Widerstand \u{3a9}\" Real x = \u{3c0}; end M;"
    );
}
