//! Tests for the PHP importer on real source

use astgraph_core::grammar::php::{BinaryOperator, PhpKind};
use astgraph_core::{decorate, AstTree, PhpGrammar, PhpImporter, SyntaxImporter};

fn import(source: &str) -> AstTree<PhpKind> {
    PhpImporter::new().import_source(source).unwrap()
}

fn decorated_labels(source: &str) -> Vec<String> {
    let mut tree = import(source);
    decorate::<PhpGrammar>(&mut tree);
    tree.pre_order()
        .into_iter()
        .map(|id| tree.display_label(id))
        .collect()
}

fn kinds(tree: &AstTree<PhpKind>) -> Vec<PhpKind> {
    tree.pre_order().into_iter().filter_map(|id| tree.kind(id)).collect()
}

#[test]
fn test_grammar_name() {
    assert_eq!(PhpImporter::new().grammar_name(), "ast");
}

#[test]
fn test_empty_file() {
    let tree = import("<?php\n");
    assert_eq!(tree.node_count(), 1);
    assert_eq!(tree.kind(tree.root()), Some(PhpKind::Program));
}

#[test]
fn test_expression_statement_is_wrapped() {
    let tree = import("<?php $x = 1;");
    assert_eq!(
        kinds(&tree),
        vec![
            PhpKind::Program,
            PhpKind::ExpressionStatement,
            PhpKind::Assign,
            PhpKind::Variable,
            PhpKind::Integer,
        ]
    );
}

#[test]
fn test_assignment_labels() {
    assert_eq!(
        decorated_labels("<?php $x = 1;"),
        vec!["program", "Assign to $x", "Integer 1"]
    );
}

#[test]
fn test_namespace_class_method() {
    let source = r#"<?php
namespace App {
    class Foo {
        function bar() {
            1 + 2;
        }
    }
}
"#;
    let tree = import(source);
    assert!(kinds(&tree).contains(&PhpKind::BinaryOp(BinaryOperator::Plus)));

    assert_eq!(
        decorated_labels(source),
        vec![
            "program",
            "Namespace App",
            "Class Foo",
            "Method bar()",
            "addition",
            "Integer 1",
            "Integer 2",
        ]
    );
}

#[test]
fn test_class_extends() {
    let labels = decorated_labels("<?php class Foo extends Bar implements Countable {}");
    assert_eq!(labels, vec!["program", "Class Foo extends Bar"]);
}

#[test]
fn test_function_call_with_argument() {
    let labels = decorated_labels("<?php strlen($s);");
    assert_eq!(labels, vec!["program", "strlen()", "With argument", "$s"]);
}

#[test]
fn test_if_else() {
    let labels = decorated_labels("<?php if ($ok) { echo 1; } else { echo 2; }");
    assert_eq!(labels[1], "If | Then | Else");
    assert!(labels.contains(&"Else".to_string()));
    assert!(labels.contains(&"Integer 2".to_string()));
}

#[test]
fn test_if_without_else() {
    let labels = decorated_labels("<?php if ($ok) { echo 1; }");
    assert_eq!(labels[1], "If | Then");
}

#[test]
fn test_use_statement_is_filtered() {
    let source = "<?php use App\\Models\\User; echo 1;";
    assert!(kinds(&import(source)).contains(&PhpKind::Use));

    let mut tree = import(source);
    decorate::<PhpGrammar>(&mut tree);
    let remaining = kinds(&tree);
    assert!(!remaining.contains(&PhpKind::Use));
    assert!(!remaining.contains(&PhpKind::UseItem));
    assert!(remaining.contains(&PhpKind::Echo));
}

#[test]
fn test_no_name_nodes_survive_decoration() {
    let source = r#"<?php
namespace App;

use Psr\Log\LoggerInterface;

interface Shape extends Countable {}

final class Circle implements Shape {
    const PI = 3.14;
    private float $radius = 1.0;

    public function area(): float {
        return self::PI * $this->radius ** 2;
    }
}

function describe(Shape $s): string {
    return get_class($s) . " shape";
}
"#;
    let mut tree = import(source);
    decorate::<PhpGrammar>(&mut tree);

    let remaining = kinds(&tree);
    assert!(!remaining.contains(&PhpKind::Name));
    assert!(!remaining.contains(&PhpKind::ExpressionStatement));
    assert!(!remaining.contains(&PhpKind::Parenthesized));
}

#[test]
fn test_syntax_errors_still_import() {
    let tree = import("<?php $x = ;");
    assert_eq!(tree.kind(tree.root()), Some(PhpKind::Program));
}

#[test]
fn test_inline_html() {
    let labels = decorated_labels("<h1>Title</h1>\n<?php echo 1;");
    assert_eq!(labels[1], "Inline HTML");
}

#[test]
fn test_by_reference_params_and_captures() {
    let source = "<?php
function push(array &$items, $item) {
    return function () use (&$items, $item) {};
}";
    let labels = decorated_labels(source);

    assert!(labels.contains(&"Parameter array &$items".to_string()));
    assert!(labels.contains(&"Parameter $item".to_string()));
    assert!(labels.contains(&"Closure &$items".to_string()));
    assert!(labels.contains(&"Closure $item".to_string()));
}
