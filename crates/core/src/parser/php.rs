//! PHP importer: lowers the Tree-sitter concrete tree into abstract kinds
//!
//! Lowering drops tokens, comments and modifiers, splices block-like
//! containers into their parent, and records optional parts as flags in
//! [`SourceFields`]. Every abstract node gets its children in the order
//! documented on [`PhpKind`]; required positions that the source lacks
//! (recovered syntax errors) are filled with a `missing` placeholder so
//! the order never shifts.

use super::{find_child_by_kind, named_children, node_text, parse_php, ParseError, SyntaxImporter};
use crate::grammar::php::{
    AssignOperator, BinaryOperator, CastType, IncDecOperator, IncludeKind, PhpKind, UnaryOperator,
};
use crate::tree::{attr, AstTree, NodeId, SourceFields, SourceNode};
use tree_sitter::Node as TsNode;

/// Containers whose children belong directly to the enclosing construct
const TRANSPARENT_KINDS: &[&str] = &[
    "compound_statement",
    "declaration_list",
    "enum_declaration_list",
    "switch_block",
    "colon_block",
    "formal_parameters",
    "arguments",
    "by_ref",
    "sequence_expression",
    "text_interpolation",
];

/// Syntax with no place in the abstract tree
const SKIPPED_KINDS: &[&str] = &[
    "comment",
    "php_tag",
    "attribute_list",
    "visibility_modifier",
    "static_modifier",
    "abstract_modifier",
    "final_modifier",
    "readonly_modifier",
    "reference_modifier",
    "var_modifier",
];

const TYPE_KINDS: &[&str] = &[
    "primitive_type",
    "named_type",
    "optional_type",
    "union_type",
    "intersection_type",
    "disjunctive_normal_form_type",
    "bottom_type",
    "type_list",
];

const NAME_KINDS: &[&str] = &["name", "qualified_name", "namespace_name", "relative_scope"];

const MAGIC_CONSTANTS: &[&str] = &[
    "__CLASS__",
    "__DIR__",
    "__FILE__",
    "__FUNCTION__",
    "__LINE__",
    "__METHOD__",
    "__NAMESPACE__",
    "__PROPERTY__",
    "__TRAIT__",
];

/// Importer for the `ast` grammar
#[derive(Debug, Default)]
pub struct PhpImporter;

impl PhpImporter {
    pub fn new() -> Self {
        Self
    }
}

impl SyntaxImporter for PhpImporter {
    type Kind = PhpKind;

    fn grammar_name(&self) -> &str {
        "ast"
    }

    fn import_source(&self, source: &str) -> Result<AstTree<PhpKind>, ParseError> {
        let parsed = parse_php(source)?;
        let mut lowering = Lowering {
            source,
            tree: AstTree::new(SourceNode::new(PhpKind::Program)),
        };

        let root = lowering.tree.root();
        lowering.lower_children(&parsed.root_node(), root);

        Ok(lowering.tree)
    }
}

struct Lowering<'s> {
    source: &'s str,
    tree: AstTree<PhpKind>,
}

impl<'s> Lowering<'s> {
    fn text(&self, node: &TsNode) -> &'s str {
        node_text(node, self.source)
    }

    fn push(&mut self, parent: NodeId, kind: PhpKind, fields: SourceFields) -> NodeId {
        self.tree
            .add_child(parent, SourceNode::with_fields(kind, fields))
    }

    fn push_other(&mut self, parent: NodeId, parser_kind: &str) -> NodeId {
        let id = self.push(parent, PhpKind::Other, SourceFields::default());
        self.tree.set_attribute(id, attr::KIND, parser_kind);
        id
    }

    /// Push `kind` and lower every named child of `node` below it
    fn branch(
        &mut self,
        node: &TsNode,
        parent: NodeId,
        kind: PhpKind,
        fields: SourceFields,
    ) -> NodeId {
        let id = self.push(parent, kind, fields);
        self.lower_children(node, id);
        id
    }

    fn lower_children(&mut self, node: &TsNode, parent: NodeId) {
        for child in named_children(node) {
            self.lower(&child, parent);
        }
    }

    /// Lower a required child, or a placeholder when the source lacks it
    fn lower_required(&mut self, node: Option<TsNode>, parent: NodeId) {
        match node {
            Some(node) => self.lower(&node, parent),
            None => {
                self.push_other(parent, "missing");
            }
        }
    }

    fn leaf_name(&mut self, parent: NodeId, node: Option<TsNode>) {
        let name = node.map(|n| self.text(&n)).unwrap_or_default();
        self.push(parent, PhpKind::Name, SourceFields::named(name));
    }

    fn leaf_type(&mut self, parent: NodeId, node: &TsNode) {
        let text = self.text(node).trim_start_matches(':').trim();
        self.push(parent, PhpKind::Type, SourceFields::named(text));
    }

    fn leaf_variable(&mut self, parent: NodeId, node: Option<TsNode>) {
        match node {
            Some(node) if node.kind() == "variable_name" => {
                let text = self.text(&node);
                let name = text.strip_prefix('$').unwrap_or(text);
                self.push(parent, PhpKind::Variable, SourceFields::named(name));
            }
            other => self.lower_required(other, parent),
        }
    }

    /// Names in a role (class names, scopes, member names) stay bare names
    fn name_or_expression(&mut self, parent: NodeId, node: Option<TsNode>) {
        match node {
            Some(node) if NAME_KINDS.contains(&node.kind()) => self.leaf_name(parent, Some(node)),
            other => self.lower_required(other, parent),
        }
    }

    fn lower(&mut self, node: &TsNode, parent: NodeId) {
        let kind = node.kind();

        if SKIPPED_KINDS.contains(&kind) {
            return;
        }
        if TRANSPARENT_KINDS.contains(&kind) {
            self.lower_children(node, parent);
            return;
        }
        if TYPE_KINDS.contains(&kind) {
            self.leaf_type(parent, node);
            return;
        }

        match kind {
            "text" => {
                let html = self.text(node);
                self.push(parent, PhpKind::InlineHtml, SourceFields::valued(html));
            }
            "expression_statement" => {
                self.branch(node, parent, PhpKind::ExpressionStatement, SourceFields::default());
            }
            "parenthesized_expression" => {
                self.branch(node, parent, PhpKind::Parenthesized, SourceFields::default());
            }
            "namespace_definition" => self.lower_namespace(node, parent),
            "namespace_use_declaration" => self.lower_use(node, parent),
            "class_declaration" => self.lower_class_like(node, parent, PhpKind::Class),
            "interface_declaration" => self.lower_class_like(node, parent, PhpKind::Interface),
            "trait_declaration" => self.lower_class_like(node, parent, PhpKind::Trait),
            "enum_declaration" => self.lower_class_like(node, parent, PhpKind::Enum),
            "enum_case" => self.lower_enum_case(node, parent),
            "use_declaration" => self.lower_trait_use(node, parent),
            "method_declaration" => self.lower_callable(node, parent, PhpKind::ClassMethod),
            "function_definition" => self.lower_callable(node, parent, PhpKind::Function),
            "simple_parameter" | "variadic_parameter" | "property_promotion_parameter" => {
                self.lower_param(node, parent)
            }
            "property_declaration" => self.lower_property(node, parent),
            "property_element" => self.lower_property_element(node, parent),
            "const_declaration" => self.lower_const(node, parent),
            "const_element" => self.lower_const_element(node, parent),
            "if_statement" => {
                let fields = SourceFields {
                    has_else: find_child_by_kind(node, &["else_clause"]).is_some(),
                    ..SourceFields::default()
                };
                self.branch(node, parent, PhpKind::If, fields);
            }
            "else_if_clause" => {
                self.branch(node, parent, PhpKind::ElseIf, SourceFields::default());
            }
            "else_clause" => {
                self.branch(node, parent, PhpKind::Else, SourceFields::default());
            }
            "foreach_statement" => self.lower_foreach(node, parent),
            "while_statement" => {
                self.branch(node, parent, PhpKind::While, SourceFields::default());
            }
            "do_statement" => {
                self.branch(node, parent, PhpKind::DoWhile, SourceFields::default());
            }
            "for_statement" => {
                self.branch(node, parent, PhpKind::For, SourceFields::default());
            }
            "switch_statement" => {
                self.branch(node, parent, PhpKind::Switch, SourceFields::default());
            }
            "case_statement" => self.lower_case(node, parent),
            "default_statement" => {
                self.branch(node, parent, PhpKind::Default, SourceFields::default());
            }
            "try_statement" => {
                let fields = SourceFields {
                    has_finally: find_child_by_kind(node, &["finally_clause"]).is_some(),
                    ..SourceFields::default()
                };
                self.branch(node, parent, PhpKind::TryCatch, fields);
            }
            "catch_clause" => self.lower_catch(node, parent),
            "finally_clause" => {
                self.branch(node, parent, PhpKind::Finally, SourceFields::default());
            }
            "return_statement" => {
                self.branch(node, parent, PhpKind::Return, SourceFields::default());
            }
            "break_statement" => {
                self.branch(node, parent, PhpKind::Break, SourceFields::default());
            }
            "continue_statement" => {
                self.branch(node, parent, PhpKind::Continue, SourceFields::default());
            }
            "echo_statement" => {
                self.branch(node, parent, PhpKind::Echo, SourceFields::default());
            }
            "print_intrinsic" => {
                self.branch(node, parent, PhpKind::Print, SourceFields::default());
            }
            "unset_statement" => {
                self.branch(node, parent, PhpKind::Unset, SourceFields::default());
            }
            "throw_expression" | "throw_statement" => {
                self.branch(node, parent, PhpKind::Throw, SourceFields::default());
            }
            "empty_statement" => {
                self.push(parent, PhpKind::Nop, SourceFields::default());
            }
            "global_declaration" => {
                self.branch(node, parent, PhpKind::Global, SourceFields::default());
            }
            "function_static_declaration" => {
                self.branch(node, parent, PhpKind::StaticVar, SourceFields::default());
            }
            "declare_statement" => self.lower_declare(node, parent),
            "assignment_expression" | "reference_assignment_expression" => {
                self.lower_assignment(node, parent, PhpKind::Assign)
            }
            "augmented_assignment_expression" => {
                let kind = AssignOperator::from_token(self.operator(node))
                    .map(PhpKind::AssignOp)
                    .unwrap_or(PhpKind::Other);
                self.lower_assignment(node, parent, kind);
            }
            "binary_expression" => self.lower_binary(node, parent),
            "unary_op_expression" => {
                let kind = UnaryOperator::from_token(self.operator(node))
                    .map(PhpKind::UnaryOp)
                    .unwrap_or(PhpKind::Other);
                self.branch(node, parent, kind, SourceFields::default());
            }
            "update_expression" => self.lower_update(node, parent),
            "cast_expression" => self.lower_cast(node, parent),
            "function_call_expression" => self.lower_function_call(node, parent),
            "argument" => self.lower_argument(node, parent),
            "member_call_expression" | "nullsafe_member_call_expression" => {
                let id = self.push(parent, PhpKind::MethodCall, SourceFields::default());
                self.lower_required(node.child_by_field_name("object"), id);
                self.name_or_expression(id, node.child_by_field_name("name"));
                if let Some(arguments) = node.child_by_field_name("arguments") {
                    self.lower(&arguments, id);
                }
            }
            "scoped_call_expression" => {
                let id = self.push(parent, PhpKind::StaticCall, SourceFields::default());
                self.name_or_expression(id, node.child_by_field_name("scope"));
                self.name_or_expression(id, node.child_by_field_name("name"));
                if let Some(arguments) = node.child_by_field_name("arguments") {
                    self.lower(&arguments, id);
                }
            }
            "member_access_expression" | "nullsafe_member_access_expression" => {
                let id = self.push(parent, PhpKind::PropertyFetch, SourceFields::default());
                self.lower_required(node.child_by_field_name("object"), id);
                self.name_or_expression(id, node.child_by_field_name("name"));
            }
            "scoped_property_access_expression" => {
                let id = self.push(parent, PhpKind::StaticPropertyFetch, SourceFields::default());
                self.name_or_expression(id, node.child_by_field_name("scope"));
                self.leaf_variable(id, node.child_by_field_name("name"));
            }
            "class_constant_access_expression" => {
                let children = named_children(node);
                let id = self.push(parent, PhpKind::ClassConstFetch, SourceFields::default());
                self.name_or_expression(id, children.first().copied());
                self.leaf_name(id, children.get(1).copied());
            }
            "object_creation_expression" => self.lower_new(node, parent),
            "variable_name" | "dynamic_variable_name" => {
                let text = self.text(node);
                let name = text.strip_prefix('$').unwrap_or(text);
                self.push(parent, PhpKind::Variable, SourceFields::named(name));
            }
            "name" | "qualified_name" | "boolean" | "null" => self.lower_constant(node, parent),
            "integer" => {
                let value = self.text(node);
                self.push(parent, PhpKind::Integer, SourceFields::valued(value));
            }
            "float" => {
                let value = self.text(node);
                self.push(parent, PhpKind::Float, SourceFields::valued(value));
            }
            "string" => {
                let value = strip_quotes(self.text(node));
                self.push(parent, PhpKind::StringLiteral, SourceFields::valued(value));
            }
            "encapsed_string" => self.lower_encapsed(node, parent),
            "heredoc" | "nowdoc" => {
                let body = find_child_by_kind(node, &["heredoc_body", "nowdoc_body"])
                    .map(|b| self.text(&b))
                    .unwrap_or_else(|| self.text(node));
                self.push(parent, PhpKind::StringLiteral, SourceFields::valued(body.trim()));
            }
            "array_creation_expression" => {
                self.branch(node, parent, PhpKind::Array, SourceFields::default());
            }
            "array_element_initializer" => {
                let fields = SourceFields {
                    has_key: named_children(node).len() >= 2,
                    ..SourceFields::default()
                };
                self.branch(node, parent, PhpKind::ArrayItem, fields);
            }
            "subscript_expression" => {
                let fields = SourceFields {
                    has_dim: named_children(node).len() >= 2,
                    ..SourceFields::default()
                };
                self.branch(node, parent, PhpKind::ArrayDimFetch, fields);
            }
            "conditional_expression" => {
                self.branch(node, parent, PhpKind::Ternary, SourceFields::default());
            }
            "clone_expression" => {
                self.branch(node, parent, PhpKind::Clone, SourceFields::default());
            }
            "yield_expression" => {
                let kind = if is_yield_from(self.text(node)) {
                    PhpKind::YieldFrom
                } else {
                    PhpKind::Yield
                };
                self.branch(node, parent, kind, SourceFields::default());
            }
            "include_expression" => self.lower_include(node, parent, IncludeKind::Include),
            "include_once_expression" => {
                self.lower_include(node, parent, IncludeKind::IncludeOnce)
            }
            "require_expression" => self.lower_include(node, parent, IncludeKind::Require),
            "require_once_expression" => {
                self.lower_include(node, parent, IncludeKind::RequireOnce)
            }
            "anonymous_function" | "anonymous_function_creation_expression" => {
                self.lower_function_like(node, parent, PhpKind::Closure)
            }
            "arrow_function" => self.lower_function_like(node, parent, PhpKind::ArrowFunction),
            "anonymous_function_use_clause" => {
                for capture in named_children(node) {
                    let by_ref = capture.kind() == "by_ref";
                    let fields = SourceFields {
                        by_ref,
                        ..SourceFields::default()
                    };
                    let id = self.push(parent, PhpKind::ClosureUse, fields);
                    if by_ref {
                        let variable = find_child_by_kind(&capture, &["variable_name"]);
                        self.leaf_variable(id, variable);
                    } else {
                        self.lower(&capture, id);
                    }
                }
            }
            "match_expression" => {
                self.branch(node, parent, PhpKind::Match, SourceFields::default());
            }
            _ => {
                let id = self.push_other(parent, kind);
                self.lower_children(node, id);
            }
        }
    }

    /// Operator token: the `operator` field, or the first anonymous child
    fn operator(&self, node: &TsNode) -> &'s str {
        if let Some(op) = node.child_by_field_name("operator") {
            return self.text(&op);
        }
        let mut cursor = node.walk();
        let token = node.children(&mut cursor).find(|c| !c.is_named());
        token.map(|t| self.text(&t)).unwrap_or_default()
    }

    fn lower_namespace(&mut self, node: &TsNode, parent: NodeId) {
        let name = node.child_by_field_name("name");
        let fields = SourceFields {
            has_name: name.is_some(),
            ..SourceFields::default()
        };
        let id = self.push(parent, PhpKind::Namespace, fields);

        if name.is_some() {
            self.leaf_name(id, name);
        }
        for child in named_children(node) {
            if Some(child) != name {
                self.lower(&child, id);
            }
        }
    }

    fn lower_use(&mut self, node: &TsNode, parent: NodeId) {
        // `use A\B, C as D;` or the grouped `use A\{B, C as D};`
        let id = self.push(parent, PhpKind::Use, SourceFields::default());
        let prefix = find_child_by_kind(node, &["namespace_name"]).map(|n| self.text(&n));

        for child in named_children(node) {
            match child.kind() {
                "namespace_use_clause" => self.push_use_item(id, &child, None),
                "namespace_use_group" => {
                    for clause in named_children(&child) {
                        if matches!(
                            clause.kind(),
                            "namespace_use_clause" | "namespace_use_group_clause"
                        ) {
                            self.push_use_item(id, &clause, prefix);
                        }
                    }
                }
                _ => {}
            }
        }
    }

    fn push_use_item(&mut self, parent: NodeId, clause: &TsNode, prefix: Option<&str>) {
        let path = find_child_by_kind(clause, &["qualified_name", "namespace_name", "name"])
            .map(|n| self.text(&n))
            .unwrap_or_default()
            .trim_start_matches('\\');

        let alias = clause
            .child_by_field_name("alias")
            .or_else(|| {
                find_child_by_kind(clause, &["namespace_aliasing_clause"])
                    .and_then(|ac| find_child_by_kind(&ac, &["name"]))
            })
            .map(|n| self.text(&n).to_string());

        let full_path = match prefix {
            Some(p) if !p.is_empty() => format!("{}\\{}", p.trim_start_matches('\\'), path),
            _ => path.to_string(),
        };

        let fields = SourceFields {
            name: Some(full_path),
            alias,
            ..SourceFields::default()
        };
        self.push(parent, PhpKind::UseItem, fields);
    }

    fn lower_class_like(&mut self, node: &TsNode, parent: NodeId, kind: PhpKind) {
        let base_names = find_child_by_kind(node, &["base_clause"])
            .map(|clause| self.role_names(&clause))
            .unwrap_or_default();
        let interface_names = find_child_by_kind(node, &["class_interface_clause"])
            .map(|clause| self.role_names(&clause))
            .unwrap_or_default();

        let fields = SourceFields {
            has_extends: kind == PhpKind::Class && !base_names.is_empty(),
            ..SourceFields::default()
        };
        let id = self.push(parent, kind, fields);

        self.leaf_name(id, node.child_by_field_name("name"));
        for name in base_names.into_iter().chain(interface_names) {
            self.leaf_name(id, Some(name));
        }

        let body = node
            .child_by_field_name("body")
            .or_else(|| find_child_by_kind(node, &["declaration_list", "enum_declaration_list"]));
        if let Some(body) = body {
            self.lower(&body, id);
        }
    }

    fn role_names<'t>(&self, clause: &TsNode<'t>) -> Vec<TsNode<'t>> {
        named_children(clause)
            .into_iter()
            .filter(|c| NAME_KINDS.contains(&c.kind()))
            .collect()
    }

    fn lower_enum_case(&mut self, node: &TsNode, parent: NodeId) {
        let id = self.push(parent, PhpKind::EnumCase, SourceFields::default());
        let name = node
            .child_by_field_name("name")
            .or_else(|| find_child_by_kind(node, &["name"]));
        self.leaf_name(id, name);
        if let Some(value) = node.child_by_field_name("value") {
            self.lower(&value, id);
        }
    }

    fn lower_trait_use(&mut self, node: &TsNode, parent: NodeId) {
        let id = self.push(parent, PhpKind::TraitUse, SourceFields::default());
        for name in self.role_names(node) {
            self.leaf_name(id, Some(name));
        }
    }

    fn lower_callable(&mut self, node: &TsNode, parent: NodeId, kind: PhpKind) {
        let return_type = node.child_by_field_name("return_type");
        let fields = SourceFields {
            has_return_type: return_type.is_some(),
            ..SourceFields::default()
        };
        let id = self.push(parent, kind, fields);

        self.leaf_name(id, node.child_by_field_name("name"));
        if let Some(return_type) = return_type {
            self.leaf_type(id, &return_type);
        }
        if let Some(parameters) = node.child_by_field_name("parameters") {
            self.lower(&parameters, id);
        }
        if let Some(body) = node.child_by_field_name("body") {
            self.lower(&body, id);
        }
    }

    /// Closures and arrow functions: everything but the return type
    fn lower_function_like(&mut self, node: &TsNode, parent: NodeId, kind: PhpKind) {
        let return_type = node.child_by_field_name("return_type");
        let id = self.push(parent, kind, SourceFields::default());
        for child in named_children(node) {
            if Some(child) != return_type {
                self.lower(&child, id);
            }
        }
    }

    fn lower_param(&mut self, node: &TsNode, parent: NodeId) {
        let ty = node.child_by_field_name("type");
        let default = node.child_by_field_name("default_value");
        let fields = SourceFields {
            has_type: ty.is_some(),
            has_default: default.is_some(),
            variadic: node.kind() == "variadic_parameter",
            by_ref: find_child_by_kind(node, &["reference_modifier"]).is_some(),
            ..SourceFields::default()
        };
        let id = self.push(parent, PhpKind::Param, fields);

        if let Some(ty) = ty {
            self.leaf_type(id, &ty);
        }
        self.leaf_variable(id, node.child_by_field_name("name"));
        if let Some(default) = default {
            self.lower(&default, id);
        }
    }

    fn lower_property(&mut self, node: &TsNode, parent: NodeId) {
        let children = named_children(node);
        let ty = node.child_by_field_name("type").or_else(|| {
            children
                .iter()
                .take_while(|c| c.kind() != "property_element")
                .find(|c| TYPE_KINDS.contains(&c.kind()))
                .copied()
        });
        let elements: Vec<TsNode> = children
            .into_iter()
            .filter(|c| c.kind() == "property_element")
            .collect();

        let fields = SourceFields {
            has_type: ty.is_some(),
            ..SourceFields::default()
        };
        let id = self.push(parent, PhpKind::Property, fields);

        if let Some(ty) = ty {
            self.leaf_type(id, &ty);
        }
        if elements.is_empty() {
            self.push_other(id, "missing");
        }
        for element in elements {
            self.lower(&element, id);
        }
    }

    fn lower_property_element(&mut self, node: &TsNode, parent: NodeId) {
        let name = node
            .child_by_field_name("name")
            .or_else(|| find_child_by_kind(node, &["variable_name"]));
        let default = node.child_by_field_name("default_value").or_else(|| {
            find_child_by_kind(node, &["property_initializer"])
                .and_then(|init| named_children(&init).into_iter().next())
        });

        let fields = SourceFields {
            has_default: default.is_some(),
            ..SourceFields::default()
        };
        let id = self.push(parent, PhpKind::PropertyItem, fields);

        self.leaf_variable(id, name);
        if let Some(default) = default {
            self.lower(&default, id);
        }
    }

    fn lower_const(&mut self, node: &TsNode, parent: NodeId) {
        let in_class = node
            .parent()
            .is_some_and(|p| matches!(p.kind(), "declaration_list" | "enum_declaration_list"));
        let kind = if in_class {
            PhpKind::ClassConst
        } else {
            PhpKind::Const
        };

        let elements: Vec<TsNode> = named_children(node)
            .into_iter()
            .filter(|c| c.kind() == "const_element")
            .collect();
        let id = self.push(parent, kind, SourceFields::default());
        if elements.is_empty() {
            self.push_other(id, "missing");
        }
        for element in elements {
            self.lower(&element, id);
        }
    }

    fn lower_const_element(&mut self, node: &TsNode, parent: NodeId) {
        let id = self.push(parent, PhpKind::ConstElement, SourceFields::default());
        let mut children = named_children(node).into_iter();

        self.leaf_name(id, children.next());
        self.lower_required(children.next(), id);
    }

    fn lower_foreach(&mut self, node: &TsNode, parent: NodeId) {
        let mut children = named_children(node).into_iter();
        let subject = children.next();
        let binding = children.next();
        let pair = binding.filter(|b| matches!(b.kind(), "pair" | "foreach_pair"));

        let fields = SourceFields {
            has_key: pair.is_some(),
            ..SourceFields::default()
        };
        let id = self.push(parent, PhpKind::Foreach, fields);

        self.lower_required(subject, id);
        match pair {
            Some(pair) => {
                let mut parts = named_children(&pair).into_iter();
                self.lower_required(parts.next(), id);
                self.lower_required(parts.next(), id);
            }
            None => self.lower_required(binding, id),
        }
        for statement in children {
            self.lower(&statement, id);
        }
    }

    fn lower_case(&mut self, node: &TsNode, parent: NodeId) {
        let value = node.child_by_field_name("value");
        let id = self.push(parent, PhpKind::Case, SourceFields::default());

        let value = value.or_else(|| named_children(node).into_iter().next());
        self.lower_required(value, id);
        for child in named_children(node) {
            if Some(child) != value {
                self.lower(&child, id);
            }
        }
    }

    fn lower_catch(&mut self, node: &TsNode, parent: NodeId) {
        let ty = node.child_by_field_name("type");
        let variable = node.child_by_field_name("name");
        let fields = SourceFields {
            has_var: variable.is_some(),
            ..SourceFields::default()
        };
        let id = self.push(parent, PhpKind::Catch, fields);

        match ty {
            Some(ty) => self.leaf_type(id, &ty),
            None => {
                self.push(id, PhpKind::Type, SourceFields::default());
            }
        }
        if variable.is_some() {
            self.leaf_variable(id, variable);
        }
        if let Some(body) = node.child_by_field_name("body") {
            self.lower(&body, id);
        }
    }

    fn lower_declare(&mut self, node: &TsNode, parent: NodeId) {
        let id = self.push(parent, PhpKind::Declare, SourceFields::default());
        for child in named_children(node) {
            if child.kind() == "declare_directive" {
                let text = self.text(&child);
                let (key, value) = text.split_once('=').unwrap_or((text, ""));
                let fields = SourceFields {
                    name: Some(key.trim().to_string()),
                    value: Some(value.trim().to_string()),
                    ..SourceFields::default()
                };
                self.push(id, PhpKind::DeclareItem, fields);
            } else {
                self.lower(&child, id);
            }
        }
    }

    fn lower_assignment(&mut self, node: &TsNode, parent: NodeId, kind: PhpKind) {
        let id = self.push(parent, kind, SourceFields::default());
        self.lower_required(node.child_by_field_name("left"), id);
        self.lower_required(node.child_by_field_name("right"), id);
    }

    fn lower_binary(&mut self, node: &TsNode, parent: NodeId) {
        let operator = self.operator(node);
        let left = node.child_by_field_name("left");
        let right = node.child_by_field_name("right");

        if operator.eq_ignore_ascii_case("instanceof") {
            let id = self.push(parent, PhpKind::Instanceof, SourceFields::default());
            self.lower_required(left, id);
            self.name_or_expression(id, right);
            return;
        }

        let kind = BinaryOperator::from_token(operator)
            .map(PhpKind::BinaryOp)
            .unwrap_or(PhpKind::Other);
        let id = self.push(parent, kind, SourceFields::default());
        self.lower_required(left, id);
        self.lower_required(right, id);
    }

    fn lower_update(&mut self, node: &TsNode, parent: NodeId) {
        let prefix = node.child(0).is_some_and(|c| !c.is_named());
        let kind = IncDecOperator::new(self.operator(node), prefix)
            .map(PhpKind::IncDec)
            .unwrap_or(PhpKind::Other);
        self.branch(node, parent, kind, SourceFields::default());
    }

    fn lower_cast(&mut self, node: &TsNode, parent: NodeId) {
        let cast_type = node
            .child_by_field_name("type")
            .or_else(|| find_child_by_kind(node, &["cast_type"]));
        let value = node
            .child_by_field_name("value")
            .or_else(|| named_children(node).into_iter().last());

        let kind = cast_type
            .and_then(|t| CastType::from_keyword(self.text(&t)))
            .map(PhpKind::Cast)
            .unwrap_or(PhpKind::Other);
        let id = self.push(parent, kind, SourceFields::default());
        self.lower_required(value, id);
    }

    fn lower_function_call(&mut self, node: &TsNode, parent: NodeId) {
        let callee = node.child_by_field_name("function");
        let arguments = node.child_by_field_name("arguments");
        let callee_name = callee
            .filter(|c| NAME_KINDS.contains(&c.kind()))
            .map(|c| self.text(&c).to_ascii_lowercase());

        let check = match callee_name.as_deref() {
            Some("isset") => Some(PhpKind::Isset),
            Some("empty") => Some(PhpKind::Empty),
            _ => None,
        };

        if let Some(kind) = check {
            // Checked expressions hang directly below the check.
            let id = self.push(parent, kind, SourceFields::default());
            let values: Vec<TsNode> = arguments
                .map(|a| named_children(&a))
                .unwrap_or_default()
                .iter()
                .flat_map(named_children)
                .collect();
            if values.is_empty() {
                self.push_other(id, "missing");
            }
            for value in values {
                self.lower(&value, id);
            }
            return;
        }

        let id = self.push(parent, PhpKind::FuncCall, SourceFields::default());
        self.name_or_expression(id, callee);
        if let Some(arguments) = arguments {
            self.lower(&arguments, id);
        }
    }

    fn lower_argument(&mut self, node: &TsNode, parent: NodeId) {
        let name = node.child_by_field_name("name");
        let fields = SourceFields {
            has_name: name.is_some(),
            ..SourceFields::default()
        };
        let id = self.push(parent, PhpKind::Arg, fields);

        if name.is_some() {
            self.leaf_name(id, name);
        }
        for child in named_children(node) {
            if Some(child) != name {
                self.lower(&child, id);
            }
        }
    }

    fn lower_new(&mut self, node: &TsNode, parent: NodeId) {
        let children = named_children(node);
        let class = children
            .first()
            .copied()
            .filter(|c| c.kind() != "arguments" && c.kind() != "anonymous_class");

        let fields = SourceFields {
            has_name: class.is_some(),
            ..SourceFields::default()
        };
        let id = self.push(parent, PhpKind::New, fields);

        for child in children {
            if Some(child) == class {
                self.name_or_expression(id, Some(child));
            } else {
                self.lower(&child, id);
            }
        }
    }

    fn lower_constant(&mut self, node: &TsNode, parent: NodeId) {
        let text = self.text(node);
        if MAGIC_CONSTANTS.contains(&text.to_ascii_uppercase().as_str()) {
            self.push(parent, PhpKind::MagicConst, SourceFields::valued(text));
            return;
        }

        let id = self.push(parent, PhpKind::ConstFetch, SourceFields::default());
        self.push(id, PhpKind::Name, SourceFields::named(text));
    }

    fn lower_encapsed(&mut self, node: &TsNode, parent: NodeId) {
        let children = named_children(node);
        let is_part = |c: &TsNode| {
            matches!(
                c.kind(),
                "string_content" | "string_value" | "escape_sequence"
            )
        };

        if children.iter().all(is_part) {
            let value = strip_quotes(self.text(node));
            self.push(parent, PhpKind::StringLiteral, SourceFields::valued(value));
            return;
        }

        let id = self.push(parent, PhpKind::InterpolatedString, SourceFields::default());
        for child in children {
            if is_part(&child) {
                let part = self.text(&child);
                self.push(id, PhpKind::StringPart, SourceFields::valued(part));
            } else {
                self.lower(&child, id);
            }
        }
    }

    fn lower_include(&mut self, node: &TsNode, parent: NodeId, include: IncludeKind) {
        self.branch(node, parent, PhpKind::Include(include), SourceFields::default());
    }
}

/// Contents of a quoted literal, tolerating a `b` prefix
fn strip_quotes(text: &str) -> &str {
    let text = text.strip_prefix(['b', 'B']).unwrap_or(text);
    let mut chars = text.chars();
    match (chars.next(), chars.next_back()) {
        (Some(open), Some(close)) if open == close && (open == '\'' || open == '"') => {
            &text[1..text.len() - 1]
        }
        _ => text,
    }
}

fn is_yield_from(text: &str) -> bool {
    let lowered = text.to_ascii_lowercase();
    let rest = lowered.strip_prefix("yield").unwrap_or_default().trim_start();
    rest.strip_prefix("from")
        .is_some_and(|after| !after.starts_with(|c: char| c.is_alphanumeric() || c == '_'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_quotes() {
        assert_eq!(strip_quotes("'hello'"), "hello");
        assert_eq!(strip_quotes("\"hi\""), "hi");
        assert_eq!(strip_quotes("b'raw'"), "raw");
        assert_eq!(strip_quotes("''"), "");
        assert_eq!(strip_quotes("bare"), "bare");
    }

    #[test]
    fn test_is_yield_from() {
        assert!(is_yield_from("yield from gen()"));
        assert!(is_yield_from("YIELD   FROM $g"));
        assert!(!is_yield_from("yield $x"));
        assert!(!is_yield_from("yield fromage()"));
    }
}
