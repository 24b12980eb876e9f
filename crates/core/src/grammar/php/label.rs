//! Label synthesis for abstract PHP nodes
//!
//! Runs in post-order, so every child already carries its own label when
//! its parent's rule reads it. Children are addressed by the positions
//! documented on [`PhpKind`]; optional positions are resolved from the
//! `SourceFields` flags, never by inspecting what happens to remain.

use super::kind::PhpKind;
use crate::grammar::Fold;
use crate::tree::{AstTree, NodeId, SourceFields};

/// Label `id` according to its kind and consume the children folded in
///
/// Kinds without a rule are left unlabeled.
pub fn apply_label(tree: &mut AstTree<PhpKind>, id: NodeId) {
    let Some(source) = tree.source(id) else {
        return;
    };
    let kind = source.kind;
    let fields = source.fields.clone();

    let mut fold = Fold::new(tree, id);
    let label = synthesize(kind, &fields, &mut fold);
    fold.finish(label);
}

fn synthesize(kind: PhpKind, fields: &SourceFields, f: &mut Fold<'_, PhpKind>) -> Option<String> {
    let label = match kind {
        PhpKind::Namespace => {
            if fields.has_name {
                format!("Namespace {}", f.take(0))
            } else {
                "Namespace".to_string()
            }
        }
        PhpKind::Use => "Use".to_string(),
        PhpKind::UseItem => match &fields.alias {
            Some(alias) => format!("{} as {}", fields.name_or_empty(), alias),
            None => fields.name_or_empty().to_string(),
        },
        PhpKind::Class => {
            let name = f.take(0);
            if fields.has_extends {
                format!("Class {} extends {}", name, f.take(1))
            } else {
                format!("Class {}", name)
            }
        }
        PhpKind::Interface => format!("Interface {}", f.take(0)),
        PhpKind::Trait => format!("Trait {}", f.take(0)),
        PhpKind::Enum => format!("Enum {}", f.take(0)),
        PhpKind::EnumCase => format!("Case {}", f.take(0)),
        PhpKind::TraitUse => {
            let names: Vec<String> = (0..f.degree()).map(|i| f.take(i)).collect();
            format!("Use trait {}", names.join(", "))
        }
        PhpKind::ClassMethod => {
            let name = f.take(0);
            format!("Method {}(){}", name, return_suffix(fields, f))
        }
        PhpKind::Function => {
            let name = f.take(0);
            format!("Definition of {}(){}", name, return_suffix(fields, f))
        }
        PhpKind::Param => {
            let mut parts = Vec::new();
            let mut next = 0;
            if fields.has_type {
                parts.push(f.take(next));
                next += 1;
            }
            let variable = f.take(next);
            next += 1;
            let spread = if fields.variadic { "..." } else { "" };
            parts.push(format!("{}{}{}", reference(fields), spread, variable));
            if fields.has_default {
                parts.push(format!("= {}", f.take(next).to_lowercase()));
            }
            format!("Parameter {}", parts.join(" "))
        }
        PhpKind::Property => {
            if fields.has_type {
                let ty = f.take(0);
                format!("Property {} {}", ty, f.take(1))
            } else {
                format!("Property {}", f.take(0))
            }
        }
        PhpKind::PropertyItem => {
            let variable = f.take(0);
            if fields.has_default {
                format!("{} = {}", variable, f.take(1))
            } else {
                variable
            }
        }
        PhpKind::ClassConst | PhpKind::Const => {
            let value = f.peek_nested(0, 0);
            format!("Constant {} = {}", f.take(0), value)
        }
        PhpKind::ConstElement => f.take(0),
        PhpKind::Name | PhpKind::Type => fields.name_or_empty().to_string(),
        PhpKind::Variable => format!("${}", fields.name_or_empty()),
        PhpKind::ConstFetch => f.take(0),
        PhpKind::MagicConst => fields.value_or_empty().to_string(),
        PhpKind::Integer => format!("Integer {}", fields.value_or_empty()),
        PhpKind::Float => format!("Decimal {}", fields.value_or_empty()),
        PhpKind::StringLiteral => format!("'{}'", fields.value_or_empty()),
        PhpKind::InterpolatedString => "String".to_string(),
        PhpKind::StringPart => fields.value_or_empty().to_string(),
        PhpKind::If => {
            if fields.has_else {
                "If | Then | Else".to_string()
            } else {
                "If | Then".to_string()
            }
        }
        PhpKind::ElseIf => "Elseif".to_string(),
        PhpKind::Else => "Else".to_string(),
        PhpKind::Foreach => {
            let subject = f.take(0);
            if fields.has_key {
                let key = f.take(1);
                format!("Foreach {} as {} => {}", subject, key, f.take(2))
            } else {
                format!("Foreach {} as {}", subject, f.take(1))
            }
        }
        PhpKind::While => "While".to_string(),
        PhpKind::DoWhile => "Do | While".to_string(),
        PhpKind::For => "For".to_string(),
        PhpKind::Switch => "Switch | Case".to_string(),
        PhpKind::Case => format!("Case {}", f.take(0)),
        PhpKind::Default => "Default".to_string(),
        PhpKind::TryCatch => {
            if fields.has_finally {
                "Try | Catch | Finally".to_string()
            } else {
                "Try | Catch".to_string()
            }
        }
        PhpKind::Catch => {
            let ty = f.take(0);
            if fields.has_var {
                format!("Catch type {} in {}", ty, f.take(1))
            } else {
                format!("Catch type {}", ty)
            }
        }
        PhpKind::Finally => "Finally".to_string(),
        PhpKind::Return => "Return".to_string(),
        PhpKind::Break => "Break".to_string(),
        PhpKind::Continue => "Continue".to_string(),
        PhpKind::Echo | PhpKind::Print => "Print".to_string(),
        PhpKind::Unset => "Unset".to_string(),
        PhpKind::Throw => "Throw".to_string(),
        PhpKind::Nop => "No operation".to_string(),
        PhpKind::Declare => "Declare".to_string(),
        PhpKind::DeclareItem => format!(
            "Key {}, Value {}",
            fields.name_or_empty(),
            fields.value_or_empty()
        ),
        PhpKind::Global => "Global".to_string(),
        PhpKind::StaticVar => "Static".to_string(),
        PhpKind::InlineHtml => "Inline HTML".to_string(),
        PhpKind::BinaryOp(op) => op.describe().to_string(),
        PhpKind::Instanceof => {
            let subject = f.take(0);
            format!("{} is an instance of {}", subject, f.take(1))
        }
        PhpKind::UnaryOp(op) => op.describe().to_string(),
        PhpKind::IncDec(op) => op.format(&f.take(0)),
        PhpKind::Assign => format!("Assign to {}", f.take(0)),
        PhpKind::AssignOp(op) => format!("{} {} with", op.verb(), f.take(0)),
        PhpKind::Cast(cast) => format!("Cast as {} {}", cast.describe(), f.take(0)),
        PhpKind::FuncCall => format!("{}()", f.take(0)),
        PhpKind::MethodCall => {
            let object = f.take(0);
            format!("{}->{}()", object, f.take(1))
        }
        PhpKind::StaticCall => {
            let scope = f.take(0);
            format!("Static call {}::{}()", scope, f.take(1))
        }
        PhpKind::New => {
            if fields.has_name {
                format!("New {}", f.take(0))
            } else {
                "New".to_string()
            }
        }
        PhpKind::PropertyFetch => {
            let object = f.take(0);
            format!("{}->{}", object, f.take(1))
        }
        PhpKind::StaticPropertyFetch | PhpKind::ClassConstFetch => {
            let scope = f.take(0);
            format!("{}::{}", scope, f.take(1))
        }
        PhpKind::Arg => {
            if fields.has_name {
                format!("With argument {}", f.take(0))
            } else {
                "With argument".to_string()
            }
        }
        PhpKind::Isset => format!("Is {} set ?", f.take(0)),
        PhpKind::Empty => format!("Is {} empty ?", f.take(0)),
        PhpKind::Array => {
            if f.degree() == 0 {
                "Empty array".to_string()
            } else {
                "Array of".to_string()
            }
        }
        PhpKind::ArrayItem => {
            if fields.has_key {
                "Key | Value".to_string()
            } else {
                "Value".to_string()
            }
        }
        PhpKind::ArrayDimFetch => {
            let variable = f.take(0);
            let dim = if fields.has_dim {
                f.take(1)
            } else {
                String::new()
            };
            format!("{}[{}]", variable, dim)
        }
        PhpKind::Closure => "Closure".to_string(),
        PhpKind::ClosureUse => format!("Closure {}{}", reference(fields), f.take(0)),
        PhpKind::ArrowFunction => "Arrow function".to_string(),
        PhpKind::Ternary => "Ternary".to_string(),
        PhpKind::Clone => "Clone of".to_string(),
        PhpKind::Yield => "Yield".to_string(),
        PhpKind::YieldFrom => "Yield from".to_string(),
        PhpKind::Include(include) => include.describe().to_string(),
        PhpKind::Match => "Match".to_string(),
        PhpKind::Program
        | PhpKind::ExpressionStatement
        | PhpKind::Parenthesized
        | PhpKind::Other => return None,
    };

    Some(label)
}

/// `: T` when the declaration has a return type at position 1
fn reference(fields: &SourceFields) -> &'static str {
    if fields.by_ref {
        "&"
    } else {
        ""
    }
}

fn return_suffix(fields: &SourceFields, f: &mut Fold<'_, PhpKind>) -> String {
    if fields.has_return_type {
        format!(": {}", f.take(1))
    } else {
        String::new()
    }
}
