//! Abstract PHP syntax kinds produced by the PHP importer

use crate::tree::SyntaxKind;

/// Kind of an abstract PHP syntax node
///
/// Each variant documents the child order the importer guarantees. `[c]`
/// marks children consumed by the label rule; `?` marks children present
/// only when the matching `SourceFields` flag is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhpKind {
    /// Root of a file: top-level statements
    Program,
    /// `[c]Name?` (has_name), statements
    Namespace,
    /// `UseItem*` leaves
    Use,
    /// Leaf: name = imported path, alias
    UseItem,
    /// `[c]Name`, `[c]Name?` (has_extends), implemented `Name*`, members
    Class,
    /// `[c]Name`, extended `Name*`, members
    Interface,
    /// `[c]Name`, members
    Trait,
    /// `[c]Name`, implemented `Name*`, cases and members
    Enum,
    /// `[c]Name`, value?
    EnumCase,
    /// `[c]Name+`
    TraitUse,
    /// `[c]Name`, `[c]Type?` (has_return_type), `Param*`, body statements
    ClassMethod,
    /// `[c]Name`, `[c]Type?` (has_return_type), `Param*`, body statements
    Function,
    /// `[c]Type?` (has_type), `[c]Variable`, `[c]default?` (has_default)
    Param,
    /// `[c]Type?` (has_type), `[c]PropertyItem`, further `PropertyItem*`
    Property,
    /// `[c]Variable`, `[c]default?` (has_default)
    PropertyItem,
    /// `[c]ConstElement`, further `ConstElement*`
    ClassConst,
    /// `[c]ConstElement`, further `ConstElement*`
    Const,
    /// `[c]Name`, value
    ConstElement,
    /// Leaf: name
    Name,
    /// Leaf: name = type as written
    Type,
    /// Leaf: name without `$`
    Variable,
    /// `[c]Name`
    ConstFetch,
    /// Leaf: value
    MagicConst,
    /// Leaf: value
    Integer,
    /// Leaf: value
    Float,
    /// Leaf: value without quotes
    StringLiteral,
    /// `StringPart` leaves and interpolated expressions
    InterpolatedString,
    /// Leaf: value
    StringPart,
    /// condition, statements, `ElseIf*`, `Else?` (has_else)
    If,
    /// condition, statements
    ElseIf,
    /// statements
    Else,
    /// `[c]expr`, `[c]key?` (has_key), `[c]value`, statements
    Foreach,
    While,
    DoWhile,
    For,
    /// condition, `Case`/`Default` children
    Switch,
    /// `[c]value`, statements
    Case,
    Default,
    /// statements, `Catch*`, `Finally?` (has_finally)
    TryCatch,
    /// `[c]Type`, `[c]Variable?` (has_var), statements
    Catch,
    Finally,
    Return,
    Break,
    Continue,
    Echo,
    Print,
    Unset,
    Throw,
    Nop,
    /// `DeclareItem*`, statements
    Declare,
    /// Leaf: name = directive, value
    DeclareItem,
    Global,
    StaticVar,
    InlineHtml,
    /// left, right
    BinaryOp(BinaryOperator),
    /// `[c]expr`, `[c]class`
    Instanceof,
    /// operand
    UnaryOp(UnaryOperator),
    /// `[c]variable`
    IncDec(IncDecOperator),
    /// `[c]target`, value
    Assign,
    /// `[c]target`, value
    AssignOp(AssignOperator),
    /// `[c]value`
    Cast(CastType),
    /// `[c]callee`, `Arg*`
    FuncCall,
    /// `[c]object`, `[c]Name`, `Arg*`
    MethodCall,
    /// `[c]scope`, `[c]Name`, `Arg*`
    StaticCall,
    /// `[c]class?` (has_name), `Arg*`
    New,
    /// `[c]object`, `[c]Name`
    PropertyFetch,
    /// `[c]scope`, `[c]Variable`
    StaticPropertyFetch,
    /// `[c]scope`, `[c]Name`
    ClassConstFetch,
    /// `[c]Name?` (has_name), value
    Arg,
    /// `[c]variable`, further variables
    Isset,
    /// `[c]expression`
    Empty,
    /// `ArrayItem*`
    Array,
    /// key? (has_key), value
    ArrayItem,
    /// `[c]variable`, `[c]dim?` (has_dim)
    ArrayDimFetch,
    /// `Param*`, `ClosureUse*`, statements
    Closure,
    /// `[c]Variable`
    ClosureUse,
    ArrowFunction,
    Ternary,
    Clone,
    Yield,
    YieldFrom,
    Include(IncludeKind),
    Match,
    /// Exactly one expression; collapsed
    ExpressionStatement,
    /// Exactly one expression; collapsed
    Parenthesized,
    /// Any construct without a dedicated kind
    Other,
}

impl SyntaxKind for PhpKind {
    fn name(&self) -> &'static str {
        match self {
            PhpKind::Program => "program",
            PhpKind::Namespace => "namespace",
            PhpKind::Use => "use",
            PhpKind::UseItem => "use_item",
            PhpKind::Class => "class",
            PhpKind::Interface => "interface",
            PhpKind::Trait => "trait",
            PhpKind::Enum => "enum",
            PhpKind::EnumCase => "enum_case",
            PhpKind::TraitUse => "trait_use",
            PhpKind::ClassMethod => "class_method",
            PhpKind::Function => "function",
            PhpKind::Param => "param",
            PhpKind::Property => "property",
            PhpKind::PropertyItem => "property_item",
            PhpKind::ClassConst => "class_const",
            PhpKind::Const => "const",
            PhpKind::ConstElement => "const_element",
            PhpKind::Name => "name",
            PhpKind::Type => "type",
            PhpKind::Variable => "variable",
            PhpKind::ConstFetch => "const_fetch",
            PhpKind::MagicConst => "magic_const",
            PhpKind::Integer => "integer",
            PhpKind::Float => "float",
            PhpKind::StringLiteral => "string",
            PhpKind::InterpolatedString => "interpolated_string",
            PhpKind::StringPart => "string_part",
            PhpKind::If => "if",
            PhpKind::ElseIf => "elseif",
            PhpKind::Else => "else",
            PhpKind::Foreach => "foreach",
            PhpKind::While => "while",
            PhpKind::DoWhile => "do_while",
            PhpKind::For => "for",
            PhpKind::Switch => "switch",
            PhpKind::Case => "case",
            PhpKind::Default => "default",
            PhpKind::TryCatch => "try_catch",
            PhpKind::Catch => "catch",
            PhpKind::Finally => "finally",
            PhpKind::Return => "return",
            PhpKind::Break => "break",
            PhpKind::Continue => "continue",
            PhpKind::Echo => "echo",
            PhpKind::Print => "print",
            PhpKind::Unset => "unset",
            PhpKind::Throw => "throw",
            PhpKind::Nop => "nop",
            PhpKind::Declare => "declare",
            PhpKind::DeclareItem => "declare_item",
            PhpKind::Global => "global",
            PhpKind::StaticVar => "static_var",
            PhpKind::InlineHtml => "inline_html",
            PhpKind::BinaryOp(_) => "binary_op",
            PhpKind::Instanceof => "instanceof",
            PhpKind::UnaryOp(_) => "unary_op",
            PhpKind::IncDec(_) => "inc_dec",
            PhpKind::Assign => "assign",
            PhpKind::AssignOp(_) => "assign_op",
            PhpKind::Cast(_) => "cast",
            PhpKind::FuncCall => "func_call",
            PhpKind::MethodCall => "method_call",
            PhpKind::StaticCall => "static_call",
            PhpKind::New => "new",
            PhpKind::PropertyFetch => "property_fetch",
            PhpKind::StaticPropertyFetch => "static_property_fetch",
            PhpKind::ClassConstFetch => "class_const_fetch",
            PhpKind::Arg => "arg",
            PhpKind::Isset => "isset",
            PhpKind::Empty => "empty",
            PhpKind::Array => "array",
            PhpKind::ArrayItem => "array_item",
            PhpKind::ArrayDimFetch => "array_dim_fetch",
            PhpKind::Closure => "closure",
            PhpKind::ClosureUse => "closure_use",
            PhpKind::ArrowFunction => "arrow_function",
            PhpKind::Ternary => "ternary",
            PhpKind::Clone => "clone",
            PhpKind::Yield => "yield",
            PhpKind::YieldFrom => "yield_from",
            PhpKind::Include(_) => "include",
            PhpKind::Match => "match",
            PhpKind::ExpressionStatement => "expression_statement",
            PhpKind::Parenthesized => "parenthesized",
            PhpKind::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Plus,
    Minus,
    Mul,
    Div,
    Mod,
    Pow,
    Concat,
    Equal,
    NotEqual,
    Identical,
    NotIdentical,
    Smaller,
    SmallerOrEqual,
    Greater,
    GreaterOrEqual,
    Spaceship,
    BooleanAnd,
    BooleanOr,
    LogicalXor,
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    ShiftLeft,
    ShiftRight,
    Coalesce,
}

impl BinaryOperator {
    /// Parse an operator token; keyword operators are case-insensitive
    pub fn from_token(token: &str) -> Option<Self> {
        let op = match token.to_ascii_lowercase().as_str() {
            "+" => BinaryOperator::Plus,
            "-" => BinaryOperator::Minus,
            "*" => BinaryOperator::Mul,
            "/" => BinaryOperator::Div,
            "%" => BinaryOperator::Mod,
            "**" => BinaryOperator::Pow,
            "." => BinaryOperator::Concat,
            "==" => BinaryOperator::Equal,
            "!=" | "<>" => BinaryOperator::NotEqual,
            "===" => BinaryOperator::Identical,
            "!==" => BinaryOperator::NotIdentical,
            "<" => BinaryOperator::Smaller,
            "<=" => BinaryOperator::SmallerOrEqual,
            ">" => BinaryOperator::Greater,
            ">=" => BinaryOperator::GreaterOrEqual,
            "<=>" => BinaryOperator::Spaceship,
            "&&" | "and" => BinaryOperator::BooleanAnd,
            "||" | "or" => BinaryOperator::BooleanOr,
            "xor" => BinaryOperator::LogicalXor,
            "&" => BinaryOperator::BitwiseAnd,
            "|" => BinaryOperator::BitwiseOr,
            "^" => BinaryOperator::BitwiseXor,
            "<<" => BinaryOperator::ShiftLeft,
            ">>" => BinaryOperator::ShiftRight,
            "??" => BinaryOperator::Coalesce,
            _ => return None,
        };
        Some(op)
    }

    pub fn describe(&self) -> &'static str {
        match self {
            BinaryOperator::Plus => "addition",
            BinaryOperator::Minus => "subtraction",
            BinaryOperator::Mul => "multiplication",
            BinaryOperator::Div => "division",
            BinaryOperator::Mod => "modulo",
            BinaryOperator::Pow => "power",
            BinaryOperator::Concat => "Concatenation of",
            BinaryOperator::Equal => "equal",
            BinaryOperator::NotEqual => "not equal",
            BinaryOperator::Identical => "strict equal",
            BinaryOperator::NotIdentical => "is not equal",
            BinaryOperator::Smaller => "Is smaller",
            BinaryOperator::SmallerOrEqual => "Is smaller or equal",
            BinaryOperator::Greater => "Is greater",
            BinaryOperator::GreaterOrEqual => "Is greater or equal",
            BinaryOperator::Spaceship => "Compare",
            BinaryOperator::BooleanAnd => "and",
            BinaryOperator::BooleanOr => "or",
            BinaryOperator::LogicalXor => "xor",
            BinaryOperator::BitwiseAnd => "Bitwise AND",
            BinaryOperator::BitwiseOr => "Bitwise OR",
            BinaryOperator::BitwiseXor => "Bitwise XOR",
            BinaryOperator::ShiftLeft => "Shift left",
            BinaryOperator::ShiftRight => "Shift right",
            BinaryOperator::Coalesce => "Unless is not null",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignOperator {
    Plus,
    Minus,
    Mul,
    Div,
    Mod,
    Pow,
    Concat,
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    ShiftLeft,
    ShiftRight,
    Coalesce,
}

impl AssignOperator {
    pub fn from_token(token: &str) -> Option<Self> {
        let op = match token {
            "+=" => AssignOperator::Plus,
            "-=" => AssignOperator::Minus,
            "*=" => AssignOperator::Mul,
            "/=" => AssignOperator::Div,
            "%=" => AssignOperator::Mod,
            "**=" => AssignOperator::Pow,
            ".=" => AssignOperator::Concat,
            "&=" => AssignOperator::BitwiseAnd,
            "|=" => AssignOperator::BitwiseOr,
            "^=" => AssignOperator::BitwiseXor,
            "<<=" => AssignOperator::ShiftLeft,
            ">>=" => AssignOperator::ShiftRight,
            "??=" => AssignOperator::Coalesce,
            _ => return None,
        };
        Some(op)
    }

    /// Verb placed before the assigned target
    pub fn verb(&self) -> &'static str {
        match self {
            AssignOperator::Plus => "Increment",
            AssignOperator::Minus => "Decrement",
            AssignOperator::Mul => "Multiply",
            AssignOperator::Div => "Divide",
            AssignOperator::Mod => "Modulo",
            AssignOperator::Pow => "Raise",
            AssignOperator::Concat => "Concat",
            AssignOperator::BitwiseAnd => "Bitwise AND",
            AssignOperator::BitwiseOr => "Bitwise OR",
            AssignOperator::BitwiseXor => "Bitwise XOR",
            AssignOperator::ShiftLeft => "Shift left",
            AssignOperator::ShiftRight => "Shift right",
            AssignOperator::Coalesce => "Default",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Not,
    BitwiseNot,
    Minus,
    Plus,
    Silence,
}

impl UnaryOperator {
    pub fn from_token(token: &str) -> Option<Self> {
        let op = match token {
            "!" => UnaryOperator::Not,
            "~" => UnaryOperator::BitwiseNot,
            "-" => UnaryOperator::Minus,
            "+" => UnaryOperator::Plus,
            "@" => UnaryOperator::Silence,
            _ => return None,
        };
        Some(op)
    }

    pub fn describe(&self) -> &'static str {
        match self {
            UnaryOperator::Not => "not",
            UnaryOperator::BitwiseNot => "Bitwise not",
            UnaryOperator::Minus => "negation",
            UnaryOperator::Plus => "unary plus",
            UnaryOperator::Silence => "Silenced",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IncDecOperator {
    PreInc,
    PostInc,
    PreDec,
    PostDec,
}

impl IncDecOperator {
    pub fn new(token: &str, prefix: bool) -> Option<Self> {
        let op = match (token, prefix) {
            ("++", true) => IncDecOperator::PreInc,
            ("++", false) => IncDecOperator::PostInc,
            ("--", true) => IncDecOperator::PreDec,
            ("--", false) => IncDecOperator::PostDec,
            _ => return None,
        };
        Some(op)
    }

    pub fn format(&self, operand: &str) -> String {
        match self {
            IncDecOperator::PreInc => format!("++{}", operand),
            IncDecOperator::PostInc => format!("{}++", operand),
            IncDecOperator::PreDec => format!("--{}", operand),
            IncDecOperator::PostDec => format!("{}--", operand),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastType {
    Array,
    String,
    Int,
    Bool,
    Float,
    Object,
    Unset,
}

impl CastType {
    /// Parse the keyword inside `(...)`, ignoring case and whitespace
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let keyword: String = keyword
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '(' && *c != ')')
            .collect::<String>()
            .to_ascii_lowercase();

        let cast = match keyword.as_str() {
            "array" => CastType::Array,
            "string" | "binary" => CastType::String,
            "int" | "integer" => CastType::Int,
            "bool" | "boolean" => CastType::Bool,
            "float" | "double" | "real" => CastType::Float,
            "object" => CastType::Object,
            "unset" => CastType::Unset,
            _ => return None,
        };
        Some(cast)
    }

    pub fn describe(&self) -> &'static str {
        match self {
            CastType::Array => "array",
            CastType::String => "string",
            CastType::Int => "integer",
            CastType::Bool => "boolean",
            CastType::Float => "float",
            CastType::Object => "object",
            CastType::Unset => "null",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IncludeKind {
    Include,
    IncludeOnce,
    Require,
    RequireOnce,
}

impl IncludeKind {
    pub fn describe(&self) -> &'static str {
        match self {
            IncludeKind::Include => "Include",
            IncludeKind::IncludeOnce => "Include once",
            IncludeKind::Require => "Require",
            IncludeKind::RequireOnce => "Require once",
        }
    }
}
