//! A uniform AST node shape: one node type distinguished by a `NodeKind`
//! discriminant, with positional child order carrying grammar meaning (a
//! missing optional child is a `children` slot holding `None`, never an
//! omitted index).

use crate::arena::NodeId;
use crate::interner::Identifier;

/// Source position: 1-based line, 0-based column, code-unit offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: u32,
    pub column: u32,
    pub offset: u32,
}

impl Position {
    pub fn new(line: u32, column: u32, offset: u32) -> Self {
        Self { line, column, offset }
    }
}

/// Fixed node-kind enumeration, one variant per grammar production this
/// crate builds a tree node for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Arguments,
    ArgumentsList,
    Array,
    AssignmentExpression,
    BinaryExpression,
    Block,
    Boolean,
    BracketAccess,
    Break,
    Clause,
    ClauseList,
    Comma,
    ConditionalExpression,
    ConstDeclaration,
    ConstStatement,
    Continue,
    Debugger,
    DoWhile,
    DotAccess,
    ElementList,
    EmptyStatement,
    ExpressionStatement,
    ForIn,
    For,
    FormalParameterList,
    FunctionBody,
    FunctionCall,
    FunctionDecl,
    FunctionExpression,
    IdentifierExpression,
    If,
    Label,
    New,
    Null,
    Number,
    ObjectLiteral,
    Postfix,
    Prefix,
    Property,
    PropertyList,
    Regex,
    Resolve,
    Return,
    SourceElements,
    String,
    Switch,
    This,
    Throw,
    Try,
    Unary,
    VariableDeclaration,
    Void,
    While,
    With,
}

/// Fixed operator enumeration. Unary `+`/`-` reuse `Add`/`Subtract` (the
/// reference implementation's own choice; the emitted operator text is
/// correct either way, since both spellings coincide with the binary forms).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Typeof,
    Delete,
    LogicalNot,
    LogicalOr,
    LogicalAnd,
    BitwiseNot,
    BitwiseOr,
    BitwiseXor,
    BitwiseAnd,
    Equal,
    NotEqual,
    StrictEqual,
    StrictNotEqual,
    LessThan,
    GreaterThan,
    LessThanOrEqual,
    GreaterThanOrEqual,
    InstanceOf,
    In,
    LeftShift,
    RightShift,
    UnsignedRightShift,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulus,
    Increment,
    Decrement,
    Assign,
    AssignAdd,
    AssignSubtract,
    AssignMultiply,
    AssignDivide,
    AssignModulus,
    AssignLeftShift,
    AssignRightShift,
    AssignUnsignedRightShift,
    AssignAnd,
    AssignXor,
    AssignOr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    Constant,
    Getter,
    Setter,
}

#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub operator: Option<Operator>,
    pub boolean: bool,
    pub number: f64,
    /// String literal payload; also carries regex flags (pattern lives in
    /// `identifier` for `Regex` nodes, mirroring the reference's reuse).
    pub string: Option<String>,
    pub identifier: Option<Identifier>,
    pub property_kind: PropertyKind,
    pub children: Vec<Option<NodeId>>,
    pub start: Position,
    pub end: Position,
}

impl Node {
    pub fn new(kind: NodeKind, start: Position, end: Position) -> Self {
        Self {
            kind,
            operator: None,
            boolean: false,
            number: 0.0,
            string: None,
            identifier: None,
            property_kind: PropertyKind::Constant,
            children: Vec::new(),
            start,
            end,
        }
    }

    pub fn child(&self, index: usize) -> Option<NodeId> {
        self.children.get(index).copied().flatten()
    }

    pub fn push_child(&mut self, child: Option<NodeId>) {
        self.children.push(child);
    }
}
