use std::fmt;

use serde::{Deserialize, Serialize};

/// Structural identity of a node. Assigned once at parse time, unique, and
/// increasing in program text order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AstNode {
    pub id: NodeId,
    #[serde(flatten)]
    pub kind: NodeKind,
}

impl AstNode {
    pub fn new(id: NodeId, kind: NodeKind) -> Self {
        Self { id, kind }
    }

    pub fn children(&self) -> Vec<&AstNode> {
        match &self.kind {
            NodeKind::Intent { block } => vec![block.as_ref()],
            NodeKind::Block {
                declarations,
                assignments,
                functions,
            } => declarations
                .iter()
                .chain(assignments)
                .chain(functions)
                .collect(),
            NodeKind::Function {
                precondition,
                action,
                ..
            } => precondition
                .iter()
                .map(|node| node.as_ref())
                .chain(std::iter::once(action.as_ref()))
                .collect(),
            NodeKind::CodeBlock { statements } => statements
                .iter()
                .flat_map(|statement| match statement {
                    Statement::Single(node) => vec![node],
                    Statement::MultiAssign(group) => group.iter().collect(),
                })
                .collect(),
            NodeKind::Assign { value, .. } => vec![value.as_ref()],
            NodeKind::UnaryOp { operand, .. } => vec![operand.as_ref()],
            NodeKind::BinOp { left, right, .. }
            | NodeKind::ConditionSet { left, right, .. }
            | NodeKind::Condition { left, right, .. } => vec![left.as_ref(), right.as_ref()],
            NodeKind::ArrayLiteral { elements } => elements.iter().collect(),
            NodeKind::ArrayElementAccess { array, index } => vec![array.as_ref(), index.as_ref()],
            NodeKind::ObjectLiteral { attributes } => {
                attributes.iter().map(|attribute| &attribute.value).collect()
            }
            NodeKind::ObjectElementAccess { object, key } => vec![object.as_ref(), key.as_ref()],
            NodeKind::SystemOperand { properties, .. } => {
                properties.iter().map(|property| &property.value).collect()
            }
            NodeKind::SystemOperandProperty { target, value, .. } => {
                vec![target.as_ref(), value.as_ref()]
            }
            NodeKind::SystemOperandOperation { target, .. } => vec![target.as_ref()],
            NodeKind::ConditionalStatement { branches } => branches
                .iter()
                .flat_map(|branch| [&branch.condition, &branch.block])
                .collect(),
            NodeKind::WhileLoop { condition, body } => vec![condition.as_ref(), body.as_ref()],
            NodeKind::ForLoop { iterable, body, .. } => vec![iterable.as_ref(), body.as_ref()],
            NodeKind::Declare { .. }
            | NodeKind::Var { .. }
            | NodeKind::Slot { .. }
            | NodeKind::NumberLiteral { .. }
            | NodeKind::StringLiteral { .. }
            | NodeKind::BooleanLiteral { .. }
            | NodeKind::NoOp => Vec::new(),
        }
    }

    /// Whether `id` names this node or any node beneath it.
    pub fn contains(&self, id: NodeId) -> bool {
        self.id == id || self.children().into_iter().any(|child| child.contains(id))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum NodeKind {
    Intent {
        block: Box<AstNode>,
    },
    Block {
        #[serde(default)]
        declarations: Vec<AstNode>,
        #[serde(default)]
        assignments: Vec<AstNode>,
        functions: Vec<AstNode>,
    },
    Function {
        name: String,
        priority: i64,
        #[serde(default)]
        precondition: Option<Box<AstNode>>,
        action: Box<AstNode>,
    },
    CodeBlock {
        statements: Vec<Statement>,
    },
    Declare {
        name: String,
    },
    Assign {
        target: String,
        value: Box<AstNode>,
    },
    Var {
        name: String,
    },
    Slot {
        name: String,
    },
    UnaryOp {
        op: UnaryOperator,
        operand: Box<AstNode>,
    },
    BinOp {
        op: BinaryOperator,
        left: Box<AstNode>,
        right: Box<AstNode>,
    },
    NumberLiteral {
        value: f64,
    },
    StringLiteral {
        value: String,
    },
    BooleanLiteral {
        value: bool,
    },
    ArrayLiteral {
        elements: Vec<AstNode>,
    },
    ArrayElementAccess {
        array: Box<AstNode>,
        index: Box<AstNode>,
    },
    ObjectLiteral {
        attributes: Vec<ObjectAttribute>,
    },
    ObjectElementAccess {
        object: Box<AstNode>,
        key: Box<AstNode>,
    },
    SystemOperand {
        resource: ResourceKind,
        #[serde(default)]
        properties: Vec<Property>,
    },
    SystemOperandProperty {
        target: Box<AstNode>,
        property: String,
        value: Box<AstNode>,
    },
    SystemOperandOperation {
        target: Box<AstNode>,
        operation: String,
    },
    ConditionalStatement {
        branches: Vec<ConditionalBranch>,
    },
    WhileLoop {
        condition: Box<AstNode>,
        body: Box<AstNode>,
    },
    ForLoop {
        variable: String,
        iterable: Box<AstNode>,
        body: Box<AstNode>,
    },
    ConditionSet {
        op: LogicalOperator,
        left: Box<AstNode>,
        right: Box<AstNode>,
    },
    Condition {
        comparison: Comparison,
        left: Box<AstNode>,
        right: Box<AstNode>,
    },
    NoOp,
}

impl NodeKind {
    pub fn variant_name(&self) -> &'static str {
        match self {
            Self::Intent { .. } => "Intent",
            Self::Block { .. } => "Block",
            Self::Function { .. } => "Function",
            Self::CodeBlock { .. } => "CodeBlock",
            Self::Declare { .. } => "Declare",
            Self::Assign { .. } => "Assign",
            Self::Var { .. } => "Var",
            Self::Slot { .. } => "Slot",
            Self::UnaryOp { .. } => "UnaryOp",
            Self::BinOp { .. } => "BinOp",
            Self::NumberLiteral { .. } => "NumberLiteral",
            Self::StringLiteral { .. } => "StringLiteral",
            Self::BooleanLiteral { .. } => "BooleanLiteral",
            Self::ArrayLiteral { .. } => "ArrayLiteral",
            Self::ArrayElementAccess { .. } => "ArrayElementAccess",
            Self::ObjectLiteral { .. } => "ObjectLiteral",
            Self::ObjectElementAccess { .. } => "ObjectElementAccess",
            Self::SystemOperand { .. } => "SystemOperand",
            Self::SystemOperandProperty { .. } => "SystemOperandProperty",
            Self::SystemOperandOperation { .. } => "SystemOperandOperation",
            Self::ConditionalStatement { .. } => "ConditionalStatement",
            Self::WhileLoop { .. } => "WhileLoop",
            Self::ForLoop { .. } => "ForLoop",
            Self::ConditionSet { .. } => "ConditionSet",
            Self::Condition { .. } => "Condition",
            Self::NoOp => "NoOp",
        }
    }
}

/// One logical statement of a code block. A multi-assign group runs as a unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Statement {
    MultiAssign(Vec<AstNode>),
    Single(AstNode),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectAttribute {
    pub key: String,
    pub value: AstNode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub value: AstNode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionalBranch {
    pub condition: AstNode,
    pub block: AstNode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UnaryOperator {
    Plus,
    Minus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    IntegerDivide,
    FloatDivide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LogicalOperator {
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Comparison {
    Equal,
    NotEqual,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    #[serde(rename = "response")]
    Responder,
    #[serde(rename = "internal_database")]
    KeyValueStore,
    #[serde(rename = "file")]
    File,
}

impl ResourceKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Responder => "response",
            Self::KeyValueStore => "internal_database",
            Self::File => "file",
        }
    }
}

/// An immutable, parsed intent script. Shared read-only across turns and
/// across sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    pub root: AstNode,
}

impl Script {
    pub fn new(root: AstNode) -> Self {
        Self { root }
    }
}
