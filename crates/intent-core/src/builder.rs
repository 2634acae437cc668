//! Programmatic AST construction. Identifiers are handed out in call order, so
//! building statements in source order yields the ordering the evaluator's
//! checkpoint protocol relies on.

use std::cell::Cell;

use crate::ast::{
    AstNode, BinaryOperator, Comparison, ConditionalBranch, LogicalOperator, NodeId, NodeKind,
    ObjectAttribute, Property, ResourceKind, Script, Statement, UnaryOperator,
};

#[derive(Debug)]
pub struct AstBuilder {
    next: Cell<u64>,
}

impl Default for AstBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AstBuilder {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: u64) -> Self {
        Self {
            next: Cell::new(first),
        }
    }

    pub fn next_id(&self) -> NodeId {
        let id = self.next.get();
        self.next.set(id + 1);
        NodeId(id)
    }

    /// Identifier the next node will receive.
    pub fn peek_id(&self) -> NodeId {
        NodeId(self.next.get())
    }

    pub fn node(&self, kind: NodeKind) -> AstNode {
        AstNode::new(self.next_id(), kind)
    }

    pub fn number(&self, value: f64) -> AstNode {
        self.node(NodeKind::NumberLiteral { value })
    }

    pub fn string(&self, value: &str) -> AstNode {
        self.node(NodeKind::StringLiteral {
            value: value.to_string(),
        })
    }

    pub fn boolean(&self, value: bool) -> AstNode {
        self.node(NodeKind::BooleanLiteral { value })
    }

    pub fn var(&self, name: &str) -> AstNode {
        self.node(NodeKind::Var {
            name: name.to_string(),
        })
    }

    pub fn slot(&self, name: &str) -> AstNode {
        self.node(NodeKind::Slot {
            name: name.to_string(),
        })
    }

    pub fn no_op(&self) -> AstNode {
        self.node(NodeKind::NoOp)
    }

    pub fn declare(&self, name: &str) -> AstNode {
        self.node(NodeKind::Declare {
            name: name.to_string(),
        })
    }

    pub fn unary(&self, op: UnaryOperator, operand: AstNode) -> AstNode {
        self.node(NodeKind::UnaryOp {
            op,
            operand: Box::new(operand),
        })
    }

    pub fn binary(&self, op: BinaryOperator, left: AstNode, right: AstNode) -> AstNode {
        self.node(NodeKind::BinOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn add(&self, left: AstNode, right: AstNode) -> AstNode {
        self.binary(BinaryOperator::Add, left, right)
    }

    pub fn array(&self, elements: Vec<AstNode>) -> AstNode {
        self.node(NodeKind::ArrayLiteral { elements })
    }

    pub fn index(&self, array: AstNode, index: AstNode) -> AstNode {
        self.node(NodeKind::ArrayElementAccess {
            array: Box::new(array),
            index: Box::new(index),
        })
    }

    pub fn object(&self, attributes: Vec<(&str, AstNode)>) -> AstNode {
        self.node(NodeKind::ObjectLiteral {
            attributes: attributes
                .into_iter()
                .map(|(key, value)| ObjectAttribute {
                    key: key.to_string(),
                    value,
                })
                .collect(),
        })
    }

    pub fn field(&self, object: AstNode, key: AstNode) -> AstNode {
        self.node(NodeKind::ObjectElementAccess {
            object: Box::new(object),
            key: Box::new(key),
        })
    }

    pub fn assign(&self, target: &str, value: AstNode) -> AstNode {
        self.node(NodeKind::Assign {
            target: target.to_string(),
            value: Box::new(value),
        })
    }

    pub fn system_operand(&self, resource: ResourceKind, properties: Vec<(&str, AstNode)>) -> AstNode {
        self.node(NodeKind::SystemOperand {
            resource,
            properties: properties
                .into_iter()
                .map(|(name, value)| Property {
                    name: name.to_string(),
                    value,
                })
                .collect(),
        })
    }

    pub fn property(&self, target: AstNode, property: &str, value: AstNode) -> AstNode {
        self.node(NodeKind::SystemOperandProperty {
            target: Box::new(target),
            property: property.to_string(),
            value: Box::new(value),
        })
    }

    pub fn operation(&self, target: AstNode, operation: &str) -> AstNode {
        self.node(NodeKind::SystemOperandOperation {
            target: Box::new(target),
            operation: operation.to_string(),
        })
    }

    pub fn condition(&self, comparison: Comparison, left: AstNode, right: AstNode) -> AstNode {
        self.node(NodeKind::Condition {
            comparison,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn condition_set(&self, op: LogicalOperator, left: AstNode, right: AstNode) -> AstNode {
        self.node(NodeKind::ConditionSet {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn conditional(&self, branches: Vec<(AstNode, AstNode)>) -> AstNode {
        self.node(NodeKind::ConditionalStatement {
            branches: branches
                .into_iter()
                .map(|(condition, block)| ConditionalBranch { condition, block })
                .collect(),
        })
    }

    pub fn while_loop(&self, condition: AstNode, body: AstNode) -> AstNode {
        self.node(NodeKind::WhileLoop {
            condition: Box::new(condition),
            body: Box::new(body),
        })
    }

    pub fn for_loop(&self, variable: &str, iterable: AstNode, body: AstNode) -> AstNode {
        self.node(NodeKind::ForLoop {
            variable: variable.to_string(),
            iterable: Box::new(iterable),
            body: Box::new(body),
        })
    }

    pub fn code_block(&self, statements: Vec<Statement>) -> AstNode {
        self.node(NodeKind::CodeBlock { statements })
    }

    /// Code block where every node is its own statement.
    pub fn statements(&self, nodes: Vec<AstNode>) -> AstNode {
        self.code_block(nodes.into_iter().map(Statement::Single).collect())
    }

    pub fn function(
        &self,
        name: &str,
        priority: i64,
        precondition: Option<AstNode>,
        action: AstNode,
    ) -> AstNode {
        self.node(NodeKind::Function {
            name: name.to_string(),
            priority,
            precondition: precondition.map(Box::new),
            action: Box::new(action),
        })
    }

    pub fn block(&self, assignments: Vec<AstNode>, functions: Vec<AstNode>) -> AstNode {
        self.node(NodeKind::Block {
            declarations: Vec::new(),
            assignments,
            functions,
        })
    }

    pub fn intent(&self, block: AstNode) -> AstNode {
        self.node(NodeKind::Intent {
            block: Box::new(block),
        })
    }

    pub fn script(&self, block: AstNode) -> Script {
        Script::new(self.intent(block))
    }
}
