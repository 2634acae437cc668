use std::sync::Arc;

use intent_core::{AstNode, Checkpoint, IntentError, NodeId, NodeKind, TurnResult, UserReply};
use tracing::debug;

use super::{Flow, Interpreter, TurnContext};

impl<'s> Interpreter<'s> {
    pub fn new(context: TurnContext<'s>) -> Self {
        let TurnContext {
            script,
            message,
            slots,
            environment,
            checkpoint,
            resources,
            adapters,
            chooser,
        } = context;
        Self {
            script,
            message,
            slots,
            environment,
            checkpoint,
            resources,
            adapters,
            chooser,
        }
    }

    /// Runs the turn. `None` means the script reached its end without output.
    pub fn interpret(mut self) -> Result<Option<TurnResult>, IntentError> {
        let script = Arc::clone(&self.script);
        debug!(checkpoint = i64::from(self.checkpoint), "turn started");
        let Some(suspension) = self.exec(&script.root)? else {
            debug!("turn finished without output");
            return Ok(None);
        };
        debug!(
            node = %suspension.node,
            action = suspension.output.action.name(),
            "turn suspended"
        );
        Ok(Some(TurnResult {
            response_text: suspension.output.text,
            script,
            checkpoint: suspension.node,
            environment: self.environment.clone(),
            action: suspension.output.action,
        }))
    }

    pub(super) fn reply(&self) -> UserReply<'s> {
        UserReply {
            message: self.message,
            slots: self.slots,
        }
    }

    /// Leaves resume mode: everything after the suspended statement runs.
    pub(super) fn resume_at(&mut self, node: NodeId) {
        debug!(node = %node, "resuming at checkpoint");
        self.checkpoint = Checkpoint::Fresh;
    }

    pub(super) fn exec(&mut self, node: &AstNode) -> Flow {
        match &node.kind {
            NodeKind::Intent { block } => self.exec(block),
            NodeKind::Block {
                assignments,
                functions,
                ..
            } => self.exec_block(assignments, functions),
            NodeKind::Function {
                name,
                precondition,
                action,
                ..
            } => self.exec_function(name, precondition.as_deref(), action),
            NodeKind::CodeBlock { statements } => self.exec_code_block(statements),
            NodeKind::Assign { target, value } => self.exec_assign(node.id, target, value),
            NodeKind::SystemOperandProperty {
                target,
                property,
                value,
            } => {
                self.exec_property(node.id, target, property, value)?;
                Ok(None)
            }
            NodeKind::SystemOperandOperation { target, operation } => {
                self.exec_operation(node.id, target, operation)
            }
            NodeKind::ConditionalStatement { branches } => self.exec_conditional(branches),
            NodeKind::WhileLoop { condition, body } => self.exec_while(condition, body),
            NodeKind::ForLoop {
                variable,
                iterable,
                body,
            } => self.exec_for(node.id, variable, iterable, body),
            NodeKind::Declare { .. } | NodeKind::NoOp => Ok(None),
            _ => {
                self.eval(node)?;
                Ok(None)
            }
        }
    }
}
