use std::slice;

use intent_core::{AstNode, CheckpointPosition, NodeId, NodeKind, Statement};
use tracing::trace;

use super::{Flow, Interpreter, Suspension, SEND};

impl Interpreter<'_> {
    /// Runs statements in order and stops at the first one that produces output.
    pub(super) fn exec_code_block(&mut self, statements: &[Statement]) -> Flow {
        for statement in statements {
            let nodes = match statement {
                Statement::Single(node) => slice::from_ref(node),
                Statement::MultiAssign(group) => group.as_slice(),
            };
            for node in nodes {
                if let Some(suspension) = self.exec(node)? {
                    return Ok(Some(suspension));
                }
            }
        }
        Ok(None)
    }

    pub(super) fn exec_assign(&mut self, id: NodeId, target: &str, value: &AstNode) -> Flow {
        match self.checkpoint.position(id) {
            CheckpointPosition::Passed => {
                trace!(node = %id, variable = target, "assignment already applied");
                Ok(None)
            }
            CheckpointPosition::At => {
                self.resume_at(id);
                let answer = self.answer_for(value)?;
                trace!(node = %id, variable = target, answer = %answer, "assignment takes reply");
                self.environment.assign(target, answer);
                Ok(None)
            }
            CheckpointPosition::Ahead => {
                if self.checkpoint.is_fresh() {
                    if let NodeKind::SystemOperandOperation {
                        target: operand,
                        operation,
                    } = &value.kind
                    {
                        if operation == SEND {
                            let output = self.dispatch(value.id, operand, operation)?;
                            return Ok(output.map(|output| Suspension { output, node: id }));
                        }
                    }
                }
                let evaluated = self.eval(value)?;
                trace!(node = %id, variable = target, value = %evaluated, "assignment");
                self.environment.assign(target, evaluated);
                Ok(None)
            }
        }
    }
}
