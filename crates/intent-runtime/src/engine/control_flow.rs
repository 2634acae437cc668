use intent_core::{AstNode, Checkpoint, ConditionalBranch, IntentError, NodeId, Value};
use tracing::{debug, trace};

use super::{Flow, Interpreter};

impl Interpreter<'_> {
    /// First branch whose condition holds; later branches are not evaluated.
    pub(super) fn exec_conditional(&mut self, branches: &[ConditionalBranch]) -> Flow {
        for branch in branches {
            if self.eval(&branch.condition)?.is_truthy() {
                return self.exec(&branch.block);
            }
        }
        Ok(None)
    }

    pub(super) fn exec_while(&mut self, condition: &AstNode, body: &AstNode) -> Flow {
        while self.eval(condition)?.is_truthy() {
            if let Some(suspension) = self.exec(body)? {
                return Ok(Some(suspension));
            }
        }
        Ok(None)
    }

    /// The loop variable binding is synthesized and never checkpointed. The
    /// current iteration index is kept in the environment under a key no
    /// script identifier can spell, so a turn that suspends inside the body
    /// resumes on that exact iteration even when elements repeat.
    pub(super) fn exec_for(
        &mut self,
        id: NodeId,
        variable: &str,
        iterable: &AstNode,
        body: &AstNode,
    ) -> Flow {
        let values = match self.eval(iterable)? {
            Value::Array(values) => values,
            other => {
                return Err(IntentError::type_mismatch(format!(
                    "for loop needs an array, got {}",
                    other.type_name()
                ))
                .at(id))
            }
        };

        let position = loop_position_key(id);
        let resumed_at = self.resume_index(&position, values.len(), body);
        let start = resumed_at.unwrap_or(0);
        for (index, value) in values.into_iter().enumerate().skip(start) {
            if resumed_at != Some(index) {
                trace!(node = %id, variable, value = %value, index, "loop binding");
                self.environment.assign(variable, value);
                self.environment
                    .assign(position.as_str(), Value::Number(index as f64));
            }
            if let Some(suspension) = self.exec(body)? {
                return Ok(Some(suspension));
            }
        }
        self.environment.remove(&position);
        Ok(None)
    }

    fn resume_index(&self, position: &str, len: usize, body: &AstNode) -> Option<usize> {
        let Checkpoint::At(checkpoint) = self.checkpoint else {
            return None;
        };
        if !body.contains(checkpoint) {
            return None;
        }
        let index = self
            .environment
            .get(position)
            .and_then(Value::as_number)
            .filter(|index| index.fract() == 0.0 && *index >= 0.0 && *index < len as f64)
            .map(|index| index as usize);
        if index.is_none() {
            debug!(position, "no recorded loop position, restarting loop");
        }
        index
    }
}

/// `#` never appears in script identifiers.
fn loop_position_key(id: NodeId) -> String {
    format!("for{}", id)
}
