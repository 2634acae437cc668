use std::cmp::Ordering;

use intent_core::{AstNode, IntentError, NodeKind};
use tracing::{debug, trace};

use super::{Flow, Interpreter, MAIN};

impl Interpreter<'_> {
    pub(super) fn exec_block(&mut self, assignments: &[AstNode], functions: &[AstNode]) -> Flow {
        for assignment in assignments {
            if let Some(dropped) = self.exec(assignment)? {
                debug!(node = %dropped.node, "discarded output of top-level assignment");
            }
        }
        let chosen = self.select_function(functions)?;
        self.exec(chosen)
    }

    /// `main` wins outright. Otherwise the highest priority among functions
    /// whose precondition holds; ties go to the chooser. Priorities below
    /// zero never qualify.
    pub(super) fn select_function<'a>(
        &mut self,
        functions: &'a [AstNode],
    ) -> Result<&'a AstNode, IntentError> {
        let mut best: i64 = 0;
        let mut candidates: Vec<&'a AstNode> = Vec::new();

        for function in functions {
            let NodeKind::Function {
                name,
                priority,
                precondition,
                ..
            } = &function.kind
            else {
                return Err(IntentError::unhandled_node(
                    function.id,
                    function.kind.variant_name(),
                    "an intent function",
                ));
            };
            if name == MAIN {
                debug!(node = %function.id, "main selected");
                return Ok(function);
            }
            if !self.precondition_holds(precondition.as_deref())? {
                trace!(function = %name, "precondition false");
                continue;
            }
            match priority.cmp(&best) {
                Ordering::Less => {}
                Ordering::Equal => candidates.push(function),
                Ordering::Greater => {
                    best = *priority;
                    candidates = vec![function];
                }
            }
        }

        let index = match candidates.len() {
            0 => return Err(IntentError::no_eligible_intent()),
            1 => 0,
            count => self.chooser.choose(count).min(count - 1),
        };
        let chosen = candidates[index];
        debug!(
            node = %chosen.id,
            priority = best,
            tied = candidates.len(),
            "intent selected"
        );
        Ok(chosen)
    }

    pub(super) fn exec_function(
        &mut self,
        name: &str,
        precondition: Option<&AstNode>,
        action: &AstNode,
    ) -> Flow {
        if !self.precondition_holds(precondition)? {
            debug!(function = name, "precondition false, skipping action");
            return Ok(None);
        }
        self.exec(action)
    }

    /// A function without a precondition is always eligible.
    fn precondition_holds(&mut self, precondition: Option<&AstNode>) -> Result<bool, IntentError> {
        match precondition {
            Some(condition) => Ok(self.eval(condition)?.is_truthy()),
            None => Ok(true),
        }
    }
}
