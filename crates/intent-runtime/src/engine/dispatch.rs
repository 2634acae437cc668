use intent_core::{
    AstNode, CheckpointPosition, IntentError, NodeId, NodeKind, OperationOutput, Property,
    PropertySet, ResourceHandle, ResourceKind, Value,
};
use tracing::{debug, trace};

use super::{Flow, Interpreter, Suspension};
use crate::adapters::{array_ops, string_ops};

impl Interpreter<'_> {
    pub(super) fn eval_system_operand(
        &mut self,
        id: NodeId,
        resource: ResourceKind,
        properties: &[Property],
    ) -> Result<Value, IntentError> {
        let mut declared = PropertySet::new();
        for property in properties {
            let value = self.eval(&property.value)?;
            declared.insert(property.name.clone(), value);
        }
        Ok(Value::Resource(ResourceHandle {
            node: id,
            resource,
            properties: declared,
        }))
    }

    /// Property dispatch. Array variables are edited in place; resources get
    /// the property recorded on their adapter.
    pub(super) fn exec_property(
        &mut self,
        id: NodeId,
        target: &AstNode,
        property: &str,
        value: &AstNode,
    ) -> Result<(), IntentError> {
        match self.checkpoint.position(id) {
            CheckpointPosition::Passed => return Ok(()),
            CheckpointPosition::At => {
                self.resume_at(id);
                return Ok(());
            }
            CheckpointPosition::Ahead => {}
        }

        let value = self.eval(value)?;
        if let NodeKind::Var { name } = &target.kind {
            if let Some(Value::Array(values)) = self.environment.get_mut(name) {
                trace!(node = %id, array = %name, property, "array property");
                return array_ops::apply(values, property, value).map_err(|error| error.at(id));
            }
        }

        match self.eval(target)? {
            Value::Resource(handle) => self
                .resources
                .add_property(&handle, property, value, self.adapters)
                .map_err(|error| error.at(id)),
            other => Err(IntentError::type_mismatch(format!(
                "cannot set property \"{}\" on {}",
                property,
                other.type_name()
            ))
            .at(id)),
        }
    }

    /// Operation in statement position: output ends the turn.
    pub(super) fn exec_operation(&mut self, id: NodeId, target: &AstNode, operation: &str) -> Flow {
        match self.checkpoint.position(id) {
            CheckpointPosition::Passed => Ok(None),
            CheckpointPosition::At => {
                self.resume_at(id);
                let answer = self.answer(target)?;
                trace!(node = %id, answer = %answer, "reply consumed");
                Ok(None)
            }
            CheckpointPosition::Ahead => {
                let output = self.dispatch(id, target, operation)?;
                Ok(output.map(|output| Suspension { output, node: id }))
            }
        }
    }

    /// Operation in expression position: output text becomes the value.
    pub(super) fn eval_operation(
        &mut self,
        id: NodeId,
        target: &AstNode,
        operation: &str,
    ) -> Result<Value, IntentError> {
        match self.checkpoint.position(id) {
            CheckpointPosition::Passed => Ok(Value::Null),
            CheckpointPosition::At => {
                self.resume_at(id);
                self.answer(target)
            }
            CheckpointPosition::Ahead => Ok(self
                .dispatch(id, target, operation)?
                .map(|output| Value::String(output.text))
                .unwrap_or_default()),
        }
    }

    pub(super) fn dispatch(
        &mut self,
        id: NodeId,
        target: &AstNode,
        operation: &str,
    ) -> Result<Option<OperationOutput>, IntentError> {
        match self.eval(target)? {
            Value::String(text) => string_ops::execute(&text, operation)
                .map(Some)
                .map_err(|error| error.at(id)),
            Value::Resource(handle) => {
                trace!(node = %id, resource = handle.resource.name(), operation, "dispatch");
                let adapter = self
                    .resources
                    .resolve(&handle, self.adapters)
                    .map_err(|error| error.at(id))?;
                adapter
                    .execute_operation(operation)
                    .map_err(|error| error.at(id))
            }
            other => Err(IntentError::type_mismatch(format!(
                "cannot run \"{}\" on {}",
                operation,
                other.type_name()
            ))
            .at(id)),
        }
    }

    /// The current turn read as the reply to the request `value` issued.
    pub(super) fn answer_for(&mut self, value: &AstNode) -> Result<Value, IntentError> {
        match &value.kind {
            NodeKind::SystemOperandOperation { target, .. } => self.answer(target),
            _ => self.eval(value),
        }
    }

    fn answer(&mut self, target: &AstNode) -> Result<Value, IntentError> {
        let Value::Resource(handle) = self.eval(target)? else {
            debug!(node = %target.id, "reply target is not a resource");
            return Ok(Value::Null);
        };
        let reply = self.reply();
        let adapter = self.resources.resolve(&handle, self.adapters)?;
        Ok(adapter.resolve_answer(&reply).unwrap_or_else(|| {
            debug!(node = %handle.node, "resource awaits no reply");
            Value::Null
        }))
    }
}
