use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ast::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    UndeclaredVariable,
    NoEligibleIntent,
    UnhandledNodeKind,
    AdapterOperationFailure,
    TypeMismatch,
    IndexOutOfRange,
    DivisionByZero,
    InvalidState,
    Host,
}

#[derive(Debug, Error, Clone, PartialEq)]
#[error("{code}: {message}")]
pub struct IntentError {
    pub kind: ErrorKind,
    pub code: String,
    pub message: String,
    pub node: Option<NodeId>,
}

impl IntentError {
    pub fn new(kind: ErrorKind, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            code: code.into(),
            message: message.into(),
            node: None,
        }
    }

    pub fn at(mut self, node: NodeId) -> Self {
        self.node = Some(node);
        self
    }

    pub fn undeclared_variable(name: &str) -> Self {
        Self::new(
            ErrorKind::UndeclaredVariable,
            "ENGINE_UNDECLARED_VARIABLE",
            format!("Identifier \"{}\" does not exist.", name),
        )
    }

    pub fn no_eligible_intent() -> Self {
        Self::new(
            ErrorKind::NoEligibleIntent,
            "ENGINE_NO_ELIGIBLE_INTENT",
            "No function named \"main\" and no function whose precondition holds.",
        )
    }

    pub fn unhandled_node(node: NodeId, variant: &str, position: &str) -> Self {
        Self::new(
            ErrorKind::UnhandledNodeKind,
            "ENGINE_UNHANDLED_NODE",
            format!("{} node cannot be evaluated as {}.", variant, position),
        )
        .at(node)
    }

    pub fn adapter_failure(
        resource: &str,
        operation: &str,
        reason: impl std::fmt::Display,
    ) -> Self {
        Self::new(
            ErrorKind::AdapterOperationFailure,
            "ADAPTER_OPERATION_FAILED",
            format!("{} could not complete \"{}\": {}", resource, operation, reason),
        )
    }

    pub fn type_mismatch(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TypeMismatch, "ENGINE_TYPE_MISMATCH", message)
    }

    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        Self::new(
            ErrorKind::IndexOutOfRange,
            "ENGINE_INDEX_RANGE",
            format!("Index {} is out of range for array of length {}.", index, len),
        )
    }

    pub fn division_by_zero() -> Self {
        Self::new(
            ErrorKind::DivisionByZero,
            "ENGINE_DIVISION_BY_ZERO",
            "Division by zero.",
        )
    }

    pub fn invalid_state(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidState, code, message)
    }

    pub fn host(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Host, code, message)
    }
}
