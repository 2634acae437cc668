use std::cmp::Ordering;

use intent_core::{
    AstNode, BinaryOperator, Comparison, IntentError, LogicalOperator, NodeKind, UnaryOperator,
    Value,
};

use super::Interpreter;

impl Interpreter<'_> {
    pub(super) fn eval(&mut self, node: &AstNode) -> Result<Value, IntentError> {
        match &node.kind {
            NodeKind::NumberLiteral { value } => Ok(Value::Number(*value)),
            NodeKind::StringLiteral { value } => Ok(Value::String(value.clone())),
            NodeKind::BooleanLiteral { value } => Ok(Value::Bool(*value)),
            NodeKind::NoOp => Ok(Value::Null),
            NodeKind::Var { name } => self
                .environment
                .get(name)
                .cloned()
                .ok_or_else(|| IntentError::undeclared_variable(name).at(node.id)),
            NodeKind::Slot { name } => Ok(self
                .slots
                .iter()
                .find(|slot| slot.name == *name)
                .map(|slot| slot.value.clone())
                .unwrap_or_default()),
            NodeKind::UnaryOp { op, operand } => {
                let value = self.eval(operand)?;
                let Value::Number(number) = value else {
                    return Err(IntentError::type_mismatch(format!(
                        "unary operator needs a number, got {}",
                        value.type_name()
                    ))
                    .at(node.id));
                };
                Ok(Value::Number(match op {
                    UnaryOperator::Plus => number,
                    UnaryOperator::Minus => -number,
                }))
            }
            NodeKind::BinOp { op, left, right } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                binary(*op, left, right).map_err(|error| error.at(node.id))
            }
            NodeKind::ArrayLiteral { elements } => elements
                .iter()
                .map(|element| self.eval(element))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            NodeKind::ArrayElementAccess { array, index } => {
                let array = self.eval(array)?;
                let index = self.eval(index)?;
                element_at(array, index).map_err(|error| error.at(node.id))
            }
            NodeKind::ObjectLiteral { attributes } => {
                let mut pairs = Vec::with_capacity(attributes.len());
                for attribute in attributes {
                    pairs.push((attribute.key.clone(), self.eval(&attribute.value)?));
                }
                Ok(Value::Object(pairs))
            }
            NodeKind::ObjectElementAccess { object, key } => {
                let object = self.eval(object)?;
                let key = match self.eval(key)? {
                    Value::String(text) => text,
                    other => other.to_string(),
                };
                if !matches!(object, Value::Object(_)) {
                    return Err(IntentError::type_mismatch(format!(
                        "cannot read \"{}\" from {}",
                        key,
                        object.type_name()
                    ))
                    .at(node.id));
                }
                Ok(object.attribute(&key).cloned().unwrap_or_default())
            }
            NodeKind::SystemOperand {
                resource,
                properties,
            } => self.eval_system_operand(node.id, *resource, properties),
            NodeKind::SystemOperandOperation { target, operation } => {
                self.eval_operation(node.id, target, operation)
            }
            NodeKind::ConditionSet { op, left, right } => {
                let left = self.eval(left)?.is_truthy();
                let holds = match op {
                    LogicalOperator::And => left && self.eval(right)?.is_truthy(),
                    LogicalOperator::Or => left || self.eval(right)?.is_truthy(),
                };
                Ok(Value::Bool(holds))
            }
            NodeKind::Condition {
                comparison,
                left,
                right,
            } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                compare(*comparison, &left, &right)
                    .map(Value::Bool)
                    .map_err(|error| error.at(node.id))
            }
            other => Err(IntentError::unhandled_node(
                node.id,
                other.variant_name(),
                "an expression",
            )),
        }
    }
}

fn binary(op: BinaryOperator, left: Value, right: Value) -> Result<Value, IntentError> {
    if op == BinaryOperator::Add {
        return match (left, right) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
            (Value::Array(mut a), Value::Array(b)) => {
                a.extend(b);
                Ok(Value::Array(a))
            }
            (left @ Value::String(_), right) | (left, right @ Value::String(_)) => {
                Ok(Value::String(format!("{}{}", left, right)))
            }
            (left, right) => Err(IntentError::type_mismatch(format!(
                "cannot add {} and {}",
                left.type_name(),
                right.type_name()
            ))),
        };
    }

    let (Value::Number(a), Value::Number(b)) = (&left, &right) else {
        return Err(IntentError::type_mismatch(format!(
            "arithmetic needs numbers, got {} and {}",
            left.type_name(),
            right.type_name()
        )));
    };
    let (a, b) = (*a, *b);
    let result = match op {
        BinaryOperator::Add => a + b,
        BinaryOperator::Subtract => a - b,
        BinaryOperator::Multiply => a * b,
        BinaryOperator::IntegerDivide | BinaryOperator::FloatDivide if b == 0.0 => {
            return Err(IntentError::division_by_zero())
        }
        BinaryOperator::IntegerDivide => (a / b).floor(),
        BinaryOperator::FloatDivide => a / b,
    };
    Ok(Value::Number(result))
}

fn element_at(array: Value, index: Value) -> Result<Value, IntentError> {
    let Value::Array(values) = array else {
        return Err(IntentError::type_mismatch(format!(
            "cannot index into {}",
            array.type_name()
        )));
    };
    let position = match index {
        Value::Number(raw) if raw >= 0.0 && raw.fract() == 0.0 => raw as usize,
        other => {
            return Err(IntentError::type_mismatch(format!(
                "array index must be a non-negative whole number, got {}",
                other
            )))
        }
    };
    let len = values.len();
    values
        .into_iter()
        .nth(position)
        .ok_or_else(|| IntentError::index_out_of_range(position, len))
}

fn compare(comparison: Comparison, left: &Value, right: &Value) -> Result<bool, IntentError> {
    let accept: fn(Ordering) -> bool = match comparison {
        Comparison::Equal => return Ok(left == right),
        Comparison::NotEqual => return Ok(left != right),
        Comparison::Less => Ordering::is_lt,
        Comparison::LessOrEqual => Ordering::is_le,
        Comparison::Greater => Ordering::is_gt,
        Comparison::GreaterOrEqual => Ordering::is_ge,
    };
    let ordering = match (left, right) {
        (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        _ => {
            return Err(IntentError::type_mismatch(format!(
                "cannot order {} against {}",
                left.type_name(),
                right.type_name()
            )))
        }
    };
    Ok(ordering.map(accept).unwrap_or(false))
}
