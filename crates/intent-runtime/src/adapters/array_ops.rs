//! In-place property dispatch on array values (`append`, `remove`).

use intent_core::{IntentError, Value};

pub fn append(values: &mut Vec<Value>, value: Value) {
    values.push(value);
}

/// Removes the first element equal to `value`. Absent values are a no-op.
pub fn remove(values: &mut Vec<Value>, value: &Value) -> bool {
    match values.iter().position(|candidate| candidate == value) {
        Some(index) => {
            values.remove(index);
            true
        }
        None => false,
    }
}

pub fn apply(values: &mut Vec<Value>, property: &str, value: Value) -> Result<(), IntentError> {
    match property {
        "append" => {
            append(values, value);
            Ok(())
        }
        "remove" => {
            remove(values, &value);
            Ok(())
        }
        other => Err(IntentError::adapter_failure(
            "array",
            other,
            "unsupported property",
        )),
    }
}
