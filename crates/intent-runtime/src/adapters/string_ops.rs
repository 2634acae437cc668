//! Named operations on string values.

use intent_core::{ActionKind, IntentError, OperationOutput};

pub fn execute(value: &str, operation: &str) -> Result<OperationOutput, IntentError> {
    let text = match operation {
        "upper" => value.to_uppercase(),
        "lower" => value.to_lowercase(),
        "trim" => value.trim().to_string(),
        "capitalize" => capitalize(value),
        "length" => value.chars().count().to_string(),
        "reverse" => value.chars().rev().collect(),
        "words" => value.split_whitespace().count().to_string(),
        other => {
            return Err(IntentError::adapter_failure(
                "string",
                other,
                "unsupported operation",
            ))
        }
    };
    Ok(OperationOutput::new(text, ActionKind::Get))
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
