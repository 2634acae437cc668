use intent_core::IntentError;
use std::fmt::Display;

pub(crate) fn emit_error(error: IntentError) -> i32 {
    println!("RESULT:ERROR");
    println!("ERROR_CODE:{}", error.code);
    match serde_json::to_string(&error.message) {
        Ok(message) => println!("ERROR_MSG_JSON:{}", message),
        Err(_) => println!("ERROR_MSG_JSON:null"),
    }
    1
}

/// `map_err` adapter tagging any displayable failure with a host code.
pub(crate) fn host_error<E: Display>(code: &'static str) -> impl Fn(E) -> IntentError {
    move |error| IntentError::host(code, error.to_string())
}
