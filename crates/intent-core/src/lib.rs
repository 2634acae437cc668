pub mod ast;
pub mod builder;
pub mod environment;
pub mod error;
pub mod types;
pub mod value;

pub use ast::*;
pub use builder::AstBuilder;
pub use environment::Environment;
pub use error::{ErrorKind, IntentError};
pub use types::*;
pub use value::*;
