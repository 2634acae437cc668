pub mod adapters;
pub mod chooser;
mod engine;

pub use adapters::{AdapterFactory, DefaultAdapterFactory, ResourceAdapter, ResourceTable};
pub use chooser::{FirstChooser, IntentChooser, RandomChooser, SeededChooser};
pub use engine::{Interpreter, TurnContext};
