use std::sync::Arc;

use intent_core::{
    Checkpoint, Environment, IntentError, NodeId, OperationOutput, Script, Slot, TurnResult,
};

use crate::adapters::{AdapterFactory, ResourceTable};
use crate::chooser::IntentChooser;

mod block;
mod control_flow;
mod dispatch;
mod eval;
mod lifecycle;
mod select;

const MAIN: &str = "main";
const SEND: &str = "send";

/// Everything one turn needs. The environment and the resource table belong
/// to the calling session and are mutated in place.
pub struct TurnContext<'s> {
    pub script: Arc<Script>,
    pub message: &'s str,
    pub slots: &'s [Slot],
    pub environment: &'s mut Environment,
    pub checkpoint: Checkpoint,
    pub resources: &'s mut ResourceTable,
    pub adapters: &'s dyn AdapterFactory,
    pub chooser: &'s mut dyn IntentChooser,
}

/// Evaluates one turn of an intent script. Single use: build one per turn.
pub struct Interpreter<'s> {
    script: Arc<Script>,
    message: &'s str,
    slots: &'s [Slot],
    environment: &'s mut Environment,
    checkpoint: Checkpoint,
    resources: &'s mut ResourceTable,
    adapters: &'s dyn AdapterFactory,
    chooser: &'s mut dyn IntentChooser,
}

/// Output produced by the statement at `node`; ends the walk.
#[derive(Debug)]
pub(crate) struct Suspension {
    output: OperationOutput,
    node: NodeId,
}

type Flow = Result<Option<Suspension>, IntentError>;


#[cfg(test)]
mod resume_tests;
#[cfg(test)]
mod select_tests;
