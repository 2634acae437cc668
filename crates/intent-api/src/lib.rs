use std::sync::Arc;

use intent_core::{Checkpoint, Environment, IntentError, Script, Slot, TurnResult};
use intent_runtime::{
    AdapterFactory, DefaultAdapterFactory, IntentChooser, Interpreter, RandomChooser,
    ResourceTable, SeededChooser, TurnContext,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const SESSION_STATE_SCHEMA: &str = "intent-session.v1";

#[derive(Clone, Default)]
pub struct SessionOptions {
    pub adapters: Option<Arc<dyn AdapterFactory>>,
    pub random_seed: Option<u32>,
}

/// What a caller persists between turns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub schema_version: String,
    pub environment: Environment,
    pub checkpoint: Checkpoint,
}

/// One conversation over one script. Owns its environment, checkpoint and
/// adapter table; run turns for a session one at a time.
pub struct Session {
    script: Arc<Script>,
    environment: Environment,
    checkpoint: Checkpoint,
    resources: ResourceTable,
    adapters: Arc<dyn AdapterFactory>,
    chooser: Box<dyn IntentChooser>,
}

impl Session {
    pub fn new(script: impl Into<Arc<Script>>, options: SessionOptions) -> Self {
        let chooser: Box<dyn IntentChooser> = match options.random_seed {
            Some(seed) => Box::new(SeededChooser::new(seed)),
            None => Box::new(RandomChooser),
        };
        let adapters: Arc<dyn AdapterFactory> = match options.adapters {
            Some(adapters) => adapters,
            None => Arc::new(DefaultAdapterFactory::default()),
        };
        Self {
            script: script.into(),
            environment: Environment::new(),
            checkpoint: Checkpoint::Fresh,
            resources: ResourceTable::new(),
            adapters,
            chooser,
        }
    }

    pub fn resume(
        script: impl Into<Arc<Script>>,
        state: SessionState,
        options: SessionOptions,
    ) -> Result<Self, IntentError> {
        if state.schema_version != SESSION_STATE_SCHEMA {
            return Err(IntentError::invalid_state(
                "SESSION_STATE_SCHEMA",
                format!(
                    "Unsupported session state schema \"{}\", expected \"{}\".",
                    state.schema_version, SESSION_STATE_SCHEMA
                ),
            ));
        }
        let mut session = Self::new(script, options);
        session.environment = state.environment;
        session.checkpoint = state.checkpoint;
        debug!(
            checkpoint = i64::from(session.checkpoint),
            bindings = session.environment.len(),
            "session resumed"
        );
        Ok(session)
    }

    /// Runs one turn. Environment and checkpoint change only when the turn
    /// succeeds; adapter side effects already performed are not undone.
    pub fn turn(
        &mut self,
        message: &str,
        slots: &[Slot],
    ) -> Result<Option<TurnResult>, IntentError> {
        let mut working = self.environment.clone();
        let outcome = Interpreter::new(TurnContext {
            script: Arc::clone(&self.script),
            message,
            slots,
            environment: &mut working,
            checkpoint: self.checkpoint,
            resources: &mut self.resources,
            adapters: self.adapters.as_ref(),
            chooser: self.chooser.as_mut(),
        })
        .interpret();

        match outcome {
            Ok(result) => {
                self.environment = working;
                self.checkpoint = result
                    .as_ref()
                    .map(|result| Checkpoint::At(result.checkpoint))
                    .unwrap_or_default();
                Ok(result)
            }
            Err(error) => {
                warn!(code = %error.code, node = ?error.node, "turn failed");
                Err(error)
            }
        }
    }

    pub fn snapshot(&self) -> SessionState {
        SessionState {
            schema_version: SESSION_STATE_SCHEMA.to_string(),
            environment: self.environment.clone(),
            checkpoint: self.checkpoint,
        }
    }

    /// Back to a fresh conversation: empty environment, no checkpoint, no
    /// live adapters.
    pub fn reset(&mut self) {
        self.environment = Environment::new();
        self.checkpoint = Checkpoint::Fresh;
        self.resources = ResourceTable::new();
    }

    pub fn checkpoint(&self) -> Checkpoint {
        self.checkpoint
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn script(&self) -> &Arc<Script> {
        &self.script
    }
}

pub fn load_script_from_json(source: &str) -> Result<Script, IntentError> {
    serde_json::from_str(source).map_err(|error| {
        IntentError::invalid_state(
            "API_SCRIPT_JSON_INVALID",
            format!("Failed to parse intent script: {}", error),
        )
    })
}

pub fn script_to_json(script: &Script) -> Result<String, IntentError> {
    serde_json::to_string_pretty(script).map_err(|error| {
        IntentError::invalid_state(
            "API_SCRIPT_JSON_ENCODE",
            format!("Failed to encode intent script: {}", error),
        )
    })
}
