use std::collections::BTreeMap;

use intent_core::{ActionKind, IntentError, OperationOutput, PropertySet, ResourceKind, Value};

use super::{text_property, ResourceAdapter};

/// In-process key/value store. Entries live as long as the owning session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyValueStore {
    key: Option<String>,
    value: Value,
    entries: BTreeMap<String, Value>,
}

impl KeyValueStore {
    pub fn from_properties(properties: &PropertySet) -> Self {
        let mut store = Self::default();
        store.update_properties(properties);
        store
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    fn require_key(&self, operation: &str) -> Result<String, IntentError> {
        self.key.clone().ok_or_else(|| {
            IntentError::adapter_failure(
                ResourceKind::KeyValueStore.name(),
                operation,
                "no key property declared",
            )
        })
    }
}

impl ResourceAdapter for KeyValueStore {
    fn update_properties(&mut self, properties: &PropertySet) {
        self.key = text_property(properties, "key");
        self.value = properties.get("value").cloned().unwrap_or_default();
    }

    fn execute_operation(
        &mut self,
        operation: &str,
    ) -> Result<Option<OperationOutput>, IntentError> {
        let key = self.require_key(operation)?;
        match operation {
            "set" | "save" => {
                self.entries.insert(key, self.value.clone());
                Ok(None)
            }
            "get" => Ok(self
                .entries
                .get(&key)
                .map(|value| OperationOutput::new(value.to_string(), ActionKind::Get))),
            "delete" => {
                self.entries.remove(&key);
                Ok(None)
            }
            "exists" => Ok(Some(OperationOutput::new(
                self.entries.contains_key(&key).to_string(),
                ActionKind::Get,
            ))),
            other => Err(IntentError::adapter_failure(
                ResourceKind::KeyValueStore.name(),
                other,
                "unsupported operation",
            )),
        }
    }
}
