//! Resource dispatch contract and the session-owned adapter side table.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use intent_core::{
    IntentError, NodeId, OperationOutput, PropertySet, ResourceHandle, ResourceKind, UserReply,
    Value,
};
use tracing::debug;

pub mod array_ops;
mod file;
mod kv_store;
mod responder;
pub mod string_ops;

pub use file::FileResource;
pub use kv_store::KeyValueStore;
pub use responder::Responder;

/// A live external resource reachable from a script.
pub trait ResourceAdapter: Send {
    fn update_properties(&mut self, properties: &PropertySet);

    fn execute_operation(
        &mut self,
        operation: &str,
    ) -> Result<Option<OperationOutput>, IntentError>;

    /// Interpret the current turn as the answer to a request this adapter
    /// issued on the previous turn. `None` when the adapter never asks.
    fn resolve_answer(&self, _reply: &UserReply<'_>) -> Option<Value> {
        None
    }
}

pub trait AdapterFactory: Send + Sync {
    fn create(
        &self,
        resource: ResourceKind,
        properties: &PropertySet,
    ) -> Result<Box<dyn ResourceAdapter>, IntentError>;
}

#[derive(Debug, Clone, Default)]
pub struct DefaultAdapterFactory {
    file_root: Option<PathBuf>,
}

impl DefaultAdapterFactory {
    /// Relative file paths resolve under `root`.
    pub fn with_file_root(root: impl Into<PathBuf>) -> Self {
        Self {
            file_root: Some(root.into()),
        }
    }
}

impl AdapterFactory for DefaultAdapterFactory {
    fn create(
        &self,
        resource: ResourceKind,
        properties: &PropertySet,
    ) -> Result<Box<dyn ResourceAdapter>, IntentError> {
        Ok(match resource {
            ResourceKind::Responder => Box::new(Responder::from_properties(properties)),
            ResourceKind::KeyValueStore => Box::new(KeyValueStore::from_properties(properties)),
            ResourceKind::File => Box::new(FileResource::from_properties(
                self.file_root.clone(),
                properties,
            )),
        })
    }
}

struct ResourceEntry {
    added: PropertySet,
    adapter: Box<dyn ResourceAdapter>,
}

/// Adapters keyed by the system-operand node that declared them. One table
/// per session; the AST itself stays immutable.
#[derive(Default)]
pub struct ResourceTable {
    entries: HashMap<NodeId, ResourceEntry>,
}

impl fmt::Debug for ResourceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut nodes = self.entries.keys().collect::<Vec<_>>();
        nodes.sort();
        f.debug_struct("ResourceTable")
            .field("nodes", &nodes)
            .finish()
    }
}

impl ResourceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.entries.contains_key(&node)
    }

    /// The adapter for `handle`, created on first use and refreshed with the
    /// declared properties (overlaid by added ones) on every later use.
    pub fn resolve(
        &mut self,
        handle: &ResourceHandle,
        factory: &dyn AdapterFactory,
    ) -> Result<&mut dyn ResourceAdapter, IntentError> {
        match self.entries.entry(handle.node) {
            Entry::Occupied(occupied) => {
                let entry = occupied.into_mut();
                let merged = merge_properties(&handle.properties, &entry.added);
                entry.adapter.update_properties(&merged);
                Ok(entry.adapter.as_mut())
            }
            Entry::Vacant(vacant) => {
                let adapter = factory.create(handle.resource, &handle.properties)?;
                debug!(
                    node = %handle.node,
                    resource = handle.resource.name(),
                    "created resource adapter"
                );
                let entry = vacant.insert(ResourceEntry {
                    added: PropertySet::new(),
                    adapter,
                });
                Ok(entry.adapter.as_mut())
            }
        }
    }

    pub fn add_property(
        &mut self,
        handle: &ResourceHandle,
        name: &str,
        value: Value,
        factory: &dyn AdapterFactory,
    ) -> Result<(), IntentError> {
        self.resolve(handle, factory)?;
        let Some(entry) = self.entries.get_mut(&handle.node) else {
            return Ok(());
        };
        entry.added.insert(name.to_string(), value);
        let merged = merge_properties(&handle.properties, &entry.added);
        entry.adapter.update_properties(&merged);
        Ok(())
    }
}

fn merge_properties(declared: &PropertySet, added: &PropertySet) -> PropertySet {
    let mut merged = declared.clone();
    for (name, value) in added {
        merged.insert(name.clone(), value.clone());
    }
    merged
}

pub(crate) fn text_property(properties: &PropertySet, name: &str) -> Option<String> {
    properties.get(name).filter(|value| !value.is_null()).map(|value| value.to_string())
}
