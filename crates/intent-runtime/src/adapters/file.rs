use std::fs;
use std::io::Write;
use std::path::PathBuf;

use intent_core::{ActionKind, IntentError, OperationOutput, PropertySet, ResourceKind};
use tracing::debug;

use super::{text_property, ResourceAdapter};

#[derive(Debug, Clone, PartialEq)]
pub struct FileResource {
    root: Option<PathBuf>,
    path: Option<String>,
    content: String,
}

impl FileResource {
    pub fn from_properties(root: Option<PathBuf>, properties: &PropertySet) -> Self {
        let mut file = Self {
            root,
            path: None,
            content: String::new(),
        };
        file.update_properties(properties);
        file
    }

    fn resolved_path(&self, operation: &str) -> Result<PathBuf, IntentError> {
        let Some(raw) = self.path.as_deref() else {
            return Err(failure(operation, "no path property declared"));
        };
        let path = PathBuf::from(raw);
        Ok(match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path,
        })
    }
}

fn failure(operation: &str, reason: impl std::fmt::Display) -> IntentError {
    IntentError::adapter_failure(ResourceKind::File.name(), operation, reason)
}

impl ResourceAdapter for FileResource {
    fn update_properties(&mut self, properties: &PropertySet) {
        self.path = text_property(properties, "path");
        self.content = text_property(properties, "content").unwrap_or_default();
    }

    fn execute_operation(
        &mut self,
        operation: &str,
    ) -> Result<Option<OperationOutput>, IntentError> {
        let path = self.resolved_path(operation)?;
        debug!(path = %path.display(), operation, "file operation");
        match operation {
            "read" => {
                let text = fs::read_to_string(&path).map_err(|error| failure(operation, error))?;
                Ok(Some(OperationOutput::new(text, ActionKind::Get)))
            }
            "write" => {
                fs::write(&path, &self.content).map_err(|error| failure(operation, error))?;
                Ok(None)
            }
            "append" => {
                let mut file = fs::OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&path)
                    .map_err(|error| failure(operation, error))?;
                file.write_all(self.content.as_bytes())
                    .map_err(|error| failure(operation, error))?;
                Ok(None)
            }
            "exists" => Ok(Some(OperationOutput::new(
                path.exists().to_string(),
                ActionKind::Get,
            ))),
            other => Err(failure(other, "unsupported operation")),
        }
    }
}

#[cfg(test)]
mod file_tests {
    use super::*;
    use intent_core::Value;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_dir(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time should be monotonic")
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("intent-file-{}-{}", name, nanos));
        fs::create_dir_all(&dir).expect("temp dir should be created");
        dir
    }

    fn props(path: &str, content: &str) -> PropertySet {
        PropertySet::from([
            ("path".to_string(), Value::from(path)),
            ("content".to_string(), Value::from(content)),
        ])
    }

    #[test]
    fn write_append_read_under_root() {
        let root = temp_dir("rw");
        let mut file = FileResource::from_properties(Some(root.clone()), &props("notes.txt", "a"));
        file.execute_operation("write").expect("write");
        file.update_properties(&props("notes.txt", "b"));
        file.execute_operation("append").expect("append");

        let output = file.execute_operation("read").expect("read");
        assert_eq!(output, Some(OperationOutput::new("ab", ActionKind::Get)));
        assert!(root.join("notes.txt").exists());
        let _ = fs::remove_dir_all(root);
    }

    #[test]
    fn missing_file_read_is_adapter_failure() {
        let root = temp_dir("missing");
        let mut file = FileResource::from_properties(Some(root.clone()), &props("absent.txt", ""));
        let exists = file.execute_operation("exists").expect("exists");
        assert_eq!(exists.map(|output| output.text), Some("false".to_string()));
        let error = file.execute_operation("read").expect_err("read should fail");
        assert_eq!(error.code, "ADAPTER_OPERATION_FAILED");
        let _ = fs::remove_dir_all(root);
    }
}
