use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use intent_api::load_script_from_json;
use intent_core::IntentError;
use tracing::debug;
use walkdir::WalkDir;

use crate::{host_error, LoadedIntent, INTENT_FILE_SUFFIX};

pub(crate) fn resolve_scripts_dir(scripts_dir: &str) -> Result<PathBuf, IntentError> {
    let path = PathBuf::from(scripts_dir);
    if !path.exists() {
        return Err(IntentError::host(
            "CLI_SOURCE_NOT_FOUND",
            format!("scripts-dir does not exist: {}", path.display()),
        ));
    }
    if !path.is_dir() {
        return Err(IntentError::host(
            "CLI_SOURCE_NOT_DIR",
            format!("scripts-dir is not a directory: {}", path.display()),
        ));
    }
    path.canonicalize().map_err(host_error("CLI_SOURCE_PATH"))
}

/// Finds every `NAME.intent.json` below `root`, keyed by `NAME`. When two
/// files share a name the first in walk order wins.
pub(crate) fn find_intent_files(root: &Path) -> Result<BTreeMap<String, PathBuf>, IntentError> {
    let mut files = BTreeMap::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(host_error("CLI_SOURCE_SCAN"))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(file_name) = entry.file_name().to_str() else {
            continue;
        };
        let Some(name) = file_name.strip_suffix(INTENT_FILE_SUFFIX) else {
            continue;
        };
        if name.is_empty() {
            continue;
        }
        files
            .entry(name.to_string())
            .or_insert_with(|| entry.path().to_path_buf());
    }

    if files.is_empty() {
        return Err(IntentError::host(
            "CLI_SOURCE_EMPTY",
            format!(
                "No *{} files found under {}",
                INTENT_FILE_SUFFIX,
                root.display()
            ),
        ));
    }
    Ok(files)
}

pub(crate) fn load_intent(scripts_dir: &str, name: &str) -> Result<LoadedIntent, IntentError> {
    let root = resolve_scripts_dir(scripts_dir)?;
    let files = find_intent_files(&root)?;
    let Some(path) = files.get(name) else {
        return Err(IntentError::host(
            "CLI_INTENT_NOT_FOUND",
            format!(
                "Intent script \"{}\" not found. Available: {}",
                name,
                files.keys().cloned().collect::<Vec<_>>().join(", ")
            ),
        ));
    };

    let source = fs::read_to_string(path).map_err(host_error("CLI_SOURCE_READ"))?;
    let script = load_script_from_json(&source)?;
    debug!(intent = name, path = %path.display(), "intent script loaded");
    Ok(LoadedIntent {
        id: make_script_id(path),
        name: name.to_string(),
        path: path.clone(),
        script,
    })
}

pub(crate) fn make_script_id(path: &Path) -> String {
    format!("intent:{}", path.display())
}
