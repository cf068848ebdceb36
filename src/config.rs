use crate::error::{Error, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Default location of the generated cluster configuration.
pub const DEFAULT_CONFIG_FILE: &str = "kubeprod-autogen.json";

fn file_error(path: &Path) -> impl FnOnce(std::io::Error) -> Error + '_ {
    move |source| Error::ConfigFile { path: path.to_path_buf(), source }
}

/// Loads the configuration persisted by a previous install.
///
/// Returns `Ok(None)` when the file does not exist yet.
pub fn load_persisted(path: &Path) -> Result<Option<Value>> {
    if !path.exists() {
        return Ok(None);
    }
    let data = fs::read_to_string(path).map_err(file_error(path))?;
    if data.trim().is_empty() {
        return Ok(None);
    }
    let value: Value = serde_json::from_str(&data)
        .map_err(|source| Error::ConfigFormat { path: path.to_path_buf(), source })?;
    Ok(Some(value))
}

pub fn write_persisted(path: &Path, value: &Value) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(file_error(parent))?;
        }
    }
    let mut data = serde_json::to_string_pretty(value)?;
    data.push('\n');
    fs::write(path, data).map_err(file_error(path))?;
    Ok(())
}
