// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Build options and config file I/O.
//!
//! - **Options**: `BuildOptions` names the type-tag key and the reserved
//!   composite-form tag
//! - **Loading**: widget configs are read from JSON files, `~` and
//!   environment variables expanded in the path
//! - **Output**: results are written with temp-file-then-rename so a
//!   failed write never leaves a truncated file behind
//!
//! # Example
//!
//! ```no_run
//! use uibot::config::{load_widget_config, write_output};
//!
//! let config = load_widget_config("~/.config/uibot/settings.json")?;
//! println!("{} root properties", config.properties().len());
//! write_output("/tmp/settings.snapshot.json", "{}")?;
//! # Ok::<(), uibot::config::ConfigError>(())
//! ```

mod error;

pub use error::ConfigError;

use atomic_write_file::AtomicWriteFile;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::core::types::json_kind;
use crate::core::WidgetConfig;

/// Default key holding a node's widget type.
pub const DEFAULT_TYPE_KEY: &str = "type";
/// Type key used by older config files.
pub const LEGACY_TYPE_KEY: &str = "wType";
/// Default tag of the composite form.
pub const DEFAULT_FORM_TYPE: &str = "HorizontalForm";

/// Knobs for one build session.
///
/// Missing fields fall back to their defaults when deserialised.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct BuildOptions {
    /// Key whose value names the widget type of a node
    pub type_key: String,
    /// Type tag reserved for the two-column composite form
    pub form_type: String,
}

impl BuildOptions {
    /// Options for configs tagged with `wType`.
    pub fn legacy() -> Self {
        Self {
            type_key: LEGACY_TYPE_KEY.to_string(),
            ..Self::default()
        }
    }
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            type_key: DEFAULT_TYPE_KEY.to_string(),
            form_type: DEFAULT_FORM_TYPE.to_string(),
        }
    }
}

/// Expands `~` and `$VAR` references in a user-supplied path.
///
/// # Errors
///
/// Returns `ConfigError::InvalidPath` for an undefined variable.
pub fn expand_path(path: &str) -> Result<PathBuf, ConfigError> {
    let expanded = shellexpand::full(path).map_err(|e| ConfigError::InvalidPath {
        path: path.to_string(),
        reason: e.to_string(),
    })?;
    Ok(PathBuf::from(expanded.as_ref()))
}

/// Reads a widget config from a JSON file.
///
/// # Errors
///
/// Returns an error if:
/// - The file does not exist (`NotFound`)
/// - The file is not valid JSON (`Parse`)
/// - The document root is not an object (`NotAnObject`)
pub fn load_widget_config(path: &str) -> Result<WidgetConfig, ConfigError> {
    let path = expand_path(path)?;
    if !path.exists() {
        return Err(ConfigError::NotFound(path));
    }

    let content = fs::read_to_string(&path)?;
    let config = parse_widget_config(&content).map_err(|e| match e {
        ConfigError::Parse { source, .. } => ConfigError::Parse {
            path: path.clone(),
            source,
        },
        other => other,
    })?;

    log::debug!(
        "Loaded {} ({} root properties)",
        path.display(),
        config.properties().len()
    );
    Ok(config)
}

/// Parses a widget config from JSON text, keeping key order.
pub fn parse_widget_config(content: &str) -> Result<WidgetConfig, ConfigError> {
    let value: Value = serde_json::from_str(content).map_err(|source| ConfigError::Parse {
        path: PathBuf::new(),
        source,
    })?;

    match value {
        Value::Object(map) => Ok(WidgetConfig::from(map)),
        other => Err(ConfigError::NotAnObject(json_kind(&other))),
    }
}

/// Writes `content` to `path` atomically.
///
/// # Errors
///
/// Returns `ConfigError::WriteFailed` when the temp file cannot be opened,
/// written or renamed into place.
pub fn write_output(path: impl AsRef<Path>, content: &str) -> Result<(), ConfigError> {
    let path = path.as_ref();

    let mut file = AtomicWriteFile::options()
        .open(path)
        .map_err(|e| ConfigError::WriteFailed(format!("Failed to open for atomic write: {}", e)))?;

    file.write_all(content.as_bytes())
        .map_err(|e| ConfigError::WriteFailed(format!("Failed to write content: {}", e)))?;

    file.commit()
        .map_err(|e| ConfigError::WriteFailed(format!("Failed to commit atomic write: {}", e)))?;

    log::debug!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests;
