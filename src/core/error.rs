use thiserror::Error;

use crate::toolkit::ToolkitError;

/// Errors that can occur while building a UI from configuration.
#[derive(Debug, Error, PartialEq)]
pub enum BuildError {
    /// Type tag missing, not a string, or unknown to the toolkit.
    #[error("Invalid widget type: {}", .0.as_deref().unwrap_or("<missing>"))]
    InvalidWidgetType(Option<String>),
    /// `styles` is not an object.
    #[error("Styles must be an object, found {0}")]
    InvalidStyles(String),
    /// `data` is not an array.
    #[error("Data must be an array, found {0}")]
    InvalidData(String),
    /// `items` is not an array of config objects.
    #[error("Invalid items: {0}")]
    InvalidItems(String),
    /// `onClick` is malformed.
    #[error("Invalid handler: {0}")]
    InvalidHandler(String),
    /// Simple property with an empty key.
    #[error("Property keys must not be empty")]
    EmptyPropertyKey,
    /// Failure reported by the toolkit.
    #[error("Toolkit error: {0}")]
    Toolkit(#[from] ToolkitError),
}
