//! src/core/types.rs
//!
//! Core type definitions for declarative UI building
//!
//! This module defines the values that flow through a build:
//! - `WidgetConfig`: one node of the declarative configuration tree
//! - `Property`: classification of a single `(key, value)` pair
//! - `HandlerConfig` / `HandlerAction`: parsed `onClick` bindings
//! - `PendingHandler`: a binding collected during build, awaiting finalize
//!
//! Configs are JSON objects. Key order is significant (properties are
//! applied and handlers attached in insertion order), which relies on
//! serde_json's `preserve_order` feature.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::core::error::BuildError;
use crate::toolkit::WidgetId;

/// Structural key: selection entries
pub const DATA: &str = "data";
/// Structural key: style attributes
pub const STYLES: &str = "styles";
/// Structural key: child configs
pub const ITEMS: &str = "items";
/// Structural key: click bindings
pub const ON_CLICK: &str = "onClick";
/// Default for `data`, never applied on its own
pub const SELECTED: &str = "selected";
pub const ID: &str = "id";
pub const NAME: &str = "name";
/// Label text of a composite form row
pub const FIELD_LABEL: &str = "fieldLabel";
/// Widget read by a `callback` handler
pub const CB_ELEMENT_ID: &str = "cbElementId";

/// One node of the configuration tree.
///
/// A thin wrapper over a JSON object. Besides the structural keys, any
/// key is a simple property routed to the widget's `set*` setters.
///
/// # Example
/// ```
/// use serde_json::json;
/// use uibot::core::WidgetConfig;
///
/// let config = WidgetConfig::from_value(json!({
///     "type": "Button",
///     "id": "go",
///     "text": "Go"
/// }))?;
/// assert_eq!(config.widget_type("type"), Some("Button"));
/// assert_eq!(config.id(), Some("go"));
/// # Ok::<(), uibot::core::BuildError>(())
/// ```
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(transparent)]
pub struct WidgetConfig(Map<String, Value>);

impl WidgetConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a JSON value, which must be an object.
    pub fn from_value(value: Value) -> Result<Self, BuildError> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(BuildError::InvalidItems(format!(
                "expected a widget config object, found {}",
                json_kind(&other)
            ))),
        }
    }

    pub fn properties(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Sets a property, keeping its position if the key already exists.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> &mut Self {
        self.0.insert(key.into(), value);
        self
    }

    /// Type tag stored under `type_key`, if it is a string.
    pub fn widget_type(&self, type_key: &str) -> Option<&str> {
        self.0.get(type_key).and_then(Value::as_str)
    }

    pub fn id(&self) -> Option<&str> {
        self.0.get(ID).and_then(Value::as_str)
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for WidgetConfig {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Classification of one property of a config node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Property<'a> {
    Data(&'a Value),
    Styles(&'a Value),
    Items(&'a Value),
    OnClick(&'a Value),
    /// Consumed by `Data`; ignored when seen on its own
    Selected,
    /// Routed to the generic `set*` setter
    Simple(&'a str, &'a Value),
}

impl<'a> Property<'a> {
    pub fn classify(key: &'a str, value: &'a Value) -> Self {
        match key {
            DATA => Property::Data(value),
            STYLES => Property::Styles(value),
            ITEMS => Property::Items(value),
            ON_CLICK => Property::OnClick(value),
            SELECTED => Property::Selected,
            _ => Property::Simple(key, value),
        }
    }
}

/// UI event a handler is bound to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Click,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Click => write!(f, "click"),
        }
    }
}

/// One action of an event binding.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum HandlerAction {
    /// Make the targets visible
    Show(Vec<String>),
    /// Hide the targets
    Hide(Vec<String>),
    /// Enable the targets
    Enable(Vec<String>),
    /// Disable the targets
    Disable(Vec<String>),
    /// Invoke a server-side callback, optionally sending an element's value
    Callback {
        callback: String,
        element_id: Option<String>,
    },
}

impl HandlerAction {
    /// Config key this action was parsed from.
    pub fn key(&self) -> &'static str {
        match self {
            HandlerAction::Show(_) => "show",
            HandlerAction::Hide(_) => "hide",
            HandlerAction::Enable(_) => "enable",
            HandlerAction::Disable(_) => "disable",
            HandlerAction::Callback { .. } => "callback",
        }
    }
}

/// Parsed event binding, actions kept in config key order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct HandlerConfig {
    actions: Vec<HandlerAction>,
}

impl HandlerConfig {
    /// Parses an `onClick` object.
    ///
    /// Recognised keys: `show`, `hide`, `enable`, `disable` (a target id or
    /// an array of ids) and `callback` (a callback name, paired with the
    /// optional `cbElementId`). Other keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns `BuildError::InvalidHandler` when the value is not an object
    /// or a recognised key carries the wrong kind of value.
    pub fn from_value(value: &Value) -> Result<Self, BuildError> {
        let Value::Object(map) = value else {
            return Err(BuildError::InvalidHandler(format!(
                "expected an object, found {}",
                json_kind(value)
            )));
        };

        let element_id = match map.get(CB_ELEMENT_ID) {
            None => None,
            Some(Value::String(id)) => Some(id.clone()),
            Some(other) => {
                return Err(BuildError::InvalidHandler(format!(
                    "{} must be a string, found {}",
                    CB_ELEMENT_ID,
                    json_kind(other)
                )))
            }
        };

        let mut actions = Vec::new();
        for (key, value) in map {
            let action = match key.as_str() {
                "show" => HandlerAction::Show(target_ids(key, value)?),
                "hide" => HandlerAction::Hide(target_ids(key, value)?),
                "enable" => HandlerAction::Enable(target_ids(key, value)?),
                "disable" => HandlerAction::Disable(target_ids(key, value)?),
                "callback" => match value {
                    Value::String(callback) => HandlerAction::Callback {
                        callback: callback.clone(),
                        element_id: element_id.clone(),
                    },
                    other => {
                        return Err(BuildError::InvalidHandler(format!(
                            "callback must be a string, found {}",
                            json_kind(other)
                        )))
                    }
                },
                CB_ELEMENT_ID => continue,
                unknown => {
                    log::debug!("Ignoring unknown handler key '{}'", unknown);
                    continue;
                }
            };
            actions.push(action);
        }

        Ok(Self { actions })
    }

    pub fn actions(&self) -> &[HandlerAction] {
        &self.actions
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Single id or array of ids.
fn target_ids(key: &str, value: &Value) -> Result<Vec<String>, BuildError> {
    match value {
        Value::String(id) => Ok(vec![id.clone()]),
        Value::Array(ids) => ids
            .iter()
            .map(|id| {
                id.as_str().map(str::to_string).ok_or_else(|| {
                    BuildError::InvalidHandler(format!(
                        "{} targets must be string ids, found {}",
                        key,
                        json_kind(id)
                    ))
                })
            })
            .collect(),
        other => Err(BuildError::InvalidHandler(format!(
            "{} expects an id or an array of ids, found {}",
            key,
            json_kind(other)
        ))),
    }
}

/// Event binding collected during build.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingHandler {
    /// Widget the handlers will be attached to
    pub widget: WidgetId,
    pub event: EventKind,
    pub config: HandlerConfig,
}

/// JSON kind name, for error messages.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Text rendering of a scalar: strings verbatim, `null` as empty.
pub fn display_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Value equality where numbers compare numerically (`1 == 1.0`).
pub fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(a), Some(b)) => a == b,
            _ => a == b,
        },
        _ => left == right,
    }
}
