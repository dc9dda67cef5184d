//! Property application
//!
//! Every config node is applied to its widget key by key, in insertion
//! order. Four keys are structural and handled here:
//! - `data`: selection entries, with `selected` as the default value
//! - `styles`: style attributes
//! - `items`: child widgets, built recursively
//! - `onClick`: event bindings, deferred until finalize
//!
//! Everything else goes through the generic setter, which maps `key` to
//! the widget's `setKey` capability and skips keys the widget lacks.

use serde_json::{Map, Value};

use crate::config::BuildOptions;
use crate::core::error::BuildError;
use crate::core::handlers::PendingHandlers;
use crate::core::types::{
    display_text, json_kind, values_equal, EventKind, HandlerConfig, PendingHandler, Property,
    SELECTED,
};
use crate::toolkit::{Toolkit, WidgetId};

/// State threaded through one recursive build.
///
/// The pending-handler accumulator is passed in explicitly so the
/// collect phase never reaches the toolkit's handler API.
pub struct BuildContext<'a, T: Toolkit> {
    pub toolkit: &'a mut T,
    pub pending: &'a mut PendingHandlers,
    pub options: &'a BuildOptions,
}

impl<'a, T: Toolkit> BuildContext<'a, T> {
    pub fn new(
        toolkit: &'a mut T,
        pending: &'a mut PendingHandlers,
        options: &'a BuildOptions,
    ) -> Self {
        Self {
            toolkit,
            pending,
            options,
        }
    }

    /// Applies every property of `properties` to `widget`.
    ///
    /// Returns the same widget for chaining.
    ///
    /// # Errors
    ///
    /// Propagates malformed structural values, nested widget-type errors
    /// and toolkit failures. Unknown simple properties are not errors.
    pub fn apply_properties(
        &mut self,
        widget: WidgetId,
        properties: &Map<String, Value>,
    ) -> Result<WidgetId, BuildError> {
        for (key, value) in properties {
            match Property::classify(key, value) {
                Property::Data(data) => self.bind_data(widget, data, properties.get(SELECTED))?,
                Property::Styles(styles) => self.bind_styles(widget, styles)?,
                Property::Items(items) => self.create_children(widget, items)?,
                Property::OnClick(binding) => {
                    self.pending.push(PendingHandler {
                        widget,
                        event: EventKind::Click,
                        config: HandlerConfig::from_value(binding)?,
                    });
                }
                Property::Selected => {}
                Property::Simple(key, value) => self.set_simple_property(widget, key, value)?,
            }
        }
        Ok(widget)
    }

    /// Builds each child config and appends it to `widget`, in order.
    fn create_children(&mut self, widget: WidgetId, items: &Value) -> Result<(), BuildError> {
        let Value::Array(children) = items else {
            return Err(BuildError::InvalidItems(format!(
                "expected an array, found {}",
                json_kind(items)
            )));
        };

        for child in children {
            let Value::Object(config) = child else {
                return Err(BuildError::InvalidItems(format!(
                    "expected a widget config object, found {}",
                    json_kind(child)
                )));
            };
            if let Some(child) = self.create_widget(config)? {
                self.toolkit.add_child(widget, child)?;
            }
        }
        Ok(())
    }

    /// Adds one item per `data` entry and selects the entries equal to
    /// `default`. With several matches the last one ends up selected.
    ///
    /// A two-element array is `[label, value]`; any other entry is used as
    /// both label and value.
    pub fn bind_data(
        &mut self,
        widget: WidgetId,
        data: &Value,
        default: Option<&Value>,
    ) -> Result<(), BuildError> {
        let Value::Array(entries) = data else {
            return Err(BuildError::InvalidData(json_kind(data).to_string()));
        };

        for (index, entry) in entries.iter().enumerate() {
            let (label, value) = match entry {
                Value::Array(pair) if pair.len() == 2 => (&pair[0], &pair[1]),
                _ => (entry, entry),
            };
            self.toolkit.add_item(widget, &display_text(label), value)?;
            if default.is_some_and(|default| values_equal(value, default)) {
                self.toolkit.set_selected_index(widget, index)?;
            }
        }
        Ok(())
    }

    /// Applies each style attribute. Nothing is applied unless `styles`
    /// is an object.
    pub fn bind_styles(&mut self, widget: WidgetId, styles: &Value) -> Result<(), BuildError> {
        let Value::Object(styles) = styles else {
            return Err(BuildError::InvalidStyles(json_kind(styles).to_string()));
        };

        for (name, value) in styles {
            self.toolkit.set_style_attribute(widget, name, value)?;
        }
        Ok(())
    }

    /// Calls `set<Key>` on the widget if it has such a setter.
    ///
    /// Arrays are spread into positional arguments, so
    /// `"size": ["100px", "20px"]` becomes `setSize("100px", "20px")`.
    pub fn set_simple_property(
        &mut self,
        widget: WidgetId,
        key: &str,
        value: &Value,
    ) -> Result<(), BuildError> {
        let name = setter_name(key)?;
        let Some(setter) = self.toolkit.setter(widget, &name) else {
            log::trace!("No {} on widget {}, skipping '{}'", name, widget, key);
            return Ok(());
        };

        let args = match value {
            Value::Array(args) => args.as_slice(),
            single => std::slice::from_ref(single),
        };
        setter(&mut *self.toolkit, widget, args)?;
        Ok(())
    }
}

/// `"text"` → `"setText"`.
///
/// # Errors
///
/// Returns `BuildError::EmptyPropertyKey` for an empty key.
pub fn setter_name(key: &str) -> Result<String, BuildError> {
    let mut chars = key.chars();
    let first = chars.next().ok_or(BuildError::EmptyPropertyKey)?;
    Ok(format!("set{}{}", first.to_uppercase(), chars.as_str()))
}
