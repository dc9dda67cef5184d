//! Widget creation
//!
//! Two paths lead to a widget:
//! - The generic path asks the toolkit for a creation capability named by
//!   the type tag, then applies the whole config to the new widget.
//! - The composite form path (reserved tag, `HorizontalForm` by default)
//!   lays rows out in a two-column grid: labels on the left, fields on the
//!   right.

use serde_json::{Map, Value};

use crate::core::error::BuildError;
use crate::core::properties::BuildContext;
use crate::core::types::{display_text, json_kind, FIELD_LABEL, ID, ITEMS, NAME};
use crate::toolkit::{Toolkit, WidgetId};

impl<T: Toolkit> BuildContext<'_, T> {
    /// Creates and fully configures the widget described by `config`.
    ///
    /// Returns `Ok(None)` only for a composite form without `items`.
    ///
    /// # Errors
    ///
    /// Returns `BuildError::InvalidWidgetType` when the type tag is missing,
    /// not a string, or unknown to the toolkit, plus anything raised while
    /// applying properties.
    pub fn create_widget(
        &mut self,
        config: &Map<String, Value>,
    ) -> Result<Option<WidgetId>, BuildError> {
        let widget_type = match config.get(&self.options.type_key) {
            Some(Value::String(widget_type)) => widget_type.as_str(),
            Some(other) => return Err(BuildError::InvalidWidgetType(Some(other.to_string()))),
            None => return Err(BuildError::InvalidWidgetType(None)),
        };

        if widget_type == self.options.form_type {
            return self.create_form(config);
        }

        let widget = self
            .toolkit
            .create_widget(widget_type)
            .ok_or_else(|| BuildError::InvalidWidgetType(Some(widget_type.to_string())))?;
        log::debug!("Created {} as {}", widget_type, widget);

        self.apply_properties(widget, config).map(Some)
    }

    /// Builds a rows x 2 grid from the form's `items`.
    ///
    /// Per row: `name` defaults to `id`; `fieldLabel` goes to column 0; a
    /// row with a type tag is built (with `id` defaulting to `name`) and
    /// placed in column 1. A row may be label-only, field-only or both.
    fn create_form(&mut self, config: &Map<String, Value>) -> Result<Option<WidgetId>, BuildError> {
        let Some(items) = config.get(ITEMS) else {
            log::debug!("Form without items, nothing to build");
            return Ok(None);
        };
        let Value::Array(rows) = items else {
            return Err(BuildError::InvalidItems(format!(
                "form items must be an array, found {}",
                json_kind(items)
            )));
        };

        let grid = self.toolkit.create_grid(rows.len(), 2);
        if let Some(Value::String(id)) = config.get(ID) {
            self.toolkit.set_id(grid, id)?;
        }

        for (index, row) in rows.iter().enumerate() {
            let Value::Object(row) = row else {
                return Err(BuildError::InvalidItems(format!(
                    "form row {} must be an object, found {}",
                    index,
                    json_kind(row)
                )));
            };
            let mut row = row.clone();

            if is_unset(&row, NAME) {
                if let Some(id) = row.get(ID).filter(|id| !id.is_null()).cloned() {
                    row.insert(NAME.to_string(), id);
                }
            }

            if let Some(label) = row.get(FIELD_LABEL) {
                self.toolkit
                    .set_cell_text(grid, index, 0, &display_text(label))?;
            }

            if row.contains_key(&self.options.type_key) {
                if !is_unset(&row, NAME) && is_unset(&row, ID) {
                    if let Some(name) = row.get(NAME).cloned() {
                        row.insert(ID.to_string(), name);
                    }
                }
                if let Some(field) = self.create_widget(&row)? {
                    self.toolkit.set_cell_widget(grid, index, 1, field)?;
                }
            }
        }

        log::debug!("Created form {} with {} rows", grid, rows.len());
        Ok(Some(grid))
    }
}

/// Absent, `null`, `false` or an empty string.
fn is_unset(row: &Map<String, Value>, key: &str) -> bool {
    match row.get(key) {
        None | Some(Value::Null) | Some(Value::Bool(false)) => true,
        Some(Value::String(text)) => text.is_empty(),
        Some(_) => false,
    }
}
