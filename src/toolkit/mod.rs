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

//! src/toolkit/mod.rs
//!
//! Toolkit boundary
//!
//! The builder never touches widgets directly. Everything it does to the
//! UI goes through the [`Toolkit`] trait:
//! - Widget creation, probed by type tag
//! - Setter capabilities, probed by `set*` name
//! - Container, grid, selection and style operations
//! - Id lookup and click-handler attachment
//!
//! [`headless::UiApp`] is the in-memory implementation used by the CLI
//! and the test suites.

pub mod handler;
pub mod headless;

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

pub use handler::{ClientHandler, Handler, ServerHandler, ToggleAttribute};

/// Opaque handle to a widget owned by a toolkit.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct WidgetId(usize);

impl WidgetId {
    /// Wraps a toolkit-specific slot index.
    pub fn from_index(index: usize) -> Self {
        Self(index)
    }

    /// Slot index inside the owning toolkit.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Mutator registered under a `set*` capability name.
///
/// Receives the positional arguments taken from the property value:
/// the elements of an array, or the single value otherwise.
pub type Setter<T> = fn(&mut T, WidgetId, &[Value]) -> Result<(), ToolkitError>;

/// Errors raised by a toolkit implementation.
#[derive(Debug, Error, PartialEq)]
pub enum ToolkitError {
    /// No widget carries the requested id
    #[error("No element with id '{0}'")]
    ElementNotFound(String),

    /// Id already assigned to a different widget
    #[error("Id '{id}' is already assigned to widget {owner}")]
    DuplicateId { id: String, owner: WidgetId },

    /// Handle does not belong to this toolkit
    #[error("Unknown widget handle {0}")]
    UnknownWidget(WidgetId),

    /// Widget already has a parent (or is the root)
    #[error("Widget {0} is already attached")]
    AlreadyAttached(WidgetId),

    /// Child added to a widget that cannot hold children
    #[error("{0} cannot contain child widgets")]
    NotAContainer(String),

    /// Item operation on a widget without a selection model
    #[error("{0} does not support items")]
    NotASelection(String),

    /// Cell operation on a widget that is not a grid
    #[error("{0} is not a grid")]
    NotAGrid(String),

    /// Cell coordinates outside the grid
    #[error("Cell ({row}, {column}) is outside a {rows}x{columns} grid")]
    CellOutOfRange {
        row: usize,
        column: usize,
        rows: usize,
        columns: usize,
    },

    /// Selected index past the last item
    #[error("Index {index} is out of range for {len} items")]
    IndexOutOfRange { index: usize, len: usize },

    /// Setter invoked with the wrong number of arguments
    #[error("{setter} expects {expected} argument(s), got {found}")]
    InvalidArguments {
        setter: String,
        expected: usize,
        found: usize,
    },

    /// Setter argument has the wrong JSON kind
    #[error("{setter}: {reason}")]
    InvalidArgument { setter: String, reason: String },
}

/// Operations the builder needs from a UI toolkit.
///
/// Implementations own every widget, including the single root container
/// created together with the toolkit instance.
pub trait Toolkit: Sized {
    /// Root container of the application.
    fn root(&self) -> WidgetId;

    /// Creates a bare widget of the given type.
    ///
    /// Returns `None` when the toolkit has no creation capability for
    /// `widget_type`.
    fn create_widget(&mut self, widget_type: &str) -> Option<WidgetId>;

    /// Looks up the setter capability `name` (e.g. `setText`) on a widget.
    fn setter(&self, widget: WidgetId, name: &str) -> Option<Setter<Self>>;

    /// Appends `child` to `parent`.
    fn add_child(&mut self, parent: WidgetId, child: WidgetId) -> Result<(), ToolkitError>;

    /// Creates an empty grid of `rows` x `columns` cells.
    fn create_grid(&mut self, rows: usize, columns: usize) -> WidgetId;

    /// Assigns an id, making the widget reachable through [`Toolkit::element_by_id`].
    fn set_id(&mut self, widget: WidgetId, id: &str) -> Result<(), ToolkitError>;

    fn set_cell_text(
        &mut self,
        grid: WidgetId,
        row: usize,
        column: usize,
        text: &str,
    ) -> Result<(), ToolkitError>;

    fn set_cell_widget(
        &mut self,
        grid: WidgetId,
        row: usize,
        column: usize,
        widget: WidgetId,
    ) -> Result<(), ToolkitError>;

    /// Appends a `(label, value)` entry to a selection widget.
    fn add_item(&mut self, widget: WidgetId, label: &str, value: &Value)
        -> Result<(), ToolkitError>;

    fn set_selected_index(&mut self, widget: WidgetId, index: usize) -> Result<(), ToolkitError>;

    fn set_style_attribute(
        &mut self,
        widget: WidgetId,
        name: &str,
        value: &Value,
    ) -> Result<(), ToolkitError>;

    /// Resolves an id across every widget created so far.
    fn element_by_id(&self, id: &str) -> Result<WidgetId, ToolkitError>;

    fn add_click_handler(&mut self, widget: WidgetId, handler: Handler)
        -> Result<(), ToolkitError>;
}

#[cfg(test)]
mod tests;
