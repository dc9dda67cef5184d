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

//! In-memory toolkit
//!
//! `UiApp` keeps every widget in an arena indexed by [`WidgetId`] and an
//! id index filled as ids are assigned, so handler targets resolve in
//! O(1) without walking the tree.
//!
//! Besides implementing [`Toolkit`], it can simulate clicks (running the
//! attached handlers) and export the finished tree as a serialisable
//! snapshot.

pub mod catalog;
pub mod snapshot;

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::toolkit::{Handler, Setter, Toolkit, ToolkitError, WidgetId};
pub use catalog::{Catalog, ClassKind, WidgetClass, APPLICATION, GRID};
pub use snapshot::{CellNode, GridNode, HandlerNode, WidgetNode};

/// One entry of a selection widget.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ListItem {
    pub label: String,
    pub value: Value,
}

/// Content of a grid cell.
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Text(String),
    Widget(WidgetId),
}

/// Fixed-size cell matrix, stored row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    rows: usize,
    columns: usize,
    cells: Vec<Option<Cell>>,
}

impl Grid {
    fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            cells: vec![None; rows * columns],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&Cell> {
        if row >= self.rows || column >= self.columns {
            return None;
        }
        self.cells[row * self.columns + column].as_ref()
    }

    fn slot_mut(&mut self, row: usize, column: usize) -> Result<&mut Option<Cell>, ToolkitError> {
        if row >= self.rows || column >= self.columns {
            return Err(ToolkitError::CellOutOfRange {
                row,
                column,
                rows: self.rows,
                columns: self.columns,
            });
        }
        Ok(&mut self.cells[row * self.columns + column])
    }

    fn widgets(&self) -> impl Iterator<Item = WidgetId> + '_ {
        self.cells.iter().filter_map(|cell| match cell {
            Some(Cell::Widget(widget)) => Some(*widget),
            _ => None,
        })
    }
}

/// State of one widget.
#[derive(Clone, Debug)]
pub struct Widget {
    widget_type: &'static str,
    kind: ClassKind,
    id: Option<String>,
    parent: Option<WidgetId>,
    attributes: Map<String, Value>,
    styles: Map<String, Value>,
    children: Vec<WidgetId>,
    items: Vec<ListItem>,
    selected_index: Option<usize>,
    grid: Option<Grid>,
    click_handlers: Vec<Handler>,
}

impl Widget {
    fn new(widget_type: &'static str, kind: ClassKind) -> Self {
        Self {
            widget_type,
            kind,
            id: None,
            parent: None,
            attributes: Map::new(),
            styles: Map::new(),
            children: Vec::new(),
            items: Vec::new(),
            selected_index: None,
            grid: (kind == ClassKind::Grid).then(|| Grid::new(0, 0)),
            click_handlers: Vec::new(),
        }
    }

    /// Canonical class name (aliases resolved).
    pub fn widget_type(&self) -> &str {
        self.widget_type
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    pub fn styles(&self) -> &Map<String, Value> {
        &self.styles
    }

    pub fn children(&self) -> &[WidgetId] {
        &self.children
    }

    pub fn items(&self) -> &[ListItem] {
        &self.items
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    pub fn click_handlers(&self) -> &[Handler] {
        &self.click_handlers
    }

    /// Widgets start visible until `setVisible(false)` or a handler says otherwise.
    pub fn is_visible(&self) -> bool {
        self.flag("visible")
    }

    pub fn is_enabled(&self) -> bool {
        self.flag("enabled")
    }

    fn flag(&self, name: &str) -> bool {
        self.attributes
            .get(name)
            .and_then(Value::as_bool)
            .unwrap_or(true)
    }

    /// Value submitted when this widget is a callback element.
    ///
    /// Selection widgets report the selected item's value; everything else
    /// reports its `value`, falling back to `text`.
    pub fn current_value(&self) -> Value {
        if self.kind == ClassKind::Selection {
            return self
                .selected_index
                .and_then(|index| self.items.get(index))
                .map(|item| item.value.clone())
                .unwrap_or(Value::Null);
        }
        self.attributes
            .get("value")
            .or_else(|| self.attributes.get("text"))
            .cloned()
            .unwrap_or(Value::Null)
    }
}

/// Server callback produced by a simulated click.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ServerCall {
    pub callback: String,
    /// Current values of the named widgets under each callback element
    pub parameters: Map<String, Value>,
}

/// Headless application: widget arena plus id index.
#[derive(Clone, Debug)]
pub struct UiApp {
    catalog: Catalog,
    widgets: Vec<Widget>,
    ids: HashMap<String, WidgetId>,
    root: WidgetId,
}

impl UiApp {
    /// Creates an application with the standard widget catalog.
    pub fn create_application() -> Self {
        Self::with_catalog(Catalog::standard())
    }

    /// Creates an application backed by a custom catalog.
    pub fn with_catalog(catalog: Catalog) -> Self {
        Self {
            catalog,
            widgets: vec![Widget::new(APPLICATION, ClassKind::Application)],
            ids: HashMap::new(),
            root: WidgetId::from_index(0),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn widget(&self, widget: WidgetId) -> Option<&Widget> {
        self.widgets.get(widget.index())
    }

    /// Number of widgets created, root included.
    pub fn widget_count(&self) -> usize {
        self.widgets.len()
    }

    /// Total click handlers attached across all widgets.
    pub fn handler_count(&self) -> usize {
        self.widgets.iter().map(|w| w.click_handlers.len()).sum()
    }

    /// Stores an attribute on a widget. Used by setters.
    pub fn set_attribute(
        &mut self,
        widget: WidgetId,
        name: &str,
        value: Value,
    ) -> Result<(), ToolkitError> {
        self.widget_mut(widget)?
            .attributes
            .insert(name.to_string(), value);
        Ok(())
    }

    /// Runs every click handler attached to `widget`, in attachment order.
    ///
    /// Client handlers update their targets immediately. Server handlers
    /// are returned as [`ServerCall`]s carrying the callback elements'
    /// current values.
    pub fn click(&mut self, widget: WidgetId) -> Result<Vec<ServerCall>, ToolkitError> {
        let handlers = self.widget_ref(widget)?.click_handlers.clone();
        let mut calls = Vec::new();

        for handler in handlers {
            match handler {
                Handler::Client(client) => {
                    let Some((attribute, value)) = client.toggle() else {
                        continue;
                    };
                    for target in client.targets() {
                        self.set_attribute(*target, attribute.name(), Value::Bool(value))?;
                    }
                }
                Handler::Server(server) => {
                    let mut parameters = Map::new();
                    for element in server.callback_elements() {
                        self.collect_values(*element, &mut parameters)?;
                    }
                    calls.push(ServerCall {
                        callback: server.callback().to_string(),
                        parameters,
                    });
                }
            }
        }

        Ok(calls)
    }

    fn collect_values(
        &self,
        widget: WidgetId,
        parameters: &mut Map<String, Value>,
    ) -> Result<(), ToolkitError> {
        let state = self.widget_ref(widget)?;
        if let Some(Value::String(name)) = state.attributes.get("name") {
            parameters.insert(name.clone(), state.current_value());
        }
        for child in &state.children {
            self.collect_values(*child, parameters)?;
        }
        if let Some(grid) = &state.grid {
            for cell_widget in grid.widgets() {
                self.collect_values(cell_widget, parameters)?;
            }
        }
        Ok(())
    }

    fn widget_ref(&self, widget: WidgetId) -> Result<&Widget, ToolkitError> {
        self.widgets
            .get(widget.index())
            .ok_or(ToolkitError::UnknownWidget(widget))
    }

    fn widget_mut(&mut self, widget: WidgetId) -> Result<&mut Widget, ToolkitError> {
        self.widgets
            .get_mut(widget.index())
            .ok_or(ToolkitError::UnknownWidget(widget))
    }

    fn push(&mut self, widget: Widget) -> WidgetId {
        self.widgets.push(widget);
        WidgetId::from_index(self.widgets.len() - 1)
    }

    /// Binds `id` to `widget`, rejecting ids already owned by another widget.
    fn assign_id(&mut self, widget: WidgetId, id: &str) -> Result<(), ToolkitError> {
        self.widget_ref(widget)?;
        if let Some(owner) = self.ids.get(id) {
            if *owner != widget {
                return Err(ToolkitError::DuplicateId {
                    id: id.to_string(),
                    owner: *owner,
                });
            }
        }

        let state = self.widget_mut(widget)?;
        let previous = state.id.replace(id.to_string());
        if let Some(previous) = previous {
            self.ids.remove(&previous);
        }
        self.ids.insert(id.to_string(), widget);
        Ok(())
    }

    /// Marks `child` as owned by `parent`, refusing re-parenting and the root.
    fn adopt(&mut self, parent: WidgetId, child: WidgetId) -> Result<(), ToolkitError> {
        if child == self.root || child == parent {
            return Err(ToolkitError::AlreadyAttached(child));
        }
        let state = self.widget_mut(child)?;
        if state.parent.is_some() {
            return Err(ToolkitError::AlreadyAttached(child));
        }
        state.parent = Some(parent);
        Ok(())
    }

    fn grid_mut(&mut self, grid: WidgetId) -> Result<&mut Grid, ToolkitError> {
        let state = self.widget_mut(grid)?;
        let widget_type = state.widget_type;
        state
            .grid
            .as_mut()
            .ok_or_else(|| ToolkitError::NotAGrid(widget_type.to_string()))
    }

    fn selection_mut(&mut self, widget: WidgetId) -> Result<&mut Widget, ToolkitError> {
        let state = self.widget_mut(widget)?;
        if state.kind != ClassKind::Selection {
            return Err(ToolkitError::NotASelection(state.widget_type.to_string()));
        }
        Ok(state)
    }
}

impl Default for UiApp {
    fn default() -> Self {
        Self::create_application()
    }
}

impl Toolkit for UiApp {
    fn root(&self) -> WidgetId {
        self.root
    }

    fn create_widget(&mut self, widget_type: &str) -> Option<WidgetId> {
        let class = self.catalog.get(widget_type)?;
        if class.kind() == ClassKind::Application {
            return None;
        }
        let widget = Widget::new(class.name(), class.kind());
        Some(self.push(widget))
    }

    fn setter(&self, widget: WidgetId, name: &str) -> Option<Setter<Self>> {
        let state = self.widget(widget)?;
        self.catalog.get(state.widget_type)?.setter(name)
    }

    fn add_child(&mut self, parent: WidgetId, child: WidgetId) -> Result<(), ToolkitError> {
        let state = self.widget_ref(parent)?;
        if !matches!(state.kind, ClassKind::Container | ClassKind::Application) {
            return Err(ToolkitError::NotAContainer(state.widget_type.to_string()));
        }
        self.adopt(parent, child)?;
        self.widget_mut(parent)?.children.push(child);
        Ok(())
    }

    fn create_grid(&mut self, rows: usize, columns: usize) -> WidgetId {
        let mut widget = Widget::new(GRID, ClassKind::Grid);
        widget.grid = Some(Grid::new(rows, columns));
        self.push(widget)
    }

    fn set_id(&mut self, widget: WidgetId, id: &str) -> Result<(), ToolkitError> {
        self.assign_id(widget, id)
    }

    fn set_cell_text(
        &mut self,
        grid: WidgetId,
        row: usize,
        column: usize,
        text: &str,
    ) -> Result<(), ToolkitError> {
        *self.grid_mut(grid)?.slot_mut(row, column)? = Some(Cell::Text(text.to_string()));
        Ok(())
    }

    fn set_cell_widget(
        &mut self,
        grid: WidgetId,
        row: usize,
        column: usize,
        widget: WidgetId,
    ) -> Result<(), ToolkitError> {
        // Bounds first so a bad cell leaves the widget unattached
        self.grid_mut(grid)?.slot_mut(row, column)?;
        self.adopt(grid, widget)?;
        *self.grid_mut(grid)?.slot_mut(row, column)? = Some(Cell::Widget(widget));
        Ok(())
    }

    fn add_item(&mut self, widget: WidgetId, label: &str, value: &Value) -> Result<(), ToolkitError> {
        self.selection_mut(widget)?.items.push(ListItem {
            label: label.to_string(),
            value: value.clone(),
        });
        Ok(())
    }

    fn set_selected_index(&mut self, widget: WidgetId, index: usize) -> Result<(), ToolkitError> {
        let state = self.selection_mut(widget)?;
        if index >= state.items.len() {
            return Err(ToolkitError::IndexOutOfRange {
                index,
                len: state.items.len(),
            });
        }
        state.selected_index = Some(index);
        Ok(())
    }

    fn set_style_attribute(
        &mut self,
        widget: WidgetId,
        name: &str,
        value: &Value,
    ) -> Result<(), ToolkitError> {
        self.widget_mut(widget)?
            .styles
            .insert(name.to_string(), value.clone());
        Ok(())
    }

    fn element_by_id(&self, id: &str) -> Result<WidgetId, ToolkitError> {
        self.ids
            .get(id)
            .copied()
            .ok_or_else(|| ToolkitError::ElementNotFound(id.to_string()))
    }

    fn add_click_handler(&mut self, widget: WidgetId, handler: Handler) -> Result<(), ToolkitError> {
        self.widget_mut(widget)?.click_handlers.push(handler);
        Ok(())
    }
}
