//! Serialisable view of a finished widget tree
//!
//! Widgets are identified by their assigned id where they have one and by
//! their arena handle (`#n`) otherwise.

use serde::Serialize;
use serde_json::{Map, Value};

use super::{Cell, ListItem, UiApp};
use crate::toolkit::{Handler, ToggleAttribute, WidgetId};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WidgetNode {
    #[serde(rename = "type")]
    pub widget_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub attributes: Map<String, Value>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub styles: Map<String, Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<ListItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<GridNode>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub handlers: Vec<HandlerNode>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<WidgetNode>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GridNode {
    pub rows: usize,
    pub columns: usize,
    /// Filled cells only, row-major
    pub cells: Vec<CellNode>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CellNode {
    pub row: usize,
    pub column: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub widget: Option<Box<WidgetNode>>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum HandlerNode {
    Client {
        targets: Vec<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        attribute: Option<ToggleAttribute>,
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<bool>,
    },
    Server {
        callback: String,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        callback_elements: Vec<String>,
    },
}

impl UiApp {
    /// Snapshot of everything reachable from the root container.
    pub fn snapshot(&self) -> WidgetNode {
        self.node(self.root)
            .unwrap_or_else(|| WidgetNode::empty(super::APPLICATION))
    }

    /// Snapshot of the subtree rooted at `widget`.
    pub fn node(&self, widget: WidgetId) -> Option<WidgetNode> {
        let state = self.widget(widget)?;

        let grid = state.grid().map(|grid| {
            let mut cells = Vec::new();
            for row in 0..grid.rows() {
                for column in 0..grid.columns() {
                    let node = match grid.cell(row, column) {
                        Some(Cell::Text(text)) => CellNode {
                            row,
                            column,
                            text: Some(text.clone()),
                            widget: None,
                        },
                        Some(Cell::Widget(child)) => CellNode {
                            row,
                            column,
                            text: None,
                            widget: self.node(*child).map(Box::new),
                        },
                        None => continue,
                    };
                    cells.push(node);
                }
            }
            GridNode {
                rows: grid.rows(),
                columns: grid.columns(),
                cells,
            }
        });

        Some(WidgetNode {
            widget_type: state.widget_type().to_string(),
            id: state.id().map(str::to_string),
            attributes: state.attributes().clone(),
            styles: state.styles().clone(),
            items: state.items().to_vec(),
            selected_index: state.selected_index(),
            grid,
            handlers: state
                .click_handlers()
                .iter()
                .map(|handler| self.handler_node(handler))
                .collect(),
            children: state
                .children()
                .iter()
                .filter_map(|child| self.node(*child))
                .collect(),
        })
    }

    fn handler_node(&self, handler: &Handler) -> HandlerNode {
        match handler {
            Handler::Client(client) => HandlerNode::Client {
                targets: client.targets().iter().map(|t| self.label(*t)).collect(),
                attribute: client.toggle().map(|(attribute, _)| attribute),
                value: client.toggle().map(|(_, value)| value),
            },
            Handler::Server(server) => HandlerNode::Server {
                callback: server.callback().to_string(),
                callback_elements: server
                    .callback_elements()
                    .iter()
                    .map(|e| self.label(*e))
                    .collect(),
            },
        }
    }

    fn label(&self, widget: WidgetId) -> String {
        self.widget(widget)
            .and_then(|state| state.id())
            .map(str::to_string)
            .unwrap_or_else(|| widget.to_string())
    }
}

impl WidgetNode {
    fn empty(widget_type: &str) -> Self {
        Self {
            widget_type: widget_type.to_string(),
            id: None,
            attributes: Map::new(),
            styles: Map::new(),
            items: Vec::new(),
            selected_index: None,
            grid: None,
            handlers: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Depth-first search for the node carrying `id`.
    pub fn find(&self, id: &str) -> Option<&WidgetNode> {
        if self.id.as_deref() == Some(id) {
            return Some(self);
        }
        let from_cells = self.grid.iter().flat_map(|grid| {
            grid.cells
                .iter()
                .filter_map(|cell| cell.widget.as_deref())
        });
        self.children
            .iter()
            .chain(from_cells)
            .find_map(|child| child.find(id))
    }
}
