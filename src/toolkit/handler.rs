//! Event-handler primitives
//!
//! Two kinds of handler can be attached to a widget:
//! - `ClientHandler`: flips a boolean attribute on a set of target widgets
//! - `ServerHandler`: invokes a named callback, carrying the values of
//!   its callback elements

use serde::Serialize;
use std::fmt;

use super::WidgetId;

/// Boolean widget attribute a client handler can toggle.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleAttribute {
    Visible,
    Enabled,
}

impl ToggleAttribute {
    /// Attribute name as stored on widgets.
    pub fn name(self) -> &'static str {
        match self {
            ToggleAttribute::Visible => "visible",
            ToggleAttribute::Enabled => "enabled",
        }
    }
}

impl fmt::Display for ToggleAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Handler that runs entirely on the client side.
///
/// # Example
/// ```
/// use uibot::toolkit::{ClientHandler, ToggleAttribute, WidgetId};
///
/// let handler = ClientHandler::new()
///     .for_targets(vec![WidgetId::from_index(3)])
///     .set_toggle(ToggleAttribute::Visible, true);
/// assert_eq!(handler.toggle(), Some((ToggleAttribute::Visible, true)));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ClientHandler {
    targets: Vec<WidgetId>,
    toggle: Option<(ToggleAttribute, bool)>,
}

impl ClientHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Widgets affected when the handler fires.
    pub fn for_targets(mut self, targets: Vec<WidgetId>) -> Self {
        self.targets = targets;
        self
    }

    /// Attribute and value applied to every target.
    pub fn set_toggle(mut self, attribute: ToggleAttribute, value: bool) -> Self {
        self.toggle = Some((attribute, value));
        self
    }

    pub fn set_visible(self, value: bool) -> Self {
        self.set_toggle(ToggleAttribute::Visible, value)
    }

    pub fn set_enabled(self, value: bool) -> Self {
        self.set_toggle(ToggleAttribute::Enabled, value)
    }

    pub fn targets(&self) -> &[WidgetId] {
        &self.targets
    }

    pub fn toggle(&self) -> Option<(ToggleAttribute, bool)> {
        self.toggle
    }
}

/// Handler that forwards the event to a named server-side callback.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ServerHandler {
    callback: String,
    callback_elements: Vec<WidgetId>,
}

impl ServerHandler {
    pub fn new(callback: impl Into<String>) -> Self {
        Self {
            callback: callback.into(),
            callback_elements: Vec::new(),
        }
    }

    /// Registers a widget whose current value is sent with the callback.
    pub fn add_callback_element(mut self, element: WidgetId) -> Self {
        self.callback_elements.push(element);
        self
    }

    pub fn callback(&self) -> &str {
        &self.callback
    }

    pub fn callback_elements(&self) -> &[WidgetId] {
        &self.callback_elements
    }
}

/// Toolkit-level handler object.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Handler {
    Client(ClientHandler),
    Server(ServerHandler),
}

impl From<ClientHandler> for Handler {
    fn from(handler: ClientHandler) -> Self {
        Handler::Client(handler)
    }
}

impl From<ServerHandler> for Handler {
    fn from(handler: ServerHandler) -> Self {
        Handler::Server(handler)
    }
}
