//! Deferred event handlers
//!
//! Handlers are bound in two phases:
//! 1. **Collect**: while the tree is built, every `onClick` becomes a
//!    `PendingHandler` in a `PendingHandlers` accumulator. No toolkit
//!    handler exists yet.
//! 2. **Materialize**: once the whole tree is built, target ids are
//!    resolved and toolkit handler objects attached to their widgets.
//!
//! Resolving only after the build means a handler can target widgets
//! declared after it, anywhere in the tree.

use crate::core::error::BuildError;
use crate::core::types::{EventKind, HandlerAction, PendingHandler};
use crate::toolkit::{ClientHandler, Handler, ServerHandler, ToggleAttribute, Toolkit, WidgetId};

/// Ordered accumulator of handlers awaiting finalize.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PendingHandlers {
    entries: Vec<PendingHandler>,
}

impl PendingHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, handler: PendingHandler) {
        self.entries.push(handler);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PendingHandler> {
        self.entries.iter()
    }
}

impl IntoIterator for PendingHandlers {
    type Item = PendingHandler;
    type IntoIter = std::vec::IntoIter<PendingHandler>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Resolves and attaches every pending handler, in build order.
///
/// Within one binding, handlers are attached in the order their keys
/// appeared in the config.
///
/// Returns the number of toolkit handlers attached.
///
/// # Errors
///
/// Propagates the toolkit's error for an unknown target id; nothing is
/// checked beforehand.
pub fn materialize_handlers<T: Toolkit>(
    toolkit: &mut T,
    pending: PendingHandlers,
) -> Result<usize, BuildError> {
    let mut attached = 0;

    for PendingHandler {
        widget,
        event,
        config,
    } in pending
    {
        for action in config.actions() {
            let handler = build_handler(toolkit, action)?;
            match event {
                EventKind::Click => toolkit.add_click_handler(widget, handler)?,
            }
            log::debug!("Attached {} handler '{}' to {}", event, action.key(), widget);
            attached += 1;
        }
    }

    log::info!("Materialized {} handler(s)", attached);
    Ok(attached)
}

fn build_handler<T: Toolkit>(toolkit: &T, action: &HandlerAction) -> Result<Handler, BuildError> {
    let handler = match action {
        HandlerAction::Show(ids) => toggle(toolkit, ids, ToggleAttribute::Visible, true)?,
        HandlerAction::Hide(ids) => toggle(toolkit, ids, ToggleAttribute::Visible, false)?,
        HandlerAction::Enable(ids) => toggle(toolkit, ids, ToggleAttribute::Enabled, true)?,
        HandlerAction::Disable(ids) => toggle(toolkit, ids, ToggleAttribute::Enabled, false)?,
        HandlerAction::Callback {
            callback,
            element_id,
        } => {
            let mut handler = ServerHandler::new(callback.as_str());
            if let Some(element_id) = element_id {
                handler = handler.add_callback_element(toolkit.element_by_id(element_id)?);
            }
            handler.into()
        }
    };
    Ok(handler)
}

fn toggle<T: Toolkit>(
    toolkit: &T,
    ids: &[String],
    attribute: ToggleAttribute,
    value: bool,
) -> Result<Handler, BuildError> {
    let targets = ids
        .iter()
        .map(|id| toolkit.element_by_id(id))
        .collect::<Result<Vec<WidgetId>, _>>()?;

    Ok(ClientHandler::new()
        .for_targets(targets)
        .set_toggle(attribute, value)
        .into())
}
