//! UI builder facade
//!
//! `UiBuilder` owns the toolkit (and with it the root container), the
//! pending-handler accumulator and the build options. It has two phases:
//!
//! 1. Build: `from_config`, `configure_root`, `add_widget`, `create_widget`
//! 2. Finalize: `finalize(self)` attaches every handler and hands back the
//!    toolkit. Taking `self` by value means a builder cannot be finalized
//!    twice or extended afterwards.

use crate::config::BuildOptions;
use crate::core::error::BuildError;
use crate::core::handlers::{materialize_handlers, PendingHandlers};
use crate::core::properties::BuildContext;
use crate::core::types::WidgetConfig;
use crate::toolkit::{Toolkit, WidgetId};

/// Drives one UI construction session.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use uibot::core::{UiBuilder, WidgetConfig};
/// use uibot::toolkit::headless::UiApp;
/// use uibot::toolkit::Toolkit;
///
/// let config = WidgetConfig::from_value(json!({
///     "title": "Demo",
///     "items": [
///         {"type": "VerticalPanel", "id": "panel1", "visible": false},
///         {"type": "Button", "text": "Go", "onClick": {"show": "panel1"}}
///     ]
/// }))?;
///
/// let app = UiBuilder::from_config(UiApp::create_application(), &config)?.finalize()?;
/// let panel = app.element_by_id("panel1")?;
/// assert!(!app.widget(panel).unwrap().is_visible());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct UiBuilder<T: Toolkit> {
    toolkit: T,
    pending: PendingHandlers,
    options: BuildOptions,
}

impl<T: Toolkit> UiBuilder<T> {
    /// Starts a session with default options.
    pub fn new(toolkit: T) -> Self {
        Self::with_options(toolkit, BuildOptions::default())
    }

    pub fn with_options(toolkit: T, options: BuildOptions) -> Self {
        Self {
            toolkit,
            pending: PendingHandlers::new(),
            options,
        }
    }

    /// Starts a session and applies `config` to the root container.
    pub fn from_config(toolkit: T, config: &WidgetConfig) -> Result<Self, BuildError> {
        Self::from_config_with_options(toolkit, config, BuildOptions::default())
    }

    pub fn from_config_with_options(
        toolkit: T,
        config: &WidgetConfig,
        options: BuildOptions,
    ) -> Result<Self, BuildError> {
        let mut builder = Self::with_options(toolkit, options);
        builder.configure_root(config)?;
        Ok(builder)
    }

    /// Applies root-level properties (title, size, `items`, ...) to the
    /// root container.
    pub fn configure_root(&mut self, config: &WidgetConfig) -> Result<WidgetId, BuildError> {
        let root = self.toolkit.root();
        self.context().apply_properties(root, config.properties())
    }

    /// Creates a widget without attaching it anywhere.
    pub fn create_widget(&mut self, config: &WidgetConfig) -> Result<Option<WidgetId>, BuildError> {
        self.context().create_widget(config.properties())
    }

    /// Creates a widget and appends it to the root container.
    pub fn add_widget(&mut self, config: &WidgetConfig) -> Result<Option<WidgetId>, BuildError> {
        let widget = self.create_widget(config)?;
        if let Some(widget) = widget {
            let root = self.toolkit.root();
            self.toolkit.add_child(root, widget)?;
        }
        Ok(widget)
    }

    /// The toolkit as built so far. No handler is attached before finalize.
    pub fn toolkit(&self) -> &T {
        &self.toolkit
    }

    pub fn pending_handlers(&self) -> &PendingHandlers {
        &self.pending
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Resolves and attaches every collected handler, then returns the
    /// completed toolkit.
    pub fn finalize(self) -> Result<T, BuildError> {
        let Self {
            mut toolkit,
            pending,
            ..
        } = self;
        materialize_handlers(&mut toolkit, pending)?;
        Ok(toolkit)
    }

    fn context(&mut self) -> BuildContext<'_, T> {
        BuildContext::new(&mut self.toolkit, &mut self.pending, &self.options)
    }
}
