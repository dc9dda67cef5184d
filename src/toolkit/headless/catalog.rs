//! Widget classes known to the headless toolkit
//!
//! Each class declares, up front, the setters it exposes. The builder's
//! generic setter path only ever sees what is registered here: a property
//! with no matching `set*` entry is silently skipped.
//!
//! Classes are registered by name; aliases map alternative spellings
//! (e.g. `Listbox`) to a canonical class.

use serde_json::Value;
use std::collections::HashMap;

use super::UiApp;
use crate::toolkit::{Setter, ToolkitError, WidgetId};

/// Name of the root container class.
pub const APPLICATION: &str = "Application";

/// Name of the grid class used by the composite form layout.
pub const GRID: &str = "Grid";

/// Structural role of a widget class.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ClassKind {
    /// Leaf widget without children or items
    Plain,
    /// Accepts child widgets
    Container,
    /// Holds `(label, value)` items and a selected index
    Selection,
    /// Fixed rows x columns of cells
    Grid,
    /// Root container; never created through the factory
    Application,
}

/// A widget class: its name, role and setter table.
#[derive(Clone, Debug)]
pub struct WidgetClass {
    name: &'static str,
    kind: ClassKind,
    setters: HashMap<&'static str, Setter<UiApp>>,
}

impl WidgetClass {
    pub fn new(name: &'static str, kind: ClassKind) -> Self {
        Self {
            name,
            kind,
            setters: HashMap::new(),
        }
    }

    pub fn with_setter(mut self, name: &'static str, setter: Setter<UiApp>) -> Self {
        self.setters.insert(name, setter);
        self
    }

    pub fn with_setters(mut self, setters: &[(&'static str, Setter<UiApp>)]) -> Self {
        self.setters.extend(setters.iter().copied());
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> ClassKind {
        self.kind
    }

    pub fn is_container(&self) -> bool {
        matches!(self.kind, ClassKind::Container | ClassKind::Application)
    }

    /// Exact-match lookup of a setter capability.
    pub fn setter(&self, name: &str) -> Option<Setter<UiApp>> {
        self.setters.get(name).copied()
    }

    /// Setter names, sorted for display.
    pub fn setter_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.setters.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

/// Registry of widget classes, keyed by type tag.
#[derive(Clone, Debug)]
pub struct Catalog {
    classes: HashMap<&'static str, WidgetClass>,
    aliases: HashMap<&'static str, &'static str>,
}

impl Catalog {
    /// Catalog holding only the root `Application` class.
    pub fn new() -> Self {
        let mut catalog = Self {
            classes: HashMap::new(),
            aliases: HashMap::new(),
        };
        catalog.register(
            WidgetClass::new(APPLICATION, ClassKind::Application).with_setters(&[
                ("setTitle", set_title),
                ("setWidth", set_width),
                ("setHeight", set_height),
                ("setStyleName", set_style_name),
            ]),
        );
        catalog
    }

    /// Catalog with the standard widget set.
    pub fn standard() -> Self {
        let mut catalog = Self::new();

        for name in ["Button", "SubmitButton"] {
            catalog.register(
                WidgetClass::new(name, ClassKind::Plain)
                    .with_setters(COMMON)
                    .with_setters(FOCUSABLE)
                    .with_setters(&[("setText", set_text), ("setHTML", set_html)]),
            );
        }

        catalog.register(
            WidgetClass::new("Label", ClassKind::Plain)
                .with_setters(COMMON)
                .with_setters(&[
                    ("setText", set_text),
                    ("setWordWrap", set_word_wrap),
                    ("setHorizontalAlignment", set_horizontal_alignment),
                ]),
        );
        catalog.register(
            WidgetClass::new("HTML", ClassKind::Plain)
                .with_setters(COMMON)
                .with_setters(&[
                    ("setHTML", set_html),
                    ("setText", set_text),
                    ("setWordWrap", set_word_wrap),
                ]),
        );

        for name in ["TextBox", "PasswordTextBox"] {
            catalog.register(text_input(name));
        }
        catalog.register(text_input("TextArea").with_setter("setVisibleLines", set_visible_lines));

        catalog.register(WidgetClass::new("Hidden", ClassKind::Plain).with_setters(&[
            ("setId", set_id),
            ("setName", set_name),
            ("setValue", set_value),
        ]));

        catalog.register(
            WidgetClass::new("ListBox", ClassKind::Selection)
                .with_setters(COMMON)
                .with_setters(FOCUSABLE)
                .with_setters(&[
                    ("setName", set_name),
                    ("setMultipleSelect", set_multiple_select),
                    ("setVisibleItemCount", set_visible_item_count),
                ]),
        );
        catalog.register_alias("Listbox", "ListBox");

        for name in ["CheckBox", "RadioButton"] {
            catalog.register(
                WidgetClass::new(name, ClassKind::Plain)
                    .with_setters(COMMON)
                    .with_setters(FOCUSABLE)
                    .with_setters(NAMED_VALUE)
                    .with_setter("setText", set_text),
            );
        }

        catalog.register(
            WidgetClass::new("Image", ClassKind::Plain)
                .with_setters(COMMON)
                .with_setter("setUrl", set_url),
        );
        catalog.register(
            WidgetClass::new("Anchor", ClassKind::Plain)
                .with_setters(COMMON)
                .with_setters(&[
                    ("setText", set_text),
                    ("setHref", set_href),
                    ("setTarget", set_target),
                ]),
        );

        for name in ["VerticalPanel", "HorizontalPanel"] {
            catalog.register(
                WidgetClass::new(name, ClassKind::Container)
                    .with_setters(COMMON)
                    .with_setters(&[
                        ("setSpacing", set_spacing),
                        ("setBorderWidth", set_border_width),
                    ]),
            );
        }
        for name in ["FlowPanel", "ScrollPanel"] {
            catalog.register(WidgetClass::new(name, ClassKind::Container).with_setters(COMMON));
        }
        catalog.register(
            WidgetClass::new("CaptionPanel", ClassKind::Container)
                .with_setters(COMMON)
                .with_setter("setText", set_text),
        );

        catalog.register(
            WidgetClass::new(GRID, ClassKind::Grid)
                .with_setters(COMMON)
                .with_setters(&[
                    ("setBorderWidth", set_border_width),
                    ("setCellPadding", set_cell_padding),
                    ("setCellSpacing", set_cell_spacing),
                ]),
        );

        catalog
    }

    /// Adds or replaces a class.
    pub fn register(&mut self, class: WidgetClass) {
        self.classes.insert(class.name, class);
    }

    /// Makes `alias` resolve to the class registered as `target`.
    pub fn register_alias(&mut self, alias: &'static str, target: &'static str) {
        self.aliases.insert(alias, target);
    }

    /// Resolves a type tag (or alias) to its class.
    pub fn get(&self, name: &str) -> Option<&WidgetClass> {
        let canonical = self.aliases.get(name).copied().unwrap_or(name);
        self.classes.get(canonical)
    }

    /// Registered class names (aliases excluded), sorted.
    pub fn type_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.classes.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn aliases(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.aliases.iter().map(|(alias, target)| (*alias, *target))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

fn text_input(name: &'static str) -> WidgetClass {
    WidgetClass::new(name, ClassKind::Plain)
        .with_setters(COMMON)
        .with_setters(FOCUSABLE)
        .with_setters(NAMED_VALUE)
        .with_setters(&[
            ("setText", set_text),
            ("setMaxLength", set_max_length),
            ("setReadOnly", set_read_only),
        ])
}

const COMMON: &[(&str, Setter<UiApp>)] = &[
    ("setId", set_id),
    ("setVisible", set_visible),
    ("setWidth", set_width),
    ("setHeight", set_height),
    ("setSize", set_size),
    ("setTitle", set_title),
    ("setStyleName", set_style_name),
    ("setTag", set_tag),
];

const FOCUSABLE: &[(&str, Setter<UiApp>)] =
    &[("setEnabled", set_enabled), ("setTabIndex", set_tab_index)];

const NAMED_VALUE: &[(&str, Setter<UiApp>)] = &[("setName", set_name), ("setValue", set_value)];

// ============================================================================
// Argument conversion
// ============================================================================

fn single<'a>(setter: &str, args: &'a [Value]) -> Result<&'a Value, ToolkitError> {
    match args {
        [value] => Ok(value),
        _ => Err(ToolkitError::InvalidArguments {
            setter: setter.to_string(),
            expected: 1,
            found: args.len(),
        }),
    }
}

fn invalid(setter: &str, reason: &str) -> ToolkitError {
    ToolkitError::InvalidArgument {
        setter: setter.to_string(),
        reason: reason.to_string(),
    }
}

fn text_arg(setter: &str, args: &[Value]) -> Result<Value, ToolkitError> {
    match single(setter, args)? {
        Value::String(text) => Ok(Value::String(text.clone())),
        value @ (Value::Number(_) | Value::Bool(_)) => Ok(Value::String(value.to_string())),
        _ => Err(invalid(setter, "expected text")),
    }
}

fn bool_arg(setter: &str, args: &[Value]) -> Result<Value, ToolkitError> {
    match single(setter, args)? {
        value @ Value::Bool(_) => Ok(value.clone()),
        _ => Err(invalid(setter, "expected a boolean")),
    }
}

fn number_arg(setter: &str, args: &[Value]) -> Result<Value, ToolkitError> {
    match single(setter, args)? {
        value @ Value::Number(_) => Ok(value.clone()),
        _ => Err(invalid(setter, "expected a number")),
    }
}

/// CSS-style length: `"120px"`, `"100%"` or a bare number.
fn dimension(setter: &str, value: &Value) -> Result<Value, ToolkitError> {
    match value {
        Value::String(_) | Value::Number(_) => Ok(value.clone()),
        _ => Err(invalid(setter, "expected a length")),
    }
}

fn dimension_arg(setter: &str, args: &[Value]) -> Result<Value, ToolkitError> {
    dimension(setter, single(setter, args)?)
}

fn any_arg(setter: &str, args: &[Value]) -> Result<Value, ToolkitError> {
    single(setter, args).cloned()
}

// ============================================================================
// Setters
// ============================================================================

/// Declares a setter that stores one converted argument as an attribute.
macro_rules! attribute_setter {
    ($fn_name:ident, $setter:literal, $attribute:literal, $convert:ident) => {
        fn $fn_name(app: &mut UiApp, widget: WidgetId, args: &[Value]) -> Result<(), ToolkitError> {
            let value = $convert($setter, args)?;
            app.set_attribute(widget, $attribute, value)
        }
    };
}

attribute_setter!(set_text, "setText", "text", text_arg);
attribute_setter!(set_html, "setHTML", "html", text_arg);
attribute_setter!(set_name, "setName", "name", text_arg);
attribute_setter!(set_title, "setTitle", "title", text_arg);
attribute_setter!(set_style_name, "setStyleName", "styleName", text_arg);
attribute_setter!(set_tag, "setTag", "tag", text_arg);
attribute_setter!(set_url, "setUrl", "url", text_arg);
attribute_setter!(set_href, "setHref", "href", text_arg);
attribute_setter!(set_target, "setTarget", "target", text_arg);
attribute_setter!(set_horizontal_alignment, "setHorizontalAlignment", "horizontalAlignment", text_arg);
attribute_setter!(set_visible, "setVisible", "visible", bool_arg);
attribute_setter!(set_enabled, "setEnabled", "enabled", bool_arg);
attribute_setter!(set_word_wrap, "setWordWrap", "wordWrap", bool_arg);
attribute_setter!(set_read_only, "setReadOnly", "readOnly", bool_arg);
attribute_setter!(set_multiple_select, "setMultipleSelect", "multipleSelect", bool_arg);
attribute_setter!(set_tab_index, "setTabIndex", "tabIndex", number_arg);
attribute_setter!(set_max_length, "setMaxLength", "maxLength", number_arg);
attribute_setter!(set_visible_lines, "setVisibleLines", "visibleLines", number_arg);
attribute_setter!(set_visible_item_count, "setVisibleItemCount", "visibleItemCount", number_arg);
attribute_setter!(set_spacing, "setSpacing", "spacing", number_arg);
attribute_setter!(set_border_width, "setBorderWidth", "borderWidth", number_arg);
attribute_setter!(set_cell_padding, "setCellPadding", "cellPadding", number_arg);
attribute_setter!(set_cell_spacing, "setCellSpacing", "cellSpacing", number_arg);
attribute_setter!(set_width, "setWidth", "width", dimension_arg);
attribute_setter!(set_height, "setHeight", "height", dimension_arg);
attribute_setter!(set_value, "setValue", "value", any_arg);

fn set_id(app: &mut UiApp, widget: WidgetId, args: &[Value]) -> Result<(), ToolkitError> {
    match single("setId", args)? {
        Value::String(id) => app.assign_id(widget, id),
        _ => Err(invalid("setId", "expected a string id")),
    }
}

fn set_size(app: &mut UiApp, widget: WidgetId, args: &[Value]) -> Result<(), ToolkitError> {
    let [width, height] = args else {
        return Err(ToolkitError::InvalidArguments {
            setter: "setSize".to_string(),
            expected: 2,
            found: args.len(),
        });
    };
    let width = dimension("setSize", width)?;
    let height = dimension("setSize", height)?;
    app.set_attribute(widget, "width", width)?;
    app.set_attribute(widget, "height", height)
}
