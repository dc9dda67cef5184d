use serde_json::{json, Value};

use crate::config::BuildOptions;
use crate::core::{BuildError, UiBuilder, WidgetConfig};
use crate::toolkit::headless::{Cell, UiApp};
use crate::toolkit::{Toolkit, ToolkitError, WidgetId};

/// Helper: builds `config` as a detached widget
fn create(config: Value) -> (UiBuilder<UiApp>, Result<Option<WidgetId>, BuildError>) {
    let mut builder = UiBuilder::new(UiApp::create_application());
    let config = WidgetConfig::from_value(config).unwrap();
    let result = builder.create_widget(&config);
    (builder, result)
}

fn app(builder: &UiBuilder<UiApp>) -> &UiApp {
    builder.toolkit()
}

// ============================================================================
// Generic widgets
// ============================================================================

#[test]
fn test_missing_type_is_rejected() {
    let (_, result) = create(json!({"text": "orphan"}));
    assert_eq!(result, Err(BuildError::InvalidWidgetType(None)));
}

#[test]
fn test_unknown_type_is_rejected() {
    let (_, result) = create(json!({"type": "Spreadsheet"}));
    assert_eq!(
        result,
        Err(BuildError::InvalidWidgetType(Some("Spreadsheet".to_string())))
    );
}

#[test]
fn test_non_string_type_is_rejected() {
    let (_, result) = create(json!({"type": 42}));
    assert_eq!(result, Err(BuildError::InvalidWidgetType(Some("42".to_string()))));
}

#[test]
fn test_application_type_cannot_be_created() {
    let (_, result) = create(json!({"type": "Application"}));
    assert!(matches!(result, Err(BuildError::InvalidWidgetType(Some(_)))));
}

#[test]
fn test_type_lookup_uses_aliases() {
    let (builder, result) = create(json!({"type": "Listbox"}));
    let list = result.unwrap().unwrap();

    assert_eq!(app(&builder).widget(list).unwrap().widget_type(), "ListBox");
}

#[test]
fn test_created_widget_is_detached() {
    let (builder, result) = create(json!({"type": "Button", "text": "Go"}));
    result.unwrap().unwrap();

    let root = app(&builder).root();
    assert!(app(&builder).widget(root).unwrap().children().is_empty());
}

#[test]
fn test_children_are_built_in_order() {
    let (builder, result) = create(json!({
        "type": "VerticalPanel",
        "items": [
            {"type": "Label", "text": "first"},
            {"type": "HorizontalPanel", "items": [{"type": "Button", "text": "inner"}]},
            {"type": "Label", "text": "last"}
        ]
    }));
    let panel = result.unwrap().unwrap();
    let app = app(&builder);

    let children = app.widget(panel).unwrap().children();
    assert_eq!(children.len(), 3);
    assert_eq!(app.widget(children[0]).unwrap().attribute("text"), Some(&json!("first")));
    assert_eq!(app.widget(children[2]).unwrap().attribute("text"), Some(&json!("last")));

    let nested = app.widget(children[1]).unwrap().children();
    assert_eq!(nested.len(), 1);
    assert_eq!(app.widget(nested[0]).unwrap().widget_type(), "Button");
}

#[test]
fn test_invalid_nested_type_propagates() {
    let (_, result) = create(json!({
        "type": "VerticalPanel",
        "items": [{"type": "Label"}, {"type": "Bogus"}]
    }));
    assert_eq!(result, Err(BuildError::InvalidWidgetType(Some("Bogus".to_string()))));
}

#[test]
fn test_items_must_be_config_objects() {
    let (_, result) = create(json!({"type": "VerticalPanel", "items": "Label"}));
    assert!(matches!(result, Err(BuildError::InvalidItems(_))));

    let (_, result) = create(json!({"type": "VerticalPanel", "items": ["Label"]}));
    assert!(matches!(result, Err(BuildError::InvalidItems(_))));
}

#[test]
fn test_items_on_plain_widget() {
    let (_, result) = create(json!({"type": "Button", "items": [{"type": "Label"}]}));
    assert_eq!(
        result,
        Err(BuildError::Toolkit(ToolkitError::NotAContainer("Button".to_string())))
    );
}

// ============================================================================
// Composite forms
// ============================================================================

#[test]
fn test_form_lays_out_labels_and_fields() {
    let (builder, result) = create(json!({
        "type": "HorizontalForm",
        "id": "signup",
        "items": [
            {"fieldLabel": "Name", "type": "TextBox", "id": "name"},
            {"fieldLabel": "Email", "type": "TextBox", "id": "email"},
            {"fieldLabel": "Plan", "type": "ListBox", "id": "plan", "data": ["free", "pro"]}
        ]
    }));
    let form = result.unwrap().unwrap();
    let app = app(&builder);

    assert_eq!(app.element_by_id("signup"), Ok(form));
    let grid = app.widget(form).unwrap().grid().unwrap();
    assert_eq!((grid.rows(), grid.columns()), (3, 2));
    assert_eq!(grid.cell(0, 0), Some(&Cell::Text("Name".to_string())));
    assert_eq!(grid.cell(1, 0), Some(&Cell::Text("Email".to_string())));
    assert_eq!(grid.cell(2, 0), Some(&Cell::Text("Plan".to_string())));

    let plan = app.element_by_id("plan").unwrap();
    assert_eq!(grid.cell(2, 1), Some(&Cell::Widget(plan)));
    assert_eq!(app.widget(plan).unwrap().items().len(), 2);
}

#[test]
fn test_form_label_only_and_field_only_rows() {
    let (builder, result) = create(json!({
        "type": "HorizontalForm",
        "items": [
            {"fieldLabel": "Section"},
            {"type": "CheckBox", "id": "agree"}
        ]
    }));
    let form = result.unwrap().unwrap();
    let app = app(&builder);
    let grid = app.widget(form).unwrap().grid().unwrap();

    assert_eq!(grid.cell(0, 0), Some(&Cell::Text("Section".to_string())));
    assert_eq!(grid.cell(0, 1), None);
    assert_eq!(grid.cell(1, 0), None);
    let agree = app.element_by_id("agree").unwrap();
    assert_eq!(grid.cell(1, 1), Some(&Cell::Widget(agree)));
}

#[test]
fn test_form_row_name_defaults_to_id() {
    let (builder, result) = create(json!({
        "type": "HorizontalForm",
        "items": [{"fieldLabel": "Email", "type": "TextBox", "id": "email"}]
    }));
    result.unwrap().unwrap();
    let app = app(&builder);

    let email = app.element_by_id("email").unwrap();
    assert_eq!(app.widget(email).unwrap().attribute("name"), Some(&json!("email")));
}

#[test]
fn test_form_row_id_defaults_to_name() {
    let (builder, result) = create(json!({
        "type": "HorizontalForm",
        "items": [{"fieldLabel": "Phone", "type": "TextBox", "name": "phone"}]
    }));
    result.unwrap().unwrap();
    let app = app(&builder);

    let phone = app.element_by_id("phone").unwrap();
    assert_eq!(app.widget(phone).unwrap().attribute("name"), Some(&json!("phone")));
}

#[test]
fn test_form_keeps_explicit_name_and_id() {
    let (builder, result) = create(json!({
        "type": "HorizontalForm",
        "items": [{"type": "TextBox", "id": "field-7", "name": "city"}]
    }));
    result.unwrap().unwrap();
    let app = app(&builder);

    let city = app.element_by_id("field-7").unwrap();
    assert_eq!(app.widget(city).unwrap().attribute("name"), Some(&json!("city")));
}

#[test]
fn test_form_without_items_builds_nothing() {
    let mut builder = UiBuilder::new(UiApp::create_application());
    let config = WidgetConfig::from_value(json!({"type": "HorizontalForm", "id": "empty"})).unwrap();

    assert_eq!(builder.add_widget(&config), Ok(None));

    let app = builder.toolkit();
    assert_eq!(app.widget_count(), 1);
    assert!(app.element_by_id("empty").is_err());
    assert!(app.widget(app.root()).unwrap().children().is_empty());
}

#[test]
fn test_form_rows_must_be_objects() {
    let (_, result) = create(json!({"type": "HorizontalForm", "items": ["Name"]}));
    assert!(matches!(result, Err(BuildError::InvalidItems(_))));
}

#[test]
fn test_form_nested_in_panel() {
    let (builder, result) = create(json!({
        "type": "VerticalPanel",
        "items": [
            {"type": "HorizontalForm", "items": []},
            {"type": "HorizontalForm", "items": [{"fieldLabel": "Only"}]}
        ]
    }));
    let panel = result.unwrap().unwrap();
    let app = app(&builder);

    let children = app.widget(panel).unwrap().children();
    assert_eq!(children.len(), 2);
    assert_eq!(app.widget(children[0]).unwrap().grid().unwrap().rows(), 0);
    assert_eq!(app.widget(children[1]).unwrap().grid().unwrap().rows(), 1);
}

// ============================================================================
// Options
// ============================================================================

#[test]
fn test_custom_type_key_and_form_type() {
    let options = BuildOptions {
        type_key: "widget".to_string(),
        form_type: "Form".to_string(),
    };
    let mut builder = UiBuilder::with_options(UiApp::create_application(), options);
    let config = WidgetConfig::from_value(json!({
        "widget": "Form",
        "items": [{"fieldLabel": "Age", "widget": "TextBox", "id": "age"}]
    }))
    .unwrap();

    let form = builder.create_widget(&config).unwrap().unwrap();
    let app = builder.toolkit();
    assert!(app.widget(form).unwrap().grid().is_some());
    assert!(app.element_by_id("age").is_ok());

    // The default tag is no longer special
    let legacy = WidgetConfig::from_value(json!({"widget": "HorizontalForm"})).unwrap();
    assert_eq!(
        builder.create_widget(&legacy),
        Err(BuildError::InvalidWidgetType(Some("HorizontalForm".to_string())))
    );
}
