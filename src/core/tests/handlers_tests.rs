use serde_json::json;

use crate::core::{
    materialize_handlers, BuildError, EventKind, HandlerAction, HandlerConfig, PendingHandler,
    PendingHandlers,
};
use crate::toolkit::headless::UiApp;
use crate::toolkit::{ClientHandler, Handler, ServerHandler, Toolkit, ToolkitError, WidgetId};

/// Helper: application with a button and three panels, all with ids
fn fixture() -> (UiApp, WidgetId, [WidgetId; 3]) {
    let mut app = UiApp::create_application();
    let root = app.root();
    let button = app.create_widget("Button").unwrap();
    app.set_id(button, "go").unwrap();
    app.add_child(root, button).unwrap();

    let mut panels = [button; 3];
    for (index, panel) in panels.iter_mut().enumerate() {
        *panel = app.create_widget("VerticalPanel").unwrap();
        app.set_id(*panel, &format!("panel{}", index + 1)).unwrap();
        app.add_child(root, *panel).unwrap();
    }
    (app, button, panels)
}

fn pending_for(widget: WidgetId, binding: serde_json::Value) -> PendingHandlers {
    let mut pending = PendingHandlers::new();
    pending.push(PendingHandler {
        widget,
        event: EventKind::Click,
        config: HandlerConfig::from_value(&binding).unwrap(),
    });
    pending
}

// ============================================================================
// Parsing
// ============================================================================

#[test]
fn test_actions_keep_key_order() {
    let config = HandlerConfig::from_value(&json!({
        "disable": "a",
        "show": ["b", "c"],
        "callback": "save",
        "hide": "d"
    }))
    .unwrap();

    let keys: Vec<_> = config.actions().iter().map(HandlerAction::key).collect();
    assert_eq!(keys, vec!["disable", "show", "callback", "hide"]);
    assert_eq!(
        config.actions()[1],
        HandlerAction::Show(vec!["b".to_string(), "c".to_string()])
    );
}

#[test]
fn test_unknown_keys_are_ignored() {
    let config = HandlerConfig::from_value(&json!({"toggle": "a", "show": "b"})).unwrap();
    assert_eq!(config.actions(), &[HandlerAction::Show(vec!["b".to_string()])]);

    let config = HandlerConfig::from_value(&json!({"animate": true})).unwrap();
    assert!(config.is_empty());
}

#[test]
fn test_callback_element_pairs_with_callback() {
    let config = HandlerConfig::from_value(&json!({"cbElementId": "form", "callback": "submit"})).unwrap();

    assert_eq!(
        config.actions(),
        &[HandlerAction::Callback {
            callback: "submit".to_string(),
            element_id: Some("form".to_string()),
        }]
    );
}

#[test]
fn test_malformed_bindings_are_rejected() {
    for binding in [
        json!("show panel1"),
        json!({"show": 3}),
        json!({"hide": ["a", 2]}),
        json!({"callback": ["save"]}),
        json!({"callback": "save", "cbElementId": 9}),
    ] {
        assert!(
            matches!(HandlerConfig::from_value(&binding), Err(BuildError::InvalidHandler(_))),
            "accepted {}",
            binding
        );
    }
}

// ============================================================================
// Materialization
// ============================================================================

#[test]
fn test_show_builds_client_handler() {
    let (mut app, button, [panel1, _, _]) = fixture();

    let attached = materialize_handlers(&mut app, pending_for(button, json!({"show": "panel1"}))).unwrap();

    assert_eq!(attached, 1);
    assert_eq!(
        app.widget(button).unwrap().click_handlers(),
        &[Handler::Client(
            ClientHandler::new().for_targets(vec![panel1]).set_visible(true)
        )]
    );
}

#[test]
fn test_one_handler_per_action_in_order() {
    let (mut app, button, [panel1, panel2, panel3]) = fixture();
    let binding = json!({
        "hide": "panel1",
        "show": ["panel2", "panel3"],
        "disable": "go",
        "enable": "panel3"
    });

    let attached = materialize_handlers(&mut app, pending_for(button, binding)).unwrap();

    assert_eq!(attached, 4);
    assert_eq!(
        app.widget(button).unwrap().click_handlers(),
        &[
            Handler::from(ClientHandler::new().for_targets(vec![panel1]).set_visible(false)),
            Handler::from(ClientHandler::new().for_targets(vec![panel2, panel3]).set_visible(true)),
            Handler::from(ClientHandler::new().for_targets(vec![button]).set_enabled(false)),
            Handler::from(ClientHandler::new().for_targets(vec![panel3]).set_enabled(true)),
        ]
    );
}

#[test]
fn test_callback_builds_server_handler() {
    let (mut app, button, [_, panel2, _]) = fixture();
    let binding = json!({"callback": "save", "cbElementId": "panel2"});

    materialize_handlers(&mut app, pending_for(button, binding)).unwrap();

    assert_eq!(
        app.widget(button).unwrap().click_handlers(),
        &[Handler::Server(ServerHandler::new("save").add_callback_element(panel2))]
    );
}

#[test]
fn test_callback_without_element() {
    let (mut app, button, _) = fixture();

    materialize_handlers(&mut app, pending_for(button, json!({"callback": "ping"}))).unwrap();

    let Handler::Server(handler) = &app.widget(button).unwrap().click_handlers()[0] else {
        panic!("expected a server handler");
    };
    assert_eq!(handler.callback(), "ping");
    assert!(handler.callback_elements().is_empty());
}

#[test]
fn test_unknown_target_fails() {
    let (mut app, button, _) = fixture();

    let result = materialize_handlers(&mut app, pending_for(button, json!({"show": "panel9"})));

    assert_eq!(
        result,
        Err(BuildError::Toolkit(ToolkitError::ElementNotFound("panel9".to_string())))
    );
}

#[test]
fn test_unknown_callback_element_fails() {
    let (mut app, button, _) = fixture();
    let binding = json!({"callback": "save", "cbElementId": "missing"});

    let result = materialize_handlers(&mut app, pending_for(button, binding));

    assert_eq!(
        result,
        Err(BuildError::Toolkit(ToolkitError::ElementNotFound("missing".to_string())))
    );
}

#[test]
fn test_bindings_materialize_in_collection_order() {
    let (mut app, button, [panel1, panel2, _]) = fixture();
    let mut pending = pending_for(button, json!({"show": "panel1"}));
    pending.push(PendingHandler {
        widget: panel1,
        event: EventKind::Click,
        config: HandlerConfig::from_value(&json!({"hide": "panel2"})).unwrap(),
    });
    pending.push(PendingHandler {
        widget: button,
        event: EventKind::Click,
        config: HandlerConfig::from_value(&json!({"hide": "panel1"})).unwrap(),
    });

    assert_eq!(materialize_handlers(&mut app, pending).unwrap(), 3);

    let handlers = app.widget(button).unwrap().click_handlers();
    assert_eq!(handlers.len(), 2);
    assert_eq!(
        handlers[1],
        Handler::from(ClientHandler::new().for_targets(vec![panel1]).set_visible(false))
    );
    assert_eq!(
        app.widget(panel1).unwrap().click_handlers(),
        &[Handler::from(ClientHandler::new().for_targets(vec![panel2]).set_visible(false))]
    );
}

#[test]
fn test_empty_accumulator() {
    let (mut app, _, _) = fixture();

    assert_eq!(materialize_handlers(&mut app, PendingHandlers::new()), Ok(0));
    assert_eq!(app.handler_count(), 0);
}
