// Copyright 2025 bakri (tidynest@proton.me)
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

//! uibot
//!
//! Builds widget trees from declarative JSON configs and wires their event
//! handlers once the whole tree exists.
//!
//! # Features
//!
//! - **Generic Properties:** Any `key` maps to the widget's `setKey` setter
//! - **Selection Data:** `data` entries with a `selected` default
//! - **Composite Forms:** Label/field rows laid out in a two-column grid
//! - **Deferred Handlers:** `onClick` bindings resolved after the build, so
//!   they may target widgets declared later
//! - **Headless Toolkit:** In-memory widgets with click simulation and
//!   JSON snapshots
//!
//! # Architecture
//!
//! - **`core`:** Build pipeline (factory, properties, handlers, builder)
//! - **`toolkit`:** The `Toolkit` trait, handler objects and the headless
//!   implementation
//! - **`config`:** Build options, config loading and atomic output writes
//!
//! # Examples
//!
//! ## Building from a file
//!
//! ```no_run
//! use uibot::config::load_widget_config;
//! use uibot::core::UiBuilder;
//! use uibot::toolkit::headless::UiApp;
//!
//! let config = load_widget_config("~/.config/uibot/settings.json")?;
//! let app = UiBuilder::from_config(UiApp::create_application(), &config)?.finalize()?;
//! println!("Built {} widgets", app.widget_count());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Simulating a click
//!
//! ```
//! use serde_json::json;
//! use uibot::core::{UiBuilder, WidgetConfig};
//! use uibot::toolkit::headless::UiApp;
//! use uibot::toolkit::Toolkit;
//!
//! let mut builder = UiBuilder::new(UiApp::create_application());
//! builder.add_widget(&WidgetConfig::from_value(json!({
//!     "type": "Label", "id": "status", "visible": false
//! }))?)?;
//! builder.add_widget(&WidgetConfig::from_value(json!({
//!     "type": "Button", "id": "go", "onClick": {"show": "status"}
//! }))?)?;
//!
//! let mut app = builder.finalize()?;
//! let go = app.element_by_id("go")?;
//! app.click(go)?;
//! assert!(app.widget(app.element_by_id("status")?).unwrap().is_visible());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod core;
pub mod toolkit;

// Re-export commonly used types for convenience
pub use config::BuildOptions;
pub use core::{BuildError, UiBuilder, WidgetConfig};
pub use toolkit::{Toolkit, ToolkitError, WidgetId};
