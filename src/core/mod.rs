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

//! src/core/mod.rs
//!
//! Core build logic
//!
//! This module turns a declarative configuration tree into widgets:
//! - Type definitions for configs and handler bindings
//! - Property dispatch (structural keys vs generic setters)
//! - Widget creation, including the composite form layout
//! - Two-phase handler binding (collect, then materialize)
//! - The `UiBuilder` facade tying it together
//!
//! All of it talks to widgets through the `Toolkit` trait only, so it can
//! be tested against the headless toolkit without a display server.

pub mod builder;
pub mod error;
pub mod factory;
pub mod handlers;
pub mod properties;
pub mod types;

pub use builder::UiBuilder;
pub use error::BuildError;
pub use handlers::{materialize_handlers, PendingHandlers};
pub use properties::{setter_name, BuildContext};
pub use types::*;

#[cfg(test)]
mod tests;
