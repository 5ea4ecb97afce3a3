//! Component - render named template components
//!
//! A component is a template fragment found by name under a components
//! directory, rendered with a bag of arguments, and either written to the
//! output stream or returned as a string. Rendering can also be deferred until
//! a named action fires.
//!
//! # Architecture
//!
//! ```text
//! Component::make("Card", args)
//!        │
//!        ▼
//! ┌───────────────────────── Host ─────────────────────────┐
//! │ Locator ──► Filters ("component/locate_template")      │
//! │                 │                                      │
//! │                 ▼                                      │
//! │       TemplateExecutor (comp, action_args) ──► Output  │
//! │                                                        │
//! │ Actions: bind("footer") ─── do_action("footer") ──► render
//! └────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use component::{Component, Host};
//! use serde_json::json;
//!
//! let host = Host::builder().build();
//! let html = Component::html(&host, "Card", Some(json!({"title": "Apple"})), None)?;
//!
//! Component::make(&host, "Alert", None, None).bind("footer", 10, 0);
//! host.actions().do_action("footer", &[])?;
//! ```

pub mod cli;
pub mod config;
pub mod demo;
pub mod events;
pub mod hooks;
pub mod locator;
pub mod output;

mod component;
mod context;
mod error;
mod executor;
mod host;

pub use component::{Component, component};
pub use context::TemplateContext;
pub use error::{ComponentError, Result};
pub use events::{ActionCallback, ActionHandle, Actions, EventRegistrar};
pub use executor::{HandlebarsExecutor, TemplateExecutor};
pub use hooks::{Filters, HookDispatcher, LOCATE_TEMPLATE};
pub use host::{DEFAULT_COMPONENTS_DIR, DEFAULT_EXTENSION, Host, HostBuilder};
pub use locator::{FsLocator, Locator};
pub use output::{Output, SharedBuffer};
