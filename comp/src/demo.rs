//! Demonstration components
//!
//! A handful of components compiled into the binary, plus the page that shows
//! them off. The components are offered through the [`LOCATE_TEMPLATE`] hook
//! only when no search root or plugin directory has a file of the same name,
//! so a theme can override any of them.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Weak};

use serde_json::{Value, json};
use tracing::debug;

use crate::component::{Component, component};
use crate::context::TemplateContext;
use crate::error::Result;
use crate::events::{self, ActionCallback};
use crate::executor::{HandlebarsExecutor, TemplateExecutor};
use crate::hooks::{self, LOCATE_TEMPLATE};
use crate::host::Host;

pub const SIMPLE: &str = include_str!("../demos/components/Simple.hbs");
pub const ARGUMENTS: &str = include_str!("../demos/components/Arguments.hbs");
pub const CARD: &str = include_str!("../demos/components/Card.hbs");
pub const BIND: &str = include_str!("../demos/components/Bind.hbs");

/// Path prefix marking a template served from memory
pub const EMBEDDED_PREFIX: &str = "embedded:";

/// Action fired once the demo host is set up
pub const INIT_ACTION: &str = "init";

/// Action the demo page renders on
pub const FOOTER_ACTION: &str = "footer";

/// Get the embedded component by name
pub fn get_embedded(name: &str) -> Option<&'static str> {
    match name {
        "Simple" => Some(SIMPLE),
        "Arguments" => Some(ARGUMENTS),
        "Card" => Some(CARD),
        "Bind" => Some(BIND),
        _ => None,
    }
}

fn embedded_name(path: &Path) -> Option<&str> {
    path.to_str()?.strip_prefix(EMBEDDED_PREFIX)
}

/// Filter offering embedded components when nothing else was found
pub fn embedded_fallback(located: Option<PathBuf>, template_name: &str) -> Option<PathBuf> {
    if located.is_some() {
        return located;
    }
    get_embedded(template_name).map(|_| PathBuf::from(format!("{}{}", EMBEDDED_PREFIX, template_name)))
}

/// Executor that serves embedded components and reads everything else from disk
#[derive(Default)]
pub struct DemoExecutor {
    inner: HandlebarsExecutor,
}

impl DemoExecutor {
    pub fn new(inner: HandlebarsExecutor) -> Self {
        Self { inner }
    }
}

impl TemplateExecutor for DemoExecutor {
    fn execute(&self, template_name: &str, path: &Path, context: &TemplateContext) -> Result<String> {
        match embedded_name(path).and_then(get_embedded) {
            Some(source) => {
                debug!(%template_name, "DemoExecutor::execute: embedded");
                self.inner.render_source(template_name, source, context)
            }
            None => self.inner.execute(template_name, path, context),
        }
    }
}

/// Register the demo filter and actions on `host`
///
/// `init` binds the `Bind` component to `footer`; `footer` renders the demo
/// page, so firing `init` then `footer` produces the page followed by `Bind`.
pub fn install(host: &Arc<Host>) {
    host.filters()
        .add_filter(LOCATE_TEMPLATE, hooks::DEFAULT_PRIORITY, embedded_fallback);

    let weak = Arc::downgrade(host);
    let page: ActionCallback = Arc::new(move |_: &[Value]| -> Result<()> {
        match weak.upgrade() {
            Some(host) => render_page(&host),
            None => Ok(()),
        }
    });
    host.events()
        .add_action(FOOTER_ACTION, page, events::DEFAULT_PRIORITY, 0);

    let weak: Weak<Host> = Arc::downgrade(host);
    let bind: ActionCallback = Arc::new(move |_: &[Value]| -> Result<()> {
        if let Some(host) = weak.upgrade() {
            Component::new(&host, "Bind", None, None).bind(FOOTER_ACTION, events::DEFAULT_PRIORITY, 0);
        }
        Ok(())
    });
    host.events().add_action(INIT_ACTION, bind, events::DEFAULT_PRIORITY, 0);
}

/// Fire the demo lifecycle: `init`, then `footer`
pub fn run(host: &Host) -> Result<()> {
    host.actions().do_action(INIT_ACTION, &[])?;
    host.actions().do_action(FOOTER_ACTION, &[])?;
    Ok(())
}

fn render_page(host: &Arc<Host>) -> Result<()> {
    component(host, "Simple", None)?;

    component(
        host,
        "Arguments",
        Some(json!({
            "title": "Cosmonaut",
            "description": "Lorem Ipsum",
            "sum": [10, 32, 95],
        })),
    )?;

    let out = host.output();
    out.write("<p>Multiple Card components to demonstrate reusability:</p>\n")?;
    out.write(
        "<div style=\"display: flex; flex-flow: row wrap; justify-content: flex-start; \
         align-items: flex-start; max-width: 960px; margin: 0 auto;\">\n",
    )?;
    for title in ["Google", "Apple", "Facebook"] {
        component(host, "Card", Some(json!({"title": title, "body": "Lorem Ipsum"})))?;
    }
    out.write("</div>\n")
}
