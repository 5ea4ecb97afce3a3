//! Component rendering
//!
//! A [`Component`] names a template, carries the arguments it renders with
//! and the directory it is looked up in. Resolution runs in three steps:
//!
//! 1. `{dir_path}/{template_name}.{extension}` is handed to the host
//!    [`Locator`](crate::locator::Locator)
//! 2. the result goes through the [`LOCATE_TEMPLATE`] filter hook, which may
//!    substitute a path or supply one when nothing was found
//! 3. nothing left means [`ComponentError::TemplateNotFound`]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Weak};

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::context::TemplateContext;
use crate::error::{ComponentError, Result};
use crate::events::{ActionCallback, ActionHandle};
use crate::hooks::LOCATE_TEMPLATE;
use crate::host::Host;
use crate::locator::trailing_slash;

/// A named template together with its arguments
#[derive(Clone)]
pub struct Component {
    host: Arc<Host>,
    template_name: String,
    args: Option<Value>,
    dir_path: String,
}

impl Component {
    /// Construct a component; nothing is validated until it renders
    ///
    /// `dir_path` overrides the host's components directory when given and
    /// non-empty.
    pub fn new(host: &Arc<Host>, template_name: impl Into<String>, args: Option<Value>, dir_path: Option<&str>) -> Self {
        let dir_path = match dir_path {
            Some(dir) if !dir.is_empty() => dir.to_string(),
            _ => host.components_dir().to_string(),
        };
        Self {
            host: host.clone(),
            template_name: template_name.into(),
            args,
            dir_path,
        }
    }

    /// Make a new component
    pub fn make(host: &Arc<Host>, template_name: impl Into<String>, args: Option<Value>, dir_path: Option<&str>) -> Self {
        Self::new(host, template_name, args, dir_path)
    }

    /// Make a new component and render it to the output stream
    pub fn make_echo(
        host: &Arc<Host>,
        template_name: impl Into<String>,
        args: Option<Value>,
        dir_path: Option<&str>,
    ) -> Result<Self> {
        let component = Self::make(host, template_name, args, dir_path);
        component.render()?;
        Ok(component)
    }

    /// Make a new component and return its rendered HTML
    pub fn html(
        host: &Arc<Host>,
        template_name: impl Into<String>,
        args: Option<Value>,
        dir_path: Option<&str>,
    ) -> Result<String> {
        Self::make(host, template_name, args, dir_path)
            .output(false)
            .map(Option::unwrap_or_default)
    }

    pub fn template_name(&self) -> &str {
        &self.template_name
    }

    pub fn args(&self) -> Option<&Value> {
        self.args.as_ref()
    }

    pub fn dir_path(&self) -> &str {
        &self.dir_path
    }

    /// Relative path handed to the locator
    pub fn candidate_path(&self) -> PathBuf {
        PathBuf::from(format!(
            "{}{}.{}",
            trailing_slash(&self.dir_path),
            self.template_name,
            self.host.extension()
        ))
    }

    /// Resolve the final template file
    ///
    /// Subscribers of [`LOCATE_TEMPLATE`] see the locator's result and the
    /// template name, and may add more directories to search.
    pub fn locate_template(&self) -> Option<PathBuf> {
        if self.template_name.is_empty() {
            return None;
        }
        let candidate = self.candidate_path();
        let located = self.host.locator().locate(&candidate);
        debug!(
            template = %self.template_name,
            candidate = %candidate.display(),
            located = ?located,
            "Component::locate_template"
        );
        self.host
            .hooks()
            .apply_filters(LOCATE_TEMPLATE, located, &self.template_name)
            .filter(|path| !path.as_os_str().is_empty())
    }

    /// Render the template to the output stream
    pub fn render(&self) -> Result<&Self> {
        self.render_with(TemplateContext::new(self.args.clone()))?;
        Ok(self)
    }

    /// Render and return the HTML (`echo == false`), or render to the stream (`echo == true`)
    pub fn output(&self, echo: bool) -> Result<Option<String>> {
        if echo {
            self.render()?;
            return Ok(None);
        }
        let html = self.host.output().capture(|| self.render().map(|_| ()))?;
        Ok(Some(html))
    }

    /// Render this component whenever `action` fires
    ///
    /// The first `accepted_args` arguments of each firing are available to
    /// the template as `action_args`.
    pub fn bind(&self, action: &str, priority: i32, accepted_args: usize) -> &Self {
        self.subscribe(action, priority, accepted_args);
        self
    }

    /// Like [`bind`](Self::bind), returning the registration handle
    pub fn subscribe(&self, action: &str, priority: i32, accepted_args: usize) -> ActionHandle {
        let host = Arc::downgrade(&self.host);
        let template_name = self.template_name.clone();
        let args = self.args.clone();
        let dir_path = self.dir_path.clone();

        let callback: ActionCallback = Arc::new(move |action_args: &[Value]| -> Result<()> {
            fire_bound(&host, &template_name, args.clone(), &dir_path, action_args)
        });

        let handle = self.host.events().add_action(action, callback, priority, accepted_args);
        debug!(template = %self.template_name, %action, priority, accepted_args, "Component::bind");
        handle
    }

    fn render_with(&self, context: TemplateContext) -> Result<()> {
        let Some(path) = self.locate_template() else {
            return Err(ComponentError::TemplateNotFound {
                name: self.template_name.clone(),
            });
        };
        self.execute(&path, &context)
    }

    fn execute(&self, path: &Path, context: &TemplateContext) -> Result<()> {
        info!(template = %self.template_name, path = %path.display(), "Rendering component");
        let html = self.host.executor().execute(&self.template_name, path, context)?;
        self.host.output().write(&html)
    }
}

fn fire_bound(
    host: &Weak<Host>,
    template_name: &str,
    args: Option<Value>,
    dir_path: &str,
    action_args: &[Value],
) -> Result<()> {
    let Some(host) = host.upgrade() else {
        warn!(%template_name, "Bound component fired after its host was dropped");
        return Ok(());
    };
    let component = Component::new(&host, template_name, args.clone(), Some(dir_path));
    let context = TemplateContext::new(args).with_action_args(action_args);
    component.render_with(context)
}

/// Render a component to the output stream; shorthand for [`Component::make_echo`]
pub fn component(host: &Arc<Host>, template_name: impl Into<String>, args: Option<Value>) -> Result<Component> {
    Component::make_echo(host, template_name, args, None)
}
