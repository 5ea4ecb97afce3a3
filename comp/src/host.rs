//! Host services
//!
//! A [`Host`] bundles everything a component needs from its surroundings:
//! the locator, filter hooks, action registry, template executor and the
//! output stream. It is built once at startup and shared as `Arc<Host>`.

use std::sync::Arc;

use tracing::debug;

use crate::events::{Actions, EventRegistrar};
use crate::executor::{HandlebarsExecutor, TemplateExecutor};
use crate::hooks::{Filters, HookDispatcher};
use crate::locator::{FsLocator, Locator};
use crate::output::Output;

/// Default directory components are looked up in, relative to each root
pub const DEFAULT_COMPONENTS_DIR: &str = "components/";

/// Default template file extension
pub const DEFAULT_EXTENSION: &str = "hbs";

/// Services shared by every component
pub struct Host {
    locator: Box<dyn Locator>,
    filters: Arc<Filters>,
    actions: Arc<Actions>,
    executor: Box<dyn TemplateExecutor>,
    output: Output,
    components_dir: String,
    extension: String,
}

impl Host {
    pub fn builder() -> HostBuilder {
        HostBuilder::default()
    }

    pub fn locator(&self) -> &dyn Locator {
        self.locator.as_ref()
    }

    pub fn hooks(&self) -> &dyn HookDispatcher {
        self.filters.as_ref()
    }

    pub fn events(&self) -> &dyn EventRegistrar {
        self.actions.as_ref()
    }

    /// Filter registry, for adding subscribers
    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    /// Action registry, for firing actions
    pub fn actions(&self) -> &Actions {
        &self.actions
    }

    pub fn executor(&self) -> &dyn TemplateExecutor {
        self.executor.as_ref()
    }

    pub fn output(&self) -> &Output {
        &self.output
    }

    /// Directory used when a component does not override it
    pub fn components_dir(&self) -> &str {
        &self.components_dir
    }

    /// Template file extension, without the dot
    pub fn extension(&self) -> &str {
        &self.extension
    }
}

/// Builder for [`Host`]; unset services fall back to the in-process defaults
#[derive(Default)]
pub struct HostBuilder {
    locator: Option<Box<dyn Locator>>,
    filters: Option<Arc<Filters>>,
    actions: Option<Arc<Actions>>,
    executor: Option<Box<dyn TemplateExecutor>>,
    output: Option<Output>,
    components_dir: Option<String>,
    extension: Option<String>,
}

impl HostBuilder {
    pub fn locator(mut self, locator: impl Locator + 'static) -> Self {
        self.locator = Some(Box::new(locator));
        self
    }

    pub fn filters(mut self, filters: Arc<Filters>) -> Self {
        self.filters = Some(filters);
        self
    }

    pub fn actions(mut self, actions: Arc<Actions>) -> Self {
        self.actions = Some(actions);
        self
    }

    pub fn executor(mut self, executor: impl TemplateExecutor + 'static) -> Self {
        self.executor = Some(Box::new(executor));
        self
    }

    pub fn output(mut self, output: Output) -> Self {
        self.output = Some(output);
        self
    }

    pub fn components_dir(mut self, dir: impl Into<String>) -> Self {
        self.components_dir = Some(dir.into());
        self
    }

    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        let extension: String = extension.into();
        self.extension = Some(extension.trim_start_matches('.').to_string());
        self
    }

    pub fn build(self) -> Arc<Host> {
        let host = Host {
            locator: self.locator.unwrap_or_else(|| Box::new(FsLocator::new(["."]))),
            filters: self.filters.unwrap_or_default(),
            actions: self.actions.unwrap_or_default(),
            executor: self
                .executor
                .unwrap_or_else(|| Box::new(HandlebarsExecutor::new())),
            output: self.output.unwrap_or_else(Output::stdout),
            components_dir: self
                .components_dir
                .unwrap_or_else(|| DEFAULT_COMPONENTS_DIR.to_string()),
            extension: self.extension.unwrap_or_else(|| DEFAULT_EXTENSION.to_string()),
        };
        debug!(
            components_dir = %host.components_dir,
            extension = %host.extension,
            "HostBuilder::build"
        );
        Arc::new(host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};

    struct FixedLocator(PathBuf);

    impl Locator for FixedLocator {
        fn locate(&self, _relative: &Path) -> Option<PathBuf> {
            Some(self.0.clone())
        }
    }

    #[test]
    fn test_builder_defaults() {
        let host = Host::builder().build();
        assert_eq!(host.components_dir(), DEFAULT_COMPONENTS_DIR);
        assert_eq!(host.extension(), DEFAULT_EXTENSION);
        assert_eq!(host.output().depth(), 0);
    }

    #[test]
    fn test_builder_overrides() {
        let host = Host::builder()
            .locator(FixedLocator(PathBuf::from("/fixed.hbs")))
            .components_dir("parts")
            .extension(".html")
            .build();

        assert_eq!(host.components_dir(), "parts");
        assert_eq!(host.extension(), "html");
        assert_eq!(host.locator().locate(Path::new("x")), Some(PathBuf::from("/fixed.hbs")));
    }

    #[test]
    fn test_shared_registries() {
        let actions = Arc::new(Actions::new());
        let host = Host::builder().actions(actions.clone()).build();

        host.actions().do_action("init", &[]).unwrap();
        assert_eq!(actions.did_action("init"), 1);
    }
}
