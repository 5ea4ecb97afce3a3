//! Filter hooks
//!
//! Filters let outside code transform a located template path before it is
//! used, e.g. a plugin supplying its own components directory when the theme
//! has no matching file. Subscribers run in ascending priority; subscribers
//! sharing a priority run in the order they were added.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tracing::debug;

/// Hook applied to every located component template
pub const LOCATE_TEMPLATE: &str = "component/locate_template";

/// Default filter priority
pub const DEFAULT_PRIORITY: i32 = 10;

/// A filter subscriber: receives the current path (if any) and the template name
pub type Filter = Arc<dyn Fn(Option<PathBuf>, &str) -> Option<PathBuf> + Send + Sync>;

/// Dispatches a value through the subscribers of a named hook
pub trait HookDispatcher: Send + Sync {
    /// Run `value` through every subscriber of `hook`; the last result wins
    fn apply_filters(&self, hook: &str, value: Option<PathBuf>, template_name: &str) -> Option<PathBuf>;
}

struct Entry {
    priority: i32,
    seq: u64,
    filter: Filter,
}

#[derive(Default)]
struct Table {
    hooks: HashMap<String, Vec<Entry>>,
    next_seq: u64,
}

/// In-process filter registry
#[derive(Default)]
pub struct Filters {
    table: Mutex<Table>,
}

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe `filter` to `hook` at `priority`
    pub fn add_filter<F>(&self, hook: &str, priority: i32, filter: F)
    where
        F: Fn(Option<PathBuf>, &str) -> Option<PathBuf> + Send + Sync + 'static,
    {
        let mut table = self.table.lock().unwrap_or_else(|e| e.into_inner());
        let seq = table.next_seq;
        table.next_seq += 1;

        let entries = table.hooks.entry(hook.to_string()).or_default();
        entries.push(Entry {
            priority,
            seq,
            filter: Arc::new(filter),
        });
        entries.sort_by_key(|e| (e.priority, e.seq));
        debug!(%hook, priority, subscribers = entries.len(), "Filters::add_filter");
    }

    /// Whether `hook` has any subscribers
    pub fn has_filter(&self, hook: &str) -> bool {
        let table = self.table.lock().unwrap_or_else(|e| e.into_inner());
        table.hooks.get(hook).is_some_and(|e| !e.is_empty())
    }

    fn snapshot(&self, hook: &str) -> Vec<Filter> {
        let table = self.table.lock().unwrap_or_else(|e| e.into_inner());
        table
            .hooks
            .get(hook)
            .map(|entries| entries.iter().map(|e| e.filter.clone()).collect())
            .unwrap_or_default()
    }
}

impl HookDispatcher for Filters {
    fn apply_filters(&self, hook: &str, value: Option<PathBuf>, template_name: &str) -> Option<PathBuf> {
        // Subscribers may add filters themselves, so never hold the lock while calling them
        let filters = self.snapshot(hook);
        debug!(%hook, %template_name, subscribers = filters.len(), "Filters::apply_filters");
        filters.iter().fold(value, |value, filter| filter(value, template_name))
    }
}

/// Filter that supplies `dir/<name>.<extension>` when nothing was located yet
///
/// An already located path is passed through untouched, as is `None` when the
/// fallback file does not exist either.
pub fn fallback_dir(dir: PathBuf, extension: &str) -> impl Fn(Option<PathBuf>, &str) -> Option<PathBuf> + Send + Sync + 'static {
    let extension = extension.to_string();
    move |located: Option<PathBuf>, template_name: &str| {
        if located.is_some() || template_name.is_empty() {
            return located;
        }
        let file = dir.join(format!("{}.{}", template_name, extension));
        if file.is_file() {
            debug!(path = %file.display(), "fallback_dir: supplied template");
            Some(file)
        } else {
            located
        }
    }
}
