//! Action registry
//!
//! Actions are named lifecycle points. Callbacks registered with
//! [`EventRegistrar::add_action`] run every time the action fires through
//! [`Actions::do_action`], in ascending priority with ties broken by
//! registration order.
//!
//! ```text
//! add_action("footer", cb, 10, 1)      do_action("footer", [a, b])
//!            │                                   │
//!            └──────► ┌──────────────┐ ◄─────────┘
//!                     │ footer: [cb] │ ── cb([a]) (truncated to accepted_args)
//!                     └──────────────┘
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::Value;
use tracing::debug;

use crate::error::Result;

/// Default action priority
pub const DEFAULT_PRIORITY: i32 = 10;

/// Callback run when an action fires; receives the accepted positional arguments
pub type ActionCallback = Arc<dyn Fn(&[Value]) -> Result<()> + Send + Sync>;

/// Identifies a single registration
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActionHandle {
    action: String,
    id: u64,
}

impl ActionHandle {
    /// The action this registration listens on
    pub fn action(&self) -> &str {
        &self.action
    }
}

/// Registers callbacks against named actions
pub trait EventRegistrar: Send + Sync {
    /// Register `callback` to run whenever `action` fires
    ///
    /// `accepted_args` caps how many of the firing's positional arguments the
    /// callback receives.
    fn add_action(&self, action: &str, callback: ActionCallback, priority: i32, accepted_args: usize) -> ActionHandle;
}

struct Registration {
    id: u64,
    priority: i32,
    accepted_args: usize,
    callback: ActionCallback,
}

#[derive(Default)]
struct Table {
    actions: HashMap<String, Vec<Registration>>,
    fired: HashMap<String, usize>,
    next_id: u64,
}

/// In-process action registry and dispatcher
#[derive(Default)]
pub struct Actions {
    table: Mutex<Table>,
}

impl Actions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire `action`, running every registered callback in order
    ///
    /// Returns the number of callbacks run. Dispatch stops at the first
    /// callback error, which is returned. Callbacks registered while the
    /// action is firing run on the next firing.
    pub fn do_action(&self, action: &str, args: &[Value]) -> Result<usize> {
        let snapshot: Vec<(usize, ActionCallback)> = {
            let mut table = self.table.lock().unwrap_or_else(|e| e.into_inner());
            *table.fired.entry(action.to_string()).or_default() += 1;
            table
                .actions
                .get(action)
                .map(|regs| regs.iter().map(|r| (r.accepted_args, r.callback.clone())).collect())
                .unwrap_or_default()
        };

        debug!(%action, args = args.len(), callbacks = snapshot.len(), "Actions::do_action");

        for (accepted_args, callback) in &snapshot {
            let take = (*accepted_args).min(args.len());
            callback(&args[..take])?;
        }

        Ok(snapshot.len())
    }

    /// Remove a registration; returns false if it was already gone
    pub fn remove(&self, handle: &ActionHandle) -> bool {
        let mut table = self.table.lock().unwrap_or_else(|e| e.into_inner());
        let Some(regs) = table.actions.get_mut(&handle.action) else {
            return false;
        };
        let before = regs.len();
        regs.retain(|r| r.id != handle.id);
        let removed = regs.len() != before;
        debug!(action = %handle.action, removed, "Actions::remove");
        removed
    }

    /// Number of callbacks registered on `action`
    pub fn registered(&self, action: &str) -> usize {
        let table = self.table.lock().unwrap_or_else(|e| e.into_inner());
        table.actions.get(action).map_or(0, Vec::len)
    }

    /// Number of times `action` has fired
    pub fn did_action(&self, action: &str) -> usize {
        let table = self.table.lock().unwrap_or_else(|e| e.into_inner());
        table.fired.get(action).copied().unwrap_or(0)
    }
}

impl EventRegistrar for Actions {
    fn add_action(&self, action: &str, callback: ActionCallback, priority: i32, accepted_args: usize) -> ActionHandle {
        let mut table = self.table.lock().unwrap_or_else(|e| e.into_inner());
        let id = table.next_id;
        table.next_id += 1;

        let regs = table.actions.entry(action.to_string()).or_default();
        regs.push(Registration {
            id,
            priority,
            accepted_args,
            callback,
        });
        // Stable sort keeps registration order within a priority
        regs.sort_by_key(|r| r.priority);
        debug!(%action, priority, accepted_args, id, "Actions::add_action");

        ActionHandle {
            action: action.to_string(),
            id,
        }
    }
}
