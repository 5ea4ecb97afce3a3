//! Template context
//!
//! Templates receive their data explicitly: `comp` holds the render-time
//! arguments and `action_args` the positional arguments of the action that
//! triggered a bound render.

use serde::Serialize;
use serde_json::Value;

/// Data passed to a template when it executes
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TemplateContext {
    /// The component's arguments, `null` if none were given
    pub comp: Value,
    /// Arguments of the firing action, present only for bound renders
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_args: Option<Vec<Value>>,
}

impl TemplateContext {
    /// Context for a direct render
    pub fn new(comp: Option<Value>) -> Self {
        Self {
            comp: comp.unwrap_or(Value::Null),
            action_args: None,
        }
    }

    /// Context for a render triggered by an action
    pub fn with_action_args(mut self, args: &[Value]) -> Self {
        self.action_args = Some(args.to_vec());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_direct_context_serializes_comp_only() {
        let ctx = TemplateContext::new(Some(json!({"title": "Apple"})));
        assert_eq!(serde_json::to_value(&ctx).unwrap(), json!({"comp": {"title": "Apple"}}));
    }

    #[test]
    fn test_missing_args_are_null() {
        let ctx = TemplateContext::new(None);
        assert_eq!(ctx.comp, Value::Null);
    }

    #[test]
    fn test_action_args() {
        let ctx = TemplateContext::new(None).with_action_args(&[json!(42)]);
        assert_eq!(
            serde_json::to_value(&ctx).unwrap(),
            json!({"comp": null, "action_args": [42]})
        );
    }
}
