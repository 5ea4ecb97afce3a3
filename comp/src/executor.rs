//! Template execution
//!
//! Component templates are Handlebars files. They see the component's
//! arguments as `comp` and, for action-bound renders, the action's
//! arguments as `action_args`:
//!
//! ```handlebars
//! <div class="card">
//!   <h2>{{comp.title}}</h2>
//!   <p>{{comp.body}}</p>
//! </div>
//! ```

use std::path::Path;

use handlebars::{Handlebars, handlebars_helper};
use serde_json::{Number, Value};
use tracing::debug;

use crate::context::TemplateContext;
use crate::error::{ComponentError, Result};

/// Executes a located template file with an explicit context
pub trait TemplateExecutor: Send + Sync {
    /// Execute the template at `path` and return what it produced
    fn execute(&self, template_name: &str, path: &Path, context: &TemplateContext) -> Result<String>;
}

handlebars_helper!(sum: |values: array| sum_values(values));
handlebars_helper!(json: |value: Json| value.to_string());

/// Sum a list of numbers, staying integral while every value is an integer
fn sum_values(values: &[Value]) -> Value {
    let mut int_total: i64 = 0;
    let mut float_total: f64 = 0.0;
    let mut integral = true;

    for value in values {
        match value.as_i64() {
            Some(n) if integral => {
                int_total = int_total.saturating_add(n);
                float_total += n as f64;
            }
            _ => {
                integral = false;
                float_total += value.as_f64().unwrap_or(0.0);
            }
        }
    }

    if integral {
        Value::from(int_total)
    } else {
        Number::from_f64(float_total).map(Value::Number).unwrap_or(Value::Null)
    }
}

/// Handlebars-backed template executor
pub struct HandlebarsExecutor {
    hbs: Handlebars<'static>,
}

impl HandlebarsExecutor {
    pub fn new() -> Self {
        let mut hbs = Handlebars::new();
        hbs.register_helper("sum", Box::new(sum));
        hbs.register_helper("json", Box::new(json));
        Self { hbs }
    }

    /// Fail on missing fields instead of rendering them empty
    pub fn strict(mut self, strict: bool) -> Self {
        self.hbs.set_strict_mode(strict);
        self
    }

    /// Render template source that did not come from a file
    pub fn render_source(&self, template_name: &str, source: &str, context: &TemplateContext) -> Result<String> {
        self.hbs
            .render_template(source, context)
            .map_err(|e| ComponentError::Render {
                name: template_name.to_string(),
                source: Box::new(e),
            })
    }
}

impl Default for HandlebarsExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateExecutor for HandlebarsExecutor {
    fn execute(&self, template_name: &str, path: &Path, context: &TemplateContext) -> Result<String> {
        let source = std::fs::read_to_string(path).map_err(|source| ComponentError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(%template_name, path = %path.display(), bytes = source.len(), "HandlebarsExecutor::execute");
        self.render_source(template_name, &source, context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn write_template(dir: &TempDir, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_execute_binds_comp() {
        let dir = TempDir::new().unwrap();
        let path = write_template(&dir, "Card.hbs", "<h2>{{comp.title}}</h2><p>{{comp.body}}</p>");
        let ctx = TemplateContext::new(Some(json!({"title": "Apple", "body": "Lorem Ipsum"})));

        let html = HandlebarsExecutor::new().execute("Card", &path, &ctx).unwrap();
        assert_eq!(html, "<h2>Apple</h2><p>Lorem Ipsum</p>");
    }

    #[test]
    fn test_execute_binds_action_args() {
        let dir = TempDir::new().unwrap();
        let path = write_template(&dir, "Bind.hbs", "{{#each action_args}}[{{this}}]{{/each}}");
        let ctx = TemplateContext::new(None).with_action_args(&[json!("a"), json!(2)]);

        let html = HandlebarsExecutor::new().execute("Bind", &path, &ctx).unwrap();
        assert_eq!(html, "[a][2]");
    }

    #[test]
    fn test_html_is_escaped() {
        let dir = TempDir::new().unwrap();
        let path = write_template(&dir, "Escape.hbs", "{{comp.title}}");
        let ctx = TemplateContext::new(Some(json!({"title": "<b>"})));

        let html = HandlebarsExecutor::new().execute("Escape", &path, &ctx).unwrap();
        assert_eq!(html, "&lt;b&gt;");
    }

    #[test]
    fn test_sum_helper() {
        let dir = TempDir::new().unwrap();
        let path = write_template(&dir, "Sum.hbs", "{{sum comp.sum}}");

        let ints = TemplateContext::new(Some(json!({"sum": [10, 32, 95]})));
        let html = HandlebarsExecutor::new().execute("Sum", &path, &ints).unwrap();
        assert_eq!(html, "137");

        let floats = TemplateContext::new(Some(json!({"sum": [1, 0.5]})));
        let html = HandlebarsExecutor::new().execute("Sum", &path, &floats).unwrap();
        assert_eq!(html, "1.5");
    }

    #[test]
    fn test_json_helper() {
        let dir = TempDir::new().unwrap();
        let escaped = write_template(&dir, "Dump.hbs", "{{json comp}}");
        let raw = write_template(&dir, "Raw.hbs", "<pre>{{{json comp}}}</pre>");
        let ctx = TemplateContext::new(Some(json!({"a": [1, 2]})));

        let executor = HandlebarsExecutor::new();
        assert_eq!(executor.execute("Dump", &escaped, &ctx).unwrap(), "{&quot;a&quot;:[1,2]}");
        assert_eq!(executor.execute("Raw", &raw, &ctx).unwrap(), r#"<pre>{"a":[1,2]}</pre>"#);
    }

    #[test]
    fn test_strict_mode_rejects_missing_field() {
        let dir = TempDir::new().unwrap();
        let path = write_template(&dir, "Strict.hbs", "{{comp.missing}}");
        let ctx = TemplateContext::new(Some(json!({})));

        let lenient = HandlebarsExecutor::new().execute("Strict", &path, &ctx).unwrap();
        assert_eq!(lenient, "");

        let err = HandlebarsExecutor::new().strict(true).execute("Strict", &path, &ctx).unwrap_err();
        assert!(matches!(err, ComponentError::Render { ref name, .. } if name == "Strict"));
    }

    #[test]
    fn test_unreadable_template() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Gone.hbs");

        let err = HandlebarsExecutor::new()
            .execute("Gone", &path, &TemplateContext::default())
            .unwrap_err();
        assert!(matches!(err, ComponentError::Read { .. }));
    }
}
