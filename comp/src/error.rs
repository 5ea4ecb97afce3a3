//! Component error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while resolving or rendering a component
#[derive(Debug, Error)]
pub enum ComponentError {
    #[error("Could not locate template for {name}.")]
    TemplateNotFound { name: String },

    #[error("Failed to read template {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to render template {name}: {source}")]
    Render {
        name: String,
        #[source]
        source: Box<handlebars::RenderError>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ComponentError {
    /// The template name carried by a `TemplateNotFound` error
    pub fn missing_template(&self) -> Option<&str> {
        match self {
            Self::TemplateNotFound { name } => Some(name),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ComponentError>;
