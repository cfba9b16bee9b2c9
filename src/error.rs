use crate::config::ConfigError;
use plansheet_layout::LayoutError;
use plansheet_render_core::RenderError;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The message shown to end users for any failed export.
pub const USER_FACING_FAILURE: &str = "Failed to generate document";

/// Which entity a lookup was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataKind {
    Term,
    Week,
    Day,
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DataKind::Term => "term",
            DataKind::Week => "week",
            DataKind::Day => "day",
        })
    }
}

/// Problems reading the curriculum snapshot itself.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Failed to parse curriculum JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to read curriculum data from '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A comprehensive error type for the whole export pipeline.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("The requested {kind} '{id}' does not exist.")]
    MissingData { kind: DataKind, id: String },

    #[error("Invalid curriculum data: {0}")]
    Data(#[from] DataError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Template rendering failed: {0}")]
    Template(#[from] handlebars::RenderError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<handlebars::TemplateError> for ExportError {
    fn from(e: handlebars::TemplateError) -> Self {
        ExportError::Template(e.into())
    }
}

impl ExportError {
    pub fn missing(kind: DataKind, id: impl Into<String>) -> Self {
        ExportError::MissingData {
            kind,
            id: id.into(),
        }
    }

    /// The generic, non-technical message for end users. The `Display` output carries
    /// the detailed cause.
    pub fn user_message(&self) -> &'static str {
        USER_FACING_FAILURE
    }
}
