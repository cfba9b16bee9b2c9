//! Export settings, loadable from JSON and overridable from the command line.

use chrono::NaiveDate;
use plansheet_layout::{LayoutConfig, Orientation, PageGeometry, PageSize, mm_to_pt};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_HEADING: &str = "Weekly Curriculum Plan";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to read configuration from '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PaperSize {
    #[default]
    A4,
    Letter,
    Legal,
}

impl From<PaperSize> for PageSize {
    fn from(size: PaperSize) -> Self {
        match size {
            PaperSize::A4 => PageSize::A4,
            PaperSize::Letter => PageSize::Letter,
            PaperSize::Legal => PageSize::Legal,
        }
    }
}

impl PaperSize {
    /// The keyword used in a CSS `@page { size: ... }` rule.
    pub fn css_name(self) -> &'static str {
        match self {
            PaperSize::A4 => "A4",
            PaperSize::Letter => "letter",
            PaperSize::Legal => "legal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PageOrientation {
    #[default]
    Portrait,
    Landscape,
}

impl From<PageOrientation> for Orientation {
    fn from(orientation: PageOrientation) -> Self {
        match orientation {
            PageOrientation::Portrait => Orientation::Portrait,
            PageOrientation::Landscape => Orientation::Landscape,
        }
    }
}

impl PageOrientation {
    pub fn css_name(self) -> &'static str {
        match self {
            PageOrientation::Portrait => "portrait",
            PageOrientation::Landscape => "landscape",
        }
    }
}

/// Settings shared by the PDF and print outputs. Every field has a default, so an empty
/// JSON object is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportConfig {
    pub page_size: PaperSize,
    pub orientation: PageOrientation,
    pub margin_mm: f32,
    pub line_height_mm: f32,
    /// The top-level heading of the weekly PDF.
    pub title: String,
    /// When set, a "Generated" line with this date is added to every document. Left
    /// unset, output depends only on the curriculum data.
    pub generated_on: Option<NaiveDate>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            page_size: PaperSize::A4,
            orientation: PageOrientation::Portrait,
            margin_mm: 15.0,
            line_height_mm: 6.0,
            title: DEFAULT_HEADING.to_string(),
            generated_on: None,
        }
    }
}

impl ExportConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: ExportConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.margin_mm.is_finite() && self.margin_mm > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "margin must be a positive number of millimetres, got {}",
                self.margin_mm
            )));
        }
        if !(self.line_height_mm.is_finite() && self.line_height_mm > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "line height must be a positive number of millimetres, got {}",
                self.line_height_mm
            )));
        }
        self.layout_config()
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    pub fn page_geometry(&self) -> PageGeometry {
        PageGeometry::new(
            self.page_size.into(),
            self.orientation.into(),
            mm_to_pt(self.margin_mm),
        )
    }

    pub fn layout_config(&self) -> LayoutConfig {
        LayoutConfig::new(self.page_geometry(), mm_to_pt(self.line_height_mm))
    }

    /// The document heading, falling back to the default when configured blank.
    pub fn heading(&self) -> &str {
        match self.title.trim() {
            "" => DEFAULT_HEADING,
            title => title,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let config = ExportConfig::from_json("{}").unwrap();
        assert_eq!(config, ExportConfig::default());
        assert_eq!(config.heading(), DEFAULT_HEADING);
    }

    #[test]
    fn camel_case_fields_are_read() {
        let config = ExportConfig::from_json(
            r#"{"pageSize":"letter","orientation":"landscape","marginMm":20,"generatedOn":"2025-03-01"}"#,
        )
        .unwrap();
        assert_eq!(config.page_size, PaperSize::Letter);
        let page = config.page_geometry();
        assert!(page.width > page.height);
        assert_eq!(config.generated_on, NaiveDate::from_ymd_opt(2025, 3, 1));
    }

    #[test]
    fn rejects_margins_that_leave_no_content() {
        assert!(matches!(
            ExportConfig::from_json(r#"{"marginMm":0}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            ExportConfig::from_json(r#"{"marginMm":120}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            ExportConfig::from_json(r#"{"lineHeightMm":-1}"#),
            Err(ConfigError::Invalid(_))
        ));
    }
}
