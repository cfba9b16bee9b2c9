//! The public export entry points: print markup for any scope, and the weekly PDF.

use crate::config::ExportConfig;
use crate::diagnostics::{ExportWarning, check_activity_maps};
use crate::error::{DataKind, ExportError};
use crate::print::{MarkupDocument, PrintRenderer, PrintScope};
use crate::projector::MarkdownProjector;
use chrono::NaiveDate;
use plansheet_idf::BlockDocument;
use plansheet_layout::LayoutEngine;
use plansheet_render_core::render_document;
use plansheet_render_lopdf::LopdfRenderer;
use plansheet_types::{CurriculumTree, WeekContext};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// A finished weekly PDF.
#[derive(Debug, Clone)]
pub struct PdfDocument {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub page_count: usize,
    pub warnings: Vec<ExportWarning>,
}

/// A builder for creating an [`Exporter`].
#[derive(Debug, Clone, Default)]
pub struct ExportBuilder {
    config: ExportConfig,
    generated_on: Option<NaiveDate>,
}

impl ExportBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    /// Replaces the whole configuration.
    pub fn with_config(mut self, config: ExportConfig) -> Self {
        self.config = config;
        self
    }

    /// Loads the configuration from a JSON file.
    pub fn with_config_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, ExportError> {
        self.config = ExportConfig::from_file(path)?;
        Ok(self)
    }

    /// Rewrites the current configuration, e.g. to layer overrides on a loaded file.
    pub fn map_config(mut self, f: impl FnOnce(ExportConfig) -> ExportConfig) -> Self {
        self.config = f(self.config);
        self
    }

    /// Stamps every document with "Generated on <date>". Overrides the configured date.
    pub fn with_generated_on(mut self, date: NaiveDate) -> Self {
        self.generated_on = Some(date);
        self
    }

    /// Validates the configuration and compiles the print templates.
    pub fn build(mut self) -> Result<Exporter, ExportError> {
        if self.generated_on.is_some() {
            self.config.generated_on = self.generated_on;
        }
        self.config.validate()?;
        crate::print::warm_templates()?;
        log::debug!("Exporter ready with {:?}.", self.config);
        Ok(Exporter {
            printer: PrintRenderer::new(&self.config),
            projector: MarkdownProjector::new(self.config.heading(), self.config.generated_on),
            config: self.config,
        })
    }
}

/// Renders curriculum data for print and download. Holds no mutable state, so one
/// exporter can serve any number of requests.
#[derive(Debug, Clone)]
pub struct Exporter {
    config: ExportConfig,
    printer: PrintRenderer,
    projector: MarkdownProjector,
}

impl Exporter {
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Renders the requested scope to print-ready HTML.
    pub fn render_for_print(
        &self,
        tree: &CurriculumTree,
        scope: &PrintScope,
    ) -> Result<MarkupDocument, ExportError> {
        log::debug!("Rendering {:?} for print.", scope);
        match scope {
            PrintScope::Term { id } => {
                let term = tree
                    .find_term(id)
                    .ok_or_else(|| ExportError::missing(DataKind::Term, id))?;
                self.printer.render_term(tree, term)
            }
            PrintScope::Week { id } => self.printer.render_week(resolve_week(tree, id)?),
            PrintScope::Daily { week_id } => {
                self.printer.render_daily(resolve_week(tree, week_id)?)
            }
            PrintScope::SingleDay { day_id } => {
                let ctx = tree
                    .find_day(day_id)
                    .ok_or_else(|| ExportError::missing(DataKind::Day, day_id))?;
                self.printer.render_single_day(ctx)
            }
        }
    }

    /// Projects one week into the intermediate block document.
    pub fn project_week(
        &self,
        tree: &CurriculumTree,
        week_id: &str,
    ) -> Result<BlockDocument, ExportError> {
        Ok(self.projector.project(resolve_week(tree, week_id)?))
    }

    /// Lays out and renders one week as a paginated PDF.
    pub fn render_for_download(
        &self,
        tree: &CurriculumTree,
        week_id: &str,
    ) -> Result<PdfDocument, ExportError> {
        let ctx = resolve_week(tree, week_id)?;
        let mut warnings = check_activity_maps(&ctx.week.days);

        let blocks = self.projector.project(ctx);
        let laid_out = LayoutEngine::layout(self.config.layout_config(), &blocks)?;
        let page_count = laid_out.page_count();
        warnings.extend(laid_out.warnings.iter().cloned().map(ExportWarning::from));

        let bytes = render_document(LopdfRenderer::new(), &laid_out)?;
        let filename = pdf_filename(ctx);
        log::debug!(
            "Rendered '{}': {} page(s), {} bytes, {} warning(s).",
            filename,
            page_count,
            bytes.len(),
            warnings.len()
        );
        Ok(PdfDocument {
            filename,
            bytes,
            page_count,
            warnings,
        })
    }

    /// Renders the weekly PDF into `dir` under its default filename.
    pub fn save_pdf<P: AsRef<Path>>(
        &self,
        tree: &CurriculumTree,
        week_id: &str,
        dir: P,
    ) -> Result<(PathBuf, PdfDocument), ExportError> {
        let document = self.render_for_download(tree, week_id)?;
        let path = write_atomically(dir.as_ref(), &document.filename, &document.bytes)?;
        Ok((path, document))
    }

    /// Renders a print scope into `dir` under its default filename.
    pub fn save_print<P: AsRef<Path>>(
        &self,
        tree: &CurriculumTree,
        scope: &PrintScope,
        dir: P,
    ) -> Result<(PathBuf, MarkupDocument), ExportError> {
        let document = self.render_for_print(tree, scope)?;
        let path = write_atomically(dir.as_ref(), &document.filename, document.html.as_bytes())?;
        Ok((path, document))
    }
}

fn resolve_week<'a>(tree: &'a CurriculumTree, id: &str) -> Result<WeekContext<'a>, ExportError> {
    tree.find_week(id)
        .ok_or_else(|| ExportError::missing(DataKind::Week, id))
}

/// `week-<number>-<term name>.pdf`, with the term name lower-cased.
pub fn pdf_filename(ctx: WeekContext<'_>) -> String {
    format!(
        "week-{}-{}.pdf",
        ctx.week.number,
        file_segment(&ctx.term.name)
    )
}

/// Lower-cases a name for use inside a filename. Path separators become dashes.
pub fn file_segment(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '-' } else { c })
        .collect()
}

/// Writes through a temporary file in the target directory, so a failed export never
/// leaves a partial file behind.
fn write_atomically(dir: &Path, filename: &str, bytes: &[u8]) -> Result<PathBuf, ExportError> {
    let path = dir.join(filename);
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.persist(&path).map_err(|e| ExportError::Io(e.error))?;
    log::info!("Wrote {} bytes to '{}'.", bytes.len(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_segment_lowercases_and_strips_separators() {
        assert_eq!(file_segment("Term 1"), "term 1");
        assert_eq!(file_segment(" Autumn/Winter "), "autumn-winter");
    }

    #[test]
    fn config_file_is_layered_under_overrides() -> Result<(), Box<dyn std::error::Error>> {
        let mut file = NamedTempFile::new()?;
        write!(file, r#"{{"pageSize":"letter","marginMm":20,"lineHeightMm":7}}"#)?;

        let exporter = ExportBuilder::new()
            .with_config_file(file.path())?
            .map_config(|config| ExportConfig {
                line_height_mm: 8.0,
                ..config
            })
            .with_generated_on(NaiveDate::from_ymd_opt(2025, 3, 1).ok_or("bad date")?)
            .build()?;

        let config = exporter.config();
        assert_eq!(config.page_size, crate::config::PaperSize::Letter);
        assert_eq!(config.margin_mm, 20.0);
        assert_eq!(config.line_height_mm, 8.0);
        assert_eq!(config.generated_on, NaiveDate::from_ymd_opt(2025, 3, 1));
        Ok(())
    }

    #[test]
    fn missing_config_file_is_a_config_error() {
        let result = ExportBuilder::new().with_config_file("/nonexistent/plansheet.json");
        assert!(matches!(result, Err(ExportError::Config(_))));
    }

    #[test]
    fn builder_rejects_invalid_config() {
        let config = ExportConfig {
            margin_mm: -3.0,
            ..ExportConfig::default()
        };
        assert!(matches!(
            ExportBuilder::new().with_config(config).build(),
            Err(ExportError::Config(_))
        ));
    }
}
