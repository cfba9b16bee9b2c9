//! Curriculum print and PDF export.
//!
//! Two independent outputs are produced from one read-only [`CurriculumTree`]:
//! print-ready HTML for any term, week or day ([`print`]), and a paginated weekly PDF
//! laid out by `plansheet-layout` and written by `plansheet-render-lopdf`.

pub mod config;
pub mod data;
pub mod diagnostics;
pub mod error;
pub mod export;
pub mod print;
pub mod projector;

pub use config::{ExportConfig, PageOrientation, PaperSize};
pub use data::{load_tree, load_tree_file};
pub use diagnostics::ExportWarning;
pub use error::{DataError, DataKind, ExportError};
pub use export::{ExportBuilder, Exporter, PdfDocument};
pub use print::{MarkupDocument, PrintScope};
pub use projector::MarkdownProjector;

pub use plansheet_idf::{Block, BlockDocument};
pub use plansheet_types::CurriculumTree;
