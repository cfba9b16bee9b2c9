use crate::error::RenderError;
use plansheet_layout::{LaidOutDocument, PageGeometry, PositionedElement};

/// A trait for document renderers, abstracting the PDF-writing primitives.
///
/// Calls arrive in order: `begin_document`, one `render_page` per page, then `finish`.
pub trait DocumentRenderer {
    fn begin_document(&mut self, title: &str) -> Result<(), RenderError>;

    fn render_page(
        &mut self,
        elements: &[PositionedElement],
        geometry: &PageGeometry,
    ) -> Result<(), RenderError>;

    /// Serializes the finished document into a single byte buffer.
    fn finish(self) -> Result<Vec<u8>, RenderError>;
}

/// Drives a renderer over every page of a laid-out document.
pub fn render_document<R: DocumentRenderer>(
    mut renderer: R,
    document: &LaidOutDocument,
) -> Result<Vec<u8>, RenderError> {
    renderer.begin_document(&document.title)?;
    for page in &document.pages {
        renderer.render_page(page, &document.geometry)?;
    }
    renderer.finish()
}
