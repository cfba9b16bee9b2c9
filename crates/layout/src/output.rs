//! Output types from the layout engine.
//!
//! `LaidOutDocument` holds positioned elements grouped by page, ready for a renderer,
//! plus the non-fatal problems met while placing them.

use crate::PositionedElement;
use crate::config::PageGeometry;
use std::fmt;

/// Best-effort placements. The document is still complete when these occur.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutWarning {
    /// A single word wider than the available line width. It was placed alone on a line
    /// and overflows the right margin.
    OversizedWord {
        word: String,
        width: f32,
        max_width: f32,
        page: usize,
    },
    /// A block that must not split was taller than a whole page, so it was flowed
    /// line by line instead.
    BlockTallerThanPage {
        kind: &'static str,
        height: f32,
        available: f32,
        page: usize,
    },
}

impl fmt::Display for LayoutWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutWarning::OversizedWord {
                word,
                width,
                max_width,
                page,
            } => write!(
                f,
                "word '{}' is {:.1}pt wide but the line is only {:.1}pt (page {})",
                word,
                width,
                max_width,
                page + 1
            ),
            LayoutWarning::BlockTallerThanPage {
                kind,
                height,
                available,
                page,
            } => write!(
                f,
                "{} of height {:.1}pt exceeds the page content height of {:.1}pt and was split (page {})",
                kind,
                height,
                available,
                page + 1
            ),
        }
    }
}

/// The result of laying out one block document.
#[derive(Debug, Clone, PartialEq)]
pub struct LaidOutDocument {
    pub title: String,
    /// Pages of positioned elements. Never empty.
    pub pages: Vec<Vec<PositionedElement>>,
    pub geometry: PageGeometry,
    pub warnings: Vec<LayoutWarning>,
}

impl LaidOutDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Text contents of one page in paint order.
    pub fn page_texts(&self, page: usize) -> Vec<&str> {
        self.pages
            .get(page)
            .map(|elements| elements.iter().filter_map(|e| e.text()).collect())
            .unwrap_or_default()
    }

    /// Index of the first page containing a text element equal to `needle`.
    pub fn find_text(&self, needle: &str) -> Option<usize> {
        (0..self.pages.len()).find(|&page| self.page_texts(page).contains(&needle))
    }
}
