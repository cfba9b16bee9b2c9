use crate::algorithms::pagination::{check_fit, fits_on_empty_page};
use crate::config::LayoutConfig;
use crate::elements::{LayoutElement, PositionedElement, TextElement};
use crate::fonts::{ASCENT, FontFace};
use crate::output::{LaidOutDocument, LayoutWarning};
use crate::text::{WrappedText, wrap_cell, wrap_text};
use crate::LayoutError;
use plansheet_idf::{Block, BlockDocument, HeadingLevel};

const RULE_THICKNESS: f32 = 0.5;

/// One horizontal band of text, placed as a unit.
#[derive(Debug, Clone)]
struct LineBox {
    advance: f32,
    runs: Vec<TextRun>,
}

#[derive(Debug, Clone)]
struct TextRun {
    /// Offset from the left margin.
    x: f32,
    content: String,
    font: FontFace,
    size: f32,
}

/// A word that did not fit on a line by itself.
struct Overflow {
    word: String,
    width: f32,
    max_width: f32,
}

/// Places blocks top-down onto fixed-size pages.
///
/// The cursor only moves forward. Each block is measured before it is drawn, and a new
/// page is started when the block would cross the bottom margin.
pub struct LayoutEngine {
    config: LayoutConfig,
    pages: Vec<Vec<PositionedElement>>,
    current_page: usize,
    cursor_y: f32,
    warnings: Vec<LayoutWarning>,
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Result<Self, LayoutError> {
        config.validate()?;
        Ok(LayoutEngine {
            config,
            pages: vec![Vec::new()],
            current_page: 0,
            cursor_y: config.page.margin,
            warnings: Vec::new(),
        })
    }

    /// Lays out a whole document with a fresh engine.
    pub fn layout(config: LayoutConfig, document: &BlockDocument) -> Result<LaidOutDocument, LayoutError> {
        let mut engine = LayoutEngine::new(config)?;
        for block in &document.blocks {
            engine.emit(block);
        }
        log::debug!(
            "Laid out {} blocks of '{}' onto {} page(s).",
            document.blocks.len(),
            document.title,
            engine.pages.len()
        );
        Ok(engine.finish(document.title.clone()))
    }

    pub fn cursor_y(&self) -> f32 {
        self.cursor_y
    }

    pub fn page_index(&self) -> usize {
        self.current_page
    }

    pub fn emit(&mut self, block: &Block) {
        let lh = self.config.line_height;
        match block {
            Block::Rule => {
                self.ensure_room(2.0 * lh);
                self.cursor_y += lh;
                let page = self.config.page;
                self.add_element(PositionedElement {
                    x: page.margin,
                    y: self.cursor_y,
                    width: page.content_width(),
                    height: RULE_THICKNESS,
                    element: LayoutElement::Line {
                        thickness: RULE_THICKNESS,
                    },
                });
                self.cursor_y += lh;
            }
            Block::BlankLine => {
                self.ensure_room(0.5 * lh);
                self.cursor_y += 0.5 * lh;
            }
            _ if !block.keeps_together() => {
                let (lines, overflows) = self.compose(block);
                for line in &lines {
                    self.ensure_room(line.advance);
                    self.place_line(line);
                }
                self.record_overflows(overflows);
            }
            _ => {
                let (lines, overflows) = self.compose(block);
                let height: f32 = lines.iter().map(|l| l.advance).sum();
                if fits_on_empty_page(height, &self.config.page) {
                    self.ensure_room(height);
                    for line in &lines {
                        self.place_line(line);
                    }
                } else {
                    let available = self.config.page.content_height();
                    log::warn!(
                        "{} of height {:.1}pt exceeds the page content height of {:.1}pt; flowing it line by line.",
                        block.kind(),
                        height,
                        available
                    );
                    self.warnings.push(LayoutWarning::BlockTallerThanPage {
                        kind: block.kind(),
                        height,
                        available,
                        page: self.current_page,
                    });
                    for line in &lines {
                        self.ensure_room(line.advance);
                        self.place_line(line);
                    }
                }
                self.record_overflows(overflows);
            }
        }
    }

    pub fn finish(self, title: String) -> LaidOutDocument {
        LaidOutDocument {
            title,
            pages: self.pages,
            geometry: self.config.page,
            warnings: self.warnings,
        }
    }

    /// Breaks a text-bearing block into line boxes without touching the cursor.
    fn compose(&self, block: &Block) -> (Vec<LineBox>, Vec<Overflow>) {
        let lh = self.config.line_height;
        let body = self.config.body_font_size;
        let content_width = self.config.page.content_width();
        let mut overflows = Vec::new();

        let lines = match block {
            Block::Heading { level, text } => {
                let (size, factor) = heading_metrics(*level);
                let font = FontFace::HelveticaBold;
                let wrapped = wrap_text(text, font, size, content_width);
                collect_overflows(&mut overflows, &wrapped, font, size, content_width);
                single_column(wrapped, 0.0, font, size, factor * lh)
            }
            Block::ListItem(text) => {
                let indent = self.config.list_indent;
                let max_width = content_width - indent;
                let font = FontFace::Helvetica;
                let wrapped = wrap_text(&format!("- {}", text), font, body, max_width);
                collect_overflows(&mut overflows, &wrapped, font, body, max_width);
                single_column(wrapped, indent, font, body, lh)
            }
            Block::BoldLine(text) | Block::Paragraph(text) => {
                let font = FontFace::regular_or_bold(matches!(block, Block::BoldLine(_)));
                let wrapped = wrap_text(text, font, body, content_width);
                collect_overflows(&mut overflows, &wrapped, font, body, content_width);
                single_column(wrapped, 0.0, font, body, lh)
            }
            Block::TableRow { cells, header } => {
                self.compose_row(cells, *header, &mut overflows)
            }
            Block::Rule | Block::BlankLine => Vec::new(),
        };
        (lines, overflows)
    }

    /// Uniform columns; the row is as tall as its tallest cell and never less than a line.
    ///
    /// Cells are split into `\n` segments, and segment `k` of every cell starts on the same
    /// line, so the n-th entry of one column always sits beside the n-th entry of the next
    /// even when one of them wraps.
    fn compose_row(&self, cells: &[String], header: bool, overflows: &mut Vec<Overflow>) -> Vec<LineBox> {
        let lh = self.config.line_height;
        let size = self.config.body_font_size;
        let font = FontFace::regular_or_bold(header);
        let blank_row = || LineBox {
            advance: lh,
            runs: Vec::new(),
        };
        if cells.is_empty() {
            return vec![blank_row()];
        }

        let column_width = self.config.page.content_width() / cells.len() as f32;
        let padding = self.config.cell_padding.min(column_width / 4.0);
        let text_width = column_width - 2.0 * padding;

        let segmented: Vec<Vec<WrappedText>> = cells
            .iter()
            .map(|cell| wrap_cell(cell, font, size, text_width))
            .collect();
        for segment in segmented.iter().flatten() {
            collect_overflows(overflows, segment, font, size, text_width);
        }

        let segment_count = segmented.iter().map(Vec::len).max().unwrap_or(0);
        let mut lines = Vec::new();
        for s in 0..segment_count {
            let band = segmented
                .iter()
                .filter_map(|cell| cell.get(s))
                .map(|w| w.lines.len())
                .max()
                .unwrap_or(0);
            for k in 0..band {
                let runs = segmented
                    .iter()
                    .enumerate()
                    .filter_map(|(i, cell)| {
                        let content = cell.get(s)?.lines.get(k)?;
                        (!content.is_empty()).then(|| TextRun {
                            x: i as f32 * column_width + padding,
                            content: content.clone(),
                            font,
                            size,
                        })
                    })
                    .collect();
                lines.push(LineBox { advance: lh, runs });
            }
        }
        if lines.is_empty() {
            lines.push(blank_row());
        }
        lines
    }

    fn place_line(&mut self, line: &LineBox) {
        let margin = self.config.page.margin;
        let top = self.cursor_y;
        for run in &line.runs {
            self.add_element(PositionedElement {
                x: margin + run.x,
                y: top + run.size * ASCENT,
                width: run.font.measure(&run.content, run.size),
                height: run.size,
                element: LayoutElement::Text(TextElement {
                    content: run.content.clone(),
                    font: run.font,
                    size: run.size,
                }),
            });
        }
        self.cursor_y += line.advance;
    }

    /// Starts a new page when `height` does not fit below the cursor. A pristine page is
    /// never abandoned, so oversized content cannot produce runs of empty pages.
    fn ensure_room(&mut self, height: f32) {
        let analysis = check_fit(self.cursor_y, height, &self.config.page);
        if analysis.should_break && !self.page_is_pristine() {
            self.new_page();
        }
    }

    fn page_is_pristine(&self) -> bool {
        self.cursor_y <= self.config.page.margin
    }

    fn new_page(&mut self) {
        self.current_page += 1;
        self.pages.push(Vec::new());
        self.cursor_y = self.config.page.margin;
    }

    fn add_element(&mut self, element: PositionedElement) {
        if let Some(page) = self.pages.last_mut() {
            page.push(element);
        }
    }

    fn record_overflows(&mut self, overflows: Vec<Overflow>) {
        for overflow in overflows {
            log::warn!(
                "Word '{}' ({:.1}pt) is wider than the available {:.1}pt; placing it on its own line.",
                overflow.word,
                overflow.width,
                overflow.max_width
            );
            self.warnings.push(LayoutWarning::OversizedWord {
                word: overflow.word,
                width: overflow.width,
                max_width: overflow.max_width,
                page: self.current_page,
            });
        }
    }
}

/// Font size and vertical advance (in line heights) per heading level.
fn heading_metrics(level: HeadingLevel) -> (f32, f32) {
    match level {
        HeadingLevel::H1 => (18.0, 2.0),
        HeadingLevel::H2 => (16.0, 1.5),
        HeadingLevel::H3 => (14.0, 1.2),
    }
}

fn single_column(wrapped: WrappedText, x: f32, font: FontFace, size: f32, advance: f32) -> Vec<LineBox> {
    wrapped
        .lines
        .into_iter()
        .map(|content| LineBox {
            advance,
            runs: vec![TextRun {
                x,
                content,
                font,
                size,
            }],
        })
        .collect()
}

fn collect_overflows(out: &mut Vec<Overflow>, wrapped: &WrappedText, font: FontFace, size: f32, max_width: f32) {
    out.extend(wrapped.oversized.iter().map(|word| Overflow {
        word: word.clone(),
        width: font.measure(word, size),
        max_width,
    }));
}
