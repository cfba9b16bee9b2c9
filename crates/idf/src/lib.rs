//! Intermediate Document Format (IDF)
//! The flat block document that sits between the curriculum projector and the page
//! layout engine. Neither side knows about the other; both only speak `Block`.

pub mod markdown;

// --- Shared Types ---

/// A string type for the document.
pub type TextStr = String;

/// Heading depth. Only three levels are ever laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// Clamps arbitrary levels into the supported range.
    pub fn from_depth(depth: usize) -> Self {
        match depth {
            0 | 1 => HeadingLevel::H1,
            2 => HeadingLevel::H2,
            _ => HeadingLevel::H3,
        }
    }

    pub fn depth(self) -> usize {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }
}

// --- Main Block Enum ---

/// A single line-oriented unit of the document, in emission order.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// A section heading.
    Heading { level: HeadingLevel, text: TextStr },
    /// One table row. A `\n` inside a cell is a forced line break.
    TableRow { cells: Vec<TextStr>, header: bool },
    /// A bulleted list entry.
    ListItem(TextStr),
    /// A single emphasised line.
    BoldLine(TextStr),
    /// A horizontal rule across the content width.
    Rule,
    /// Vertical spacing of half a line.
    BlankLine,
    /// Free text that wraps and may split across pages.
    Paragraph(TextStr),
}

impl Block {
    pub fn heading(level: HeadingLevel, text: impl Into<TextStr>) -> Self {
        Block::Heading {
            level,
            text: text.into(),
        }
    }

    pub fn row<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<TextStr>,
    {
        Block::TableRow {
            cells: cells.into_iter().map(Into::into).collect(),
            header: false,
        }
    }

    pub fn header_row<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<TextStr>,
    {
        Block::TableRow {
            cells: cells.into_iter().map(Into::into).collect(),
            header: true,
        }
    }

    /// Whether the block must be placed on a single page when it fits on one.
    /// Paragraphs are the only blocks allowed to split.
    pub fn keeps_together(&self) -> bool {
        !matches!(self, Block::Paragraph(_))
    }

    /// Returns a string identifier for the block type, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Heading { .. } => "heading",
            Block::TableRow { .. } => "table-row",
            Block::ListItem(_) => "list-item",
            Block::BoldLine(_) => "bold-line",
            Block::Rule => "rule",
            Block::BlankLine => "blank-line",
            Block::Paragraph(_) => "paragraph",
        }
    }
}

// --- Document ---

/// An ordered block sequence plus the title used for document metadata.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockDocument {
    pub title: TextStr,
    pub blocks: Vec<Block>,
}

impl BlockDocument {
    pub fn new(title: impl Into<TextStr>) -> Self {
        Self {
            title: title.into(),
            blocks: Vec::new(),
        }
    }

    pub fn push(&mut self, block: Block) -> &mut Self {
        self.blocks.push(block);
        self
    }

    pub fn extend(&mut self, blocks: impl IntoIterator<Item = Block>) -> &mut Self {
        self.blocks.extend(blocks);
        self
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Texts of all headings at `level`, in document order.
    pub fn headings(&self, level: HeadingLevel) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|block| match block {
                Block::Heading { level: l, text } if *l == level => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Serializes the document as Markdown, one block per line.
    pub fn to_markdown(&self) -> String {
        markdown::write_blocks(&self.blocks)
    }

    /// Parses Markdown produced by [`BlockDocument::to_markdown`] (or written by hand in
    /// the same subset) back into blocks.
    pub fn from_markdown(title: impl Into<TextStr>, text: &str) -> Self {
        Self {
            title: title.into(),
            blocks: markdown::read_blocks(text),
        }
    }
}
