//! Line-oriented Markdown reading and writing for block documents.
//!
//! Only the subset the projector emits is understood: ATX headings up to `###`,
//! pipe tables, `- ` list items, `**bold**` lines, `---` rules and plain paragraphs.
//! A paragraph that would read back as one of the other kinds is written with a leading
//! `\`, which the reader strips again.

use crate::{Block, HeadingLevel, TextStr};

const CELL_BREAK: &str = "<br>";
const PARAGRAPH_ESCAPE: char = '\\';

impl Block {
    /// Classifies one Markdown line. Table separator rows (`|---|---|`) carry no
    /// content and yield `None`.
    pub fn from_markdown_line(line: &str) -> Option<Block> {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            return Some(Block::BlankLine);
        }
        if let Some(text) = line.trim_start().strip_prefix(PARAGRAPH_ESCAPE) {
            return Some(Block::Paragraph(text.to_string()));
        }
        if trimmed.starts_with('|') {
            if is_separator_row(trimmed) {
                return None;
            }
            return Some(Block::TableRow {
                cells: split_cells(trimmed),
                header: false,
            });
        }
        if trimmed == "---" {
            return Some(Block::Rule);
        }
        if let Some(heading) = parse_heading(trimmed) {
            return Some(heading);
        }
        if let Some(item) = trimmed.strip_prefix("- ") {
            return Some(Block::ListItem(item.trim().to_string()));
        }
        if let Some(inner) = trimmed
            .strip_prefix("**")
            .and_then(|rest| rest.strip_suffix("**"))
            && !inner.is_empty()
        {
            return Some(Block::BoldLine(inner.to_string()));
        }
        Some(Block::Paragraph(trimmed.to_string()))
    }

    /// The Markdown line(s) for this block. Header rows are followed by a separator row.
    pub fn to_markdown(&self) -> String {
        match self {
            Block::Heading { level, text } => format!("{} {}", "#".repeat(level.depth()), text),
            Block::TableRow { cells, header } => {
                let row = format!(
                    "| {} |",
                    cells.iter().map(|c| escape_cell(c)).collect::<Vec<_>>().join(" | ")
                );
                if *header {
                    let separator = vec!["---"; cells.len().max(1)].join("|");
                    format!("{}\n|{}|", row, separator)
                } else {
                    row
                }
            }
            Block::ListItem(text) => format!("- {}", text),
            Block::BoldLine(text) => format!("**{}**", text),
            Block::Rule => "---".to_string(),
            Block::BlankLine => String::new(),
            Block::Paragraph(text) if needs_escape(text) => format!("{}{}", PARAGRAPH_ESCAPE, text),
            Block::Paragraph(text) => text.clone(),
        }
    }
}

pub(crate) fn write_blocks(blocks: &[Block]) -> String {
    let mut out = String::new();
    for block in blocks {
        out.push_str(&block.to_markdown());
        out.push('\n');
    }
    out
}

/// Reads lines back into blocks. A table row immediately followed by a separator row
/// is marked as a header.
pub(crate) fn read_blocks(text: &str) -> Vec<Block> {
    let mut blocks: Vec<Block> = Vec::new();
    for line in text.lines() {
        match Block::from_markdown_line(line) {
            Some(block) => blocks.push(block),
            None => {
                if let Some(Block::TableRow { header, .. }) = blocks.last_mut() {
                    *header = true;
                }
            }
        }
    }
    blocks
}

/// Whether a paragraph would come back as something else (or changed) if written bare.
fn needs_escape(text: &str) -> bool {
    text.trim() != text
        || text.starts_with(PARAGRAPH_ESCAPE)
        || !matches!(Block::from_markdown_line(text), Some(Block::Paragraph(_)))
}

fn parse_heading(line: &str) -> Option<Block> {
    let depth = line.chars().take_while(|c| *c == '#').count();
    if depth == 0 || depth > 3 {
        return None;
    }
    let text = line[depth..].strip_prefix(' ')?;
    Some(Block::heading(HeadingLevel::from_depth(depth), text.trim()))
}

fn is_separator_row(line: &str) -> bool {
    line.chars().all(|c| matches!(c, '|' | '-' | ':' | ' ')) && line.contains('-')
}

fn escape_cell(cell: &str) -> String {
    cell.replace('|', "\\|").replace('\n', CELL_BREAK)
}

fn split_cells(line: &str) -> Vec<TextStr> {
    let inner = line.strip_prefix('|').unwrap_or(line);
    let inner = inner.strip_suffix('|').unwrap_or(inner);

    let mut cells = Vec::new();
    let mut current = String::new();
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'|') => {
                current.push('|');
                chars.next();
            }
            '|' => cells.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    cells.push(current);

    cells
        .into_iter()
        .map(|cell| cell.trim().replace(CELL_BREAK, "\n"))
        .collect()
}
