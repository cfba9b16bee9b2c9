use lopdf::Document as LopdfDocument;
use lopdf::content::Content;

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            doc: LopdfDocument::load_mem(bytes)?,
        })
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Every `Tj` string shown on each page, in drawing order.
    pub fn page_lines(&self) -> Result<Vec<Vec<String>>, Box<dyn std::error::Error>> {
        let mut pages = Vec::new();
        for (_, page_id) in self.doc.get_pages() {
            let content = Content::decode(&self.doc.get_page_content(page_id)?)?;
            let lines = content
                .operations
                .iter()
                .filter(|op| op.operator == "Tj")
                .filter_map(|op| op.operands.first())
                .filter_map(|operand| operand.as_str().ok())
                .map(decode_win_ansi)
                .collect();
            pages.push(lines);
        }
        Ok(pages)
    }

    /// All shown strings of the document, flattened.
    pub fn all_lines(&self) -> Result<Vec<String>, Box<dyn std::error::Error>> {
        Ok(self.page_lines()?.into_iter().flatten().collect())
    }

    /// BaseFont names of every font object.
    pub fn font_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .doc
            .objects
            .values()
            .filter_map(|object| object.as_dict().ok())
            .filter(|dict| {
                dict.get(b"Type")
                    .and_then(|t| t.as_name())
                    .is_ok_and(|t| t == b"Font")
            })
            .filter_map(|dict| dict.get(b"BaseFont").and_then(|f| f.as_name()).ok())
            .map(|name| String::from_utf8_lossy(name).into_owned())
            .collect();
        names.sort();
        names
    }
}

/// Inverse of the renderer's WinAnsi encoding for the characters the fixtures use.
pub fn decode_win_ansi(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| match b {
            0x96 => '\u{2013}',
            0x97 => '\u{2014}',
            _ => b as char,
        })
        .collect()
}

/// Index of the first line equal to `needle`.
pub fn line_index(lines: &[String], needle: &str) -> Option<usize> {
    lines.iter().position(|line| line == needle)
}
