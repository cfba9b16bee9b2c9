use plansheet_layout::FontFace;

/// Resource name under which each face is registered in the page resources.
pub fn font_resource_name(font: FontFace) -> &'static str {
    match font {
        FontFace::Helvetica => "F1",
        FontFace::HelveticaBold => "F2",
    }
}

/// Convert layout Y coordinate to PDF Y coordinate (flip origin)
pub fn flip_y(y: f32, page_height: f32) -> f32 {
    page_height - y
}

/// Encodes text for a simple font with `/WinAnsiEncoding`.
///
/// Latin-1 passes through, the typographic characters of cp1252 are mapped to their code
/// points, arrows become `->` and anything else becomes `?`.
pub fn to_win_ansi(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\t' | '\n' | '\r' => out.push(b' '),
            ' '..='~' => out.push(c as u8),
            '\u{00A0}'..='\u{00FF}' => out.push(c as u32 as u8),
            '\u{2192}' => out.extend_from_slice(b"->"),
            _ => out.push(cp1252_special(c).unwrap_or(b'?')),
        }
    }
    out
}

fn cp1252_special(c: char) -> Option<u8> {
    Some(match c {
        '\u{20AC}' => 0x80,
        '\u{2026}' => 0x85,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn en_dash_and_arrow_survive_encoding() {
        assert_eq!(to_win_ansi("07h00\u{2013}07h30"), b"07h00\x9607h30".to_vec());
        assert_eq!(to_win_ansi("a \u{2192} b"), b"a -> b".to_vec());
        assert_eq!(to_win_ansi("caf\u{e9}"), b"caf\xe9".to_vec());
        assert_eq!(to_win_ansi("\u{1F600}"), b"?".to_vec());
    }

    #[test]
    fn flips_against_page_height() {
        assert_eq!(flip_y(100.0, 842.0), 742.0);
    }
}
