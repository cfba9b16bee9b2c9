use crate::config::PageGeometry;

// Absorbs float error when a block lands exactly on the bottom margin.
const EPSILON: f32 = 0.01;

pub struct BreakAnalysis {
    pub should_break: bool,
}

/// Checks whether a block of `block_height` fits below `cursor_y` on the current page.
///
/// * `cursor_y`: The current top-down position on the page.
/// * `block_height`: The total vertical advance the block needs.
/// * `page`: The page geometry; content may extend down to `height - margin`.
pub fn check_fit(cursor_y: f32, block_height: f32, page: &PageGeometry) -> BreakAnalysis {
    let limit = page.bottom_limit();
    BreakAnalysis {
        should_break: cursor_y + block_height > limit + EPSILON,
    }
}

/// Whether a block can ever fit on a page, even an empty one.
pub fn fits_on_empty_page(block_height: f32, page: &PageGeometry) -> bool {
    block_height <= page.content_height() + EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> PageGeometry {
        PageGeometry {
            width: 200.0,
            height: 300.0,
            margin: 50.0,
        }
    }

    #[test]
    fn breaks_only_past_the_bottom_margin() {
        assert!(!check_fit(200.0, 50.0, &page()).should_break);
        assert!(check_fit(200.0, 51.0, &page()).should_break);
    }

    #[test]
    fn content_height_bounds_single_blocks() {
        assert!(fits_on_empty_page(200.0, &page()));
        assert!(!fits_on_empty_page(201.0, &page()));
    }
}
