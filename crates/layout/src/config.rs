use crate::LayoutError;

/// Points per millimetre (72 pt per inch, 25.4 mm per inch).
pub const PT_PER_MM: f32 = 72.0 / 25.4;

pub fn mm_to_pt(mm: f32) -> f32 {
    mm * PT_PER_MM
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageSize {
    #[default]
    A4,
    Letter,
    Legal,
}

impl PageSize {
    /// Portrait (width, height) in points.
    pub fn dimensions(self) -> (f32, f32) {
        match self {
            PageSize::A4 => (595.28, 841.89),
            PageSize::Letter => (612.0, 792.0),
            PageSize::Legal => (612.0, 1008.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Physical page size and the uniform margin on all four sides, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl PageGeometry {
    pub fn new(size: PageSize, orientation: Orientation, margin: f32) -> Self {
        let (w, h) = size.dimensions();
        let (width, height) = match orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        };
        Self {
            width,
            height,
            margin,
        }
    }

    pub fn content_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    pub fn content_height(&self) -> f32 {
        self.height - 2.0 * self.margin
    }

    /// The lowest y (top-down) a block may reach on a page.
    pub fn bottom_limit(&self) -> f32 {
        self.height - self.margin
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::new(PageSize::A4, Orientation::Portrait, mm_to_pt(15.0))
    }
}

/// Parameters of one layout run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    pub page: PageGeometry,
    /// The base vertical advance in points. Headings, rules and blank lines are
    /// expressed as multiples of it.
    ///
    /// Defaults to 6 mm.
    pub line_height: f32,
    /// Body, table and list text size in points. Defaults to `10.0`.
    pub body_font_size: f32,
    /// Extra horizontal offset of list items. Defaults to 5 mm.
    pub list_indent: f32,
    /// Horizontal inset of cell text from the column edge. Defaults to `2.0`.
    pub cell_padding: f32,
}

impl LayoutConfig {
    pub fn new(page: PageGeometry, line_height: f32) -> Self {
        Self {
            page,
            line_height,
            ..Self::default()
        }
    }

    /// Rejects geometries that leave no room to place content.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.line_height.is_nan() || self.line_height <= 0.0 {
            return Err(LayoutError::InvalidLineHeight(self.line_height));
        }
        let page = &self.page;
        if page.margin < 0.0
            || page.content_width() <= self.list_indent
            || page.content_height() < self.line_height
        {
            return Err(LayoutError::InvalidGeometry {
                width: page.width,
                height: page.height,
                margin: page.margin,
            });
        }
        Ok(())
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page: PageGeometry::default(),
            line_height: mm_to_pt(6.0),
            body_font_size: 10.0,
            list_indent: mm_to_pt(5.0),
            cell_padding: 2.0,
        }
    }
}
