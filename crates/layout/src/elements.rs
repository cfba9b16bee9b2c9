use crate::fonts::FontFace;

/// A single drawable item with its absolute position on the page.
/// A page is simply a collection of these, in paint order.
///
/// Coordinates are in points, measured from the top-left corner of the page. For text
/// `y` is the baseline.
#[derive(Clone, Debug, PartialEq)]
pub struct PositionedElement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub element: LayoutElement,
}

/// An enum representing the different types of drawable elements.
#[derive(Clone, Debug, PartialEq)]
pub enum LayoutElement {
    Text(TextElement),
    /// A horizontal stroke from `x` to `x + width` at `y`.
    Line { thickness: f32 },
}

impl std::fmt::Display for LayoutElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayoutElement::Text(t) => write!(f, "Text(\"{}\")", t.content),
            LayoutElement::Line { .. } => write!(f, "Line"),
        }
    }
}

/// A single line of text to be drawn. Never contains a newline.
#[derive(Clone, Debug, PartialEq)]
pub struct TextElement {
    pub content: String,
    pub font: FontFace,
    pub size: f32,
}

impl PositionedElement {
    pub fn text(&self) -> Option<&str> {
        match &self.element {
            LayoutElement::Text(t) => Some(&t.content),
            LayoutElement::Line { .. } => None,
        }
    }
}
