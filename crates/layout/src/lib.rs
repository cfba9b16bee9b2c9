use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Page of {width:.2}x{height:.2} with a margin of {margin:.2} leaves no room for content.")]
    InvalidGeometry { width: f32, height: f32, margin: f32 },
    #[error("Line height must be positive, got {0:.2}.")]
    InvalidLineHeight(f32),
}

pub(crate) mod engine;
pub use self::engine::LayoutEngine;

mod elements;
pub mod config;
pub mod fonts;
pub mod output;

pub mod algorithms;
pub mod text;

// Re-exports for convenience
pub use self::config::{LayoutConfig, Orientation, PageGeometry, PageSize, mm_to_pt};
pub use self::elements::{LayoutElement, PositionedElement, TextElement};
pub use self::fonts::FontFace;
pub use self::output::{LaidOutDocument, LayoutWarning};
