pub mod wrapper;

pub use wrapper::{WrappedText, wrap_cell, wrap_text};
