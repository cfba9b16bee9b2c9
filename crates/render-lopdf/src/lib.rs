//! PDF renderer using lopdf.
//!
//! The whole object graph is built in memory and written out in one pass, which keeps
//! the output byte-identical for identical input.

mod renderer;

pub use renderer::LopdfRenderer;
