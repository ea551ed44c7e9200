// Document layout: font metrics, word wrap, and pagination.
// Pure and CPU-bound; async callers run it inside tokio::task::spawn_blocking.

pub mod document;
pub mod font_metrics;
pub mod wrap;

// Re-export the public API consumed by the renderer.
pub use document::{default_page_geometry, layout_document};
