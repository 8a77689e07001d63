//! Map module - zone markers on a world view

mod markers;
mod viewer;

pub use markers::build_markers;
pub use viewer::MapViewer;
