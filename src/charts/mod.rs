//! Charts module - Chart rendering

mod color;
mod plotter;
mod renderer;

pub use color::{ColorSource, SeriesColor};
pub use plotter::{format_population, LineChart};
pub use renderer::{RenderError, StaticChartRenderer};
