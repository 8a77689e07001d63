//! Data module - CSV loading, series building and export

mod exporter;
mod loader;
mod processor;
pub mod zones;

pub use exporter::{Exporter, EXPORT_FILE_NAME};
pub use loader::{DataLoader, Record};
pub use processor::{Dataset, Series, SeriesBuilder};
