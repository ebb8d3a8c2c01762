// src/report/mod.rs
mod exporter;
mod printer;

pub use exporter::{export, timestamped_path, ExportError};
pub use printer::render_results;
