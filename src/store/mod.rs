// src/store/mod.rs
mod descriptor;
mod format;
mod file;

pub use descriptor::LogDescriptor;
pub use format::{DocumentFormat, FormatError};
pub use file::{append, load, save, StoreError};
