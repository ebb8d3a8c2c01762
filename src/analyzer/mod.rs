// src/analyzer/mod.rs
mod checker;
mod dispatcher;
mod result;
mod simulated;

pub use checker::{create_checker, Checker, FileChecker};
pub use dispatcher::Dispatcher;
pub use result::{CheckResult, InvalidStatus, Status, Summary};
pub use simulated::SimulatedChecker;
