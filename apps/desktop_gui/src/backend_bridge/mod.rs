//! Bridge between the UI thread and the background classification worker.

pub mod commands;
pub mod runtime;
