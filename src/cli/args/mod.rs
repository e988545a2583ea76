//! Shared CLI argument types

mod common;
mod global;

pub use common::OutputFormat;
pub use global::GlobalOptions;
