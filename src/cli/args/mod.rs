//! Shared CLI argument types

mod common;
mod global;

pub use common::{OutputFormat, Section};
pub use global::GlobalOptions;
