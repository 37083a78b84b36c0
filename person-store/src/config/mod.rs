//! Configuration and dependency wiring.

mod dependencies;

pub use dependencies::{Backend, Dependencies, Settings};
