//! Configuration and dependency initialization.

pub mod dependencies;
pub mod options;

pub use dependencies::{ConnectionMode, Dependencies};
pub use options::GlobalSearchConfig;
