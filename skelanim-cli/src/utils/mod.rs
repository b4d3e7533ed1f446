//! Shared utilities for the skelanim CLI

pub mod format;
pub mod tree;

pub use format::*;
pub use tree::*;
