//! Utility modules shared across commands.

pub mod fs;
pub mod naming;
