//! CLI command implementations.

pub mod circuit;
pub mod common;
pub mod scan;
pub mod solve;
pub mod states;
pub mod verify;
pub mod version;
