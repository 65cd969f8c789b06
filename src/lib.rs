pub mod aggregate;
pub mod cli;
pub mod import;
pub mod render;

pub use aggregate::*;
