//! Source size metrics
//!
//! Line counts per file and per function, and the size rule built on them.

pub mod size;

pub use size::{check_sizes, count_non_empty_lines, FileSize, FunctionSpan};
