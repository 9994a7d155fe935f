//! CLI command implementations.
//!
//! - **analyze**: score a source tree and report its violations
//! - **init**: write a default `.repodoctor/config.yaml`

pub mod analyze;
pub mod init;

pub use analyze::{analyze_project, handle_analyze, AnalyzeConfig};
pub use init::init_config;
