pub mod cli;
pub mod commands;
pub mod error;
pub mod report;
pub mod runner;
pub mod suite;
pub mod utils;

// Re-export commonly used types
pub use cli::{Cli, Commands};
pub use error::{CliError, CliResult};
pub use report::{CaseResult, SuiteReport};
pub use runner::SuiteRunner;
pub use utils::{init_tracing, ColoredOutput};
