//! CLI command handlers. Each command is in its own file.

mod completions;
mod fetch;
mod links;

pub use completions::run_completions;
pub use fetch::run_fetch;
#[cfg(test)]
pub use fetch::{exit_code, EXIT_FETCH_FAILURES, EXIT_OUTPUT_NOT_A_DIRECTORY};
pub use links::run_links;
