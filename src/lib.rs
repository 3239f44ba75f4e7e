pub mod error;
pub mod report;
pub mod runner;
pub mod utils;

// Re-export common items
pub use report::save_results;
pub use runner::run_suite;
pub use utils::config::Config;
