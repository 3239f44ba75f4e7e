pub mod console;
pub mod json;

pub use json::save_results;
