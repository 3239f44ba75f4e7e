use crate::runner::state::RunResults;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

/// Write the full result set as pretty JSON, replacing any earlier file
pub fn save_results(results: &RunResults, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(results)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write results to {}", path.display()))?;

    println!(
        "\n{} Test results saved to: {}",
        "💾".blue(),
        path.display().to_string().cyan()
    );
    Ok(())
}

/// Read a results file written by [`save_results`]
pub fn load_results(path: &Path) -> Result<RunResults> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read results from {}", path.display()))?;
    Ok(serde_json::from_str(&content)?)
}
