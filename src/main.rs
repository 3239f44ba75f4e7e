use clap::Parser;
use colored::Colorize;
use std::process::ExitCode;

use backend_smoke::{report, runner, Config};

/// Endpoints, credentials and timeouts are fixed; there are no option flags.
#[derive(Parser)]
#[command(name = "backend-smoke")]
#[command(version = "0.1.0")]
#[command(about = "Smoke-test the auth, reports and document backend services", long_about = None)]
struct Cli {}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let _cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = Config::default();

    println!("{} Cybersecurity Vulnerability Assessment Application", "🔐".blue());
    println!("{} Comprehensive Backend Testing Suite", "🧪".blue());
    println!(
        "{} Starting tests at: {}",
        "⏰".blue(),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );

    if !config.warmup.is_zero() {
        println!("\n{} Waiting for services to initialize...", "⏳".yellow());
        tokio::time::sleep(config.warmup).await;
    }

    let results = runner::run_suite(&config).await?;
    report::save_results(&results, &config.results_path)?;

    let code = results.exit_code();
    println!("\n{} Testing completed with exit code: {}", "🏁".green(), code);
    Ok(ExitCode::from(code))
}
