use crate::runner::state::{RunResults, Service};
use colored::Colorize;

/// Render the end-of-run summary block
pub fn render_summary(results: &RunResults) -> String {
    let summary = &results.summary;
    let rule = "=".repeat(60);
    let mut lines = vec![
        String::new(),
        rule.clone(),
        "📊 COMPREHENSIVE TEST RESULTS SUMMARY".to_string(),
        rule,
        format!("Total Tests: {}", summary.total_tests),
        format!("Passed Tests: {}", summary.passed_tests),
        format!("Failed Tests: {}", summary.failed_tests),
        format!("Success Rate: {:.1}%", summary.success_rate),
        format!("Test Duration: {:.2} seconds", summary.duration_seconds),
    ];

    if !results.log.skipped.is_empty() {
        lines.push(format!("Skipped (not counted): {}", results.log.skipped.len()));
    }

    lines.push(String::new());
    lines.push("📋 Service Status:".to_string());
    for service in Service::ALL {
        let passed = match service {
            Service::Auth => summary.backend1_auth,
            Service::Reports => summary.backend2_reports,
            Service::Documents => summary.backend_flask,
        };
        let status = if passed {
            "✅ PASS".green().bold()
        } else {
            "❌ FAIL".red().bold()
        };
        lines.push(format!("  {}: {}", service.label(), status));
    }

    let overall = if summary.overall_success {
        "✅ ALL SERVICES OPERATIONAL".green().bold()
    } else {
        "⚠️  SOME SERVICES NEED ATTENTION".yellow().bold()
    };
    lines.push(String::new());
    lines.push(format!("🎯 Overall Status: {}", overall));

    lines.join("\n")
}

pub fn print_summary(results: &RunResults) {
    println!("{}", render_summary(results));
}
