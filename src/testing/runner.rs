//! Suite runner
//!
//! Prints the suite header, runs its pipeline over a session and prints
//! the summary.

use colored::Colorize;

use super::pipeline::{Outcome, SuiteReport};
use super::session::Session;
use super::suites::Suite;

/// Run one suite against the session
pub async fn run_suite(suite: Suite, session: &mut Session) -> SuiteReport {
    println!("\n{} {}", "Running Suite:".blue().bold(), suite.name().white().bold());
    println!("  {}", format!("credentials from {}_*", session.config.env_prefix).dimmed());
    println!("\n{}", "Cases:".cyan());

    let report = suite.pipeline().run(session).await;
    print_summary(&report);
    report
}

fn print_summary(report: &SuiteReport) {
    let passed = report.count(|o| matches!(o, Outcome::Passed));
    let failed = report.count(|o| matches!(o, Outcome::Failed(_)));
    let errored = report.count(|o| matches!(o, Outcome::Errored(_)));
    let skipped = report.count(|o| matches!(o, Outcome::Skipped(_)));

    let counts = format!("{passed} passed, {failed} failed, {errored} errored, {skipped} skipped");

    if report.passed() {
        println!("\n{} {} ({})\n", "✓".green().bold(), "Suite Passed".green().bold(), counts);
    } else {
        println!("\n{} {} ({})", "✗".red().bold(), "Suite Failed".red().bold(), counts);
        if let Some(broken) = report.first_broken() {
            println!("  first broken case: {}\n", broken.name.white().bold());
        }
    }
}
