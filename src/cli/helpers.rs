//! Shared helper functions for CLI output and input.

use std::io::{BufRead, Write};
use std::time::Duration;

use anyhow::Context;
use console::style;

use dorkscan::ScanResult;

use super::commands::RunError;

const BANNER: &str = r#"
╔══════════════════════════════════════════════════════════════╗
║                     GOOGLE DORK SCANNER                      ║
║                 Sensitive File Discovery Tool                ║
║                                                              ║
║      Find exposed sensitive files and data using Google      ║
╚══════════════════════════════════════════════════════════════╝
"#;

pub fn print_banner() {
    println!("{}", style(BANNER).cyan());
}

/// Prompt for the target on stdin.
///
/// The read runs on a blocking thread so Ctrl-C can interrupt it.
pub async fn prompt_target() -> Result<String, RunError> {
    let read = tokio::task::spawn_blocking(|| -> std::io::Result<String> {
        let mut stdout = std::io::stdout();
        write!(stdout, "Target : ")?;
        stdout.flush()?;

        let mut line = String::new();
        std::io::stdin().lock().read_line(&mut line)?;
        Ok(line.trim().to_string())
    });

    tokio::select! {
        line = read => {
            let line = line
                .context("Prompt task failed")?
                .context("Failed to read target")?;
            Ok(line)
        }
        Ok(()) = tokio::signal::ctrl_c() => Err(RunError::Interrupted),
    }
}

/// Render the end-of-scan summary and the numbered findings.
pub fn render_summary(result: &ScanResult, elapsed: Duration) -> String {
    let rule = "=".repeat(60);
    let stats = result.stats();

    let mut out = String::new();
    out.push_str(&format!("\n{}\n", rule));
    out.push_str(&format!("{}\n", style("SCAN COMPLETED!").green().bold()));
    out.push_str(&format!("{}\n", rule));
    out.push_str(&format!("Domain: {}\n", result.domain()));
    out.push_str(&format!("Scan duration: {:.2} seconds\n", elapsed.as_secs_f64()));
    out.push_str(&format!(
        "Queries: {} ({} failed), links checked: {}\n",
        stats.queries, stats.failed_queries, stats.links_seen
    ));
    out.push_str(&format!("Sensitive files found: {}\n", result.len()));
    out.push_str(&format!("{}\n", rule));

    if result.is_empty() {
        out.push_str(&format!("\n{} No sensitive files found!\n", style("[-]").yellow()));
        return out;
    }

    out.push_str(&format!("\n{}\n", style("SENSITIVE FILES FOUND:").red().bold()));
    out.push_str(&format!("{}\n", "-".repeat(60)));
    for (i, finding) in result.findings().enumerate() {
        out.push_str(&format!("{:3}. {}\n", i + 1, finding));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    use dorkscan::{Domain, Finding, ScanStats};

    fn result(urls: &[&str]) -> ScanResult {
        let started_at = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        ScanResult::new(
            Domain::parse("example.com").unwrap(),
            started_at,
            urls.iter().map(|u| Finding::new(*u)),
            ScanStats::default(),
        )
    }

    #[test]
    fn summary_numbers_findings_from_one() {
        let summary = render_summary(
            &result(&["https://example.com/b.sql", "https://example.com/a.env"]),
            Duration::from_millis(1500),
        );

        let listed: Vec<&str> = summary.lines().filter(|l| l.contains(". https://")).collect();
        assert_eq!(
            listed,
            vec!["  1. https://example.com/a.env", "  2. https://example.com/b.sql"]
        );
        assert!(summary.contains("Domain: example.com"));
        assert!(summary.contains("Scan duration: 1.50 seconds"));
        assert!(summary.contains("Sensitive files found: 2"));
    }

    #[test]
    fn summary_without_findings() {
        let summary = render_summary(&result(&[]), Duration::ZERO);
        assert!(summary.contains("Sensitive files found: 0"));
        assert!(summary.contains("No sensitive files found!"));
        assert!(!summary.contains(". https://"));
    }
}
