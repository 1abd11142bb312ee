//! CLI parser and the scan command.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use console::style;

use dorkscan::{
    dorks, write_report, Domain, ReportFormat, ScanSettings, Scanner, SearchClient,
    ValidationError,
};

use super::helpers::{print_banner, prompt_target, render_summary};
use super::progress::ScanProgressBar;

#[derive(Parser)]
#[command(name = "dorkscan")]
#[command(about = "Search-engine dork scanner for exposed sensitive files")]
#[command(version)]
pub struct Cli {
    /// Target domain (prompted for when omitted)
    #[arg(long, short = 't', env = "DORKSCAN_TARGET")]
    target: Option<String>,

    /// Config file path (defaults to ./dorkscan.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Number of concurrent search workers
    #[arg(short, long)]
    workers: Option<usize>,

    /// Delay after each query in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Links kept per query
    #[arg(long)]
    max_results: Option<usize>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// User agent ("impersonate" for a random browser)
    #[arg(long)]
    user_agent: Option<String>,

    /// Retry attempts for failed queries
    #[arg(long)]
    retries: Option<u32>,

    /// Directory to write reports into
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Also write a JSON report
    #[arg(long)]
    json: bool,
}

impl Cli {
    /// Load settings and apply command-line overrides.
    fn settings(&self) -> anyhow::Result<ScanSettings> {
        let mut settings = ScanSettings::load(self.config.as_deref())?;

        if let Some(workers) = self.workers {
            settings.workers = workers;
        }
        if let Some(delay_ms) = self.delay_ms {
            settings.delay_ms = delay_ms;
        }
        if let Some(max_results) = self.max_results {
            settings.max_results = max_results;
        }
        if let Some(timeout) = self.timeout {
            settings.timeout_secs = timeout;
        }
        if let Some(ref user_agent) = self.user_agent {
            settings.user_agent = Some(user_agent.clone());
        }
        if let Some(retries) = self.retries {
            settings.retries = retries;
        }
        if let Some(ref output_dir) = self.output_dir {
            settings.output_dir = output_dir.clone();
        }

        settings.validate()?;
        Ok(settings)
    }
}

/// Ways a run can end other than success.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("Scan interrupted by user!")]
    Interrupted,

    #[error("{0}")]
    Usage(#[from] clap::Error),

    #[error(transparent)]
    Input(#[from] ValidationError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Process exit status for a finished run. Every failure exits 1.
pub fn exit_status(result: &Result<(), RunError>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(_) => 1,
    }
}

/// Parse arguments. `--help` and `--version` print and exit here; any other
/// parse error is returned.
fn parse_cli<I, T>(args: I) -> Result<Cli, RunError>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => Ok(cli),
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => Err(RunError::Usage(e)),
    }
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

/// Run the CLI.
pub async fn run() -> Result<(), RunError> {
    let cli = parse_cli(std::env::args_os())?;
    let settings = cli.settings()?;

    print_banner();

    let target = match cli.target.clone() {
        Some(target) => target,
        None => prompt_target().await?,
    };
    let domain = Domain::parse(&target)?;

    println!("\n{} Target set to: {}", style("[*]").cyan(), style(&domain).bold());
    println!("{} Starting scan automatically...", style("[*]").cyan());

    let client = SearchClient::from_settings(&settings)
        .context("Failed to create search client")?;
    let templates = dorks::catalog();
    let progress = Arc::new(ScanProgressBar::new(templates.len() as u64));
    let scanner = Scanner::from_settings(Arc::new(client), &settings)
        .with_progress(progress.clone());

    println!("\n{} Starting scan for: {}", style("[*]").cyan(), domain);
    println!(
        "{} Using {} dorks with {} workers",
        style("[*]").cyan(),
        templates.len(),
        scanner.workers()
    );
    println!("{} This may take a while...\n", style("[*]").cyan());

    let start = Instant::now();
    let result = tokio::select! {
        result = scanner.scan_templates(&domain, templates) => result,
        Ok(()) = tokio::signal::ctrl_c() => {
            progress.abandon();
            return Err(RunError::Interrupted);
        }
    };
    progress.finish();

    print!("{}", render_summary(&result, start.elapsed()));

    let path = write_report(&settings.output_dir, &result, ReportFormat::Txt)
        .context("Failed to save results")?;
    println!(
        "\n{} Results automatically saved to: {}",
        style("[+]").green(),
        path.display()
    );

    if cli.json {
        let path = write_report(&settings.output_dir, &result, ReportFormat::Json)
            .context("Failed to save JSON results")?;
        println!("{} JSON results saved to: {}", style("[+]").green(), path.display());
    }

    Ok(())
}
