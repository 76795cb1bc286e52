// src/cli.rs
use std::fs::File;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use crate::types::{DescriptionFormat, SiteSelection};
use crate::{export, scrape_jobs, ScrapeJobsParams};

#[derive(Parser)]
#[command(name = "jobscout")]
#[command(about = "Scrape job postings from multiple job boards into one result set")]
pub struct Cli {
    /// Job boards to scrape (comma-separated: indeed, linkedin,
    /// glassdoor, google, ziprecruiter, bayt, naukri, bdjobs)
    #[arg(long = "sites", value_delimiter = ',', default_value = "indeed")]
    pub sites: Vec<String>,

    /// Search term
    #[arg(long)]
    pub search: Option<String>,

    /// Location to search around
    #[arg(long)]
    pub location: Option<String>,

    /// Distance in miles from the location
    #[arg(long, default_value_t = 50)]
    pub distance: u32,

    /// Only remote jobs
    #[arg(long)]
    pub remote: bool,

    /// Employment type filter (fulltime, parttime, contract, ...)
    #[arg(long = "job-type")]
    pub job_type: Option<String>,

    /// Number of results to return
    #[arg(long, default_value_t = 15)]
    pub results: usize,

    /// Skip this many results before returning
    #[arg(long, default_value_t = 0)]
    pub offset: usize,

    /// Country for the search (usa, canada, uk, germany, france)
    #[arg(long, default_value = "usa")]
    pub country: String,

    /// Only postings newer than this many hours
    #[arg(long = "hours-old")]
    pub hours_old: Option<u32>,

    /// Description format
    #[arg(long = "desc-format", value_enum, default_value_t = DescriptionFormat::Markdown)]
    pub desc_format: DescriptionFormat,

    /// Proxy to rotate through (repeatable; scheme prefix optional)
    #[arg(long = "proxy")]
    pub proxies: Vec<String>,

    /// Custom user agent
    #[arg(long = "user-agent")]
    pub user_agent: Option<String>,

    /// Output file (defaults to stdout)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,

    /// Verbosity (0=errors, 1=warnings, 2=info)
    #[arg(long, default_value_t = 1)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Csv,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        })
    }
}

impl Cli {
    /// Log severity floor for the requested verbosity.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "error",
            1 => "warn",
            _ => "info",
        }
    }
}

pub async fn run(cli: Cli) -> Result<()> {
    let params = ScrapeJobsParams {
        sites: SiteSelection::Names(cli.sites.clone()),
        search_term: cli.search.clone(),
        location: cli.location.clone(),
        distance: Some(cli.distance),
        is_remote: cli.remote,
        job_type: cli.job_type.clone(),
        results_wanted: cli.results,
        offset: cli.offset,
        country: Some(cli.country.clone()),
        hours_old: cli.hours_old,
        description_format: cli.desc_format,
        proxies: cli.proxies.clone(),
        user_agent: cli.user_agent.clone(),
        ..Default::default()
    };

    let report = scrape_jobs(params).await?;

    println!("Found {} jobs", report.job_count());
    if report.job_count() == 0 && report.errors.is_empty() {
        println!("No jobs found with the specified criteria");
    }
    for (site, err) in &report.errors {
        eprintln!("  {} failed: {}", site, err);
    }

    match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            write_output(&cli, &report, file)?;
            println!("Results saved to {}", path.display());
        }
        None => write_output(&cli, &report, io::stdout().lock())?,
    }

    Ok(())
}

fn write_output<W: io::Write>(cli: &Cli, report: &crate::ScrapeReport, writer: W) -> Result<()> {
    match cli.format {
        OutputFormat::Csv => export::write_csv(report, writer),
        OutputFormat::Json => export::write_json(report, writer),
    }
}
