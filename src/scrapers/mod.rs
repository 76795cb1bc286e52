// src/scrapers/mod.rs
//! Per-site adapters. Every adapter implements `Scraper`: it owns its
//! site's request parameters, pagination walk, page parsing, and an
//! in-run dedup set keyed by canonical job URL.

use std::collections::HashSet;
use std::future::Future;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::ScrapeError;
use crate::types::{JobPost, JobResponse, ScraperInput, Site};

pub mod indeed;

pub use indeed::IndeedScraper;

#[async_trait]
pub trait Scraper: Send + Sync {
    fn site(&self) -> Site;

    /// Walk the site's pagination and return the accumulated postings
    /// windowed to `[offset, offset + results_wanted)`. A transport or
    /// parse failure on any page aborts this adapter's remaining pages.
    async fn scrape(&self, input: &ScraperInput) -> Result<JobResponse, ScrapeError>;
}

/// Fixed registry mapping each site to its adapter constructor,
/// assembled once at orchestration start. Sites without an adapter
/// yet return `None`.
pub fn build_scraper(
    site: Site,
    proxies: &[String],
    user_agent: Option<&str>,
    timeout_secs: u64,
) -> Result<Option<Box<dyn Scraper>>, ScrapeError> {
    match site {
        Site::Indeed => Ok(Some(Box::new(IndeedScraper::new(
            proxies, user_agent, timeout_secs,
        )?))),
        _ => Ok(None),
    }
}

/// Walk a site's pagination until a terminal condition fires: the
/// accumulated count reaches `target`, a page yields zero new
/// postings, or the next cursor is missing or repeats the current
/// one. `fetch_page` maps a cursor to one page of postings plus the
/// next cursor; any page error aborts the remaining pages.
pub(crate) async fn walk_pages<F, Fut>(
    target: usize,
    mut fetch_page: F,
) -> Result<Vec<JobPost>, ScrapeError>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<(Vec<JobPost>, Option<String>), ScrapeError>>,
{
    let mut accumulated: Vec<JobPost> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut cursor: Option<String> = None;
    let mut page = 1u32;

    loop {
        debug!(page, "scraping page");
        let (page_jobs, next_cursor) = fetch_page(cursor.clone()).await?;

        let added = append_unseen(&mut accumulated, &mut seen, page_jobs);
        if added == 0 {
            info!(page, "no new jobs on page, stopping");
            break;
        }
        if accumulated.len() >= target {
            break;
        }
        match next_cursor {
            Some(next) if cursor.as_deref() != Some(next.as_str()) => cursor = Some(next),
            _ => break,
        }
        page += 1;
    }

    debug!(total = accumulated.len(), pages = page, "walk done");
    Ok(accumulated)
}

/// Append postings whose canonical URL has not been seen this run.
/// Returns how many were new; repeats across overlapping pages are
/// dropped silently.
pub(crate) fn append_unseen(
    accumulated: &mut Vec<JobPost>,
    seen: &mut HashSet<String>,
    page_jobs: Vec<JobPost>,
) -> usize {
    let mut added = 0;
    for job in page_jobs {
        if seen.insert(job.job_url.clone()) {
            accumulated.push(job);
            added += 1;
        }
    }
    added
}

/// Slice the accumulated postings to the caller's window, clamped to
/// the accumulated length. An offset past the end yields an empty
/// list, never an error.
pub(crate) fn window(jobs: Vec<JobPost>, offset: usize, results_wanted: usize) -> Vec<JobPost> {
    let start = offset.min(jobs.len());
    let end = offset.saturating_add(results_wanted).min(jobs.len());
    jobs[start..end].to_vec()
}
