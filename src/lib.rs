// src/lib.rs
//! jobscout: concurrent job-posting aggregation across multiple job
//! boards, normalized into one canonical record shape.
//!
//! `scrape_jobs` fans a single search out to one adapter per requested
//! site, runs them concurrently, and joins the results. A failing site
//! contributes zero postings and a recorded error; it never aborts its
//! siblings. Only an unresolvable site name is fatal, and it is raised
//! before any network activity.

use std::sync::Arc;

use tracing::{error, info, warn};

pub mod cli;
pub mod error;
pub mod export;
pub mod extract;
pub mod http;
pub mod scrapers;
pub mod types;

pub use error::ScrapeError;
pub use scrapers::Scraper;
pub use types::{
    Compensation, CompensationInterval, Country, DescriptionFormat, JobPost, JobResponse, JobType,
    Location, ScraperInput, Site, SiteSelection,
};

/// Caller-facing parameters for one aggregation run.
#[derive(Debug, Clone)]
pub struct ScrapeJobsParams {
    pub sites: SiteSelection,
    pub search_term: Option<String>,
    pub google_search_term: Option<String>,
    pub location: Option<String>,
    pub distance: Option<u32>,
    pub is_remote: bool,
    pub job_type: Option<String>,
    pub easy_apply: Option<bool>,
    pub results_wanted: usize,
    pub offset: usize,
    pub country: Option<String>,
    pub hours_old: Option<u32>,
    pub description_format: DescriptionFormat,
    pub proxies: Vec<String>,
    pub user_agent: Option<String>,
    pub linkedin_fetch_description: bool,
    pub linkedin_company_ids: Vec<u64>,
    pub request_timeout_secs: u64,
}

impl Default for ScrapeJobsParams {
    fn default() -> Self {
        Self {
            sites: SiteSelection::default(),
            search_term: None,
            google_search_term: None,
            location: None,
            distance: Some(50),
            is_remote: false,
            job_type: None,
            easy_apply: None,
            results_wanted: 15,
            offset: 0,
            country: Some("usa".to_string()),
            hours_old: None,
            description_format: DescriptionFormat::Markdown,
            proxies: Vec::new(),
            user_agent: None,
            linkedin_fetch_description: false,
            linkedin_company_ids: Vec::new(),
            request_timeout_secs: 60,
        }
    }
}

/// Everything one run produced: per-site responses in resolution
/// order, plus the errors of the sites that failed. An empty result
/// is not an error.
#[derive(Debug)]
pub struct ScrapeReport {
    pub responses: Vec<JobResponse>,
    pub errors: Vec<(Site, ScrapeError)>,
}

impl ScrapeReport {
    pub fn jobs(&self) -> impl Iterator<Item = (Site, &JobPost)> {
        self.responses
            .iter()
            .flat_map(|r| r.jobs.iter().map(move |j| (r.site, j)))
    }

    pub fn job_count(&self) -> usize {
        self.responses.iter().map(|r| r.jobs.len()).sum()
    }
}

/// Aggregate job postings from every requested site concurrently.
pub async fn scrape_jobs(params: ScrapeJobsParams) -> Result<ScrapeReport, ScrapeError> {
    let sites = params.sites.resolve()?;

    let input = ScraperInput {
        search_term: params.search_term,
        google_search_term: params.google_search_term,
        location: params.location,
        country: params.country.as_deref().and_then(Country::from_name),
        distance: params.distance,
        is_remote: params.is_remote,
        job_type: params.job_type.as_deref().and_then(JobType::from_text),
        easy_apply: params.easy_apply,
        offset: params.offset,
        results_wanted: params.results_wanted,
        hours_old: params.hours_old,
        description_format: params.description_format,
        linkedin_fetch_description: params.linkedin_fetch_description,
        linkedin_company_ids: params.linkedin_company_ids,
        request_timeout_secs: params.request_timeout_secs,
    };

    let mut scrapers: Vec<Box<dyn Scraper>> = Vec::new();
    let mut errors: Vec<(Site, ScrapeError)> = Vec::new();
    for site in sites {
        match scrapers::build_scraper(
            site,
            &params.proxies,
            params.user_agent.as_deref(),
            params.request_timeout_secs,
        ) {
            Ok(Some(scraper)) => scrapers.push(scraper),
            Ok(None) => warn!(site = %site, "no adapter implemented for site, skipping"),
            Err(e) => {
                error!(site = %site, "failed to construct adapter: {}", e);
                errors.push((site, e));
            }
        }
    }

    let mut report = run_scrapers(scrapers, input).await;
    report.errors.splice(0..0, errors);

    if report.job_count() == 0 && report.errors.is_empty() {
        info!("no jobs matched the search criteria");
    }
    Ok(report)
}

/// Launch each adapter on its own task and wait for all of them.
/// Outcomes are independent; responses keep the adapters' order.
async fn run_scrapers(scrapers: Vec<Box<dyn Scraper>>, input: ScraperInput) -> ScrapeReport {
    let input = Arc::new(input);
    let mut sites = Vec::new();
    let mut handles = Vec::new();
    for scraper in scrapers {
        let site = scraper.site();
        let input = Arc::clone(&input);
        info!(site = %site, "starting scrape");
        sites.push(site);
        handles.push(tokio::spawn(
            async move { scraper.scrape(&input).await },
        ));
    }

    let mut responses = Vec::new();
    let mut errors = Vec::new();
    let outcomes = futures::future::join_all(handles).await;
    for (site, outcome) in sites.into_iter().zip(outcomes) {
        match outcome {
            Ok(Ok(response)) => {
                info!(site = %site, jobs_found = response.jobs.len(), "scrape completed");
                responses.push(response);
            }
            Ok(Err(e)) => {
                error!(site = %site, "scrape failed: {}", e);
                errors.push((site, e));
            }
            Err(join_err) => {
                error!(site = %site, "scrape task aborted: {}", join_err);
                errors.push((site, ScrapeError::Task(join_err)));
            }
        }
    }

    ScrapeReport { responses, errors }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct MockScraper {
        site: Site,
        jobs: Vec<JobPost>,
        fail: bool,
    }

    impl MockScraper {
        fn succeeding(site: Site, count: usize) -> Self {
            let jobs = (0..count)
                .map(|i| JobPost {
                    title: format!("Job {}", i),
                    job_url: format!("https://{}.example.com/job/{}", site, i),
                    ..Default::default()
                })
                .collect();
            Self {
                site,
                jobs,
                fail: false,
            }
        }

        fn failing(site: Site) -> Self {
            Self {
                site,
                jobs: Vec::new(),
                fail: true,
            }
        }
    }

    #[async_trait]
    impl Scraper for MockScraper {
        fn site(&self) -> Site {
            self.site
        }

        async fn scrape(&self, _input: &ScraperInput) -> Result<JobResponse, ScrapeError> {
            if self.fail {
                return Err(ScrapeError::Parse {
                    site: self.site,
                    reason: "boom".to_string(),
                });
            }
            Ok(JobResponse {
                site: self.site,
                jobs: self.jobs.clone(),
            })
        }
    }

    #[tokio::test]
    async fn test_one_failing_site_does_not_abort_siblings() {
        let scrapers: Vec<Box<dyn Scraper>> = vec![
            Box::new(MockScraper::succeeding(Site::Indeed, 3)),
            Box::new(MockScraper::failing(Site::Glassdoor)),
            Box::new(MockScraper::succeeding(Site::Linkedin, 2)),
        ];

        let report = run_scrapers(scrapers, ScraperInput::default()).await;

        assert_eq!(report.job_count(), 5);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].0, Site::Glassdoor);
        assert!(matches!(
            report.errors[0].1,
            ScrapeError::Parse {
                site: Site::Glassdoor,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_responses_keep_resolution_order() {
        let scrapers: Vec<Box<dyn Scraper>> = vec![
            Box::new(MockScraper::succeeding(Site::Glassdoor, 1)),
            Box::new(MockScraper::succeeding(Site::Indeed, 1)),
        ];

        let report = run_scrapers(scrapers, ScraperInput::default()).await;
        let sites: Vec<Site> = report.responses.iter().map(|r| r.site).collect();
        assert_eq!(sites, vec![Site::Glassdoor, Site::Indeed]);
    }

    #[tokio::test]
    async fn test_empty_results_are_not_an_error() {
        let scrapers: Vec<Box<dyn Scraper>> =
            vec![Box::new(MockScraper::succeeding(Site::Indeed, 0))];
        let report = run_scrapers(scrapers, ScraperInput::default()).await;
        assert_eq!(report.job_count(), 0);
        assert!(report.errors.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_site_fails_before_any_scraping() {
        let params = ScrapeJobsParams {
            sites: SiteSelection::Single("monster".to_string()),
            ..Default::default()
        };
        let err = scrape_jobs(params).await.unwrap_err();
        assert!(matches!(err, ScrapeError::UnknownSite { ref name } if name == "monster"));
    }
}
