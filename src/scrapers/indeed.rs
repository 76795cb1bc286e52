// src/scrapers/indeed.rs
//! Indeed adapter: builds the country-specific search URL, walks the
//! paginated result list, and normalizes each job card into the
//! canonical record.

use std::time::Duration;

use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info};
use url::Url;

use super::{walk_pages, window, Scraper};
use crate::error::ScrapeError;
use crate::extract;
use crate::http::HttpClient;
use crate::types::{Country, JobPost, JobResponse, ScraperInput, Site};

pub struct IndeedScraper {
    client: HttpClient,
}

impl IndeedScraper {
    pub fn new(
        proxies: &[String],
        user_agent: Option<&str>,
        timeout_secs: u64,
    ) -> Result<Self, ScrapeError> {
        let client = HttpClient::new(proxies, Duration::from_secs(timeout_secs), user_agent)?;
        Ok(Self { client })
    }

    fn country_domain(country: Option<Country>) -> &'static str {
        match country {
            Some(Country::Canada) => "ca",
            Some(Country::Uk) => "uk",
            Some(Country::Germany) => "de",
            Some(Country::France) => "fr",
            Some(Country::Usa) | None => "www",
        }
    }

    fn search_url(
        input: &ScraperInput,
        cursor: Option<&str>,
        base_url: &str,
    ) -> Result<String, ScrapeError> {
        let mut url = Url::parse(&format!("{}/jobs", base_url)).map_err(|e| ScrapeError::Parse {
            site: Site::Indeed,
            reason: format!("invalid search url: {}", e),
        })?;

        {
            let mut params = url.query_pairs_mut();
            if let Some(term) = &input.search_term {
                params.append_pair("q", term);
            }
            if let Some(location) = &input.location {
                params.append_pair("l", location);
            }
            if let Some(distance) = input.distance {
                params.append_pair("radius", &distance.to_string());
            }
            if input.is_remote {
                params.append_pair("remotejob", "1");
            }
            if let Some(hours) = input.hours_old {
                // Indeed filters by whole days.
                let days = hours.div_ceil(24).max(1);
                params.append_pair("fromage", &days.to_string());
            }
            if let Some(cursor) = cursor {
                params.append_pair("start", cursor);
            }
        }

        Ok(url.to_string())
    }

    async fn fetch_page(
        &self,
        input: &ScraperInput,
        cursor: Option<&str>,
        base_url: &str,
    ) -> Result<(Vec<JobPost>, Option<String>), ScrapeError> {
        let search_url = Self::search_url(input, cursor, base_url)?;
        debug!("fetching {}", search_url);

        let headers = [
            (
                "Accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            ),
            ("Accept-Language", "en-US,en;q=0.5"),
        ];
        let response = self.client.get(&search_url, &headers).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::UnexpectedStatus {
                site: Site::Indeed,
                status,
            });
        }

        let html = response.text().await?;
        parse_page(&html, base_url, input)
    }
}

#[async_trait]
impl Scraper for IndeedScraper {
    fn site(&self) -> Site {
        Site::Indeed
    }

    async fn scrape(&self, input: &ScraperInput) -> Result<JobResponse, ScrapeError> {
        let domain = Self::country_domain(input.country);
        let base_url = format!("https://{}.indeed.com", domain);
        let target = input.results_wanted + input.offset;

        info!(
            search_term = input.search_term.as_deref().unwrap_or(""),
            location = input.location.as_deref().unwrap_or(""),
            results_wanted = input.results_wanted,
            "starting indeed scrape"
        );

        let accumulated = walk_pages(target, |cursor| {
            let base_url = base_url.clone();
            async move { self.fetch_page(input, cursor.as_deref(), &base_url).await }
        })
        .await?;

        info!(total = accumulated.len(), "indeed scrape done");
        Ok(JobResponse {
            site: Site::Indeed,
            jobs: window(accumulated, input.offset, input.results_wanted),
        })
    }
}

fn selector(expr: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(expr).map_err(|e| ScrapeError::Parse {
        site: Site::Indeed,
        reason: format!("bad selector {}: {}", expr, e),
    })
}

/// Parse one search results page into postings plus the next-page
/// cursor, if any.
fn parse_page(
    html: &str,
    base_url: &str,
    input: &ScraperInput,
) -> Result<(Vec<JobPost>, Option<String>), ScrapeError> {
    let document = Html::parse_document(html);

    let card_sel = selector("[data-jk]")?;
    let mut jobs = Vec::new();
    for card in document.select(&card_sel) {
        if let Some(job) = parse_job_card(card, base_url, input)? {
            jobs.push(job);
        }
    }

    let next_sel = selector("a[aria-label='Next Page']")?;
    let next_cursor = document
        .select(&next_sel)
        .next()
        .and_then(|el| el.value().attr("href"))
        .and_then(|href| next_page_cursor(base_url, href));

    Ok((jobs, next_cursor))
}

/// Pull the `start` offset token out of the next-page link. An
/// unparseable link is treated as end-of-results.
fn next_page_cursor(base_url: &str, href: &str) -> Option<String> {
    let base = Url::parse(base_url).ok()?;
    let next = base.join(href).ok()?;
    next.query_pairs()
        .find(|(name, _)| name == "start")
        .map(|(_, value)| value.into_owned())
}

fn parse_job_card(
    card: ElementRef<'_>,
    base_url: &str,
    input: &ScraperInput,
) -> Result<Option<JobPost>, ScrapeError> {
    // Items without a stable job key or a title are discarded.
    let Some(job_key) = card.value().attr("data-jk") else {
        return Ok(None);
    };

    let title = first_text(card, &[selector("h2.jobTitle a span[title]")?, selector("h2.jobTitle a")?]);
    let Some(title) = title else {
        return Ok(None);
    };

    let company_name = first_text(card, &[selector(".companyName")?]);
    let location_text = first_text(
        card,
        &[
            selector("[data-testid='job-location']")?,
            selector(".companyLocation")?,
        ],
    )
    .unwrap_or_default();
    let salary_text = first_text(card, &[selector(".salary-snippet")?]);
    let summary = first_text(card, &[selector(".summary")?]).unwrap_or_default();

    let job_url = format!("{}/viewjob?jk={}", base_url, job_key);
    let location = extract::parse_location(&location_text, input.country);
    let compensation = salary_text.as_deref().and_then(extract::parse_compensation);
    let is_remote = extract::is_remote(&summary, &location_text);
    let emails = extract::extract_emails(&summary);
    let job_type = extract::job_types_from_description(&summary);
    let description = if summary.is_empty() {
        None
    } else {
        Some(extract::convert_description(&summary, input.description_format))
    };

    Ok(Some(JobPost {
        id: Some(job_key.to_string()),
        title,
        company_name,
        job_url,
        location,
        description,
        job_type,
        compensation,
        emails,
        is_remote: Some(is_remote),
        ..Default::default()
    }))
}

/// Teacher-style selector fallback: first selector whose element has
/// usable text wins.
fn first_text(card: ElementRef<'_>, selectors: &[Selector]) -> Option<String> {
    for sel in selectors {
        if let Some(el) = card.select(sel).next() {
            let text = clean_text(&el.text().collect::<Vec<_>>().join(" "));
            if !text.is_empty() {
                return Some(text);
            }
        }
    }
    None
}

fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
