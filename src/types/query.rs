// src/types/query.rs
//! Search query types. A `ScraperInput` is built once at the
//! orchestration boundary and never mutated during a run.

use serde::{Deserialize, Serialize};

use super::{Country, JobType, Site};
use crate::error::ScrapeError;

/// How the requested sites are named at the API boundary. Resolved
/// once into a canonical site list before any component logic runs.
#[derive(Debug, Clone)]
pub enum SiteSelection {
    /// A single site name, e.g. `"indeed"`.
    Single(String),
    /// A collection of site names.
    Names(Vec<String>),
    /// Pre-validated site identifiers.
    Sites(Vec<Site>),
}

impl SiteSelection {
    /// Resolve into a deduplicated site list, preserving order. An
    /// empty selection falls back to the default roster.
    pub fn resolve(&self) -> Result<Vec<Site>, ScrapeError> {
        let sites = match self {
            SiteSelection::Single(name) => vec![Site::from_name(name)?],
            SiteSelection::Names(names) if names.is_empty() => Self::default_roster(),
            SiteSelection::Names(names) => names
                .iter()
                .map(|n| Site::from_name(n))
                .collect::<Result<Vec<_>, _>>()?,
            SiteSelection::Sites(sites) if sites.is_empty() => Self::default_roster(),
            SiteSelection::Sites(sites) => sites.clone(),
        };

        let mut resolved = Vec::new();
        for site in sites {
            if !resolved.contains(&site) {
                resolved.push(site);
            }
        }
        Ok(resolved)
    }

    fn default_roster() -> Vec<Site> {
        vec![Site::Indeed, Site::Linkedin, Site::Glassdoor, Site::Google]
    }
}

impl Default for SiteSelection {
    fn default() -> Self {
        SiteSelection::Sites(Vec::new())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DescriptionFormat {
    Markdown,
    Html,
    Plain,
}

impl std::fmt::Display for DescriptionFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            DescriptionFormat::Markdown => "markdown",
            DescriptionFormat::Html => "html",
            DescriptionFormat::Plain => "plain",
        })
    }
}

/// The resolved, per-run search parameters shared by every adapter.
#[derive(Debug, Clone)]
pub struct ScraperInput {
    pub search_term: Option<String>,
    pub google_search_term: Option<String>,
    pub location: Option<String>,
    pub country: Option<Country>,
    pub distance: Option<u32>,
    pub is_remote: bool,
    pub job_type: Option<JobType>,
    pub easy_apply: Option<bool>,
    pub offset: usize,
    pub results_wanted: usize,
    pub hours_old: Option<u32>,
    pub description_format: DescriptionFormat,
    pub linkedin_fetch_description: bool,
    pub linkedin_company_ids: Vec<u64>,
    pub request_timeout_secs: u64,
}

impl Default for ScraperInput {
    fn default() -> Self {
        Self {
            search_term: None,
            google_search_term: None,
            location: None,
            country: Some(Country::Usa),
            distance: Some(50),
            is_remote: false,
            job_type: None,
            easy_apply: None,
            offset: 0,
            results_wanted: 15,
            hours_old: None,
            description_format: DescriptionFormat::Markdown,
            linkedin_fetch_description: false,
            linkedin_company_ids: Vec::new(),
            request_timeout_secs: 60,
        }
    }
}
