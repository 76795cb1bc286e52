// src/types/mod.rs

pub mod job;
pub mod query;

pub use job::{Compensation, CompensationInterval, JobPost, JobResponse, JobType, Location};
pub use query::{DescriptionFormat, ScraperInput, SiteSelection};

use serde::{Deserialize, Serialize};

use crate::error::ScrapeError;

/// Job board a scraper targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Site {
    Linkedin,
    Indeed,
    ZipRecruiter,
    Glassdoor,
    Google,
    Bayt,
    Naukri,
    Bdjobs,
}

impl Site {
    /// Map a user-supplied name to a site, case-insensitively.
    /// Unknown names are a configuration error naming the token.
    pub fn from_name(name: &str) -> Result<Self, ScrapeError> {
        match name.trim().to_lowercase().as_str() {
            "linkedin" => Ok(Site::Linkedin),
            "indeed" => Ok(Site::Indeed),
            "zip_recruiter" | "ziprecruiter" => Ok(Site::ZipRecruiter),
            "glassdoor" => Ok(Site::Glassdoor),
            "google" => Ok(Site::Google),
            "bayt" => Ok(Site::Bayt),
            "naukri" => Ok(Site::Naukri),
            "bdjobs" => Ok(Site::Bdjobs),
            _ => Err(ScrapeError::UnknownSite {
                name: name.to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Site::Linkedin => "linkedin",
            Site::Indeed => "indeed",
            Site::ZipRecruiter => "zip_recruiter",
            Site::Glassdoor => "glassdoor",
            Site::Google => "google",
            Site::Bayt => "bayt",
            Site::Naukri => "naukri",
            Site::Bdjobs => "bdjobs",
        }
    }
}

impl std::fmt::Display for Site {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Country scope for a search. Unknown strings resolve to `None`
/// rather than erroring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Country {
    Usa,
    Canada,
    Uk,
    Germany,
    France,
}

impl Country {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "usa" | "us" | "united states" => Some(Country::Usa),
            "canada" | "ca" => Some(Country::Canada),
            "uk" | "united kingdom" | "gb" => Some(Country::Uk),
            "germany" | "de" => Some(Country::Germany),
            "france" | "fr" => Some(Country::France),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Country::Usa => "usa",
            Country::Canada => "canada",
            Country::Uk => "uk",
            Country::Germany => "germany",
            Country::France => "france",
        }
    }

    /// Rendering used in location strings: abbreviations upper-cased,
    /// full names title-cased.
    pub fn display_name(&self) -> &'static str {
        match self {
            Country::Usa => "USA",
            Country::Uk => "UK",
            Country::Canada => "Canada",
            Country::Germany => "Germany",
            Country::France => "France",
        }
    }
}
