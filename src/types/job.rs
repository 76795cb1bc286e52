// src/types/job.rs
//! The canonical job record all site adapters normalize into.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Country, Site};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobType {
    #[serde(rename = "fulltime")]
    FullTime,
    #[serde(rename = "parttime")]
    PartTime,
    #[serde(rename = "contract")]
    Contract,
    #[serde(rename = "temporary")]
    Temporary,
    #[serde(rename = "internship")]
    Internship,
    #[serde(rename = "perdiem")]
    PerDiem,
    #[serde(rename = "nights")]
    Nights,
    #[serde(rename = "volunteer")]
    Volunteer,
    #[serde(rename = "summer")]
    Summer,
    #[serde(rename = "other")]
    Other,
}

impl JobType {
    /// Best-effort match of free text to a single job type, used for
    /// the caller's employment-type filter. Includes the localized
    /// markers some boards emit.
    pub fn from_text(text: &str) -> Option<Self> {
        let t = text.to_lowercase();
        if t.contains("fulltime") || t.contains("full-time") || t.contains("períodointegral") {
            Some(JobType::FullTime)
        } else if t.contains("parttime") || t.contains("part-time") || t.contains("teilzeit") {
            Some(JobType::PartTime)
        } else if t.contains("contract") {
            Some(JobType::Contract)
        } else if t.contains("temporary") {
            Some(JobType::Temporary)
        } else if t.contains("internship") || t.contains("prácticas") {
            Some(JobType::Internship)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "fulltime",
            JobType::PartTime => "parttime",
            JobType::Contract => "contract",
            JobType::Temporary => "temporary",
            JobType::Internship => "internship",
            JobType::PerDiem => "perdiem",
            JobType::Nights => "nights",
            JobType::Volunteer => "volunteer",
            JobType::Summer => "summer",
            JobType::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompensationInterval {
    Yearly,
    Monthly,
    Weekly,
    Daily,
    Hourly,
}

impl CompensationInterval {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompensationInterval::Yearly => "yearly",
            CompensationInterval::Monthly => "monthly",
            CompensationInterval::Weekly => "weekly",
            CompensationInterval::Daily => "daily",
            CompensationInterval::Hourly => "hourly",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<Country>,
}

impl Location {
    /// Join present parts with ", ". Absent location renders empty.
    pub fn display(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        if let Some(city) = &self.city {
            parts.push(city);
        }
        if let Some(state) = &self.state {
            parts.push(state);
        }
        if let Some(country) = &self.country {
            parts.push(country.display_name());
        }
        parts.join(", ")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Compensation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<CompensationInterval>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

/// One normalized posting. `job_url` is required and doubles as the
/// in-run dedup key; records without a resolvable URL are discarded
/// during normalization. Empty vecs mean "no data", same as absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobPost {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    pub job_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_url_direct: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_url: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub job_type: Vec<JobType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compensation: Option<Compensation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_posted: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub emails: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_remote: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listing_type: Option<String>,

    // Site-specific attributes. These do not participate in dedup or
    // cross-source merging.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_addresses: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_num_employees: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_revenue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner_photo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_function: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_reviews_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vacancy_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_from_home_type: Option<String>,
}

/// One adapter's output: the postings it accumulated, in page order,
/// tagged with the originating site.
#[derive(Debug, Clone, Serialize)]
pub struct JobResponse {
    pub site: Site,
    pub jobs: Vec<JobPost>,
}
