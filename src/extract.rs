// src/extract.rs
//! Field normalization shared by all site adapters: free-text location
//! and salary parsing, remote/job-type inference, email extraction,
//! and description format conversion.

use std::sync::OnceLock;

use regex::Regex;
use tracing::warn;

use crate::types::{
    Compensation, CompensationInterval, Country, DescriptionFormat, JobType, Location,
};

const DEFAULT_CURRENCY: &str = "USD";
const REMOTE_KEYWORDS: [&str; 5] = ["remote", "work from home", "wfh", "telecommute", "virtual"];

fn amount_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$?([\d,]+(?:\.\d{2})?)").expect("amount regex"))
}

fn postal_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+\d+.*").expect("postal regex"))
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").expect("email regex")
    })
}

/// Split a free-text location on commas: first segment is the city,
/// second the state with any trailing postal fragment stripped. The
/// country comes verbatim from the query, never inferred from text.
pub fn parse_location(text: &str, country: Option<Country>) -> Option<Location> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let mut parts = text.split(',');
    let city = parts
        .next()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(String::from);
    let state = parts
        .next()
        .map(|s| postal_regex().replace(s.trim(), "").to_string())
        .filter(|s| !s.is_empty());

    Some(Location {
        city,
        state,
        country,
    })
}

/// Scan free-text salary for numeric tokens. One match sets min and
/// max to the same value; two or more use the first two. Interval is
/// inferred by substring, first match wins in year/hour/month order.
pub fn parse_compensation(text: &str) -> Option<Compensation> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let mut amounts: Vec<f64> = Vec::new();
    for cap in amount_regex().captures_iter(text) {
        if let Some(m) = cap.get(1) {
            let cleaned = m.as_str().replace(',', "");
            if let Ok(amount) = cleaned.parse::<f64>() {
                amounts.push(amount);
            }
        }
    }
    if amounts.is_empty() {
        return None;
    }

    let (min_amount, max_amount) = if amounts.len() == 1 {
        (Some(amounts[0]), Some(amounts[0]))
    } else {
        (Some(amounts[0]), Some(amounts[1]))
    };

    let lower = text.to_lowercase();
    let interval = if lower.contains("year") || lower.contains("annual") {
        Some(CompensationInterval::Yearly)
    } else if lower.contains("hour") {
        Some(CompensationInterval::Hourly)
    } else if lower.contains("month") {
        Some(CompensationInterval::Monthly)
    } else {
        None
    };

    Some(Compensation {
        interval,
        min_amount,
        max_amount,
        currency: Some(DEFAULT_CURRENCY.to_string()),
    })
}

/// A posting is remote when any of the fixed keywords appears in the
/// description or the raw location text.
pub fn is_remote(description: &str, location: &str) -> bool {
    let combined = format!("{} {}", description, location).to_lowercase();
    REMOTE_KEYWORDS.iter().any(|kw| combined.contains(kw))
}

/// Accumulate every employment-type marker found in the description.
/// Markers are not mutually exclusive.
pub fn job_types_from_description(description: &str) -> Vec<JobType> {
    let lower = description.to_lowercase();
    let mut types = Vec::new();
    if lower.contains("full-time") || lower.contains("fulltime") {
        types.push(JobType::FullTime);
    }
    if lower.contains("part-time") || lower.contains("parttime") {
        types.push(JobType::PartTime);
    }
    if lower.contains("contract") {
        types.push(JobType::Contract);
    }
    if lower.contains("intern") {
        types.push(JobType::Internship);
    }
    if lower.contains("temporary") {
        types.push(JobType::Temporary);
    }
    types
}

/// Collect email addresses in order of first appearance. Duplicates
/// are retained as found.
pub fn extract_emails(text: &str) -> Vec<String> {
    email_regex()
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Convert raw HTML into the caller's requested description format.
/// HTML is a passthrough; conversion failures fall back to the input.
pub fn convert_description(html: &str, format: DescriptionFormat) -> String {
    if html.is_empty() {
        return String::new();
    }
    match format {
        DescriptionFormat::Html => html.to_string(),
        DescriptionFormat::Markdown => htmd::convert(html).map(|s| s.trim().to_string()).unwrap_or_else(|e| {
            warn!("failed to convert description to markdown: {}", e);
            html.to_string()
        }),
        DescriptionFormat::Plain => {
            let text = html2text::from_read(html.as_bytes(), 120).unwrap_or_else(|e| {
                warn!("failed to convert description to text: {}", e);
                html.to_string()
            });
            // Collapse runs of whitespace left by block elements.
            text.split_whitespace().collect::<Vec<_>>().join(" ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_location_city_only() {
        let loc = parse_location("Boston", None).unwrap();
        assert_eq!(loc.city.as_deref(), Some("Boston"));
        assert_eq!(loc.state, None);
        assert_eq!(loc.country, None);
    }

    #[test]
    fn test_parse_location_strips_postal_code() {
        let loc = parse_location("Boston, MA 02110", Some(Country::Usa)).unwrap();
        assert_eq!(loc.city.as_deref(), Some("Boston"));
        assert_eq!(loc.state.as_deref(), Some("MA"));
        assert_eq!(loc.country, Some(Country::Usa));
    }

    #[test]
    fn test_parse_location_empty() {
        assert_eq!(parse_location("", Some(Country::Usa)), None);
        assert_eq!(parse_location("   ", None), None);
    }

    #[test]
    fn test_parse_compensation_range() {
        let comp = parse_compensation("$50,000 - $70,000 a year").unwrap();
        assert_eq!(comp.min_amount, Some(50000.0));
        assert_eq!(comp.max_amount, Some(70000.0));
        assert_eq!(comp.interval, Some(CompensationInterval::Yearly));
        assert_eq!(comp.currency.as_deref(), Some("USD"));
    }

    #[test]
    fn test_parse_compensation_single_amount() {
        let comp = parse_compensation("$25.50 an hour").unwrap();
        assert_eq!(comp.min_amount, Some(25.5));
        assert_eq!(comp.max_amount, Some(25.5));
        assert_eq!(comp.interval, Some(CompensationInterval::Hourly));
    }

    #[test]
    fn test_parse_compensation_monthly() {
        let comp = parse_compensation("4,000 per month").unwrap();
        assert_eq!(comp.min_amount, Some(4000.0));
        assert_eq!(comp.interval, Some(CompensationInterval::Monthly));
    }

    #[test]
    fn test_parse_compensation_no_numbers() {
        assert!(parse_compensation("Competitive salary").is_none());
        assert!(parse_compensation("").is_none());
    }

    #[test]
    fn test_parse_compensation_extra_amounts_ignored() {
        let comp = parse_compensation("$10 - $20 - $30 an hour").unwrap();
        assert_eq!(comp.min_amount, Some(10.0));
        assert_eq!(comp.max_amount, Some(20.0));
    }

    #[test]
    fn test_is_remote() {
        assert!(is_remote("Fully Remote position", ""));
        assert!(is_remote("", "Work From Home"));
        assert!(is_remote("wfh friendly", "Boston, MA"));
        assert!(is_remote("telecommute possible", ""));
        assert!(!is_remote("On-site in Boston", "Boston, MA"));
    }

    #[test]
    fn test_job_types_accumulate() {
        let types = job_types_from_description("Full-time or contract, interns welcome");
        assert_eq!(
            types,
            vec![JobType::FullTime, JobType::Contract, JobType::Internship]
        );
        assert!(job_types_from_description("no markers here").is_empty());
    }

    #[test]
    fn test_extract_emails_in_order() {
        let emails = extract_emails("Email: test@company.com or hr@company.com");
        assert_eq!(emails, vec!["test@company.com", "hr@company.com"]);
    }

    #[test]
    fn test_extract_emails_none() {
        assert!(extract_emails("No emails here").is_empty());
        assert!(extract_emails("").is_empty());
        assert!(extract_emails("not-an-email").is_empty());
    }

    #[test]
    fn test_extract_emails_plus_addressing() {
        let emails = extract_emails("Reach out to john.doe+hiring@example-company.com");
        assert_eq!(emails, vec!["john.doe+hiring@example-company.com"]);
    }

    #[test]
    fn test_convert_description_plain() {
        let plain = convert_description("<p>Great   role</p><p>Apply now</p>", DescriptionFormat::Plain);
        assert_eq!(plain, "Great role Apply now");
    }

    #[test]
    fn test_convert_description_html_passthrough() {
        let html = "<p>Great role</p>";
        assert_eq!(
            convert_description(html, DescriptionFormat::Html),
            html.to_string()
        );
    }

    #[test]
    fn test_convert_description_markdown() {
        let md = convert_description("<b>Great</b> role", DescriptionFormat::Markdown);
        assert!(md.contains("**Great**"));
    }
}
