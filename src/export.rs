// src/export.rs
//! CSV and JSON serialization of a scrape report. Absent fields render
//! as empty cells (CSV) or are omitted (JSON), never as placeholders.

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::types::{JobPost, Site};
use crate::ScrapeReport;

const CSV_HEADER: [&str; 16] = [
    "site",
    "id",
    "title",
    "company",
    "location",
    "job_type",
    "interval",
    "min_amount",
    "max_amount",
    "currency",
    "is_remote",
    "date_posted",
    "job_url",
    "job_url_direct",
    "emails",
    "description",
];

pub fn write_csv<W: Write>(report: &ScrapeReport, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(CSV_HEADER)
        .context("Failed to write CSV header")?;

    for (site, job) in report.jobs() {
        csv_writer
            .write_record(csv_record(site, job))
            .context("Failed to write CSV record")?;
    }

    csv_writer.flush().context("Failed to flush CSV output")?;
    Ok(())
}

fn csv_record(site: Site, job: &JobPost) -> Vec<String> {
    let comp = job.compensation.as_ref();
    vec![
        site.to_string(),
        job.id.clone().unwrap_or_default(),
        job.title.clone(),
        job.company_name.clone().unwrap_or_default(),
        job.location.as_ref().map(|l| l.display()).unwrap_or_default(),
        job.job_type
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(", "),
        comp.and_then(|c| c.interval)
            .map(|i| i.as_str().to_string())
            .unwrap_or_default(),
        comp.and_then(|c| c.min_amount)
            .map(|a| a.to_string())
            .unwrap_or_default(),
        comp.and_then(|c| c.max_amount)
            .map(|a| a.to_string())
            .unwrap_or_default(),
        comp.and_then(|c| c.currency.clone()).unwrap_or_default(),
        job.is_remote.map(|r| r.to_string()).unwrap_or_default(),
        job.date_posted.map(|d| d.to_string()).unwrap_or_default(),
        job.job_url.clone(),
        job.job_url_direct.clone().unwrap_or_default(),
        job.emails.join(", "),
        job.description.clone().unwrap_or_default(),
    ]
}

#[derive(Serialize)]
struct ExportRow<'a> {
    site: Site,
    #[serde(flatten)]
    job: &'a JobPost,
}

pub fn write_json<W: Write>(report: &ScrapeReport, mut writer: W) -> Result<()> {
    let rows: Vec<ExportRow<'_>> = report
        .jobs()
        .map(|(site, job)| ExportRow { site, job })
        .collect();
    serde_json::to_writer_pretty(&mut writer, &rows).context("Failed to serialize jobs to JSON")?;
    writeln!(writer).context("Failed to write JSON output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Compensation, CompensationInterval, JobResponse, JobType, Location};

    fn sample_report() -> ScrapeReport {
        let job = JobPost {
            id: Some("abc123".to_string()),
            title: "Senior Rust Engineer".to_string(),
            company_name: Some("Acme Corp".to_string()),
            job_url: "https://www.indeed.com/viewjob?jk=abc123".to_string(),
            job_url_direct: Some("https://apply.example.com/x1".to_string()),
            location: Some(Location {
                city: Some("Boston".to_string()),
                state: Some("MA".to_string()),
                country: None,
            }),
            job_type: vec![JobType::FullTime, JobType::Contract],
            compensation: Some(Compensation {
                interval: Some(CompensationInterval::Yearly),
                min_amount: Some(50000.0),
                max_amount: Some(70000.0),
                currency: Some("USD".to_string()),
            }),
            is_remote: Some(true),
            emails: vec!["jobs@acme.com".to_string()],
            ..Default::default()
        };
        let bare = JobPost {
            title: "Backend Developer".to_string(),
            job_url: "https://www.indeed.com/viewjob?jk=def456".to_string(),
            ..Default::default()
        };
        ScrapeReport {
            responses: vec![JobResponse {
                site: Site::Indeed,
                jobs: vec![job, bare],
            }],
            errors: Vec::new(),
        }
    }

    #[test]
    fn test_write_csv() {
        let mut buf = Vec::new();
        write_csv(&sample_report(), &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        let mut lines = out.lines();

        assert_eq!(
            lines.next().unwrap(),
            "site,id,title,company,location,job_type,interval,min_amount,max_amount,currency,is_remote,date_posted,job_url,job_url_direct,emails,description"
        );
        let row = lines.next().unwrap();
        assert!(row.starts_with("indeed,abc123,Senior Rust Engineer,Acme Corp"));
        assert!(row.contains("\"Boston, MA\""));
        assert!(row.contains("yearly,50000,70000,USD,true"));
        assert!(row.contains("https://apply.example.com/x1"));

        // Absent fields render empty, not as placeholders.
        let bare_row = lines.next().unwrap();
        assert!(bare_row.starts_with("indeed,,Backend Developer,,,"));
    }

    #[test]
    fn test_write_json() {
        let mut buf = Vec::new();
        write_json(&sample_report(), &mut buf).unwrap();
        let rows: serde_json::Value = serde_json::from_slice(&buf).unwrap();

        let first = &rows[0];
        assert_eq!(first["site"], "indeed");
        assert_eq!(first["title"], "Senior Rust Engineer");
        assert_eq!(first["compensation"]["min_amount"], 50000.0);
        assert_eq!(first["job_type"][0], "fulltime");

        // Optional fields absent rather than null.
        let bare = &rows[1];
        assert!(bare.get("company_name").is_none());
        assert!(bare.get("compensation").is_none());
    }
}
