// src/error.rs
//! Typed errors for the scraping library.
//!
//! Library code returns `ScrapeError`; the CLI boundary wraps it in
//! `anyhow` like the rest of the binary.

use thiserror::Error;

use crate::types::Site;

#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Site name did not resolve to a known job board. Fatal: raised
    /// before any network activity.
    #[error("unknown site: {name}")]
    UnknownSite { name: String },

    /// Transport-level failure (timeout, DNS, connection refused).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The site answered with a status the adapter cannot work with.
    #[error("{site} returned status {status}")]
    UnexpectedStatus {
        site: Site,
        status: reqwest::StatusCode,
    },

    /// The page did not have the structure the adapter expects.
    #[error("{site} page structure not understood: {reason}")]
    Parse { site: Site, reason: String },

    /// A spawned scrape task panicked or was cancelled.
    #[error("scrape task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
