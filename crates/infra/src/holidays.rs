//! BrasilAPI-backed holiday source.
//!
//! Fetches national public holidays for one calendar year from
//! `GET {base}/api/feriados/v1/{year}`. The retry-once-then-degrade
//! policy lives in the core `HolidayDirectory`; this client performs a
//! single attempt per call.

use async_trait::async_trait;
use chrono::NaiveDate;
use flowtrack_core::calendar::holidays::HolidaySource;
use flowtrack_domain::Result;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::errors::InfraError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// One holiday entry as returned by BrasilAPI (`YYYY-MM-DD`).
#[derive(Debug, Deserialize)]
struct HolidayEntry {
    date: NaiveDate,
}

/// HTTP client for the BrasilAPI holiday endpoint.
pub struct BrasilApiHolidaySource {
    client: reqwest::Client,
    base_url: String,
}

impl BrasilApiHolidaySource {
    /// Create a source against the given base URL (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(InfraError::from)?;
        Ok(Self { client, base_url: base_url.into() })
    }
}

#[async_trait]
impl HolidaySource for BrasilApiHolidaySource {
    async fn fetch_holidays(&self, year: i32) -> Result<Vec<NaiveDate>> {
        let url = format!("{}/api/feriados/v1/{year}", self.base_url);
        debug!(%url, "fetching holiday set");

        let entries: Vec<HolidayEntry> = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(InfraError::from)?
            .error_for_status()
            .map_err(InfraError::from)?
            .json()
            .await
            .map_err(InfraError::from)?;

        Ok(entries.into_iter().map(|entry| entry.date).collect())
    }
}
