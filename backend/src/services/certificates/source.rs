//! Provides the certificate record set, fetching the published sheet only when
//! the cached snapshot is missing or stale.
//!
//! Every failure while fetching (transport error, non-success status, or a sheet
//! that cannot be parsed) reaches the caller as a single `FetchError` whose
//! message is safe to show to users. The underlying `FetchCause` is kept as the
//! error source and logged.

use super::csv_parser::{parse_certificates, CsvError};
use crate::certificate_cache::state::CertificateCache;
use async_trait::async_trait;
use common::model::certificate::Certificate;
use log::{debug, error, info};
use reqwest::{header::CACHE_CONTROL, Client, StatusCode};
use std::{sync::Arc, time::SystemTime};
use thiserror::Error;
use url::Url;

/// Published Google Sheets CSV export holding the issued certificates.
pub const DEFAULT_SHEET_URL: &str = "https://docs.google.com/spreadsheets/d/1KfxWeP21U06emmQjDGQVg9cUcJbxMT29vOz6ZDTfH4I/export?format=csv";

#[derive(Debug, Error)]
pub enum FetchCause {
    #[error("request to certificate sheet failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("certificate sheet responded with status {0}")]
    Status(StatusCode),
    #[error("certificate sheet is malformed: {0}")]
    Parse(#[from] CsvError),
}

#[derive(Debug, Error)]
#[error("Unable to fetch certificate data. Please try again later.")]
pub struct FetchError {
    #[source]
    cause: FetchCause,
}

impl FetchError {
    pub fn cause(&self) -> &FetchCause {
        &self.cause
    }
}

impl From<FetchCause> for FetchError {
    fn from(cause: FetchCause) -> Self {
        Self { cause }
    }
}

/// Retrieves the raw CSV text of the certificate sheet.
#[async_trait]
pub trait SheetFetcher: Send + Sync {
    async fn fetch_csv(&self) -> Result<String, FetchCause>;
}

/// Fetches the sheet over HTTP(S), bypassing intermediate caches.
#[derive(Debug, Clone)]
pub struct HttpSheetFetcher {
    url: Url,
    client: Client,
}

impl HttpSheetFetcher {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            client: Client::new(),
        }
    }
}

#[async_trait]
impl SheetFetcher for HttpSheetFetcher {
    async fn fetch_csv(&self) -> Result<String, FetchCause> {
        let response = self
            .client
            .get(self.url.clone())
            .header(CACHE_CONTROL, "no-cache")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchCause::Status(status));
        }

        Ok(response.text().await?)
    }
}

/// The record set provider used by the verification endpoint.
#[derive(Clone)]
pub struct CertificateSource {
    fetcher: Arc<dyn SheetFetcher>,
    cache: CertificateCache,
}

impl CertificateSource {
    pub fn new(fetcher: Arc<dyn SheetFetcher>, cache: CertificateCache) -> Self {
        Self { fetcher, cache }
    }

    /// Returns the cached records while fresh, otherwise fetches and caches a
    /// new snapshot.
    pub async fn get_records(&self) -> Result<Arc<Vec<Certificate>>, FetchError> {
        self.get_records_at(SystemTime::now()).await
    }

    pub(crate) async fn get_records_at(
        &self,
        now: SystemTime,
    ) -> Result<Arc<Vec<Certificate>>, FetchError> {
        let mut snapshot = self.cache.lock().await;

        if let Some(records) = snapshot.fresh_records(now) {
            debug!("Serving {} certificates from cache", records.len());
            return Ok(records);
        }

        let records = match self.fetch().await {
            Ok(records) => Arc::new(records),
            Err(cause) => {
                let err = FetchError::from(cause);
                error!("Error fetching certificates: {}", err.cause());
                return Err(err);
            }
        };

        info!("Fetched {} certificates from sheet", records.len());
        snapshot.replace(Arc::clone(&records), now);
        Ok(records)
    }

    async fn fetch(&self) -> Result<Vec<Certificate>, FetchCause> {
        let csv_text = self.fetcher.fetch_csv().await?;
        Ok(parse_certificates(&csv_text)?)
    }

    /// Forces the next call to fetch, regardless of the snapshot's age.
    pub async fn clear_cache(&self) {
        self.cache.clear().await;
        debug!("Certificate cache cleared");
    }
}
