use super::source::{FetchCause, SheetFetcher};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::sync::atomic::{AtomicUsize, Ordering};

pub(crate) const SHEET: &str = "\
ID,Name,Email,Downlod Link
CERT-001,Jane Doe,jane@x.com,https://x/cert.pdf
CERT-002,\"Smith, John\",john@y.org,javascript:alert(1)
,,,
CERT-003,Ana López,ana@z.es,
";

/// In-memory sheet that counts how often it was fetched.
pub(crate) struct StaticSheet {
    body: Result<String, StatusCode>,
    fetches: AtomicUsize,
}

impl StaticSheet {
    pub(crate) fn new(csv: &str) -> Self {
        Self {
            body: Ok(csv.to_string()),
            fetches: AtomicUsize::new(0),
        }
    }

    pub(crate) fn failing(status: StatusCode) -> Self {
        Self {
            body: Err(status),
            fetches: AtomicUsize::new(0),
        }
    }

    pub(crate) fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SheetFetcher for StaticSheet {
    async fn fetch_csv(&self) -> Result<String, FetchCause> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.body.clone().map_err(FetchCause::Status)
    }
}
