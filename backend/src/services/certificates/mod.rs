//! Certificate verification API.
//!
//! A user proves they hold a certificate by giving its identifier together
//! with the email or the name it was issued to. The record set comes from a
//! published spreadsheet (CSV export) which is cached for a short window.
//!
//! The provided routes are:
//! - `POST /api/certificates/verify`: Expects a `VerifyCertificateRequest` JSON body
//!   and answers with a `VerificationResponse`. Blank input is rejected with
//!   `400 Bad Request` before the sheet is fetched. An unknown identifier or a
//!   contact that does not match gives `404 Not Found`, and a sheet that cannot be
//!   fetched gives `503 Service Unavailable`. On success the response carries the
//!   certificate, its download link (only if it is an http(s) URL) and a permalink.
//!
//! - `POST /api/certificates/cache/clear`: Drops the cached snapshot so the next
//!   verification fetches the sheet again. Answers `204 No Content`.

use actix_web::web::{post, scope};
use actix_web::Scope;
use url::Url;

mod clear_cache;
pub mod csv_parser;
pub mod links;
pub mod matcher;
pub mod source;
#[cfg(test)]
mod test_support;
mod verify;

use source::CertificateSource;

const API_PATH: &str = "/api/certificates";

/// Shared state of the certificate routes, injected as `web::Data` in `main.rs`.
#[derive(Clone)]
pub struct CertificatesState {
    /// Provider of the record set, with its cache.
    pub source: CertificateSource,
    /// Public origin of the site, used to build permalinks.
    pub public_origin: Url,
}

/// Configures and returns the Actix scope for certificate routes.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/verify", post().to(verify::process))
        .route("/cache/clear", post().to(clear_cache::process))
}
