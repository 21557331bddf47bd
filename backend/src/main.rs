mod certificate_cache;
mod config;
mod services;

use crate::certificate_cache::state::CertificateCache;
use crate::config::ServerConfig;
use crate::services::certificates::source::{CertificateSource, HttpSheetFetcher};
use crate::services::certificates::CertificatesState;
use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::info;
use std::io;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = ServerConfig::from_env()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    let source = CertificateSource::new(
        Arc::new(HttpSheetFetcher::new(config.sheet_url.clone())),
        CertificateCache::new(config.cache_ttl),
    );
    let certificates_state = web::Data::new(CertificatesState {
        source,
        public_origin: config.public_origin.clone(),
    });

    info!(
        "Reading certificates from {} (cached for {:?})",
        config.sheet_url, config.cache_ttl
    );
    info!("Server running at {}", config.bind_url());

    HttpServer::new(move || {
        App::new()
            .app_data(certificates_state.clone())
            .service(services::certificates::configure_routes())
    })
        .bind((config.host.as_str(), config.port))?
        .run()
        .await
}
