use super::CertificatesState;
use actix_web::{web, HttpResponse, Responder};

pub(crate) async fn process(state: web::Data<CertificatesState>) -> impl Responder {
    state.source.clear_cache().await;
    HttpResponse::NoContent().finish()
}
