use super::links::{certificate_permalink, is_valid_download_url};
use super::matcher::{check_required_fields, validate_certificate};
use super::CertificatesState;
use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use common::model::certificate::{
    Certificate, ValidationFailure, ValidationResult, VerificationResponse, VerifiedCertificate,
};
use common::requests::VerifyCertificateRequest;
use log::{info, warn};
use url::Url;

/// HTTP handler wrapper that converts the verification outcome to an `HttpResponse`.
///
/// - On success: `200 OK` with the verified certificate.
/// - On rejection: the status matching the failure, with its message.
/// - If the permalink cannot be built: `500 Internal Server Error`.
pub(crate) async fn process(
    state: web::Data<CertificatesState>,
    req: web::Json<VerifyCertificateRequest>,
) -> impl Responder {
    match verify_certificate(&state, req.into_inner()).await {
        Ok(response) => HttpResponse::build(status_of(&response)).json(response),
        Err(e) => HttpResponse::InternalServerError().body(format!("Error: {}", e)),
    }
}

async fn verify_certificate(
    state: &CertificatesState,
    req: VerifyCertificateRequest,
) -> Result<VerificationResponse, url::ParseError> {
    if let Err(reason) = check_required_fields(&req.certificate_id, &req.email_or_name) {
        return Ok(rejected(reason));
    }

    // Fetch failures are logged with their cause by the source.
    let records = match state.source.get_records().await {
        Ok(records) => records,
        Err(_) => return Ok(rejected(ValidationFailure::Unavailable)),
    };

    match validate_certificate(&records, &req.certificate_id, &req.email_or_name) {
        ValidationResult::Verified(certificate) => {
            info!("Certificate {} verified", certificate.id);
            let verified = to_verified(&state.public_origin, certificate)?;
            Ok(VerificationResponse::verified(verified))
        }
        ValidationResult::Rejected(reason) => Ok(rejected(reason)),
    }
}

fn rejected(reason: ValidationFailure) -> VerificationResponse {
    warn!("Certificate verification rejected: {:?}", reason);
    VerificationResponse::rejected(reason)
}

fn to_verified(
    origin: &Url,
    certificate: Certificate,
) -> Result<VerifiedCertificate, url::ParseError> {
    let permalink = certificate_permalink(origin, &certificate.id)?;
    let download_url =
        Some(certificate.download_url).filter(|url| is_valid_download_url(url));

    Ok(VerifiedCertificate {
        id: certificate.id,
        name: certificate.name,
        email: certificate.email,
        download_url,
        permalink,
    })
}

fn status_of(response: &VerificationResponse) -> StatusCode {
    match response.reason {
        None => StatusCode::OK,
        Some(reason) if reason.is_input_error() => StatusCode::BAD_REQUEST,
        Some(ValidationFailure::Unavailable) => StatusCode::SERVICE_UNAVAILABLE,
        Some(_) => StatusCode::NOT_FOUND,
    }
}
