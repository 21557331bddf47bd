use serde::{Deserialize, Serialize};

/// One issued certificate, i.e. one non-empty data row of the published sheet.
///
/// Records are built once by the CSV parser and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    /// Identifier as issued. This is the lookup key.
    pub id: String,
    pub name: String,
    pub email: String,
    /// Download link exactly as published. May be empty or malformed.
    pub download_url: String,
}

/// The reason a verification attempt was rejected.
///
/// The set is closed: every failure a client can observe maps to one of these
/// variants, and each variant carries a fixed message suitable for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationFailure {
    /// The certificate identifier was blank.
    MissingCertificateId,
    /// The email or name was blank.
    MissingContact,
    /// No record carries the given identifier.
    NotFound,
    /// A record carries the identifier, but neither its email nor its name
    /// matches the given contact.
    ContactMismatch,
    /// The certificate sheet could not be fetched or parsed.
    Unavailable,
}

impl ValidationFailure {
    /// Human-readable message shown to the user.
    pub fn message(&self) -> &'static str {
        match self {
            ValidationFailure::MissingCertificateId => "Certificate ID is required",
            ValidationFailure::MissingContact => "Email or Name is required",
            ValidationFailure::NotFound => "Certificate not found with the provided information",
            ValidationFailure::ContactMismatch => {
                "Certificate ID found, but email or name does not match our records"
            }
            ValidationFailure::Unavailable => {
                "Unable to fetch certificate data. Please try again later."
            }
        }
    }

    /// Whether the failure was detected from the input alone, before any lookup.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ValidationFailure::MissingCertificateId | ValidationFailure::MissingContact
        )
    }
}

/// Outcome of matching one verification attempt against the record set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Verified(Certificate),
    Rejected(ValidationFailure),
}

/// A verified certificate as returned to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedCertificate {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Only present when the published link is an absolute http(s) URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    /// Shareable link that pre-fills the identifier on the verification page.
    pub permalink: String,
}

/// JSON body of the verification endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate: Option<VerifiedCertificate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<ValidationFailure>,
}

impl VerificationResponse {
    pub fn verified(certificate: VerifiedCertificate) -> Self {
        Self {
            success: true,
            certificate: Some(certificate),
            error: None,
            reason: None,
        }
    }

    pub fn rejected(reason: ValidationFailure) -> Self {
        Self {
            success: false,
            certificate: None,
            error: Some(reason.message().to_string()),
            reason: Some(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rejected_response_carries_reason_and_message() {
        let response = VerificationResponse::rejected(ValidationFailure::ContactMismatch);

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "success": false,
                "error": "Certificate ID found, but email or name does not match our records",
                "reason": "contactMismatch",
            })
        );
    }

    #[test]
    fn verified_response_omits_missing_download_url() {
        let response = VerificationResponse::verified(VerifiedCertificate {
            id: "CERT-001".to_string(),
            name: "Jane Doe".to_string(),
            email: "jane@x.com".to_string(),
            download_url: None,
            permalink: "https://certs.example.org/?verify=CERT-001".to_string(),
        });

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "success": true,
                "certificate": {
                    "id": "CERT-001",
                    "name": "Jane Doe",
                    "email": "jane@x.com",
                    "permalink": "https://certs.example.org/?verify=CERT-001",
                },
            })
        );
    }

    #[test]
    fn only_blank_fields_are_input_errors() {
        assert!(ValidationFailure::MissingCertificateId.is_input_error());
        assert!(ValidationFailure::MissingContact.is_input_error());
        assert!(!ValidationFailure::NotFound.is_input_error());
        assert!(!ValidationFailure::ContactMismatch.is_input_error());
        assert!(!ValidationFailure::Unavailable.is_input_error());
    }
}
