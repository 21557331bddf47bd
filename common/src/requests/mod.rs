use serde::{Deserialize, Serialize};

/// Request payload for the certificate verification endpoint.
///
/// Both fields default to an empty string when absent, so a partially filled
/// form is reported as a missing field instead of a malformed request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyCertificateRequest {
    #[serde(default)]
    pub certificate_id: String,
    /// Registrant email or full name, matched against either column.
    #[serde(default)]
    pub email_or_name: String,
}
