//! Matches a verification attempt against the certificate record set.
//!
//! A certificate is verified when its identifier matches the given one AND
//! either its email or its name matches the given contact. Every comparison
//! is exact after normalization (lowercase, trimmed, inner whitespace runs
//! collapsed to a single space).

use common::model::certificate::{Certificate, ValidationFailure, ValidationResult};

/// Normalizes a string for comparison.
pub fn normalize(value: &str) -> String {
    value
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Rejects blank input. The identifier is checked before the contact.
pub fn check_required_fields(
    certificate_id: &str,
    contact: &str,
) -> Result<(), ValidationFailure> {
    if certificate_id.trim().is_empty() {
        return Err(ValidationFailure::MissingCertificateId);
    }
    if contact.trim().is_empty() {
        return Err(ValidationFailure::MissingContact);
    }
    Ok(())
}

/// Looks up the first record matching both the identifier and the contact.
///
/// When nothing matches, the failure tells apart an identifier that exists
/// with a different contact from an identifier that does not exist at all.
pub fn validate_certificate(
    certificates: &[Certificate],
    certificate_id: &str,
    contact: &str,
) -> ValidationResult {
    if let Err(failure) = check_required_fields(certificate_id, contact) {
        return ValidationResult::Rejected(failure);
    }

    let search_id = normalize(certificate_id);
    let search_contact = normalize(contact);

    let matching = certificates.iter().find(|certificate| {
        normalize(&certificate.id) == search_id
            && (normalize(&certificate.email) == search_contact
                || normalize(&certificate.name) == search_contact)
    });

    if let Some(certificate) = matching {
        return ValidationResult::Verified(certificate.clone());
    }

    let id_exists = certificates
        .iter()
        .any(|certificate| normalize(&certificate.id) == search_id);

    if id_exists {
        ValidationResult::Rejected(ValidationFailure::ContactMismatch)
    } else {
        ValidationResult::Rejected(ValidationFailure::NotFound)
    }
}
