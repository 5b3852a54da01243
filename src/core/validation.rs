//! Input validation for opsync operations.
//!
//! Validates item names, field names, and Kubernetes object names before any
//! remote call is made.

use crate::error::{Result, ValidationError};

/// Longest DNS-1123 label (namespaces).
const DNS_LABEL_MAX_LEN: usize = 63;

/// Longest DNS-1123 subdomain (secret names).
const DNS_SUBDOMAIN_MAX_LEN: usize = 253;

/// Validate a vault item name.
///
/// # Errors
///
/// Returns `ValidationError::EmptyItemName` for blank names.
pub fn validate_item_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyItemName.into());
    }
    Ok(())
}

/// Validate a field name.
///
/// Field names become the last segment of an `op://vault/item/field`
/// reference, so they cannot contain `/`, braces, or control characters.
///
/// # Errors
///
/// Returns `ValidationError` if the name is empty or unusable in a reference.
pub fn validate_field_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ValidationError::EmptyFieldName.into());
    }

    for (i, ch) in name.chars().enumerate() {
        if ch == '/' || ch == '{' || ch == '}' || ch.is_control() {
            return Err(ValidationError::InvalidFieldName {
                name: name.to_string(),
                reason: format!("invalid character {:?} at position {}", ch, i + 1),
            }
            .into());
        }
    }

    Ok(())
}

/// Validate a Kubernetes namespace (RFC 1123 label).
///
/// # Errors
///
/// Returns `ValidationError::InvalidDnsName` if the name is not a valid label.
pub fn validate_namespace(name: &str) -> Result<()> {
    if name.len() > DNS_LABEL_MAX_LEN {
        return Err(dns_error(
            "namespace",
            name,
            format!("must be no more than {} characters", DNS_LABEL_MAX_LEN),
        ));
    }
    if name.is_empty() {
        return Err(dns_error("namespace", name, "cannot be empty".to_string()));
    }
    validate_label("namespace", name, name)
}

/// Validate a Kubernetes object name (RFC 1123 subdomain).
///
/// Lowercase alphanumerics, `-` and `.`; each dot-separated part must start
/// and end with an alphanumeric character.
///
/// # Errors
///
/// Returns `ValidationError::InvalidDnsName` if the name is not a valid subdomain.
pub fn validate_secret_name(name: &str) -> Result<()> {
    if name.len() > DNS_SUBDOMAIN_MAX_LEN {
        return Err(dns_error(
            "secret name",
            name,
            format!("must be no more than {} characters", DNS_SUBDOMAIN_MAX_LEN),
        ));
    }
    if name.is_empty() {
        return Err(dns_error("secret name", name, "cannot be empty".to_string()));
    }
    for part in name.split('.') {
        validate_label("secret name", name, part)?;
    }
    Ok(())
}

fn validate_label(kind: &'static str, full: &str, label: &str) -> Result<()> {
    if label.is_empty() {
        return Err(dns_error(kind, full, "cannot contain empty segments".to_string()));
    }

    if let Some(ch) = label
        .chars()
        .find(|ch| !(ch.is_ascii_lowercase() || ch.is_ascii_digit() || *ch == '-'))
    {
        return Err(dns_error(
            kind,
            full,
            format!(
                "invalid character {:?}; only lowercase alphanumerics, '-' and '.' are allowed",
                ch
            ),
        ));
    }

    if label.starts_with('-') || label.ends_with('-') {
        return Err(dns_error(
            kind,
            full,
            "must start and end with an alphanumeric character".to_string(),
        ));
    }

    Ok(())
}

fn dns_error(kind: &'static str, name: &str, reason: String) -> crate::error::Error {
    ValidationError::InvalidDnsName {
        kind,
        name: name.to_string(),
        reason,
    }
    .into()
}
