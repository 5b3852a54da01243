//! `.env` file parsing.
//!
//! Reads `KEY=value` lines straight into a [`SecretSet`]; no other type ever
//! holds the parsed values.

use std::path::Path;

use zeroize::Zeroizing;

use crate::core::domain::SecretSet;
use crate::core::validation::validate_field_name;
use crate::error::{Result, SourceError};

/// Parse an .env file from disk.
///
/// Skips empty lines and comments (lines starting with #).
/// Supports values with or without quotes, and an optional `export ` prefix.
/// A key repeated later in the file replaces the earlier value.
///
/// # Errors
///
/// Returns `SourceError::ReadFile` if the file cannot be read, or
/// `ValidationError` if a key is not a usable field name.
pub(crate) fn load(path: &Path) -> Result<SecretSet> {
    let contents = std::fs::read_to_string(path)
        .map(Zeroizing::new)
        .map_err(|source| SourceError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;

    parse(&contents)
}

fn parse(contents: &str) -> Result<SecretSet> {
    let mut set = SecretSet::new();

    for line in contents.lines() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let line = line.strip_prefix("export ").unwrap_or(line);

        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            validate_field_name(key)?;
            set.insert(key, parse_env_value(value.trim()))?;
        }
    }

    Ok(set)
}

fn parse_env_value(raw: &str) -> String {
    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        return unescape_double_quoted(&raw[1..raw.len() - 1]);
    }

    if raw.len() >= 2 && raw.starts_with('\'') && raw.ends_with('\'') {
        return raw[1..raw.len() - 1].to_string();
    }

    raw.to_string()
}

fn unescape_double_quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }

        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}
