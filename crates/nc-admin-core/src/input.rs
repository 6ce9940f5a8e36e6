//! Normalization of raw form input before dispatch.

/// Append a trailing `/` unless one is already present.
pub fn normalize_base_uri(raw: &str) -> String {
    if raw.ends_with('/') {
        raw.to_owned()
    } else {
        format!("{raw}/")
    }
}

/// One address per line, in input order. Lines are trimmed and blank lines
/// dropped so `\r\n` input and a trailing newline behave.
pub fn split_minter_list(raw: &str) -> Vec<String> {
    raw.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

pub fn normalize_owner(raw: &str) -> String {
    raw.trim().to_owned()
}

pub fn ownership_prompt(new_owner: &str) -> String {
    format!("Are you sure you want to set the new owner to '{new_owner}'?")
}
