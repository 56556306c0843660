use lazy_static::lazy_static;
use regex::Regex;

use crate::Error;

/// Receipt extensions accepted by the new bill form.
pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

lazy_static! {
    static ref ACCEPTED_FILE_NAME: Regex = Regex::new(r"(?i)\.(jpe?g|png)$").unwrap();
}

/// Whether `file_name` carries one of the [`ACCEPTED_EXTENSIONS`],
/// ignoring case.
pub fn is_accepted(file_name: &str) -> bool {
    ACCEPTED_FILE_NAME.is_match(file_name.trim())
}

/// Returns the file name to keep for an uploaded receipt, stripped of any
/// client-side directory prefix.
pub fn validate(file_name: &str) -> Result<&str, Error> {
    let base_name = file_name
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or(file_name)
        .trim();
    if base_name.is_empty() || !is_accepted(base_name) {
        tracing::debug!(file_name = file_name, "rejecting receipt file");
        return Err(Error::UnsupportedReceipt(file_name.to_string()));
    }
    Ok(base_name)
}
