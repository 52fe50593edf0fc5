//! Storage key generation.

use std::path::Path;

use chrono::Utc;
use uuid::Uuid;

const TOKEN_LEN: usize = 13;
const MAX_EXTENSION_LEN: usize = 16;

/// Build a blob key that is unique in the object store's own namespace and
/// independent of the display name: `{unix-millis}-{random token}{.ext}`.
pub fn generate_storage_key(original_name: &str) -> String {
    let token = Uuid::new_v4().simple().to_string();
    format!(
        "{}-{}{}",
        Utc::now().timestamp_millis(),
        &token[..TOKEN_LEN],
        extension_suffix(original_name)
    )
}

/// The lowercased `.ext` of a name, or an empty string when it has none or
/// the extension is not plain alphanumeric.
fn extension_suffix(name: &str) -> String {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| {
            !ext.is_empty()
                && ext.len() <= MAX_EXTENSION_LEN
                && ext.chars().all(|c| c.is_ascii_alphanumeric())
        })
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_default()
}
