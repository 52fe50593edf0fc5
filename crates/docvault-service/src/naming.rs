//! Display-name rules shared by folders and files.

use docvault_core::error::AppError;
use docvault_core::result::AppResult;

/// Longest accepted display name, in characters.
pub const MAX_NAME_LEN: usize = 255;

/// What a name is being validated for; only affects error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    Folder,
    File,
}

impl NameKind {
    fn label(self) -> &'static str {
        match self {
            Self::Folder => "Folder",
            Self::File => "File",
        }
    }
}

/// Trim and validate a display name, returning the trimmed form.
pub fn validate_name(kind: NameKind, raw: &str) -> AppResult<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(AppError::validation(format!("{} name is required", kind.label())));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(AppError::validation(format!("{} name too long", kind.label())));
    }
    if name.contains(['/', '\0']) {
        return Err(AppError::validation(format!(
            "{} name may not contain '/' or NUL characters",
            kind.label()
        )));
    }
    Ok(name.to_string())
}

/// Split `name` at its last dot into base and extension.
///
/// Names without a dot, or whose only dot is the first character
/// (`.profile`), have no extension.
pub fn split_extension(name: &str) -> (&str, Option<&str>) {
    match name.rsplit_once('.') {
        Some((base, ext)) if !base.is_empty() => (base, Some(ext)),
        _ => (name, None),
    }
}

/// The `n`-th keep-both candidate for `name`: `report.pdf` becomes
/// `report (n).pdf`.
///
/// The base is shortened so the result stays within [`MAX_NAME_LEN`].
/// An extension too long to keep is cut along with the rest of the name.
pub fn numbered_name(name: &str, n: u64) -> String {
    let suffix = format!(" ({n})");
    let room = MAX_NAME_LEN - suffix.chars().count();

    if let (base, Some(ext)) = split_extension(name) {
        let ext_len = ext.chars().count() + 1;
        if ext_len < room {
            return format!("{}{suffix}.{ext}", truncate_chars(base, room - ext_len));
        }
    }
    format!("{}{suffix}", truncate_chars(name, room))
}

/// The longest prefix of `s` with at most `max` characters.
fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
