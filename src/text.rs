use std::cmp::Ordering;

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Lowercases and strips diacritics (`"Sofía"` -> `"sofia"`).
pub fn fold(value: &str) -> String {
    value
        .to_lowercase()
        .nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .collect()
}

/// Builds a URL-safe identifier from a display name.
///
/// Every run of characters outside `[a-z0-9]` (after folding) collapses into a
/// single hyphen, and leading or trailing hyphens are dropped.
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_hyphen = false;
    for ch in fold(value).chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch);
        } else {
            pending_hyphen = true;
        }
    }
    slug
}

/// Name ordering that ignores case and accents, falling back to the raw text
/// so that distinct names never compare equal.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    fold(a).cmp(&fold(b)).then_with(|| a.cmp(b))
}

/// `base` if free, otherwise the first free `base-2`, `base-3`, ...
pub fn unique_id(base: &str, mut taken: impl FnMut(&str) -> bool) -> String {
    if !taken(base) {
        return base.to_string();
    }
    (2..)
        .map(|suffix| format!("{base}-{suffix}"))
        .find(|id| !taken(id.as_str()))
        .unwrap_or_else(|| base.to_string())
}
