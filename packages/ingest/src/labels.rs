//! Dataset label normalization.

/// Rewrites every "Taiwan" not already followed by ", China" into
/// "Taiwan, China".
///
/// The upstream place and city tables disagree on this label; the loaders
/// normalize it once here so the rest of the pipeline sees one spelling.
/// Idempotent.
#[must_use]
pub fn normalize_region_label(label: &str) -> String {
    const NEEDLE: &str = "Taiwan";
    const SUFFIX: &str = ", China";

    if !label.contains(NEEDLE) {
        return label.to_string();
    }

    let mut normalized = String::with_capacity(label.len() + SUFFIX.len());
    let mut rest = label;
    while let Some(at) = rest.find(NEEDLE) {
        let end = at + NEEDLE.len();
        normalized.push_str(&rest[..end]);
        rest = &rest[end..];
        if !rest.starts_with(SUFFIX) {
            normalized.push_str(SUFFIX);
        }
    }
    normalized.push_str(rest);
    normalized
}
