//! Instance path normalization.
//!
//! Importer instance paths are turned into names the host accepts: namespace
//! prefixes, a leading slash and leading digit/underscore runs are removed from
//! every segment.

/// Normalizes an instance path into a host-legal, `/`-separated name path.
///
/// Empty segments survive as empty segments, except that nothing is emitted
/// for them before the first non-empty one, so the result never starts with
/// `/` and normalizing twice gives the same result.
///
/// ```
/// use pattern_import::normalize_path;
///
/// assert_eq!(normalize_path("/a:ns:Foo/_2Bar"), "Foo/Bar");
/// ```
pub fn normalize_path(path: &str) -> String {
    let path = path.strip_prefix('/').unwrap_or(path);
    if path.is_empty() {
        return String::new();
    }

    if !path.contains('/') {
        return normalize_segment(path).to_string();
    }

    let mut joined = String::with_capacity(path.len());
    for segment in path.split('/') {
        if !joined.is_empty() {
            joined.push('/');
        }
        joined.push_str(&normalize_path(segment));
    }
    joined
}

fn normalize_segment(segment: &str) -> &str {
    let segment = match segment.rfind(':') {
        Some(index) => &segment[index + 1..],
        None => segment,
    };
    segment.trim_start_matches(|c: char| c == '_' || c.is_ascii_digit())
}

/// Splits a normalized path into its parent path and leaf name.
///
/// Only a `/` past the first character counts as a separator, so a path
/// without one is returned whole as the leaf with an empty parent.
pub fn split_parent(path: &str) -> (&str, &str) {
    match path.rfind('/') {
        Some(index) if index > 0 => (&path[..index], &path[index + 1..]),
        _ => ("", path),
    }
}

/// Prepends the root prefix to a normalized instance path.
pub(crate) fn prefixed_path(root_prefix: &str, instance_path: &str) -> String {
    let normalized = normalize_path(instance_path);
    if normalized.is_empty() {
        return normalized;
    }
    let mut full = String::with_capacity(root_prefix.len() + normalized.len());
    full.push_str(root_prefix);
    full.push_str(&normalized);
    full
}

/// Normalizes a root prefix and enforces a trailing `/` when it is not empty.
pub(crate) fn normalize_root_prefix(prefix: &str) -> String {
    let mut normalized = normalize_path(prefix);
    if !normalized.is_empty() && !normalized.ends_with('/') {
        normalized.push('/');
    }
    normalized
}
