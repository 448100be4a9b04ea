//! Href string utilities.
//!
//! Pure string helpers used by the link transformer:
//! - Link type detection (external vs internal)
//! - Fragment / query splitting
//! - Last-segment extension inspection

/// Check if a link is external (has a URL scheme like http:, mailto:, etc.)
///
/// A valid scheme must:
/// - Have at least 1 character before the colon
/// - Only contain ASCII alphanumeric or `+`, `-`, `.`
/// - Appear before any `/`, `?` or `#`
///
/// # Examples
/// ```ignore
/// assert!(is_external_link("https://eslint.org"));
/// assert!(is_external_link("mailto:user@example.com"));
/// assert!(!is_external_link("/about"));
/// assert!(!is_external_link("./file.txt"));
/// ```
#[inline]
pub fn is_external_link(link: &str) -> bool {
    link.find(':').is_some_and(|pos| {
        pos > 0
            && link[..pos]
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}

/// Split a URL into path and fragment parts at the first `#`.
///
/// Returns `None` as the fragment when no `#` is present, so that an
/// empty trailing fragment (`page#`) survives a round trip.
///
/// # Examples
/// ```ignore
/// assert_eq!(split_path_fragment("/about#team"), ("/about", Some("team")));
/// assert_eq!(split_path_fragment("/about"), ("/about", None));
/// ```
#[inline]
pub fn split_path_fragment(url: &str) -> (&str, Option<&str>) {
    match url.split_once('#') {
        Some((path, fragment)) => (path, Some(fragment)),
        None => (url, None),
    }
}

/// Split a fragment-free URL into path and query parts at the first `?`.
#[inline]
pub fn split_path_query(url: &str) -> (&str, Option<&str>) {
    match url.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (url, None),
    }
}

/// Last `/`-separated segment of a path (empty for `dir/`).
#[inline]
pub fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Extension of the last path segment, including the dot.
///
/// Follows the usual basename rules: a leading dot does not start an
/// extension (`.eslintrc` has none), and only the text after the final dot
/// counts, so `migrating-to-8.0.0` has the extension `.0`.
pub fn extension(path: &str) -> Option<&str> {
    let name = last_segment(path);
    match name.rfind('.') {
        Some(0) | None => None,
        Some(pos) if pos + 1 == name.len() => None,
        Some(pos) => Some(&name[pos..]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_external_link() {
        assert!(is_external_link("https://example.com"));
        assert!(is_external_link("http://example.com"));
        assert!(is_external_link("mailto:user@example.com"));
        assert!(is_external_link("tel:+1234567890"));
        assert!(!is_external_link("/about"));
        assert!(!is_external_link("./file.txt"));
        assert!(!is_external_link("#section"));
        assert!(!is_external_link(":nope"));
    }

    #[test]
    fn test_split_path_fragment() {
        assert_eq!(split_path_fragment("/about#team"), ("/about", Some("team")));
        assert_eq!(split_path_fragment("/about"), ("/about", None));
        assert_eq!(split_path_fragment("#section"), ("", Some("section")));
        assert_eq!(split_path_fragment("page#"), ("page", Some("")));
        // Only the first `#` splits
        assert_eq!(split_path_fragment("a#b#c"), ("a", Some("b#c")));
    }

    #[test]
    fn test_split_path_query() {
        assert_eq!(split_path_query("search?q=x"), ("search", Some("q=x")));
        assert_eq!(split_path_query("search"), ("search", None));
        assert_eq!(split_path_query("?q"), ("", Some("q")));
    }

    #[test]
    fn test_last_segment() {
        assert_eq!(last_segment("docs/rules/no-undef"), "no-undef");
        assert_eq!(last_segment("docs/rules/"), "");
        assert_eq!(last_segment("page"), "page");
    }

    #[test]
    fn test_extension() {
        assert_eq!(extension("page.html"), Some(".html"));
        assert_eq!(extension("dir.v2/page"), None);
        assert_eq!(extension("migrating-to-8.0.0"), Some(".0"));
        assert_eq!(extension(".eslintrc"), None);
        assert_eq!(extension("trailing."), None);
        assert_eq!(extension("folder/"), None);
        assert_eq!(extension("style.css"), Some(".css"));
    }
}
