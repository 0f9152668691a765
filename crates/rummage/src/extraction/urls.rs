//! URL discovery over recovered text.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?-u)(http|ftp|https)://([\w_-]+(?:(?:\.[\w_-]+)+))([\w.,@?^=%&:/~+#-]*[\w@?^=%&/~+#-])?")
        .expect("URL regex pattern is valid and should compile")
});

/// Find every URL in `strings`, in order, keeping only the first occurrence of each.
///
/// Matches are non-overlapping and collected left to right within each string,
/// strings in list order. Never fails; no matches yields an empty list.
pub fn extract_urls<S: AsRef<str>>(strings: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut urls = Vec::new();

    for text in strings {
        for found in URL_PATTERN.find_iter(text.as_ref()) {
            let url = found.as_str();
            if seen.insert(url) {
                urls.push(url.to_string());
            }
        }
    }

    urls
}
