/// Cache file naming
///
/// Image files are named after the APOD title, so the cache directory stays
/// browsable by hand:
/// - Characters other than letters, digits, underscores and whitespace are removed
/// - Leading and trailing whitespace is removed
/// - Inner whitespace runs become a single underscore
/// - The extension is taken from the image URL
use std::path::{Path, PathBuf};

/// File stem used when nothing survives sanitizing the title
const FALLBACK_STEM: &str = "apod";

/// Full path at which the image for `title` downloaded from `url` is stored
pub fn determine_file_path(cache_dir: &Path, title: &str, url: &str) -> PathBuf {
    cache_dir.join(file_name(title, url))
}

/// File name (no directory) for `title` downloaded from `url`
pub fn file_name(title: &str, url: &str) -> String {
    let mut stem = sanitize_title(title);
    if stem.is_empty() {
        stem = FALLBACK_STEM.to_string();
    }

    match url_extension(url) {
        Some(ext) => format!("{}.{}", stem, ext),
        None => stem,
    }
}

/// Filesystem-safe form of an APOD title
pub fn sanitize_title(title: &str) -> String {
    let kept: String = title
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();

    kept.split_whitespace().collect::<Vec<_>>().join("_")
}

/// Last dot-delimited segment of the URL path, ignoring query and fragment
fn url_extension(url: &str) -> Option<&str> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let last_segment = path.rsplit('/').next().unwrap_or(path);

    last_segment
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
}
