//! Utility functions for URL handling.

/// Removes every trailing slash from a base URL.
///
/// # Examples
///
/// ```
/// # use bingo_bot::utils::normalize_url;
/// assert_eq!(normalize_url("https://backend.example/"), "https://backend.example");
/// ```
pub fn normalize_url(url: &str) -> String {
    url.trim_end_matches('/').to_owned()
}

/// Appends an absolute path to a base URL, without doubling the slash.
///
/// # Arguments
///
/// * `base` - The base URL, with or without trailing slash
/// * `path` - The path to append, starting with `/`
pub fn join_url(base: &str, path: &str) -> String {
    format!("{}{}", normalize_url(base), path)
}
