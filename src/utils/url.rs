//! URL helpers for talking to the assistant backend.

/// Normalize a base URL by trimming trailing slashes.
///
/// The backend base URL is user-supplied (flag, environment, or config file)
/// and frequently arrives with a trailing slash. Endpoint paths are joined
/// with exactly one separator, so the base is stored without any.
///
/// # Examples
///
/// ```
/// use crmchat::utils::url::normalize_base_url;
///
/// assert_eq!(normalize_base_url("http://localhost:8000/api/"), "http://localhost:8000/api");
/// assert_eq!(normalize_base_url("http://localhost:8000/api"), "http://localhost:8000/api");
/// ```
pub fn normalize_base_url(base_url: &str) -> &str {
    base_url.trim_end_matches('/')
}

/// Join an endpoint path onto a base URL.
///
/// # Examples
///
/// ```
/// use crmchat::utils::url::construct_api_url;
///
/// assert_eq!(
///     construct_api_url("http://localhost:8000/api/", "chat"),
///     "http://localhost:8000/api/chat"
/// );
/// ```
pub fn construct_api_url(base_url: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        normalize_base_url(base_url),
        endpoint.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url_strips_all_trailing_slashes() {
        assert_eq!(normalize_base_url("http://host/api///"), "http://host/api");
        assert_eq!(normalize_base_url("http://host"), "http://host");
    }

    #[test]
    fn test_construct_api_url_joins_with_single_slash() {
        assert_eq!(
            construct_api_url("http://localhost:8000/api", "chat"),
            "http://localhost:8000/api/chat"
        );
        assert_eq!(
            construct_api_url("http://localhost:8000/api/", "/health"),
            "http://localhost:8000/api/health"
        );
    }
}
