//! URL construction helpers
//!
//! Both helpers resolve the path against the base using RFC 3986 relative
//! reference rules, so a relative path replaces the last segment of the
//! base path and an absolute path (`/...`) replaces the whole path.

use url::form_urlencoded;
use url::Url;

use crate::Result;

/// Resolve an optional path against a base URL
///
/// An absent or empty path leaves the base untouched.
///
/// # Examples
/// ```
/// use networking::join_url;
///
/// let url = join_url("https://waterservices.usgs.gov", Some("nwis/site/")).unwrap();
/// assert_eq!(url.as_str(), "https://waterservices.usgs.gov/nwis/site/");
/// ```
pub fn join_url(base: &str, path: Option<&str>) -> Result<Url> {
    let base = Url::parse(base)?;
    match path {
        Some(path) if !path.is_empty() => Ok(base.join(path)?),
        _ => Ok(base),
    }
}

/// Encode parameters as an `application/x-www-form-urlencoded` query string
///
/// Pairs are emitted in iteration order.
pub fn encode_query<I, K, V>(params: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in params {
        serializer.append_pair(key.as_ref(), value.as_ref());
    }
    serializer.finish()
}

/// Build a URL from a network location, a path and query parameters
///
/// `params` may be any iterator of key/value pairs: a slice of tuples, a
/// `Vec`, or a reference to an ordered map. The query is always appended,
/// so empty parameters leave a bare trailing `?`.
///
/// # Examples
/// ```
/// use networking::build_url;
///
/// let url = build_url("https://x.org", "path", [("a", "1"), ("b", "2")]).unwrap();
/// assert_eq!(url, "https://x.org/path?a=1&b=2");
/// ```
pub fn build_url<I, K, V>(netloc: &str, path: &str, params: I) -> Result<String>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let reference = format!("{}?{}", path, encode_query(params));
    let url = Url::parse(netloc)?.join(&reference)?;
    Ok(url.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use std::collections::BTreeMap;

    #[test]
    fn test_build_url_with_pairs() {
        let url = build_url("https://x.org", "path", [("a", "1"), ("b", "2")]).unwrap();
        assert_eq!(url, "https://x.org/path?a=1&b=2");
    }

    #[test]
    fn test_build_url_with_map_keeps_iteration_order() {
        let mut params = IndexMap::new();
        params.insert("sites", "01646500");
        params.insert("format", "rdb");

        let url = build_url("https://waterservices.usgs.gov", "/nwis/site/", &params).unwrap();
        assert_eq!(
            url,
            "https://waterservices.usgs.gov/nwis/site/?sites=01646500&format=rdb"
        );

        let sorted: BTreeMap<&str, &str> = [("z", "26"), ("a", "1")].into_iter().collect();
        let url = build_url("https://x.org", "p", &sorted).unwrap();
        assert_eq!(url, "https://x.org/p?a=1&z=26");
    }

    #[test]
    fn test_build_url_empty_params_leaves_bare_question_mark() {
        let params: Vec<(String, String)> = Vec::new();
        let url = build_url("https://x.org", "path", params).unwrap();
        assert_eq!(url, "https://x.org/path?");
    }

    #[test]
    fn test_build_url_encodes_values() {
        let url = build_url("https://x.org", "search", [("q", "a b&c"), ("name", "Río")]).unwrap();
        assert_eq!(url, "https://x.org/search?q=a+b%26c&name=R%C3%ADo");
    }

    #[test]
    fn test_build_url_relative_path_replaces_last_segment() {
        let url = build_url("https://x.org/api/v1", "sites", [("a", "1")]).unwrap();
        assert_eq!(url, "https://x.org/api/sites?a=1");

        let url = build_url("https://x.org/api/v1/", "sites", [("a", "1")]).unwrap();
        assert_eq!(url, "https://x.org/api/v1/sites?a=1");

        let url = build_url("https://x.org/api/v1/", "/sites", [("a", "1")]).unwrap();
        assert_eq!(url, "https://x.org/sites?a=1");
    }

    #[test]
    fn test_build_url_rejects_relative_netloc() {
        let result = build_url("x.org", "path", [("a", "1")]);
        assert!(matches!(result, Err(crate::Error::InvalidUrl(_))));
    }

    #[test]
    fn test_join_url_without_path() {
        let url = join_url("https://api.weather.gov", None).unwrap();
        assert_eq!(url.as_str(), "https://api.weather.gov/");

        let url = join_url("https://api.weather.gov/points", Some("")).unwrap();
        assert_eq!(url.as_str(), "https://api.weather.gov/points");
    }

    #[test]
    fn test_join_url_with_path() {
        let url = join_url("https://api.weather.gov", Some("points/39.7,-97.1")).unwrap();
        assert_eq!(url.as_str(), "https://api.weather.gov/points/39.7,-97.1");
    }

    #[test]
    fn test_encode_query() {
        assert_eq!(encode_query([("a", "1"), ("b", "x y")]), "a=1&b=x+y");
        assert_eq!(encode_query(Vec::<(&str, &str)>::new()), "");
    }
}
