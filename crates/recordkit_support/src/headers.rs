//! Request headers from CGI-style variables.
//!
//! Web servers hand request headers to CGI programs as variables such as
//! `HTTP_USER_AGENT`. [`headers_from_cgi`] turns those back into header
//! names (`User-Agent`) and reconstructs `Authorization` from the variables
//! servers use when they strip it.

use std::collections::HashMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Variables copied verbatim under a header name.
const COPIED: [(&str, &str); 3] = [
    ("CONTENT_TYPE", "Content-Type"),
    ("CONTENT_LENGTH", "Content-Length"),
    ("CONTENT_MD5", "Content-Md5"),
];

/// Ordered request headers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    /// Sets a header, replacing an earlier one with the same name in place.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Looks up a header by its exact name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if the header is present.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of headers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no headers.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(name, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

/// Builds request headers from CGI variables.
///
/// - `HTTP_*` variables (either case of the prefix) become headers named by
///   capitalising each `_`-separated word and joining with `-`.
/// - `CONTENT_TYPE`, `CONTENT_LENGTH` and `CONTENT_MD5` are copied; an
///   `HTTP_` twin of a copied variable is ignored when the plain variable
///   is set.
/// - Without an `Authorization` header, one is derived from
///   `REDIRECT_HTTP_AUTHORIZATION`, then from `PHP_AUTH_USER` and
///   `PHP_AUTH_PW` as Basic credentials, then from `PHP_AUTH_DIGEST`.
///
/// ```
/// use recordkit_support::headers_from_cgi;
///
/// let headers = headers_from_cgi([
///     ("HTTP_USER_AGENT", "curl/8.0"),
///     ("CONTENT_TYPE", "text/plain"),
///     ("PHP_AUTH_USER", "ada"),
///     ("PHP_AUTH_PW", "secret"),
/// ]);
/// assert_eq!(headers.get("User-Agent"), Some("curl/8.0"));
/// assert_eq!(headers.get("Content-Type"), Some("text/plain"));
/// assert_eq!(headers.get("Authorization"), Some("Basic YWRhOnNlY3JldA=="));
/// ```
pub fn headers_from_cgi<I, K, V>(vars: I) -> Headers
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let vars: Vec<(String, String)> = vars
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect();
    let lookup: HashMap<&str, &str> = vars.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
    let copied = |name: &str| COPIED.iter().find(|(var, _)| *var == name).map(|(_, h)| *h);

    let mut headers = Headers::default();
    for (key, value) in &vars {
        let stripped = key.strip_prefix("HTTP_").or_else(|| key.strip_prefix("http_"));
        match stripped {
            Some("") => {}
            Some(rest) => {
                let upper = rest.to_uppercase();
                if copied(&upper).is_some() && lookup.contains_key(upper.as_str()) {
                    continue;
                }
                headers.insert(header_name(rest), value.as_str());
            }
            None => {
                if let Some(name) = copied(key) {
                    headers.insert(name, value.as_str());
                }
            }
        }
    }

    if !headers.contains("Authorization") {
        if let Some(auth) = lookup.get("REDIRECT_HTTP_AUTHORIZATION") {
            headers.insert("Authorization", *auth);
        } else if let Some(user) = lookup.get("PHP_AUTH_USER") {
            let password = lookup.get("PHP_AUTH_PW").copied().unwrap_or_default();
            let credentials = STANDARD.encode(format!("{user}:{password}"));
            headers.insert("Authorization", format!("Basic {credentials}"));
        } else if let Some(digest) = lookup.get("PHP_AUTH_DIGEST") {
            headers.insert("Authorization", *digest);
        }
    }
    headers
}

/// Reads one header from CGI variables, or `default` when absent.
pub fn header<I, K, V>(vars: I, name: &str, default: &str) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    headers_from_cgi(vars)
        .get(name)
        .unwrap_or(default)
        .to_string()
}

/// `X_FORWARDED_FOR` to `X-Forwarded-For`.
fn header_name(var: &str) -> String {
    var.to_lowercase()
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_variables_become_headers() {
        let headers = headers_from_cgi([
            ("HTTP_X_FORWARDED_FOR", "10.0.0.1"),
            ("http_accept", "*/*"),
            ("HTTP_", "ignored"),
            ("SERVER_NAME", "example.org"),
        ]);
        let names: Vec<&str> = headers.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["X-Forwarded-For", "Accept"]);
    }

    #[test]
    fn copied_variables_shadow_http_twins() {
        let headers = headers_from_cgi([
            ("HTTP_CONTENT_TYPE", "text/html"),
            ("CONTENT_TYPE", "application/json"),
            ("HTTP_CONTENT_LENGTH", "12"),
        ]);
        assert_eq!(headers.get("Content-Type"), Some("application/json"));
        assert_eq!(headers.get("Content-Length"), Some("12"));
        assert_eq!(headers.len(), 2);
    }

    #[test]
    fn authorization_fallbacks() {
        let direct = headers_from_cgi([
            ("HTTP_AUTHORIZATION", "Bearer t"),
            ("REDIRECT_HTTP_AUTHORIZATION", "Bearer r"),
        ]);
        assert_eq!(direct.get("Authorization"), Some("Bearer t"));

        let redirect = headers_from_cgi([("REDIRECT_HTTP_AUTHORIZATION", "Bearer r")]);
        assert_eq!(redirect.get("Authorization"), Some("Bearer r"));

        let basic = headers_from_cgi([("PHP_AUTH_USER", "user")]);
        assert_eq!(basic.get("Authorization"), Some("Basic dXNlcjo="));

        let digest = headers_from_cgi([("PHP_AUTH_DIGEST", "Digest username=\"a\"")]);
        assert_eq!(digest.get("Authorization"), Some("Digest username=\"a\""));

        assert!(headers_from_cgi(Vec::<(String, String)>::new()).is_empty());
    }

    #[test]
    fn single_header_with_default() {
        let vars = [("HTTP_HOST", "example.org")];
        assert_eq!(header(vars, "Host", ""), "example.org");
        assert_eq!(header(vars, "Accept", "*/*"), "*/*");
    }

    #[test]
    fn basic_credential_is_base64() {
        let basic = headers_from_cgi([("PHP_AUTH_USER", "ada"), ("PHP_AUTH_PW", "secret")]);
        assert_eq!(basic.get("Authorization"), Some("Basic YWRhOnNlY3JldA=="));
    }
}
