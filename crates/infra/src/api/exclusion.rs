//! Endpoints that never receive a bearer credential
//!
//! Matching happens on fully resolved URLs: scheme, host, port and the exact
//! path have to agree. Query strings and fragments are ignored, so
//! `login/?next=/` is still the login endpoint while `login/extra/` is not.

use url::Url;

/// Set of resolved endpoint URLs excluded from credential attachment.
#[derive(Debug, Clone, Default)]
pub struct AuthExclusions {
    endpoints: Vec<Url>,
}

impl AuthExclusions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resolved endpoint. Duplicates are ignored.
    pub fn insert(&mut self, endpoint: Url) {
        if !self.endpoints.iter().any(|known| same_endpoint(known, &endpoint)) {
            self.endpoints.push(endpoint);
        }
    }

    #[must_use]
    pub fn with(mut self, endpoint: Url) -> Self {
        self.insert(endpoint);
        self
    }

    /// Whether `url` addresses one of the excluded endpoints.
    pub fn matches(&self, url: &Url) -> bool {
        self.endpoints.iter().any(|endpoint| same_endpoint(endpoint, url))
    }

    pub fn endpoints(&self) -> &[Url] {
        &self.endpoints
    }
}

pub(crate) fn same_endpoint(a: &Url, b: &Url) -> bool {
    a.scheme() == b.scheme()
        && a.host_str() == b.host_str()
        && a.port_or_known_default() == b.port_or_known_default()
        && a.path() == b.path()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(raw: &str) -> Url {
        Url::parse(raw).unwrap()
    }

    fn exclusions() -> AuthExclusions {
        AuthExclusions::new()
            .with(url("https://api.example.com/v1/login/"))
            .with(url("https://api.example.com/v1/token/refresh/"))
    }

    #[test]
    fn matches_exact_endpoint_ignoring_query() {
        let set = exclusions();
        assert!(set.matches(&url("https://api.example.com/v1/login/")));
        assert!(set.matches(&url("https://api.example.com/v1/login/?next=%2F#top")));
        assert!(set.matches(&url("https://API.example.com:443/v1/token/refresh/")));
    }

    #[test]
    fn rejects_lookalike_paths() {
        let set = exclusions();
        assert!(!set.matches(&url("https://api.example.com/v1/posts/?q=/login/")));
        assert!(!set.matches(&url("https://api.example.com/v1/login/extra/")));
        assert!(!set.matches(&url("https://api.example.com/v1/users/login/")));
        assert!(!set.matches(&url("https://api.example.com/v1/login")));
    }

    #[test]
    fn rejects_other_origins() {
        let set = exclusions();
        assert!(!set.matches(&url("http://api.example.com/v1/login/")));
        assert!(!set.matches(&url("https://evil.example.com/v1/login/")));
        assert!(!set.matches(&url("https://api.example.com:8443/v1/login/")));
    }

    #[test]
    fn insert_ignores_duplicates() {
        let mut set = exclusions();
        set.insert(url("https://api.example.com/v1/login/?x=1"));
        assert_eq!(set.endpoints().len(), 2);
    }
}
