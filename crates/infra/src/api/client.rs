//! Authenticated API client
//!
//! Resolves request paths against the configured base URL, attaches the
//! stored access credential as a bearer header and recovers once from an
//! expired credential.
//!
//! ```text
//! ISSUED ──(status ≠ 401 | refresh endpoint)─────────────────────► DONE
//! ISSUED ──(401, Initial)──► REFRESHING ──(ok)──► RETRIED ───────► DONE
//! ISSUED ──(401, Initial)──► REFRESHING ──(fails)──► CLEARED ────► DONE(original 401)
//! RETRIED ──(401)────────────────────────────────────────────────► DONE(second 401)
//! ```
//!
//! Excluded endpoints go through the same recovery but never carry a
//! credential, on the retry either.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use blogc_common::auth::SessionStore;
use blogc_domain::constants::{DEFAULT_API_BASE_URL, LOGIN_PATH, TOKEN_REFRESH_PATH};
use blogc_domain::ApiConfig;
use futures::future::{BoxFuture, FutureExt};
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};
use url::Url;

use super::errors::ApiError;
use super::exclusion::{same_endpoint, AuthExclusions};
use super::refresh::{RefreshCoordinator, RefreshExchange, RefreshOutcome};
use super::request::{ApiRequest, Attempt, MultipartForm};
use super::response::ApiResponse;
use crate::http::HttpClient;

/// API client shared by every resource API.
///
/// Cheap to clone; clones share the transport, the session store and the
/// refresh coordinator.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
    base_url: Url,
    session: SessionStore,
    exclusions: AuthExclusions,
    refresh_endpoint: Url,
    refresher: RefreshCoordinator,
}

impl ApiClient {
    /// Create a builder for fluent configuration
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// Build a client from the `[api]` configuration section.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the base URL or an extra exclusion
    /// cannot be resolved, or the transport cannot be built.
    pub fn from_config(config: &ApiConfig, session: SessionStore) -> Result<Self, ApiError> {
        let mut http = HttpClient::builder();
        if let Some(secs) = config.timeout_secs {
            http = http.timeout(Duration::from_secs(secs));
        }
        if let Some(agent) = &config.user_agent {
            http = http.user_agent(agent.clone());
        }
        let http = http
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to build HttpClient: {e}")))?;

        config
            .extra_auth_exclusions
            .iter()
            .fold(Self::builder(), |builder, path| builder.exclude(path.clone()))
            .base_url(config.base_url.clone())
            .session(session)
            .http_client(http)
            .build()
    }

    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    pub fn exclusions(&self) -> &AuthExclusions {
        &self.inner.exclusions
    }

    /// Resolve `path` the way [`ApiClient::send`] does.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] if the result is not an
    /// `http(s)` URL.
    pub fn resolve(&self, path: &str) -> Result<Url, ApiError> {
        resolve_url(&self.inner.base_url, path)
    }

    /// Send a request, attaching the stored credential unless the resolved
    /// URL is excluded, and recover once from a 401 on any endpoint other
    /// than token refresh.
    ///
    /// Non-2xx responses come back as [`ApiError::Status`]. When recovery
    /// fails the caller receives the original 401.
    ///
    /// # Errors
    ///
    /// Returns transport, status, store and request-building errors.
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let inner = &self.inner;
        let url = inner.target_url(&request)?;
        let excluded = inner.exclusions.matches(&url);
        let credential = if excluded { None } else { inner.session.access_token()? };

        let first = inner.transmit(&request, &url, credential.as_deref(), Attempt::Initial).await?;
        if !inner.needs_recovery(&first, &url, Attempt::Initial) {
            return first.into_result();
        }

        let Some(fresh) = inner.recover(credential.as_deref(), excluded).await else {
            return first.into_result();
        };

        let retry_credential = if excluded { None } else { Some(fresh.as_str()) };
        let retried = inner.transmit(&request, &url, retry_credential, Attempt::Retry).await?;
        if retried.status() == StatusCode::UNAUTHORIZED {
            warn!(%url, "Request rejected again after credential refresh");
        }
        retried.into_result()
    }

    pub async fn get(&self, path: &str) -> Result<ApiResponse, ApiError> {
        self.send(ApiRequest::get(path)).await
    }

    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<ApiResponse, ApiError> {
        self.send(ApiRequest::post(path).json(body)?).await
    }

    pub async fn put_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<ApiResponse, ApiError> {
        self.send(ApiRequest::put(path).json(body)?).await
    }

    pub async fn delete(&self, path: &str) -> Result<ApiResponse, ApiError> {
        self.send(ApiRequest::delete(path)).await
    }

    pub async fn post_multipart(
        &self,
        path: &str,
        form: MultipartForm,
    ) -> Result<ApiResponse, ApiError> {
        self.send(ApiRequest::post(path).multipart(form)).await
    }

    pub async fn put_multipart(
        &self,
        path: &str,
        form: MultipartForm,
    ) -> Result<ApiResponse, ApiError> {
        self.send(ApiRequest::put(path).multipart(form)).await
    }

    /// GET `path` and decode the JSON body.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::send`], plus [`ApiError::Decode`].
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.get(path).await?.json()
    }

    /// Exchange the stored refresh credential for a new access credential.
    ///
    /// Joins a refresh already started by a failing request.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Refresh`] with the reason; the session is cleared
    /// unless no refresh credential was stored.
    pub async fn refresh_access_token(&self) -> Result<String, ApiError> {
        let inner = &self.inner;
        Ok(inner.refresher.run(|| None, || inner.exchange()).await?)
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("exclusions", &self.inner.exclusions)
            .finish_non_exhaustive()
    }
}

impl ClientInner {
    fn target_url(&self, request: &ApiRequest) -> Result<Url, ApiError> {
        let mut url = resolve_url(&self.base_url, &request.path)?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.query);
        }
        Ok(url)
    }

    async fn transmit(
        &self,
        request: &ApiRequest,
        url: &Url,
        credential: Option<&str>,
        attempt: Attempt,
    ) -> Result<ApiResponse, ApiError> {
        let mut headers = request.headers.clone();
        if let Some(token) = credential {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
                ApiError::InvalidRequest("stored access credential is not a valid header".into())
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let builder = self.http.request(request.method.clone(), url.clone()).headers(headers);
        let builder = request.body.apply(builder)?;

        debug!(
            method = %request.method,
            %url,
            attempt = attempt.as_str(),
            authenticated = credential.is_some(),
            "Dispatching API request"
        );

        let response = self.http.send(builder).await?;
        ApiResponse::read(response).await
    }

    /// Obtain a credential to retry with, or `None` when the original
    /// response should be returned.
    async fn recover(&self, sent: Option<&str>, excluded: bool) -> Option<String> {
        match self.refresh_after_rejection(sent, excluded).await {
            Ok(token) => Some(token),
            Err(failure) => {
                info!(error = %failure, "Credential recovery failed; returning original response");
                None
            }
        }
    }

    /// An excluded request carried no credential, so a stored one says
    /// nothing about whether its 401 is stale and a refresh always runs.
    async fn refresh_after_rejection(&self, sent: Option<&str>, excluded: bool) -> RefreshOutcome {
        let already_rotated = || {
            if excluded {
                return None;
            }
            match self.session.access_token() {
                Ok(Some(current)) if sent != Some(current.as_str()) => Some(current),
                Ok(_) => None,
                Err(err) => {
                    warn!(error = %err, "Failed to read access credential before refresh");
                    None
                }
            }
        };

        self.refresher.run(already_rotated, || self.exchange()).await
    }

    /// A 401 on the first attempt starts recovery, except when the refresh
    /// endpoint itself rejected the request.
    fn needs_recovery(&self, response: &ApiResponse, url: &Url, attempt: Attempt) -> bool {
        response.status() == StatusCode::UNAUTHORIZED
            && attempt.may_recover()
            && !same_endpoint(url, &self.refresh_endpoint)
    }

    fn exchange(&self) -> BoxFuture<'static, RefreshOutcome> {
        let exchange = RefreshExchange {
            http: self.http.clone(),
            endpoint: self.refresh_endpoint.clone(),
            session: self.session.clone(),
        };
        exchange.exchange().boxed()
    }
}


fn has_http_scheme(path: &str) -> bool {
    let lower = path.get(..8).unwrap_or(path).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Join `path` onto `base`, or parse it verbatim when it is an absolute
/// `http(s)` URL. Leading slashes are dropped so the base path prefix is
/// kept.
pub(crate) fn resolve_url(base: &Url, path: &str) -> Result<Url, ApiError> {
    let resolved = if has_http_scheme(path) {
        Url::parse(path)
    } else {
        base.join(path.trim_start_matches('/'))
    }
    .map_err(|err| ApiError::InvalidRequest(format!("cannot resolve '{path}': {err}")))?;

    if !matches!(resolved.scheme(), "http" | "https") {
        return Err(ApiError::InvalidRequest(format!("'{path}' does not resolve to an HTTP URL")));
    }
    Ok(resolved)
}

/// Parse the base URL and make sure its path ends with `/`.
pub(crate) fn normalize_base(raw: &str) -> Result<Url, ApiError> {
    let mut url = Url::parse(raw.trim())
        .map_err(|err| ApiError::Config(format!("invalid base URL '{raw}': {err}")))?;

    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(ApiError::Config(format!("base URL '{raw}' must be an http(s) URL")));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

/// Builder for API client
#[derive(Default)]
pub struct ApiClientBuilder {
    base_url: Option<String>,
    session: Option<SessionStore>,
    http: Option<HttpClient>,
    exclusions: Vec<String>,
}

impl ApiClientBuilder {
    /// Absolute origin plus path prefix. Defaults to the public blog API.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the session store holding the credential pair
    pub fn session(mut self, session: SessionStore) -> Self {
        self.session = Some(session);
        self
    }

    pub fn http_client(mut self, http: HttpClient) -> Self {
        self.http = Some(http);
        self
    }

    /// Exclude another endpoint from credential attachment. Login and token
    /// refresh are always excluded.
    pub fn exclude(mut self, path: impl Into<String>) -> Self {
        self.exclusions.push(path.into());
        self
    }

    /// Build the API client
    ///
    /// # Errors
    ///
    /// Returns error if the session store is missing, the base URL is not an
    /// absolute http(s) URL, or the transport cannot be built.
    pub fn build(self) -> Result<ApiClient, ApiError> {
        let base_url = normalize_base(self.base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL))?;
        let session =
            self.session.ok_or_else(|| ApiError::Config("Session store not set".to_string()))?;
        let http = match self.http {
            Some(http) => http,
            None => HttpClient::new()
                .map_err(|e| ApiError::Config(format!("Failed to build HttpClient: {e}")))?,
        };

        let refresh_endpoint = resolve_url(&base_url, TOKEN_REFRESH_PATH)?;
        let mut exclusions = AuthExclusions::new()
            .with(resolve_url(&base_url, LOGIN_PATH)?)
            .with(refresh_endpoint.clone());
        for path in &self.exclusions {
            exclusions.insert(resolve_url(&base_url, path)?);
        }

        info!(
            base_url = %base_url,
            excluded_endpoints = exclusions.endpoints().len(),
            "API client configured"
        );

        Ok(ApiClient {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                session,
                exclusions,
                refresh_endpoint,
                refresher: RefreshCoordinator::new(),
            }),
        })
    }
}
