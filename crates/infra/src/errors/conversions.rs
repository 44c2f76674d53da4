//! Conversions from external infrastructure errors into domain errors.

use blogc_common::storage::StoreError;
use blogc_domain::BlogcError;
use reqwest::Error as HttpError;

use crate::api::errors::ApiError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub BlogcError);

impl From<InfraError> for BlogcError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<BlogcError> for InfraError {
    fn from(value: BlogcError) -> Self {
        InfraError(value)
    }
}

trait IntoBlogcError {
    fn into_blogc(self) -> BlogcError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → BlogcError */
/* -------------------------------------------------------------------------- */

impl IntoBlogcError for HttpError {
    fn into_blogc(self) -> BlogcError {
        if self.is_timeout() {
            return BlogcError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return BlogcError::Network("HTTP connection failure".into());
        }

        if self.is_builder() {
            return BlogcError::Config(format!("invalid HTTP client configuration: {self}"));
        }

        if let Some(status) = self.status() {
            return status_to_blogc(status, None);
        }

        BlogcError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_blogc())
    }
}

fn status_to_blogc(status: reqwest::StatusCode, detail: Option<&str>) -> BlogcError {
    let code = status.as_u16();
    let reason = status.canonical_reason().unwrap_or("unknown status");
    let message = match detail {
        Some(detail) => format!("HTTP {code} {reason} from {detail}"),
        None => format!("HTTP {code} {reason}"),
    };

    match code {
        401 | 403 => BlogcError::Auth(message),
        404 => BlogcError::NotFound(message),
        400..=499 => BlogcError::InvalidInput(message),
        _ => BlogcError::Network(message),
    }
}

/* -------------------------------------------------------------------------- */
/* StoreError → BlogcError */
/* -------------------------------------------------------------------------- */

impl IntoBlogcError for StoreError {
    fn into_blogc(self) -> BlogcError {
        match self {
            StoreError::Io(err) => BlogcError::Storage(format!("credential store I/O: {err}")),
            StoreError::Serialization(err) => {
                BlogcError::Storage(format!("credential store contents unreadable: {err}"))
            }
            StoreError::Backend(message) => BlogcError::Storage(message),
        }
    }
}

impl From<StoreError> for InfraError {
    fn from(value: StoreError) -> Self {
        InfraError(value.into_blogc())
    }
}

/* -------------------------------------------------------------------------- */
/* ApiError → BlogcError */
/* -------------------------------------------------------------------------- */

impl IntoBlogcError for ApiError {
    fn into_blogc(self) -> BlogcError {
        match self {
            ApiError::Network(err) => err.into_blogc(),
            ApiError::Status { status, url, body } => {
                let detail = if body.is_empty() { url } else { format!("{url}: {body}") };
                status_to_blogc(status, Some(&detail))
            }
            ApiError::Decode(message) => {
                BlogcError::Internal(format!("unexpected response body: {message}"))
            }
            ApiError::InvalidRequest(message) => BlogcError::InvalidInput(message),
            ApiError::Store(err) => err.into_blogc(),
            ApiError::Refresh(failure) => {
                BlogcError::Auth(format!("session could not be renewed: {failure}"))
            }
            ApiError::Config(message) => BlogcError::Config(message),
        }
    }
}

impl From<ApiError> for InfraError {
    fn from(value: ApiError) -> Self {
        InfraError(value.into_blogc())
    }
}

impl From<ApiError> for BlogcError {
    fn from(value: ApiError) -> Self {
        value.into_blogc()
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use reqwest::{Client, StatusCode};
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::api::RefreshFailure;

    #[test]
    fn store_backend_maps_to_storage_error() {
        let mapped: BlogcError = InfraError::from(StoreError::Backend("locked".into())).into();
        assert_eq!(mapped, BlogcError::Storage("locked".into()));
    }

    #[test]
    fn api_status_404_maps_to_not_found() {
        let err = ApiError::Status {
            status: StatusCode::NOT_FOUND,
            url: "https://api.example.com/v1/posts/9/".into(),
            body: String::new(),
        };

        match BlogcError::from(err) {
            BlogcError::NotFound(msg) => {
                assert!(msg.contains("404"));
                assert!(msg.contains("/posts/9/"));
            }
            other => panic!("expected not found, got {other:?}"),
        }
    }

    #[test]
    fn api_status_500_maps_to_network() {
        let err = ApiError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            url: "https://api.example.com/v1/posts/".into(),
            body: "boom".into(),
        };

        assert_eq!(BlogcError::from(err).label(), "network");
    }

    #[test]
    fn refresh_failure_maps_to_auth_error() {
        let err = ApiError::Refresh(RefreshFailure::NoRefreshToken);

        assert_eq!(BlogcError::from(err).label(), "auth");
    }

    #[tokio::test]
    async fn http_status_401_maps_to_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(StatusCode::UNAUTHORIZED))
            .mount(&server)
            .await;

        let client = Client::builder().no_proxy().build().unwrap();
        let error =
            client.get(server.uri()).send().await.unwrap().error_for_status().unwrap_err();

        match BlogcError::from(InfraError::from(error)) {
            BlogcError::Auth(msg) => assert!(msg.contains("401")),
            other => panic!("expected auth error, got {other:?}"),
        }
    }
}
