//! Buffered API responses

use reqwest::header::HeaderMap;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

use super::errors::ApiError;

/// Fully read response of a successful API call.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    url: String,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl ApiResponse {
    pub(crate) async fn read(response: Response) -> Result<Self, ApiError> {
        let status = response.status();
        let url = response.url().to_string();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();
        Ok(Self { status, url, headers, body })
    }

    /// Keep 2xx responses, turn anything else into [`ApiError::Status`].
    pub(crate) fn into_result(self) -> Result<Self, ApiError> {
        if self.status.is_success() {
            Ok(self)
        } else {
            let body = self.text();
            Err(ApiError::Status { status: self.status, url: self.url, body })
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Body as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decode the body as JSON. An empty body decodes as `null`, so `()` and
    /// `Option<T>` accept 204 responses.
    ///
    /// # Errors
    /// Returns [`ApiError::Decode`] when the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        let result = if self.body.iter().all(u8::is_ascii_whitespace) {
            serde_json::from_value(serde_json::Value::Null)
        } else {
            serde_json::from_slice(&self.body)
        };

        result.map_err(|err| ApiError::Decode(format!("{} ({}): {err}", self.url, self.status)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: StatusCode, body: &str) -> ApiResponse {
        ApiResponse {
            status,
            url: "https://api.example.com/v1/posts/".into(),
            headers: HeaderMap::new(),
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn empty_body_decodes_as_unit() {
        let response = response(StatusCode::NO_CONTENT, "");
        let () = response.json().unwrap();
        assert_eq!(response.json::<Option<u32>>().unwrap(), None);
    }

    #[test]
    fn mismatched_body_is_decode_error() {
        let err = response(StatusCode::OK, "[1,2]").json::<String>().unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn non_success_becomes_status_error() {
        let err = response(StatusCode::UNAUTHORIZED, "{\"detail\":\"expired\"}")
            .into_result()
            .unwrap_err();

        match err {
            ApiError::Status { status, url, body } => {
                assert_eq!(status, StatusCode::UNAUTHORIZED);
                assert_eq!(url, "https://api.example.com/v1/posts/");
                assert!(body.contains("expired"));
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }
}
