//! Outbound request descriptors
//!
//! An [`ApiRequest`] is owned data. The client turns it into a fresh
//! `reqwest` request for every transmission, which is what lets the
//! one-shot retry resend a multipart body.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder};
use serde::Serialize;

use super::errors::ApiError;

/// Which transmission of a logical request is being sent.
///
/// Passed by value through the recovery path; only [`Attempt::Initial`]
/// may trigger a credential refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    Initial,
    Retry,
}

impl Attempt {
    /// Whether a 401 on this attempt may start credential recovery.
    #[must_use]
    pub fn may_recover(self) -> bool {
        matches!(self, Self::Initial)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Initial => "initial",
            Self::Retry => "retry",
        }
    }
}

/// Body of an outbound request
#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(serde_json::Value),
    Multipart(MultipartForm),
}

impl RequestBody {
    pub(crate) fn apply(&self, builder: RequestBuilder) -> Result<RequestBuilder, ApiError> {
        match self {
            Self::Empty => Ok(builder),
            Self::Json(value) => Ok(builder.json(value)),
            Self::Multipart(form) => Ok(builder.multipart(form.to_form()?)),
        }
    }
}

#[derive(Clone)]
enum MultipartPart {
    Text(String),
    File { file_name: String, content_type: String, bytes: Vec<u8> },
}

/// Owned description of a `multipart/form-data` body.
#[derive(Clone, Default)]
pub struct MultipartForm {
    parts: Vec<(String, MultipartPart)>,
}

impl MultipartForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push((name.into(), MultipartPart::Text(value.into())));
        self
    }

    #[must_use]
    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        self.parts.push((
            name.into(),
            MultipartPart::File {
                file_name: file_name.into(),
                content_type: content_type.into(),
                bytes,
            },
        ));
        self
    }

    /// Field names in insertion order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().map(|(name, _)| name.as_str())
    }

    fn to_form(&self) -> Result<Form, ApiError> {
        let mut form = Form::new();
        for (name, part) in &self.parts {
            form = match part {
                MultipartPart::Text(value) => form.text(name.clone(), value.clone()),
                MultipartPart::File { file_name, content_type, bytes } => {
                    let part = Part::bytes(bytes.clone())
                        .file_name(file_name.clone())
                        .mime_str(content_type)
                        .map_err(|err| {
                            ApiError::InvalidRequest(format!(
                                "invalid content type '{content_type}' for part '{name}': {err}"
                            ))
                        })?;
                    form.part(name.clone(), part)
                }
            };
        }
        Ok(form)
    }
}

impl std::fmt::Debug for MultipartForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.field_names()).finish()
    }
}

/// A request relative to the client's base URL.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) query: Vec<(String, String)>,
    pub(crate) headers: HeaderMap,
    pub(crate) body: RequestBody,
}

impl ApiRequest {
    /// `path` is relative to the base URL, or an absolute `http(s)` URL.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Serialize `body` as the JSON payload.
    ///
    /// # Errors
    /// Returns [`ApiError::InvalidRequest`] if `body` cannot be serialized.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body)
            .map_err(|err| ApiError::InvalidRequest(format!("failed to serialize body: {err}")))?;
        self.body = RequestBody::Json(value);
        Ok(self)
    }

    #[must_use]
    pub fn multipart(mut self, form: MultipartForm) -> Self {
        self.body = RequestBody::Multipart(form);
        self
    }

    /// Append a query pair.
    #[must_use]
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Add a header override. A stored bearer credential still replaces any
    /// `Authorization` value given here.
    #[must_use]
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn body(&self) -> &RequestBody {
        &self.body
    }
}
