//! Replayable request description
//!
//! A request may be sent twice (once more after a token refresh), so it is
//! kept as plain data and turned into a fresh `reqwest` builder per attempt.

use bytes::Bytes;
use reqwest::{Client, Method, RequestBuilder, header, multipart};
use serde::Serialize;
use url::Url;

use super::ClientError;

/// Paths that never carry a bearer token
const AUTH_PREFIX: &str = "/auth/";

/// Percent-encode free text so it stays a single path segment
///
/// `/`, `?`, `#`, `%` and spaces are escaped; ids need no encoding.
pub fn path_segment(value: &str) -> Result<String, ClientError> {
    let mut url = Url::parse("http://segment/")
        .map_err(|e| ClientError::Configuration(format!("segment encoder: {e}")))?;
    url.path_segments_mut()
        .map_err(|()| ClientError::Configuration("segment encoder: cannot-be-a-base URL".into()))?
        .clear()
        .push(value);
    Ok(url.path().trim_start_matches('/').to_string())
}

#[derive(Debug, Clone, Default)]
pub enum Body {
    #[default]
    Empty,
    Json(serde_json::Value),
    File {
        field: &'static str,
        file_name: String,
        content_type: Option<String>,
        bytes: Bytes,
    },
}

#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(&'static str, String)>,
    body: Body,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: Body::Empty,
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

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn query(mut self, key: &'static str, value: impl ToString) -> Self {
        self.query.push((key, value.to_string()));
        self
    }

    #[must_use]
    pub fn query_opt(self, key: &'static str, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    #[must_use]
    pub fn query_pairs(mut self, pairs: impl IntoIterator<Item = (&'static str, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    /// Attach a JSON body
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ClientError> {
        self.body = Body::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Attach a single-file multipart body
    #[must_use]
    pub fn file(
        mut self,
        field: &'static str,
        file_name: impl Into<String>,
        content_type: Option<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        self.body = Body::File {
            field,
            file_name: file_name.into(),
            content_type,
            bytes: bytes.into(),
        };
        self
    }

    pub(crate) fn is_auth_endpoint(&self) -> bool {
        self.path.starts_with(AUTH_PREFIX)
    }

    /// Build a fresh `reqwest` request for one attempt
    pub(crate) fn build(
        &self,
        client: &Client,
        base_url: &str,
        bearer: Option<&str>,
    ) -> Result<RequestBuilder, ClientError> {
        let url = format!("{base_url}{}", self.path);
        let mut request = client.request(self.method.clone(), url);

        if !self.query.is_empty() {
            request = request.query(&self.query);
        }

        if let Some(token) = bearer {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        request = match &self.body {
            Body::Empty => request,
            Body::Json(value) => request.json(value),
            Body::File {
                field,
                file_name,
                content_type,
                bytes,
            } => {
                let mut part = multipart::Part::bytes(bytes.to_vec()).file_name(file_name.clone());
                if let Some(content_type) = content_type {
                    part = part.mime_str(content_type)?;
                }
                request.multipart(multipart::Form::new().part(*field, part))
            }
        };

        Ok(request)
    }
}
