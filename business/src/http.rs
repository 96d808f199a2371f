//! Thin request/response layer over `reqwest`.
//!
//! Requests are described as plain data (`RequestBuilder`) and only turned into a
//! `reqwest` request at send time, so a request can be logged, inspected in tests and
//! retried by the caller. Responses are read fully into a plain `Response`.
//!
//! Failures that produce no response are classified into [`TransportError`]: the request
//! could not be built, or it was sent and nothing usable came back. Non-2xx statuses are
//! *not* errors at this layer; the gateway decides what they mean.

use std::collections::HashMap;
use std::time::Duration;

use thiserror::Error;

/// HTTP method for requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// A fully-read HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    /// Response headers (lowercased keys)
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl Response {
    /// Returns true if the status code is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get a header value by name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }

    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// A failure that left us without a response.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The request could not be constructed (bad URL, bad header value, bad MIME type).
    #[error("failed to build request: {0}")]
    Build(String),
    /// The request was sent but no complete response was received.
    #[error("no response: {0}")]
    NoResponse(String),
}

impl TransportError {
    fn from_reqwest(error: &reqwest::Error) -> Self {
        if error.is_builder() {
            Self::Build(error.to_string())
        } else {
            Self::NoResponse(error.to_string())
        }
    }
}

/// One part of a `multipart/form-data` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        mime: Option<String>,
        bytes: Vec<u8>,
    },
}

impl FormPart {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Text {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Text { name, .. } | Self::File { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Body {
    #[default]
    Empty,
    Json(Vec<u8>),
    Multipart(Vec<FormPart>),
}

/// A builder for constructing HTTP requests.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: Method,
    url: String,
    headers: Vec<(String, String)>,
    body: Body,
    timeout: Option<Duration>,
}

impl RequestBuilder {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: Body::Empty,
            timeout: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::Post, url)
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn bearer_auth(self, token: &str) -> Self {
        self.header("authorization", format!("Bearer {token}"))
    }

    /// Set the request body as JSON.
    pub fn json<T: serde::Serialize + ?Sized>(mut self, value: &T) -> Result<Self, serde_json::Error> {
        self.body = Body::Json(serde_json::to_vec(value)?);
        Ok(self.header("content-type", "application/json"))
    }

    /// Set a `multipart/form-data` body. The boundary header is added at send time.
    pub fn multipart(mut self, parts: Vec<FormPart>) -> Self {
        self.body = Body::Multipart(parts);
        self
    }

    /// Per-request timeout. Ignored on wasm32, where the browser owns timeouts.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Sends the request on `client` and reads the whole response body.
    pub async fn send(self, client: &reqwest::Client) -> Result<Response, TransportError> {
        let request = self.into_reqwest(client)?;

        let response = request
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(&e))?;

        // Extract status and headers before consuming the response
        let status = response.status().as_u16();
        let mut headers = HashMap::new();
        for (name, value) in response.headers() {
            if let Ok(v) = value.to_str() {
                headers.insert(name.as_str().to_lowercase(), v.to_owned());
            }
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::from_reqwest(&e))?
            .to_vec();

        Ok(Response {
            status,
            headers,
            body,
        })
    }

    fn into_reqwest(
        self,
        client: &reqwest::Client,
    ) -> Result<reqwest::RequestBuilder, TransportError> {
        let mut request = match self.method {
            Method::Get => client.get(&self.url),
            Method::Post => client.post(&self.url),
        };

        for (name, value) in &self.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        #[cfg(not(target_arch = "wasm32"))]
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        request = match self.body {
            Body::Empty => request,
            Body::Json(bytes) => request.body(bytes),
            Body::Multipart(parts) => request.multipart(build_form(parts)?),
        };

        Ok(request)
    }
}

fn build_form(parts: Vec<FormPart>) -> Result<reqwest::multipart::Form, TransportError> {
    let mut form = reqwest::multipart::Form::new();
    for part in parts {
        form = match part {
            FormPart::Text { name, value } => form.text(name, value),
            FormPart::File {
                name,
                file_name,
                mime,
                bytes,
            } => {
                let mut file = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
                if let Some(mime) = mime {
                    file = file
                        .mime_str(&mime)
                        .map_err(|e| TransportError::Build(e.to_string()))?;
                }
                form.part(name, file)
            }
        };
    }
    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_is_success() {
        let ok = Response {
            status: 201,
            headers: HashMap::new(),
            body: Vec::new(),
        };
        let not_found = Response {
            status: 404,
            ..ok.clone()
        };

        assert!(ok.is_success());
        assert!(!not_found.is_success());
    }

    #[test]
    fn test_response_header_case_insensitive() {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_owned(), "application/json".to_owned());

        let response = Response {
            status: 200,
            headers,
            body: Vec::new(),
        };

        assert_eq!(response.header("Content-Type"), Some("application/json"));
        assert_eq!(response.header("CONTENT-TYPE"), Some("application/json"));
    }

    #[test]
    fn test_request_builder_bearer() {
        let builder = RequestBuilder::get("https://example.com").bearer_auth("t1");
        assert_eq!(builder.header_value("Authorization"), Some("Bearer t1"));
    }

    #[test]
    fn test_request_builder_json() {
        #[derive(serde::Serialize)]
        struct Page {
            page: u32,
        }

        let builder = RequestBuilder::post("https://example.com")
            .json(&Page { page: 2 })
            .expect("should serialize");

        assert_eq!(builder.header_value("content-type"), Some("application/json"));
        assert_eq!(builder.body(), &Body::Json(br#"{"page":2}"#.to_vec()));
    }

    #[test]
    fn form_part_name() {
        let part = FormPart::File {
            name: "profilePicture".to_owned(),
            file_name: "me.png".to_owned(),
            mime: Some("image/png".to_owned()),
            bytes: vec![1, 2, 3],
        };
        assert_eq!(part.name(), "profilePicture");
        assert_eq!(FormPart::text("email", "a@b.com").name(), "email");
    }

    #[test]
    fn bad_mime_is_a_build_error() {
        let result = build_form(vec![FormPart::File {
            name: "profilePicture".to_owned(),
            file_name: "me.png".to_owned(),
            mime: Some("not a mime".to_owned()),
            bytes: Vec::new(),
        }]);

        assert!(matches!(result, Err(TransportError::Build(_))));
    }

    #[tokio::test]
    async fn invalid_url_is_a_build_error() {
        let client = reqwest::Client::new();
        let result = RequestBuilder::get("not a url").send(&client).await;

        assert!(matches!(result, Err(TransportError::Build(_))));
    }
}
