//! The single HTTP client every domain service goes through.
//!
//! It owns the base URL, attaches the stored bearer token, applies the request timeout,
//! and turns every failure into an [`ApiError`] with the caller's fallback message.

use log::debug;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::BusinessConfig;
use crate::error::ApiError;
use crate::http::{FormPart, RequestBuilder, Response};
use crate::models::Envelope;
use crate::session::SessionStore;

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: BusinessConfig,
    session: SessionStore,
}

impl ApiClient {
    pub fn new(config: BusinessConfig, session: SessionStore) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            session,
        }
    }

    pub fn config(&self) -> &BusinessConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// `GET path`, unwrapping the `{data}` envelope.
    pub async fn get<T: DeserializeOwned>(&self, path: &str, fallback: &str) -> Result<T, ApiError> {
        let response = self
            .send(RequestBuilder::get(self.config.api_url(path)), fallback)
            .await?;
        decode_envelope(&response)
    }

    /// `POST path` with a JSON body, unwrapping the `{data}` envelope.
    pub async fn post_json<B, T>(&self, path: &str, body: &B, fallback: &str) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = RequestBuilder::post(self.config.api_url(path))
            .json(body)
            .map_err(|e| ApiError::client_setup(e.to_string()))?;
        let response = self.send(request, fallback).await?;
        decode_envelope(&response)
    }

    /// `POST path` as `multipart/form-data`. Returns the raw 2xx response.
    pub async fn post_multipart(
        &self,
        path: &str,
        parts: Vec<FormPart>,
        fallback: &str,
    ) -> Result<Response, ApiError> {
        let request = RequestBuilder::post(self.config.api_url(path)).multipart(parts);
        self.send(request, fallback).await
    }

    /// Sends `request` with the token and timeout applied.
    ///
    /// Only 2xx responses come back as `Ok`.
    pub async fn send(&self, request: RequestBuilder, fallback: &str) -> Result<Response, ApiError> {
        let mut request = request.timeout(self.config.request_timeout);
        if let Some(token) = self.session.token() {
            request = request.bearer_auth(&token);
        }

        let method = request.method();
        let url = request.url().to_owned();
        debug!("{} {url}", method.as_str());

        let response = request
            .send(&self.http)
            .await
            .map_err(|e| ApiError::from_transport(&e, method, &url))?;

        debug!("{} {url} -> {}", method.as_str(), response.status);

        if response.is_success() {
            Ok(response)
        } else {
            Err(ApiError::from_response(&response, fallback))
        }
    }
}

/// Decodes a `{data: T}` body, mapping shape mismatches to `InvalidResponse`.
pub fn decode_envelope<T: DeserializeOwned>(response: &Response) -> Result<T, ApiError> {
    response
        .json::<Envelope<T>>()
        .map(|envelope| envelope.data)
        .map_err(|e| ApiError::invalid_response(response, &e))
}
