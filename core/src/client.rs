//! Stateless HTTP request builder and response parser for the person API.
//!
//! # Design
//! `PersonClient` holds only a `ClientConfig` and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. Reads are built against the query base URL and writes
//! against the command base URL; no method ever touches both.

use serde::de::DeserializeOwned;
use url::Url;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreatePerson, Person, PersonId, UpdatePerson};

/// Synchronous, stateless client for the person API.
#[derive(Debug, Clone)]
pub struct PersonClient {
    config: ClientConfig,
}

impl PersonClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn query_url(&self, path: &str) -> String {
        format!("{}{path}", self.config.query_base_url())
    }

    /// `base` followed by `segments`, each percent-encoded as exactly one
    /// path segment so an id can never rewrite the path, query or fragment.
    fn resource_url(base: &str, segments: &[&str]) -> Result<String, ApiError> {
        if let Some(bad) = segments.iter().find(|s| matches!(**s, "" | "." | "..")) {
            return Err(ApiError::InvalidRequest(format!("{bad:?} is not a usable path segment")));
        }
        let mut url = Url::parse(base).map_err(|e| ApiError::InvalidRequest(format!("{base}: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidRequest(format!("{base} cannot take a path")))?
            .pop_if_empty()
            .extend(segments);
        Ok(url.into())
    }

    pub fn build_list_persons(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.query_url("/persons"),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_get_person(&self, id: &PersonId) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Get,
            url: Self::resource_url(self.config.query_base_url(), &["persons", id.as_str()])?,
            headers: Vec::new(),
            body: None,
        })
    }

    pub fn build_create_person(&self, input: &CreatePerson) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: self.config.command_base_url().to_string(),
            headers: json_headers(),
            body: Some(body),
        })
    }

    pub fn build_update_person(&self, id: &PersonId, input: &UpdatePerson) -> Result<HttpRequest, ApiError> {
        let url = Self::resource_url(self.config.command_base_url(), &[id.as_str()])?;
        let body = serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Patch,
            url,
            headers: json_headers(),
            body: Some(body),
        })
    }

    pub fn build_delete_person(&self, id: &PersonId) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Delete,
            url: Self::resource_url(self.config.command_base_url(), &[id.as_str()])?,
            headers: Vec::new(),
            body: None,
        })
    }

    pub fn parse_list_persons(&self, response: HttpResponse) -> Result<Vec<Person>, ApiError> {
        check_status(&response, Payload::None)?;
        decode(&response)
    }

    pub fn parse_get_person(&self, response: HttpResponse) -> Result<Person, ApiError> {
        check_status(&response, Payload::None)?;
        decode(&response)
    }

    pub fn parse_create_person(&self, response: HttpResponse) -> Result<Person, ApiError> {
        check_status(&response, Payload::Submitted)?;
        decode(&response)
    }

    pub fn parse_update_person(&self, response: HttpResponse) -> Result<Person, ApiError> {
        check_status(&response, Payload::Submitted)?;
        decode(&response)
    }

    /// The body of a successful delete is an acknowledgement of no interest.
    pub fn parse_delete_person(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, Payload::None)
    }
}

/// Whether the request carried a payload the server could reject.
#[derive(Clone, Copy)]
enum Payload {
    None,
    Submitted,
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, payload: Payload) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    match (response.status, payload) {
        (404, _) => Err(ApiError::NotFound),
        (400 | 422, Payload::Submitted) => Err(ApiError::Validation {
            status: response.status,
            body: response.body.clone(),
        }),
        (status, _) => Err(ApiError::Transport {
            status: Some(status),
            message: response.body.clone(),
        }),
    }
}
