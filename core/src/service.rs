//! One-call wrappers pairing `PersonClient` with a `Transport`.
//!
//! Every call is a single best-effort attempt: no retries and no caching.
//! Callers decide how to react to failure.

use crate::client::PersonClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::types::{CreatePerson, Person, PersonId, UpdatePerson};

/// The five person operations, executed end to end.
#[derive(Debug, Clone)]
pub struct PersonService<T> {
    client: PersonClient,
    transport: T,
}

impl<T: Transport> PersonService<T> {
    pub fn new(client: PersonClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &PersonClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn list_all(&self) -> Result<Vec<Person>, ApiError> {
        let response = self.send(self.client.build_list_persons())?;
        self.client.parse_list_persons(response)
    }

    pub fn get_by_id(&self, id: &PersonId) -> Result<Person, ApiError> {
        let response = self.send(self.client.build_get_person(id)?)?;
        self.client.parse_get_person(response)
    }

    pub fn create(&self, input: &CreatePerson) -> Result<Person, ApiError> {
        let response = self.send(self.client.build_create_person(input)?)?;
        self.client.parse_create_person(response)
    }

    pub fn update(&self, id: &PersonId, input: &UpdatePerson) -> Result<Person, ApiError> {
        let response = self.send(self.client.build_update_person(id, input)?)?;
        self.client.parse_update_person(response)
    }

    pub fn delete(&self, id: &PersonId) -> Result<(), ApiError> {
        let response = self.send(self.client.build_delete_person(id)?)?;
        self.client.parse_delete_person(response)
    }

    fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let method = request.method;
        let url = request.url.clone();
        log::debug!("{method} {url}");
        match self.transport.execute(request) {
            Ok(response) => {
                if !response.is_success() {
                    log::warn!("{method} {url} -> HTTP {}", response.status);
                }
                Ok(response)
            }
            Err(e) => {
                log::warn!("{method} {url} failed: {e}");
                Err(e)
            }
        }
    }
}
