//! Test doubles shared by the unit tests.

use std::cell::RefCell;

use crate::client::PersonClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::service::PersonService;

/// Replays canned responses in order and records every request it sees.
#[derive(Default)]
pub struct Scripted {
    responses: RefCell<Vec<Result<HttpResponse, ApiError>>>,
    pub seen: RefCell<Vec<HttpRequest>>,
}

impl Scripted {
    pub fn new(responses: Vec<Result<HttpResponse, ApiError>>) -> Self {
        Self {
            responses: RefCell::new(responses.into_iter().rev().collect()),
            seen: RefCell::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> usize {
        self.seen.borrow().len()
    }
}

impl Transport for Scripted {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.seen.borrow_mut().push(request);
        self.responses.borrow_mut().pop().expect("no scripted response left")
    }
}

pub fn service(responses: Vec<Result<HttpResponse, ApiError>>) -> PersonService<Scripted> {
    let config = ClientConfig::new("http://writer/api/persons", "http://reader/api/query").unwrap();
    PersonService::new(PersonClient::new(config), Scripted::new(responses))
}

pub fn person_json(id: &str, name: &str, email: &str) -> String {
    serde_json::json!({ "id": id, "name": name, "email": email }).to_string()
}
