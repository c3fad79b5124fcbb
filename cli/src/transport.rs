//! Blocking `Transport` backed by ureq.

use person_core::{ApiError, HttpMethod, HttpRequest, HttpResponse, Transport};

pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    /// 4xx/5xx come back as data; `PersonClient` decides what they mean.
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        let body = req.body.unwrap_or_default();
        let result = match req.method {
            HttpMethod::Get => self.agent.get(&req.url).call(),
            HttpMethod::Delete => self.agent.delete(&req.url).call(),
            HttpMethod::Post => self
                .agent
                .post(&req.url)
                .content_type("application/json")
                .send(body.as_bytes()),
            HttpMethod::Patch => self
                .agent
                .patch(&req.url)
                .content_type("application/json")
                .send(body.as_bytes()),
        };
        let mut response = result.map_err(|e| ApiError::network(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::network(e.to_string()))?;
        Ok(HttpResponse::new(status, body))
    }
}
