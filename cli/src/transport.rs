//! Blocking HTTP executor backed by ureq.

use std::time::Duration;

use crud_core::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};

/// Sends `HttpRequest`s with a shared ureq agent.
///
/// 4xx/5xx answers come back as responses so the core decides what they
/// mean; only connection-level failures become `TransportError`.
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(timeout: Option<Duration>) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        let result = match req.method {
            HttpMethod::Get => {
                let mut builder = self.agent.get(&req.path);
                for (k, v) in &req.headers {
                    builder = builder.header(k, v);
                }
                builder.call()
            }
            HttpMethod::Delete => {
                let mut builder = self.agent.delete(&req.path);
                for (k, v) in &req.headers {
                    builder = builder.header(k, v);
                }
                builder.call()
            }
            HttpMethod::Post | HttpMethod::Put => {
                let mut builder = if req.method == HttpMethod::Post {
                    self.agent.post(&req.path)
                } else {
                    self.agent.put(&req.path)
                };
                for (k, v) in &req.headers {
                    builder = builder.header(k, v);
                }
                builder.send(req.body.as_deref().unwrap_or_default().as_bytes())
            }
        };

        let mut response = result.map_err(|e| TransportError::new(e.to_string()))?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| TransportError::new(e.to_string()))?;
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
