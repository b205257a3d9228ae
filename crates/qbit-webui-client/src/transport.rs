//! Internal trait abstracting the HTTP round-trip, and its reqwest
//! implementation.
//!
//! The trait exists so the queue and session layers can be exercised with
//! mocks in tests; the real implementation keeps the WebUI session cookie in
//! reqwest's cookie store.

use async_trait::async_trait;
use qbit_webui_types::Error;

use crate::wire::{Body, Method, PartValue, WireRequest, WireResponse};

/// Internal trait that abstracts request execution.
/// This allows for mocking in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub(crate) trait Transport {
    async fn execute(&self, url: &str, request: WireRequest) -> Result<WireResponse, Error>;
}

/// The cookie-bearing reqwest transport used by real sessions.
pub(crate) struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub(crate) fn new() -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| Error::Other(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, url: &str, request: WireRequest) -> Result<WireResponse, Error> {
        let builder = match request.method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
        };
        let builder = match request.body {
            Body::Empty => builder,
            Body::Form(pairs) => builder.form(&pairs),
            Body::Multipart(parts) => builder.multipart(multipart_form(parts)?),
        };
        let response = builder
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Network(e.to_string()))?
            .to_vec();
        Ok(WireResponse { status, body })
    }
}

fn multipart_form(parts: Vec<crate::wire::Part>) -> Result<reqwest::multipart::Form, Error> {
    let mut form = reqwest::multipart::Form::new();
    for part in parts {
        form = match part.value {
            PartValue::Text(value) => form.text(part.name, value),
            PartValue::File {
                filename,
                content_type,
                content,
            } => {
                let file = reqwest::multipart::Part::bytes(content)
                    .file_name(filename)
                    .mime_str(&content_type)
                    .map_err(|e| Error::Other(format!("invalid content type: {e}")))?;
                form.part(part.name, file)
            }
        };
    }
    Ok(form)
}
