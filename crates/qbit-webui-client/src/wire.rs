//! Request descriptors and response decoding for the WebUI wire protocol.
//!
//! Every logical operation is rewritten into one of a handful of wire shapes:
//! a plain `GET`, a urlencoded `POST /command/...`, or a multipart upload.
//! Paths are relative; the request queue prefixes the session's base host.

use qbit_webui_types::{Error, ListFilter, Payload};
use url::form_urlencoded;

/// HTTP verb of a queued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Method {
    Get,
    Post,
}

/// Body of a queued request.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Body {
    Empty,
    Form(Vec<(String, String)>),
    Multipart(Vec<Part>),
}

/// One part of a multipart upload.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Part {
    pub(crate) name: String,
    pub(crate) value: PartValue,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PartValue {
    Text(String),
    File {
        filename: String,
        content_type: String,
        content: Vec<u8>,
    },
}

/// A request descriptor, consumed exactly once by the transport.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct WireRequest {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) body: Body,
}

/// The raw transport response handed back through the queue.
#[derive(Debug, Clone)]
pub(crate) struct WireResponse {
    pub(crate) status: u16,
    pub(crate) body: Vec<u8>,
}

impl WireResponse {
    /// Enforce the uniform status policy: anything but 200 becomes a
    /// descriptive error naming the operation and its options.
    pub(crate) fn require_ok(
        self,
        operation: &'static str,
        context: impl FnOnce() -> String,
    ) -> Result<Self, Error> {
        if self.status != 200 {
            return Err(Error::Status {
                operation,
                status: self.status,
                context: context(),
            });
        }
        Ok(self)
    }

    /// Decode the body, JSON first with a raw-text fallback.
    pub(crate) fn into_payload(self) -> Payload {
        Payload::decode(&self.body)
    }
}

/// A plain `GET` of a relative path.
pub(crate) fn get(path: impl Into<String>) -> WireRequest {
    WireRequest {
        method: Method::Get,
        path: path.into(),
        body: Body::Empty,
    }
}

/// `POST /command/{name}` with a flat urlencoded form.
pub(crate) fn command(name: &str, form: Vec<(String, String)>) -> WireRequest {
    WireRequest {
        method: Method::Post,
        path: format!("/command/{name}"),
        body: Body::Form(form),
    }
}

/// `POST /login` with the credential form.
pub(crate) fn login(username: &str, password: &str) -> WireRequest {
    WireRequest {
        method: Method::Post,
        path: "/login".to_string(),
        body: Body::Form(vec![
            ("username".to_string(), username.to_string()),
            ("password".to_string(), password.to_string()),
        ]),
    }
}

/// `GET /query/torrents` with the native filter and any list options.
pub(crate) fn torrent_list(filter: ListFilter, extra: Vec<(String, String)>) -> WireRequest {
    let mut query = form_urlencoded::Serializer::new(String::new());
    query.append_pair("filter", filter.native());
    for (key, value) in &extra {
        query.append_pair(key, value);
    }
    get(format!("/query/torrents?{}", query.finish()))
}

/// Global info paths use `GET`, except the `/command/get...` style queries
/// which the WebUI expects as `POST`.
pub(crate) fn global_info(path: &str) -> WireRequest {
    let method = if path.starts_with("/command/") {
        Method::Post
    } else {
        Method::Get
    };
    WireRequest {
        method,
        path: path.to_string(),
        body: Body::Empty,
    }
}

/// Multipart `POST /command/upload` carrying a `.torrent` payload plus any
/// add options as text fields.
pub(crate) fn upload(
    fields: Vec<(String, String)>,
    filename: String,
    content: Vec<u8>,
) -> WireRequest {
    let mut parts: Vec<Part> = fields
        .into_iter()
        .map(|(name, value)| Part {
            name,
            value: PartValue::Text(value),
        })
        .collect();
    parts.push(Part {
        name: "torrents".to_string(),
        value: PartValue::File {
            filename,
            content_type: "application/x-bittorrent".to_string(),
            content,
        },
    });
    WireRequest {
        method: Method::Post,
        path: "/command/upload".to_string(),
        body: Body::Multipart(parts),
    }
}
