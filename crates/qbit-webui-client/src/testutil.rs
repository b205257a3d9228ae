//! Shared test utilities and fixtures.

use crate::wire::{Body, WireRequest, WireResponse};

pub(crate) fn ok_response(body: &str) -> WireResponse {
    WireResponse {
        status: 200,
        body: body.as_bytes().to_vec(),
    }
}

pub(crate) fn status_response(status: u16) -> WireResponse {
    WireResponse {
        status,
        body: Vec::new(),
    }
}

/// Look up one value of a urlencoded form body.
pub(crate) fn form_value(request: &WireRequest, key: &str) -> Option<String> {
    match &request.body {
        Body::Form(pairs) => pairs
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.clone()),
        _ => None,
    }
}
