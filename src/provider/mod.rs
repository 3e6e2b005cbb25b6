//! Wire protocol for the external anime query provider.
//!
//! The provider is an opaque ranked-list service reached through Zellij's
//! `web_request` host call. This module only encodes requests and decodes
//! responses; issuing the call happens in the plugin shim.
//!
//! # Request
//!
//! `POST {endpoint}` with `Content-Type: application/json` and body
//! `{"query": "...", "genres": ["..."]}`.
//!
//! # Response
//!
//! A JSON array of [`AnimeRecord`] objects in relevance order.
//!
//! # Sequencing
//!
//! Every request carries its sequence number in the `web_request` context map.
//! The host echoes the context back with the result, which lets the
//! coordinator discard responses to superseded queries.

use crate::domain::error::{AnimescopeError, Result};
use crate::domain::AnimeRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Context key holding the request sequence number.
pub const SEQUENCE_KEY: &str = "request_seq";

/// Context key identifying the request kind.
pub const KIND_KEY: &str = "kind";

/// Context value for anime queries.
pub const QUERY_KIND: &str = "anime_query";

/// Maximum number of body bytes echoed into a transport error message.
const ERROR_EXCERPT_BYTES: usize = 200;

/// Outbound request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub query: String,
    pub genres: Vec<String>,
}

/// Encodes a request body as JSON bytes.
///
/// # Errors
///
/// Returns [`AnimescopeError::Encode`] if serialization fails.
pub fn encode_request(request: &QueryRequest) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(request)?)
}

/// Headers sent with every query.
#[must_use]
pub fn request_headers() -> BTreeMap<String, String> {
    BTreeMap::from([("Content-Type".to_string(), "application/json".to_string())])
}

/// Context map tagging a request with its sequence number.
#[must_use]
pub fn request_context(seq: u64) -> BTreeMap<String, String> {
    BTreeMap::from([
        (KIND_KEY.to_string(), QUERY_KIND.to_string()),
        (SEQUENCE_KEY.to_string(), seq.to_string()),
    ])
}

/// Extracts the sequence number from an echoed context map.
///
/// Returns `None` for results that do not belong to an anime query.
#[must_use]
pub fn sequence_from_context(context: &BTreeMap<String, String>) -> Option<u64> {
    if context.get(KIND_KEY).map(String::as_str) != Some(QUERY_KIND) {
        return None;
    }
    context.get(SEQUENCE_KEY)?.parse().ok()
}

/// Decodes a provider response.
///
/// # Errors
///
/// - [`AnimescopeError::Transport`] for any non-2xx status
/// - [`AnimescopeError::MalformedResponse`] if the body is not a JSON array of
///   well-shaped records
pub fn decode_response(status: u16, body: &[u8]) -> Result<Vec<AnimeRecord>> {
    if !(200..300).contains(&status) {
        return Err(AnimescopeError::Transport {
            status,
            message: excerpt(body),
        });
    }

    serde_json::from_slice::<Vec<AnimeRecord>>(body)
        .map_err(|e| AnimescopeError::MalformedResponse(e.to_string()))
}

fn excerpt(body: &[u8]) -> String {
    let end = body.len().min(ERROR_EXCERPT_BYTES);
    String::from_utf8_lossy(&body[..end]).trim().to_string()
}
