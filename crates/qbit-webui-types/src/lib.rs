//! # qBittorrent WebUI Types
//!
//! This crate defines the common types shared by the qBittorrent WebUI client:
//! the error taxonomy, the torrent data model, list filters and torrent
//! references.

use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

/// Error type for WebUI operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Network-related errors (connection failures, timeouts, etc.)
    #[error("network error: {0}")]
    Network(String),

    /// Login or reconnect was attempted without a username and password.
    #[error("username and password are required")]
    MissingCredentials,

    /// The `/login` exchange completed with a non-200 status.
    #[error("login failed with status {status} for username {username}")]
    LoginFailed {
        /// HTTP status code returned by the server.
        status: u16,
        /// Username the login was attempted with.
        username: String,
    },

    /// A non-login exchange completed with a non-200 status.
    #[error("{operation} failed with status {status}: {context}")]
    Status {
        /// The logical operation that failed.
        operation: &'static str,
        /// HTTP status code returned by the server.
        status: u16,
        /// The request options or identifiers involved.
        context: String,
    },

    /// A torrent argument could not be used (no hash, no file name, ...).
    #[error("invalid torrent source: {0}")]
    InvalidSource(String),

    /// File system errors (torrent file not found, permission denied, etc.)
    #[error("file system error: {0}")]
    FileSystem(String),

    /// The session's request queue worker is gone.
    #[error("request queue closed")]
    QueueClosed,

    /// Other unexpected errors
    #[error("unexpected error: {0}")]
    Other(String),
}

/// One entry of the `/query/torrents` response.
///
/// Every field is defaulted so partial server JSON still decodes; `hash` is
/// optional because derived listings may omit it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
#[allow(missing_docs)] // rationale: these are the same fields as in the WebUI JSON
pub struct TorrentInfo {
    pub hash: Option<String>,

    pub name: String,

    pub state: String,

    pub progress: f64,

    pub size: i64,

    pub dlspeed: i64,

    pub upspeed: i64,

    pub eta: i64,

    pub num_seeds: i64,

    pub num_leechs: i64,

    pub ratio: f64,

    pub priority: i64,

    pub label: String,

    pub seq_dl: bool,

    pub force_start: bool,
}

/// Logical torrent list filter.
///
/// Several filters have no native WebUI equivalent and are implemented as a
/// broader native fetch plus a local predicate, see [`ListFilter::native`] and
/// [`ListFilter::retains`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)] // rationale: variants mirror the WebUI filter names
pub enum ListFilter {
    All,
    Downloading,
    Seeding,
    Completed,
    Resumed,
    Paused,
    Active,
    Inactive,
    Queued,
    Errored,
}

impl ListFilter {
    /// The filter name actually sent to the server.
    pub fn native(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Downloading => "downloading",
            Self::Seeding => "completed",
            Self::Completed => "completed",
            Self::Resumed => "all",
            Self::Paused => "paused",
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Queued => "inactive",
            Self::Errored => "inactive",
        }
    }

    /// Local predicate applied to the decoded list for derived filters.
    pub fn retains(self, item: &TorrentInfo) -> bool {
        match self {
            Self::Seeding => item.state == "stalledUP" || item.state == "uploading",
            Self::Resumed => !item.state.starts_with("paused"),
            Self::Queued => item.state.starts_with("queued"),
            Self::Errored => item.state == "error" || item.state == "missingFiles",
            _ => true,
        }
    }
}

/// A reference to a torrent known to the server: either a bare hash or a
/// previously fetched [`TorrentInfo`] descriptor.
#[derive(Debug, Clone)]
pub enum TorrentRef {
    /// A torrent identified by its hash string.
    Hash(String),
    /// A torrent identified by a list-entry descriptor.
    Info(TorrentInfo),
}

impl From<&str> for TorrentRef {
    fn from(hash: &str) -> Self {
        Self::Hash(hash.to_string())
    }
}

impl From<String> for TorrentRef {
    fn from(hash: String) -> Self {
        Self::Hash(hash)
    }
}

impl From<TorrentInfo> for TorrentRef {
    fn from(info: TorrentInfo) -> Self {
        Self::Info(info)
    }
}

impl From<&TorrentInfo> for TorrentRef {
    fn from(info: &TorrentInfo) -> Self {
        Self::Info(info.clone())
    }
}

/// Normalize torrent references into an ordered list of hash strings.
///
/// This is the single point of truth for reference normalization: order is
/// preserved, duplicates are kept, and descriptors without a hash are silently
/// dropped.
pub fn hash_list(refs: &[TorrentRef]) -> Vec<String> {
    let mut hashes = Vec::with_capacity(refs.len());
    for torrent in refs {
        match torrent {
            TorrentRef::Hash(hash) => hashes.push(hash.clone()),
            TorrentRef::Info(info) => {
                if let Some(hash) = &info.hash {
                    hashes.push(hash.clone());
                }
            }
        }
    }
    hashes
}

/// A torrent to be added to the server.
#[derive(Debug, Clone)]
pub enum TorrentSource {
    /// A `.torrent` file on the local file system, uploaded as multipart data.
    LocalFile(PathBuf),
    /// An already-loaded `.torrent` payload, uploaded as multipart data.
    Stream {
        /// File name reported to the server.
        filename: String,
        /// Raw `.torrent` bytes.
        content: Vec<u8>,
    },
    /// An HTTP(S) URL, magnet URI or BitComet link submitted for the server
    /// to fetch itself.
    RemoteLink(String),
}

impl TorrentSource {
    /// Classify a string argument: URL-like and magnet-like inputs become
    /// [`TorrentSource::RemoteLink`], everything else is treated as a local
    /// file path.
    pub fn classify(input: &str) -> Self {
        if input.starts_with("http") || input.starts_with("magnet:") || input.starts_with("bc:") {
            Self::RemoteLink(input.to_string())
        } else {
            Self::LocalFile(PathBuf::from(input))
        }
    }
}

/// A decoded response body.
///
/// The WebUI mixes JSON endpoints with plain-text ones, so decoding always
/// tries JSON first and degrades to the raw text; the fallback is not an
/// error.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// The body parsed as JSON.
    Json(serde_json::Value),
    /// The raw body, for endpoints that return opaque text.
    Text(String),
}

impl Payload {
    /// Decode a response body.
    pub fn decode(body: &[u8]) -> Self {
        match serde_json::from_slice(body) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Text(String::from_utf8_lossy(body).into_owned()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(hash: Option<&str>, state: &str) -> TorrentInfo {
        TorrentInfo {
            hash: hash.map(str::to_string),
            state: state.to_string(),
            ..TorrentInfo::default()
        }
    }

    #[test]
    fn hash_list_takes_strings_verbatim() {
        let refs = [TorrentRef::from("h1"), TorrentRef::from("h2")];
        assert_eq!(hash_list(&refs), vec!["h1", "h2"]);
    }

    #[test]
    fn hash_list_reads_descriptor_hashes() {
        let refs = [
            TorrentRef::from(info(Some("aaa"), "uploading")),
            TorrentRef::from("bbb"),
        ];
        assert_eq!(hash_list(&refs), vec!["aaa", "bbb"]);
    }

    #[test]
    fn hash_list_drops_descriptors_without_hash() {
        let refs = [
            TorrentRef::from("h1"),
            TorrentRef::from(info(None, "uploading")),
            TorrentRef::from("h2"),
        ];
        assert_eq!(hash_list(&refs), vec!["h1", "h2"]);
    }

    #[test]
    fn hash_list_keeps_order_and_duplicates() {
        let refs = [
            TorrentRef::from("dup"),
            TorrentRef::from(info(Some("dup"), "error")),
            TorrentRef::from("other"),
        ];
        assert_eq!(hash_list(&refs), vec!["dup", "dup", "other"]);
    }

    #[test]
    fn derived_filters_map_to_broader_native_filters() {
        assert_eq!(ListFilter::Seeding.native(), "completed");
        assert_eq!(ListFilter::Resumed.native(), "all");
        assert_eq!(ListFilter::Queued.native(), "inactive");
        assert_eq!(ListFilter::Errored.native(), "inactive");
        assert_eq!(ListFilter::Paused.native(), "paused");
        assert_eq!(ListFilter::Downloading.native(), "downloading");
    }

    #[test]
    fn seeding_retains_uploading_states_only() {
        assert!(ListFilter::Seeding.retains(&info(None, "stalledUP")));
        assert!(ListFilter::Seeding.retains(&info(None, "uploading")));
        assert!(!ListFilter::Seeding.retains(&info(None, "pausedUP")));
        assert!(!ListFilter::Seeding.retains(&info(None, "downloading")));
    }

    #[test]
    fn resumed_drops_paused_states() {
        assert!(ListFilter::Resumed.retains(&info(None, "downloading")));
        assert!(ListFilter::Resumed.retains(&info(None, "stalledDL")));
        assert!(!ListFilter::Resumed.retains(&info(None, "pausedUP")));
        assert!(!ListFilter::Resumed.retains(&info(None, "pausedDL")));
    }

    #[test]
    fn queued_keeps_queued_states_only() {
        assert!(ListFilter::Queued.retains(&info(None, "queuedUP")));
        assert!(ListFilter::Queued.retains(&info(None, "queuedDL")));
        assert!(!ListFilter::Queued.retains(&info(None, "stalledDL")));
    }

    #[test]
    fn errored_keeps_error_and_missing_files() {
        assert!(ListFilter::Errored.retains(&info(None, "error")));
        assert!(ListFilter::Errored.retains(&info(None, "missingFiles")));
        assert!(!ListFilter::Errored.retains(&info(None, "uploading")));
    }

    #[test]
    fn non_derived_filters_retain_everything() {
        assert!(ListFilter::All.retains(&info(None, "pausedUP")));
        assert!(ListFilter::Completed.retains(&info(None, "whatever")));
    }

    #[test]
    fn classify_routes_links_and_paths() {
        assert!(matches!(
            TorrentSource::classify("http://example.com/a.torrent"),
            TorrentSource::RemoteLink(_)
        ));
        assert!(matches!(
            TorrentSource::classify("https://example.com/a.torrent"),
            TorrentSource::RemoteLink(_)
        ));
        assert!(matches!(
            TorrentSource::classify("magnet:?xt=urn:btih:cafebabe"),
            TorrentSource::RemoteLink(_)
        ));
        assert!(matches!(
            TorrentSource::classify("bc://example"),
            TorrentSource::RemoteLink(_)
        ));
        assert!(matches!(
            TorrentSource::classify("/downloads/a.torrent"),
            TorrentSource::LocalFile(_)
        ));
    }

    #[test]
    fn payload_decodes_json_and_falls_back_to_text() {
        assert_eq!(
            Payload::decode(b"{\"a\":1}"),
            Payload::Json(serde_json::json!({"a": 1}))
        );
        assert_eq!(
            Payload::decode(b"v3.3.16"),
            Payload::Text("v3.3.16".to_string())
        );
    }

    #[test]
    fn login_failure_names_status_and_username() {
        let error = Error::LoginFailed {
            status: 403,
            username: "admin".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("403"));
        assert!(message.contains("admin"));
    }

    #[test]
    fn torrent_info_decodes_partial_json() {
        let item: TorrentInfo =
            serde_json::from_str("{\"name\":\"ubuntu\",\"state\":\"uploading\"}").unwrap();
        assert_eq!(item.name, "ubuntu");
        assert_eq!(item.state, "uploading");
        assert!(item.hash.is_none());
        assert_eq!(item.size, 0);
    }
}
