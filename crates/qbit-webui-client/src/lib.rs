//! # qBittorrent WebUI client
//!
//! Async client for the qBittorrent WebUI HTTP API: cookie-based login,
//! torrent listings with derived filters, per-torrent and group commands, and
//! torrent ingestion by file, stream, URL or magnet link. All requests of a
//! session flow through one serialized queue, so they execute strictly in
//! call order.
//!
//! usage:
//!
//! ```rust,ignore
//! use qbit_webui_client::{AddOptions, Credentials, ListOptions, Session};
//! use qbit_webui_types::{ListFilter, TorrentSource};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let session = Session::connect(
//!         Some("http://localhost:8080"),
//!         Some(Credentials::new("admin", "adminadmin")),
//!     )?;
//!     session
//!         .add(
//!             TorrentSource::classify("magnet:?xt=urn:btih:..."),
//!             &AddOptions::default(),
//!         )
//!         .await?;
//!     for torrent in session.seeding(&ListOptions::default()).await? {
//!         println!("seeding: {}", torrent.name);
//!     }
//!     Ok(())
//! }
//! ```

mod queue;
mod session;
mod transport;
mod wire;

#[cfg(test)]
mod testutil;

// dev-dependencies exercised only by the integration tests under `tests/`
#[cfg(test)]
use httpmock as _;
#[cfg(test)]
use tracing_subscriber as _;

pub use session::{AddOptions, ConnectionStatus, Credentials, ListOptions, SearchQuery, Session};
