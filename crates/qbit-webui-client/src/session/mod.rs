//! WebUI session management and the operation facade.

use std::collections::HashMap;
use std::slice;
use std::sync::Mutex;

use tokio::sync::watch;
use tracing::{debug, warn};
use url::Url;

use qbit_webui_types::{
    hash_list, Error, ListFilter, Payload, TorrentInfo, TorrentRef, TorrentSource,
};

use crate::queue::RequestQueue;
use crate::transport::{HttpTransport, Transport};
use crate::wire::{self, WireResponse};


const DEFAULT_HOST: &str = "http://localhost:8080";

/// Login credentials for the WebUI.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// WebUI username.
    pub username: String,
    /// WebUI password.
    pub password: String,
}

impl Credentials {
    /// Convenience constructor.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Login state reported on the connection-status channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionStatus {
    /// No credentials were supplied; requests go out unauthenticated.
    Anonymous,
    /// A login request is queued or in flight.
    Pending,
    /// The most recent login succeeded.
    Connected,
    /// The most recent login failed.
    Failed(String),
}

/// Options accepted by the list and search operations.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Restrict the listing to torrents carrying this label.
    pub label: Option<String>,
    /// Field to sort by, server side.
    pub sort: Option<String>,
    /// Reverse the sort order.
    pub reverse: Option<bool>,
    /// Maximum number of entries returned.
    pub limit: Option<u32>,
    /// Offset into the sorted listing.
    pub offset: Option<u32>,
}

impl ListOptions {
    fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(label) = &self.label {
            pairs.push(("label".to_string(), label.clone()));
        }
        if let Some(sort) = &self.sort {
            pairs.push(("sort".to_string(), sort.clone()));
        }
        if let Some(reverse) = self.reverse {
            pairs.push(("reverse".to_string(), reverse.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(offset) = self.offset {
            pairs.push(("offset".to_string(), offset.to_string()));
        }
        pairs
    }
}

/// Options accepted by the add operations.
#[derive(Debug, Clone, Default)]
pub struct AddOptions {
    /// Download directory for the new torrent.
    pub save_path: Option<String>,
    /// Label assigned to the new torrent.
    pub label: Option<String>,
}

impl AddOptions {
    fn form_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(save_path) = &self.save_path {
            pairs.push(("savepath".to_string(), save_path.clone()));
        }
        if let Some(label) = &self.label {
            pairs.push(("label".to_string(), label.clone()));
        }
        pairs
    }
}

/// Name query used by [`Session::search`], mirroring the WebUI client habit
/// of filtering a listing by substring or pattern.
#[derive(Debug, Clone)]
pub enum SearchQuery {
    /// Keep torrents whose name contains this substring.
    Substring(String),
    /// Keep torrents whose name matches this pattern.
    Pattern(regex::Regex),
}

impl SearchQuery {
    fn matches(&self, name: &str) -> bool {
        match self {
            Self::Substring(needle) => name.contains(needle),
            Self::Pattern(pattern) => pattern.is_match(name),
        }
    }
}

/// A configured connection to one qBittorrent WebUI endpoint.
///
/// All requests for a session flow through one concurrency-1 queue, so they
/// execute strictly in call order. Sessions never share queues or cookie
/// maps.
#[allow(missing_debug_implementations)]
pub struct Session {
    queue: RequestQueue,
    credentials: Option<Credentials>,
    cookies: Mutex<HashMap<String, String>>,
    status_tx: watch::Sender<ConnectionStatus>,
}

impl Session {
    /// Connect to a WebUI endpoint.
    ///
    /// Returns synchronously; must be called inside a Tokio runtime, which
    /// the queue worker is spawned on. `host` defaults to
    /// `http://localhost:8080`; a missing scheme is filled in and one
    /// trailing slash is stripped. When credentials are given a login is
    /// enqueued immediately and its outcome is published on the
    /// [connection-status channel](Session::status), never as an abrupt
    /// failure.
    pub fn connect(host: Option<&str>, credentials: Option<Credentials>) -> Result<Self, Error> {
        let transport = HttpTransport::new()?;
        Ok(Self::start(host, credentials, transport))
    }

    fn start<T>(host: Option<&str>, credentials: Option<Credentials>, transport: T) -> Self
    where
        T: Transport + Send + Sync + 'static,
    {
        let base_url = normalize_host(host);
        debug!(%base_url, "starting WebUI session");
        let queue = RequestQueue::start(base_url, transport);
        let initial = if credentials.is_some() {
            ConnectionStatus::Pending
        } else {
            ConnectionStatus::Anonymous
        };
        let (status_tx, _) = watch::channel(initial);
        let session = Self {
            queue,
            credentials,
            cookies: Mutex::new(HashMap::new()),
            status_tx,
        };
        session.spawn_initial_login();
        session
    }

    /// Construct a session over a custom transport, for tests.
    #[cfg(test)]
    pub(crate) fn with_transport<T>(
        host: Option<&str>,
        credentials: Option<Credentials>,
        transport: T,
    ) -> Self
    where
        T: Transport + Send + Sync + 'static,
    {
        Self::start(host, credentials, transport)
    }

    /// Enqueue the fire-and-forget login before `connect` returns, so it is
    /// ordered ahead of any request issued afterwards.
    fn spawn_initial_login(&self) {
        let Some(credentials) = self.credentials.clone() else {
            return;
        };
        let pending = self
            .queue
            .enqueue(wire::login(&credentials.username, &credentials.password));
        let status_tx = self.status_tx.clone();
        tokio::spawn(async move {
            let outcome = match pending.await {
                Ok(result) => check_login(result, &credentials.username),
                Err(_) => Err(Error::QueueClosed),
            };
            match outcome {
                Ok(()) => {
                    status_tx.send_replace(ConnectionStatus::Connected);
                }
                Err(error) => {
                    warn!(%error, "initial login failed");
                    status_tx.send_replace(ConnectionStatus::Failed(error.to_string()));
                }
            }
        });
    }

    /// Subscribe to the connection-status channel.
    pub fn status(&self) -> watch::Receiver<ConnectionStatus> {
        self.status_tx.subscribe()
    }

    /// Re-run the login with the credentials supplied at connect time.
    pub async fn reconnect(&self) -> Result<(), Error> {
        let credentials = self
            .credentials
            .clone()
            .ok_or(Error::MissingCredentials)?;
        self.status_tx.send_replace(ConnectionStatus::Pending);
        let result = self
            .queue
            .execute(wire::login(&credentials.username, &credentials.password))
            .await;
        match check_login(result, &credentials.username) {
            Ok(()) => {
                self.status_tx.send_replace(ConnectionStatus::Connected);
                Ok(())
            }
            Err(error) => {
                self.status_tx
                    .send_replace(ConnectionStatus::Failed(error.to_string()));
                Err(error)
            }
        }
    }

    /// Store a cookie string for a hostname; it is attached automatically
    /// when adding torrents from URLs on that host.
    pub fn set_cookie(&self, host: impl Into<String>, value: impl Into<String>) {
        self.cookies
            .lock()
            .expect("cookie map lock poisoned")
            .insert(host.into(), value.into());
    }

    // --- listing ---

    /// Fetch the torrent list for a logical filter.
    ///
    /// Derived filters fetch a broader native listing and post-filter it
    /// locally by torrent state.
    pub async fn torrents(
        &self,
        filter: ListFilter,
        options: &ListOptions,
    ) -> Result<Vec<TorrentInfo>, Error> {
        let request = wire::torrent_list(filter, options.query_pairs());
        let context = request.path.clone();
        debug!(?filter, "fetching torrent list");
        let response = self
            .queue
            .execute(request)
            .await?
            .require_ok("torrent list", || context)?;
        let items: Vec<TorrentInfo> = serde_json::from_slice(&response.body)
            .map_err(|e| Error::Other(format!("unexpected torrent list response: {e}")))?;
        Ok(items.into_iter().filter(|item| filter.retains(item)).collect())
    }

    /// All torrents.
    pub async fn all(&self, options: &ListOptions) -> Result<Vec<TorrentInfo>, Error> {
        self.torrents(ListFilter::All, options).await
    }

    /// Torrents currently downloading.
    pub async fn downloading(&self, options: &ListOptions) -> Result<Vec<TorrentInfo>, Error> {
        self.torrents(ListFilter::Downloading, options).await
    }

    /// Torrents actively seeding (derived filter).
    pub async fn seeding(&self, options: &ListOptions) -> Result<Vec<TorrentInfo>, Error> {
        self.torrents(ListFilter::Seeding, options).await
    }

    /// Completed torrents.
    pub async fn completed(&self, options: &ListOptions) -> Result<Vec<TorrentInfo>, Error> {
        self.torrents(ListFilter::Completed, options).await
    }

    /// Torrents that are not paused (derived filter).
    pub async fn resumed(&self, options: &ListOptions) -> Result<Vec<TorrentInfo>, Error> {
        self.torrents(ListFilter::Resumed, options).await
    }

    /// Paused torrents.
    pub async fn paused(&self, options: &ListOptions) -> Result<Vec<TorrentInfo>, Error> {
        self.torrents(ListFilter::Paused, options).await
    }

    /// Torrents with transfer activity.
    pub async fn active(&self, options: &ListOptions) -> Result<Vec<TorrentInfo>, Error> {
        self.torrents(ListFilter::Active, options).await
    }

    /// Torrents without transfer activity.
    pub async fn inactive(&self, options: &ListOptions) -> Result<Vec<TorrentInfo>, Error> {
        self.torrents(ListFilter::Inactive, options).await
    }

    /// Torrents waiting in the download or upload queue (derived filter).
    pub async fn queued(&self, options: &ListOptions) -> Result<Vec<TorrentInfo>, Error> {
        self.torrents(ListFilter::Queued, options).await
    }

    /// Torrents in an error state (derived filter).
    pub async fn errored(&self, options: &ListOptions) -> Result<Vec<TorrentInfo>, Error> {
        self.torrents(ListFilter::Errored, options).await
    }

    /// Fetch a listing and keep the torrents whose name matches `query`.
    pub async fn search(
        &self,
        query: &SearchQuery,
        filter: ListFilter,
        options: &ListOptions,
    ) -> Result<Vec<TorrentInfo>, Error> {
        let items = self.torrents(filter, options).await?;
        Ok(items
            .into_iter()
            .filter(|item| query.matches(&item.name))
            .collect())
    }

    // --- global info ---

    async fn global_info(&self, path: &'static str) -> Result<Payload, Error> {
        let response = self
            .queue
            .execute(wire::global_info(path))
            .await?
            .require_ok("global info", || path.to_string())?;
        Ok(response.into_payload())
    }

    /// Application version string.
    pub async fn version(&self) -> Result<Payload, Error> {
        self.global_info("/version/qbittorrent").await
    }

    /// WebUI API version.
    pub async fn api_version(&self) -> Result<Payload, Error> {
        self.global_info("/version/api").await
    }

    /// Minimum WebUI API version the server still accepts.
    pub async fn api_min_version(&self) -> Result<Payload, Error> {
        self.global_info("/version/api_min").await
    }

    /// Global transfer statistics.
    pub async fn transfer_info(&self) -> Result<Payload, Error> {
        self.global_info("/query/transferInfo").await
    }

    /// Server preferences.
    pub async fn preferences(&self) -> Result<Payload, Error> {
        self.global_info("/query/preferences").await
    }

    /// Global download rate limit, in bytes per second.
    pub async fn global_dl_limit(&self) -> Result<Payload, Error> {
        self.global_info("/command/getGlobalDlLimit").await
    }

    /// Global upload rate limit, in bytes per second.
    pub async fn global_up_limit(&self) -> Result<Payload, Error> {
        self.global_info("/command/getGlobalUpLimit").await
    }

    /// Whether the alternative speed limits are active.
    pub async fn alternative_speed_limits_enabled(&self) -> Result<Payload, Error> {
        self.global_info("/command/alternativeSpeedLimitsEnabled").await
    }

    // --- per-torrent detail queries ---

    async fn torrent_details(
        &self,
        which: &'static str,
        torrent: &TorrentRef,
    ) -> Result<Payload, Error> {
        let hash = first_hash(torrent)?;
        let context = format!("{which} for {hash}");
        let response = self
            .queue
            .execute(wire::get(format!("/query/{which}/{hash}")))
            .await?
            .require_ok("torrent details", || context)?;
        Ok(response.into_payload())
    }

    /// General properties of one torrent.
    pub async fn details(&self, torrent: &TorrentRef) -> Result<Payload, Error> {
        self.torrent_details("propertiesGeneral", torrent).await
    }

    /// Trackers of one torrent.
    pub async fn trackers(&self, torrent: &TorrentRef) -> Result<Payload, Error> {
        self.torrent_details("propertiesTrackers", torrent).await
    }

    /// Web seeds of one torrent.
    pub async fn webseeds(&self, torrent: &TorrentRef) -> Result<Payload, Error> {
        self.torrent_details("propertiesWebSeeds", torrent).await
    }

    /// Files of one torrent.
    pub async fn files(&self, torrent: &TorrentRef) -> Result<Payload, Error> {
        self.torrent_details("propertiesFiles", torrent).await
    }

    // --- global commands ---

    /// `POST /command/{name}` with a flat form payload and no torrent hash.
    pub async fn exec_global_command(
        &self,
        command: &str,
        options: Vec<(String, String)>,
    ) -> Result<Payload, Error> {
        let context = format!("{command} {options:?}");
        debug!(command, "global command");
        let response = self
            .queue
            .execute(wire::command(command, options))
            .await?
            .require_ok("global command", || context)?;
        Ok(response.into_payload())
    }

    /// Pause every torrent.
    pub async fn pause_all(&self) -> Result<Payload, Error> {
        self.exec_global_command("pauseAll", Vec::new()).await
    }

    /// Resume every torrent.
    pub async fn resume_all(&self) -> Result<Payload, Error> {
        self.exec_global_command("resumeAll", Vec::new()).await
    }

    /// Set the global download rate limit, in bytes per second.
    pub async fn set_global_dl_limit(&self, limit: i64) -> Result<Payload, Error> {
        self.exec_global_command("setGlobalDlLimit", vec![("limit".to_string(), limit.to_string())])
            .await
    }

    /// Set the global upload rate limit, in bytes per second.
    pub async fn set_global_up_limit(&self, limit: i64) -> Result<Payload, Error> {
        self.exec_global_command("setGlobalUpLimit", vec![("limit".to_string(), limit.to_string())])
            .await
    }

    /// Update server preferences from a JSON object.
    pub async fn set_preferences(&self, preferences: &serde_json::Value) -> Result<Payload, Error> {
        self.exec_global_command("setPreferences", vec![("json".to_string(), preferences.to_string())])
            .await
    }

    /// Toggle the alternative speed limits.
    pub async fn toggle_alternative_speed_limits(&self) -> Result<Payload, Error> {
        self.exec_global_command("toggleAlternativeSpeedLimits", Vec::new())
            .await
    }

    // --- per-torrent commands ---

    /// Resolve the references to hashes and issue one `POST /command/{name}`
    /// per hash, each carrying the shared options plus its own `hash`.
    ///
    /// Results are collected positionally; the first failing request aborts
    /// the batch and results gathered so far are discarded.
    pub async fn exec_torrent_command(
        &self,
        command: &str,
        torrents: &[TorrentRef],
        options: Vec<(String, String)>,
    ) -> Result<Vec<Payload>, Error> {
        let hashes = hash_list(torrents);
        debug!(command, count = hashes.len(), "per-torrent command");
        let mut results = Vec::with_capacity(hashes.len());
        for hash in hashes {
            let mut form = options.clone();
            form.push(("hash".to_string(), hash));
            let context = format!("{command} {form:?}");
            let response = self
                .queue
                .execute(wire::command(command, form))
                .await?
                .require_ok("torrent command", || context)?;
            results.push(response.into_payload());
        }
        Ok(results)
    }

    /// Pause the given torrents.
    pub async fn pause(&self, torrents: &[TorrentRef]) -> Result<Vec<Payload>, Error> {
        self.exec_torrent_command("pause", torrents, Vec::new()).await
    }

    /// Resume the given torrents.
    pub async fn resume(&self, torrents: &[TorrentRef]) -> Result<Vec<Payload>, Error> {
        self.exec_torrent_command("resume", torrents, Vec::new()).await
    }

    /// Recheck the given torrents.
    pub async fn recheck(&self, torrents: &[TorrentRef]) -> Result<Vec<Payload>, Error> {
        self.exec_torrent_command("recheck", torrents, Vec::new()).await
    }

    /// Add tracker URLs to the given torrents.
    pub async fn add_trackers(
        &self,
        torrents: &[TorrentRef],
        trackers: &[String],
    ) -> Result<Vec<Payload>, Error> {
        self.exec_torrent_command(
            "addTrackers",
            torrents,
            vec![("urls".to_string(), trackers.join("\n"))],
        )
        .await
    }

    /// Set the priority of one file inside one torrent.
    pub async fn set_file_prio(
        &self,
        torrent: &TorrentRef,
        file_id: u32,
        priority: u8,
    ) -> Result<Vec<Payload>, Error> {
        self.exec_torrent_command(
            "setFilePrio",
            slice::from_ref(torrent),
            vec![
                ("id".to_string(), file_id.to_string()),
                ("priority".to_string(), priority.to_string()),
            ],
        )
        .await
    }

    // --- group commands ---

    /// Resolve the references to hashes and issue a single
    /// `POST /command/{name}` with `hashes` joined by `|`.
    pub async fn exec_group_command(
        &self,
        command: &str,
        torrents: &[TorrentRef],
        options: Vec<(String, String)>,
    ) -> Result<Payload, Error> {
        let mut form = options;
        form.push(("hashes".to_string(), hash_list(torrents).join("|")));
        let context = format!("{command} {form:?}");
        debug!(command, "group command");
        let response = self
            .queue
            .execute(wire::command(command, form))
            .await?
            .require_ok("group command", || context)?;
        Ok(response.into_payload())
    }

    /// Remove the given torrents, keeping their data.
    pub async fn delete(&self, torrents: &[TorrentRef]) -> Result<Payload, Error> {
        self.exec_group_command("delete", torrents, Vec::new()).await
    }

    /// Remove the given torrents along with their data.
    pub async fn delete_data(&self, torrents: &[TorrentRef]) -> Result<Payload, Error> {
        self.exec_group_command("deletePerm", torrents, Vec::new()).await
    }

    /// Move the given torrents up in the queue.
    pub async fn increase_prio(&self, torrents: &[TorrentRef]) -> Result<Payload, Error> {
        self.exec_group_command("increasePrio", torrents, Vec::new()).await
    }

    /// Move the given torrents down in the queue.
    pub async fn decrease_prio(&self, torrents: &[TorrentRef]) -> Result<Payload, Error> {
        self.exec_group_command("decreasePrio", torrents, Vec::new()).await
    }

    /// Move the given torrents to the top of the queue.
    pub async fn top_prio(&self, torrents: &[TorrentRef]) -> Result<Payload, Error> {
        self.exec_group_command("topPrio", torrents, Vec::new()).await
    }

    /// Move the given torrents to the bottom of the queue.
    pub async fn bottom_prio(&self, torrents: &[TorrentRef]) -> Result<Payload, Error> {
        self.exec_group_command("bottomPrio", torrents, Vec::new()).await
    }

    /// Set the download rate limit of the given torrents.
    pub async fn set_dl_limit(
        &self,
        torrents: &[TorrentRef],
        limit: i64,
    ) -> Result<Payload, Error> {
        self.exec_group_command(
            "setTorrentsDlLimit",
            torrents,
            vec![("limit".to_string(), limit.to_string())],
        )
        .await
    }

    /// Set the upload rate limit of the given torrents.
    pub async fn set_up_limit(
        &self,
        torrents: &[TorrentRef],
        limit: i64,
    ) -> Result<Payload, Error> {
        self.exec_group_command(
            "setTorrentsUpLimit",
            torrents,
            vec![("limit".to_string(), limit.to_string())],
        )
        .await
    }

    /// Set the label of the given torrents.
    pub async fn set_label(&self, torrents: &[TorrentRef], label: &str) -> Result<Payload, Error> {
        self.exec_group_command(
            "setLabel",
            torrents,
            vec![("label".to_string(), label.to_string())],
        )
        .await
    }

    /// Toggle sequential download for the given torrents.
    pub async fn toggle_sequential_download(
        &self,
        torrents: &[TorrentRef],
    ) -> Result<Payload, Error> {
        self.exec_group_command("toggleSequentialDownload", torrents, Vec::new())
            .await
    }

    /// Toggle first/last piece priority for the given torrents.
    pub async fn toggle_first_last_piece_prio(
        &self,
        torrents: &[TorrentRef],
    ) -> Result<Payload, Error> {
        self.exec_group_command("toggleFirstLastPiecePrio", torrents, Vec::new())
            .await
    }

    /// Enable or disable force-start for the given torrents.
    pub async fn set_force_start(
        &self,
        torrents: &[TorrentRef],
        value: bool,
    ) -> Result<Payload, Error> {
        self.exec_group_command(
            "setForceStart",
            torrents,
            vec![("value".to_string(), value.to_string())],
        )
        .await
    }

    /// Download rate limit of one torrent.
    pub async fn dl_limit(&self, torrent: &TorrentRef) -> Result<Payload, Error> {
        self.exec_group_command("getTorrentsDlLimit", slice::from_ref(torrent), Vec::new())
            .await
    }

    /// Upload rate limit of one torrent.
    pub async fn up_limit(&self, torrent: &TorrentRef) -> Result<Payload, Error> {
        self.exec_group_command("getTorrentsUpLimit", slice::from_ref(torrent), Vec::new())
            .await
    }

    // --- ingestion ---

    /// Add a torrent from a classified source.
    ///
    /// Local files and streams are sent as a multipart upload; remote links
    /// go through the server-side download path, carrying any cookie
    /// registered for the link's host.
    pub async fn add(&self, source: TorrentSource, options: &AddOptions) -> Result<(), Error> {
        match source {
            TorrentSource::RemoteLink(link) => {
                self.download_links(slice::from_ref(&link), options).await
            }
            TorrentSource::LocalFile(path) => {
                let filename = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .ok_or_else(|| {
                        Error::InvalidSource(format!("{} has no file name", path.display()))
                    })?;
                let content = tokio::fs::read(&path)
                    .await
                    .map_err(|e| Error::FileSystem(format!("{}: {e}", path.display())))?;
                self.upload(filename, content, options).await
            }
            TorrentSource::Stream { filename, content } => {
                self.upload(filename, content, options).await
            }
        }
    }

    /// Submit one or more URLs or magnet links in a single request.
    pub async fn add_links(&self, links: &[String], options: &AddOptions) -> Result<(), Error> {
        self.download_links(links, options).await
    }

    async fn download_links(&self, links: &[String], options: &AddOptions) -> Result<(), Error> {
        let mut form = options.form_pairs();
        if let Some(cookie) = links.first().and_then(|link| self.cookie_for(link)) {
            form.push(("cookie".to_string(), cookie));
        }
        form.push(("urls".to_string(), links.join("\n")));
        let context = format!("download {form:?}");
        debug!(count = links.len(), "adding torrents by link");
        self.queue
            .execute(wire::command("download", form))
            .await?
            .require_ok("add torrent url", || context)?;
        Ok(())
    }

    async fn upload(
        &self,
        filename: String,
        content: Vec<u8>,
        options: &AddOptions,
    ) -> Result<(), Error> {
        let context = format!("upload {filename}");
        debug!(%filename, bytes = content.len(), "uploading torrent file");
        self.queue
            .execute(wire::upload(options.form_pairs(), filename, content))
            .await?
            .require_ok("add torrent file", || context)?;
        Ok(())
    }

    /// Look up a manually registered cookie for the link's host.
    fn cookie_for(&self, link: &str) -> Option<String> {
        let url = Url::parse(link).ok()?;
        let host = url.host_str()?;
        let key = match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };
        self.cookies
            .lock()
            .expect("cookie map lock poisoned")
            .get(&key)
            .cloned()
    }
}

fn check_login(result: Result<WireResponse, Error>, username: &str) -> Result<(), Error> {
    let response = result?;
    if response.status != 200 {
        return Err(Error::LoginFailed {
            status: response.status,
            username: username.to_string(),
        });
    }
    Ok(())
}

fn first_hash(torrent: &TorrentRef) -> Result<String, Error> {
    hash_list(slice::from_ref(torrent))
        .into_iter()
        .next()
        .ok_or_else(|| Error::InvalidSource("torrent reference carries no hash".to_string()))
}

fn normalize_host(host: Option<&str>) -> String {
    let Some(host) = host else {
        return DEFAULT_HOST.to_string();
    };
    let mut base = if host.starts_with("http") {
        host.to_string()
    } else {
        format!("http://{host}")
    };
    if base.ends_with('/') {
        base.pop();
    }
    base
}
