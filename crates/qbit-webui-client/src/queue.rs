//! The per-session serialized request pipeline.
//!
//! Concurrency is fixed at one: a single worker task owns the transport and
//! drains requests in enqueue order, so all traffic for a session is totally
//! ordered. That ordering is the only coordination primitive the session
//! relies on; a login enqueued first completes before anything enqueued after
//! it.

use qbit_webui_types::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::transport::Transport;
use crate::wire::{WireRequest, WireResponse};

type Reply = oneshot::Sender<Result<WireResponse, Error>>;

pub(crate) struct RequestQueue {
    tx: mpsc::UnboundedSender<(WireRequest, Reply)>,
}

impl RequestQueue {
    /// Spawn the worker task for a session. Must be called inside a Tokio
    /// runtime.
    pub(crate) fn start<T>(base_url: String, transport: T) -> Self
    where
        T: Transport + Send + Sync + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<(WireRequest, Reply)>();
        tokio::spawn(async move {
            while let Some((request, reply)) = rx.recv().await {
                let url = format!("{}{}", base_url, request.path);
                debug!(method = ?request.method, %url, "dispatching request");
                let result = transport.execute(&url, request).await;
                let _ = reply.send(result);
            }
        });
        Self { tx }
    }

    /// Enqueue a request. Ordering is fixed at this call, before any await;
    /// the returned receiver resolves once the worker has run the request.
    pub(crate) fn enqueue(
        &self,
        request: WireRequest,
    ) -> oneshot::Receiver<Result<WireResponse, Error>> {
        let (reply_tx, reply_rx) = oneshot::channel();
        // A send failure means the worker is gone; the dropped reply sender
        // surfaces as QueueClosed when awaited.
        let _ = self.tx.send((request, reply_tx));
        reply_rx
    }

    /// Enqueue a request and wait for its response.
    pub(crate) async fn execute(&self, request: WireRequest) -> Result<WireResponse, Error> {
        self.enqueue(request).await.map_err(|_| Error::QueueClosed)?
    }
}
