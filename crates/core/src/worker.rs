//! # Filter Worker
//!
//! Catalog scans run on a dedicated thread so the caller's context never
//! blocks on them. Callers talk to the thread only through messages: every
//! request carries its own immutable catalog snapshot and gets its reply on
//! a one-shot channel. The thread handles one message at a time, in arrival
//! order, and keeps nothing between messages.
//!
//! Every request is stamped with a fresh [`RequestId`] which the response
//! echoes, so a caller that has moved on can recognise and drop late replies.

use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    thread::JoinHandle,
};

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use crate::{
    errors::{PlannerError, PlannerResult},
    filter::filter_lectures,
    models::search::{FilterRequest, FilterResponse, RequestId},
};

/// Operations sent to the worker thread.
enum WorkerOp {
    Filter {
        request: FilterRequest,
        tx: oneshot::Sender<PlannerResult<FilterResponse>>,
    },
}

struct Shared {
    in_tx: mpsc::UnboundedSender<WorkerOp>,
    next_id: AtomicU64,
    /// The thread exits once every handle is dropped and the channel closes.
    #[allow(dead_code)]
    join_handle: JoinHandle<()>,
}

/// Handle to the filter thread. Clones share the same thread.
#[derive(Clone)]
pub struct FilterWorker {
    shared: Arc<Shared>,
}

/// A request that has been posted but not yet answered.
pub struct PendingFilter {
    pub request_id: RequestId,
    rx: oneshot::Receiver<PlannerResult<FilterResponse>>,
}

impl PendingFilter {
    pub async fn response(self) -> PlannerResult<FilterResponse> {
        self.rx
            .await
            .map_err(|_| PlannerError::Worker("Filter worker dropped the request".to_string()))?
    }
}

impl FilterWorker {
    /// Starts the worker thread.
    pub fn spawn() -> PlannerResult<Self> {
        let (in_tx, mut in_rx) = mpsc::unbounded_channel::<WorkerOp>();

        let join_handle = std::thread::Builder::new()
            .name("filter-worker".to_string())
            .spawn(move || {
                while let Some(op) = in_rx.blocking_recv() {
                    match op {
                        WorkerOp::Filter { request, tx } => {
                            let result = filter_lectures(
                                &request.lectures,
                                &request.search_options,
                                request.page,
                                request.page_size,
                            )
                            .map(|page| FilterResponse {
                                request_id: request.request_id,
                                items: page.items,
                                total: page.total,
                            });

                            // The caller may have stopped waiting.
                            let _ = tx.send(result);
                        }
                    }
                }
                debug!("Filter worker channel closed, thread exiting");
            })
            .map_err(|e| PlannerError::Internal(Box::new(e)))?;

        info!("Filter worker started");

        Ok(Self {
            shared: Arc::new(Shared {
                in_tx,
                next_id: AtomicU64::new(1),
                join_handle,
            }),
        })
    }

    /// Stamps `request` with a new id and queues it on the worker thread.
    pub fn post(&self, mut request: FilterRequest) -> PlannerResult<PendingFilter> {
        let request_id = RequestId(self.shared.next_id.fetch_add(1, Ordering::Relaxed));
        request.request_id = request_id;

        debug!(
            "Posting filter request {:?}: page={}, page_size={}",
            request_id, request.page, request.page_size
        );

        let (tx, rx) = oneshot::channel();
        self.shared
            .in_tx
            .send(WorkerOp::Filter { request, tx })
            .map_err(|_| PlannerError::Worker("Filter worker is not running".to_string()))?;

        Ok(PendingFilter { request_id, rx })
    }

    /// Posts `request` and waits for its reply.
    pub async fn filter(&self, request: FilterRequest) -> PlannerResult<FilterResponse> {
        self.post(request)?.response().await
    }
}
