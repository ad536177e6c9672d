//! Fetch-retry loop and state publication
//!
//! One background worker owns the whole cycle: publish `Loading`, attempt a
//! fetch, and either publish `Ready` and stop, or publish `Error` with a
//! user-facing message, sleep a fixed delay, and try again. The loop never
//! gives up and supports no cancellation; every state transition is handed
//! to the sink synchronously, in chronological order.

use crate::config::Config;
use crate::error::{Error, FailureKind, Result};
use crate::grouper::GroupedItems;
use futures::TryStreamExt;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tracing::{debug, info, warn};

/// Status message published when a connectivity or I/O failure occurred
pub const NETWORK_ERROR_STATUS: &str = "Unable to download data from server. Retrying...";

/// Status message published for every other failure
pub const GENERIC_ERROR_STATUS: &str = "Unknown Error. Retrying...";

const USER_AGENT: &str = concat!("listfeed/", env!("CARGO_PKG_VERSION"));

/// State of the fetch loop as observed by the presentation side
#[derive(Clone, Debug, PartialEq)]
pub enum FetchState {
    /// An attempt is in progress
    Loading,
    /// The last attempt failed; carries the user-facing status message
    Error(String),
    /// The feed was fetched and grouped successfully
    Ready(Arc<GroupedItems>),
}

impl FetchState {
    /// User-facing status line for this state, `None` once data is ready
    pub fn status_message(&self) -> Option<&str> {
        match self {
            FetchState::Loading => Some("Loading..."),
            FetchState::Error(message) => Some(message),
            FetchState::Ready(_) => None,
        }
    }
}

/// Sink receiving every state transition from the worker
///
/// `publish` is called synchronously before the loop continues, so
/// implementations must not block: hand the state off and return.
pub trait StateSink: Send + Sync {
    /// Deliver one state transition
    fn publish(&self, state: FetchState);
}

impl StateSink for mpsc::UnboundedSender<FetchState> {
    fn publish(&self, state: FetchState) {
        // The presentation side may have gone away; the loop runs regardless
        let _ = self.send(state);
    }
}

/// Handle to the spawned worker task
pub struct FetchHandle {
    /// Receives every state transition in chronological order
    pub states: mpsc::UnboundedReceiver<FetchState>,
    /// Resolves with the grouped data once the loop succeeds
    pub task: tokio::task::JoinHandle<Arc<GroupedItems>>,
}

impl FetchHandle {
    /// Expose the transitions as a `Stream`, detaching the worker task
    pub fn into_state_stream(self) -> UnboundedReceiverStream<FetchState> {
        UnboundedReceiverStream::new(self.states)
    }
}

/// Owns the HTTP client and drives the fetch-retry loop
pub struct Fetcher {
    client: reqwest::Client,
    config: Config,
}

impl Fetcher {
    /// Create a new fetcher
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be created.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        // No request timeout: the loop itself retries indefinitely and no
        // shorter timeout is introduced
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self { client, config })
    }

    /// Run the fetch-retry loop to completion on the current task
    ///
    /// Publishes `Loading` before every attempt. A failed attempt publishes
    /// `Error` with the message for its failure class, sleeps the configured
    /// fixed delay, and loops. The first success publishes `Ready` and
    /// returns the grouped data.
    pub async fn run<S: StateSink>(&self, sink: &S) -> Arc<GroupedItems> {
        loop {
            sink.publish(FetchState::Loading);

            match self.attempt().await {
                Ok(groups) => {
                    let groups = Arc::new(groups);
                    info!(
                        groups = groups.len(),
                        items = groups.total_items(),
                        "feed ready"
                    );
                    sink.publish(FetchState::Ready(Arc::clone(&groups)));
                    return groups;
                }
                Err(error) => {
                    warn!(
                        error = %error,
                        kind = ?error.failure_kind(),
                        delay_secs = self.config.retry.delay.as_secs_f64(),
                        "fetch attempt failed, retrying"
                    );
                    sink.publish(FetchState::Error(status_message(&error).to_owned()));
                    tokio::time::sleep(self.config.retry.delay).await;
                }
            }
        }
    }

    /// Spawn the single worker task that owns the loop end to end
    pub fn spawn(self) -> FetchHandle {
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(async move { self.run(&tx).await });
        FetchHandle { states: rx, task }
    }

    /// One fetch attempt: download the body and group it
    async fn attempt(&self) -> Result<GroupedItems> {
        debug!(url = %self.config.endpoint, "requesting feed");

        let response = self
            .client
            .get(self.config.endpoint.clone())
            .send()
            .await?
            .error_for_status()?;

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.try_next().await? {
            body.extend_from_slice(&chunk);
        }
        debug!(bytes = body.len(), "feed body received");

        GroupedItems::from_slice(&body)
    }
}

fn status_message(error: &Error) -> &'static str {
    match error.failure_kind() {
        FailureKind::Network => NETWORK_ERROR_STATUS,
        FailureKind::Parse | FailureKind::Unknown => GENERIC_ERROR_STATUS,
    }
}
