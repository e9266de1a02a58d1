//! The batch option feed.
//!
//! Dependent forms (next-stage selects, outdoor transfer screens) need
//! near-real-time batch state without a push channel. The feed keeps a
//! snapshot of batch options behind an `RwLock`, reloaded on demand or
//! by a background poller, and stamps every swap with a monotonic
//! revision so writers can detect a stale read before saving.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::{debug, info, warn};

use plantlab_client::Api;
use plantlab_core::Error;

use crate::derive::{derive_batches, Collection};
use crate::stage::Stage;

/// Observed refresh cadence of the dependent screens.
pub const POLL_INTERVAL: Duration = Duration::from_secs(5);

/// One selectable batch.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOption {
    /// `batch_code`.
    pub value: String,
    /// "CODE (crop)".
    pub label: String,
    /// Current stage, when the endpoint reports one.
    pub stage: Option<Stage>,
}

/// Which server-side derivation backs the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchEndpoint {
    /// `/batches/indoor-batches` — active indoor batches with their
    /// latest subculture stage.
    Indoor,
    /// `/batches/outdoor-ready-batches` — Stage-8 batches cleared for
    /// hardening.
    OutdoorReady,
}

impl BatchEndpoint {
    pub fn path(self) -> &'static str {
        match self {
            BatchEndpoint::Indoor => "/batches/indoor-batches",
            BatchEndpoint::OutdoorReady => "/batches/outdoor-ready-batches",
        }
    }
}

/// Where the options come from. Production uses the HTTP API; tests
/// inject a canned source.
pub trait OptionSource: Send + Sync {
    fn fetch(&self) -> Result<Vec<BatchOption>, Error>;
}

/// HTTP-backed source for one batch endpoint.
pub struct ApiSource {
    api: Api,
    endpoint: BatchEndpoint,
}

impl ApiSource {
    pub fn new(api: Api, endpoint: BatchEndpoint) -> Self {
        ApiSource { api, endpoint }
    }
}

impl OptionSource for ApiSource {
    fn fetch(&self) -> Result<Vec<BatchOption>, Error> {
        let rows = self.api.list(self.endpoint.path())?;
        Ok(rows
            .iter()
            .filter_map(|row| {
                let code = row.get_str("batch_code")?;
                let label = match row.get_str("crop_name") {
                    Some(crop) => format!("{code} ({crop})"),
                    None => code.clone(),
                };
                let stage = row
                    .get_str("subculture_stage")
                    .and_then(|s| s.parse::<Stage>().ok());
                Some(BatchOption { value: code, label, stage })
            })
            .collect())
    }
}

/// Client-side source: pull the three indoor record tables and run the
/// latest-date-wins derivation locally, the way the indoor timeline
/// screen does. Useful against servers that lack the pre-derived
/// `/batches/*` endpoints, and for cross-checking them.
pub struct DerivedSource {
    api: Api,
}

impl DerivedSource {
    pub fn new(api: Api) -> Self {
        DerivedSource { api }
    }
}

impl OptionSource for DerivedSource {
    fn fetch(&self) -> Result<Vec<BatchOption>, Error> {
        let subs = self.api.list("/indoor/subculturing")?;
        let incs = self.api.list("/indoor/incubation")?;
        let samples = self.api.list("/indoor/sampling")?;
        let batches = derive_batches(&[
            Collection::subculturing(&subs),
            Collection::incubation(&incs),
            Collection::sampling(&samples),
        ]);
        Ok(batches
            .into_iter()
            .map(|b| {
                let label = b.label();
                BatchOption { value: b.batch_code, label, stage: b.stage }
            })
            .collect())
    }
}

/// A revision-stamped copy of the feed contents.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedSnapshot {
    pub revision: u64,
    pub options: Vec<BatchOption>,
}

struct FeedState {
    revision: u64,
    options: Vec<BatchOption>,
}

/// The shared batch option feed.
pub struct BatchFeed {
    source: Box<dyn OptionSource>,
    state: RwLock<FeedState>,
}

impl BatchFeed {
    pub fn new(source: Box<dyn OptionSource>) -> Self {
        BatchFeed {
            source,
            state: RwLock::new(FeedState { revision: 0, options: Vec::new() }),
        }
    }

    pub fn over_api(api: Api, endpoint: BatchEndpoint) -> Self {
        Self::new(Box::new(ApiSource::new(api, endpoint)))
    }

    /// Feed backed by the local derivation instead of a `/batches/*`
    /// endpoint.
    pub fn over_derived(api: Api) -> Self {
        Self::new(Box::new(DerivedSource::new(api)))
    }

    /// Fetch fresh options and swap the snapshot, bumping the revision.
    /// On failure the prior snapshot (and revision) stay in place.
    pub fn reload(&self) -> Result<(), Error> {
        match self.source.fetch() {
            Ok(options) => {
                let mut state = self.state.write().expect("feed lock poisoned");
                state.revision += 1;
                state.options = options;
                debug!(revision = state.revision, count = state.options.len(), "batch feed reloaded");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "batch feed reload failed, keeping prior snapshot");
                Err(e)
            }
        }
    }

    pub fn snapshot(&self) -> FeedSnapshot {
        let state = self.state.read().expect("feed lock poisoned");
        FeedSnapshot { revision: state.revision, options: state.options.clone() }
    }

    pub fn revision(&self) -> u64 {
        self.state.read().expect("feed lock poisoned").revision
    }

    /// Stage of a batch in the current snapshot.
    pub fn stage_of(&self, batch_code: &str) -> Option<Stage> {
        let state = self.state.read().expect("feed lock poisoned");
        state
            .options
            .iter()
            .find(|o| o.value == batch_code)
            .and_then(|o| o.stage)
    }

    /// Fail with a conflict if the feed moved past `revision`.
    pub fn check_revision(&self, revision: u64) -> Result<(), Error> {
        let current = self.revision();
        if current != revision {
            return Err(Error::Conflict(format!(
                "batch state changed underneath this edit (revision {revision} -> {current}); reload and retry"
            )));
        }
        Ok(())
    }
}

/// Handle to a running poller. Dropping it without `stop()` leaves the
/// thread running for the life of the process.
pub struct PollerHandle {
    stop: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

impl PollerHandle {
    /// Signal the poller and wait for it to exit.
    pub fn stop(self) {
        self.stop.store(true, Ordering::Relaxed);
        let _ = self.handle.join();
    }
}

/// Start a background thread reloading `feed` every `interval`.
pub fn start_poller(feed: Arc<BatchFeed>, interval: Duration) -> PollerHandle {
    let stop = Arc::new(AtomicBool::new(false));
    let stop_flag = Arc::clone(&stop);

    let handle = std::thread::spawn(move || {
        info!("batch feed poller started (interval={interval:?})");
        while !stop_flag.load(Ordering::Relaxed) {
            if let Err(e) = feed.reload() {
                warn!(error = %e, "batch feed poll failed");
            }
            // Sleep in short slices so stop() returns promptly.
            let mut remaining = interval;
            while !stop_flag.load(Ordering::Relaxed) && remaining > Duration::ZERO {
                let step = remaining.min(Duration::from_millis(100));
                std::thread::sleep(step);
                remaining = remaining.saturating_sub(step);
            }
        }
        info!("batch feed poller stopped");
    });

    PollerHandle { stop, handle }
}
