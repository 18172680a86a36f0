use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::api::LeagueSource;

use super::state::FetchState;

/// Message used when a failure renders as an empty string.
const FALLBACK_ERROR: &str = "Failed to fetch leagues";

/// In-memory cache for the popular leagues list.
///
/// Clone is cheap and every clone shares the same state. Consumers read the
/// state through [`snapshot`](Self::snapshot) or [`subscribe`](Self::subscribe);
/// only the cache writes it.
///
/// Overlapping fetches are not serialised: each one runs to completion and
/// whichever resolves last overwrites the state.
#[derive(Clone)]
pub struct LeagueDataCache {
    inner: Arc<Inner>,
}

struct Inner {
    source: Arc<dyn LeagueSource>,
    state: watch::Sender<FetchState>,
    freshness: chrono::Duration,
    in_flight: AtomicUsize,
}

impl LeagueDataCache {
    pub fn new(source: Arc<dyn LeagueSource>, freshness: Duration) -> Self {
        let (state, _) = watch::channel(FetchState::initial());
        let freshness = chrono::Duration::from_std(freshness).unwrap_or(chrono::Duration::MAX);

        Self {
            inner: Arc::new(Inner {
                source,
                state,
                freshness,
                in_flight: AtomicUsize::new(0),
            }),
        }
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> FetchState {
        self.inner.state.borrow().clone()
    }

    /// Receiver that is notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<FetchState> {
        self.inner.state.subscribe()
    }

    pub fn in_flight(&self) -> usize {
        self.inner.in_flight.load(Ordering::SeqCst)
    }

    /// Fetch the leagues unless cached data is still fresh.
    ///
    /// With `force_refresh` the freshness check is skipped and a request is
    /// always issued. Failures end up in the state's `error` field.
    pub async fn get_leagues(&self, force_refresh: bool) {
        if let Some(guard) = self.begin_fetch(force_refresh) {
            self.run_fetch(guard).await;
        }
    }

    /// Like [`get_leagues`](Self::get_leagues), but the freshness check and
    /// the switch to `loading` happen before this returns, and the request
    /// runs on a spawned task. Returns `None` when the call was a no-op.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn_get_leagues(&self, force_refresh: bool) -> Option<JoinHandle<()>> {
        let guard = self.begin_fetch(force_refresh)?;
        let cache = self.clone();
        Some(tokio::spawn(async move {
            cache.run_fetch(guard).await;
        }))
    }

    /// Force a new fetch in the background.
    pub fn refetch(&self) -> Option<JoinHandle<()>> {
        self.spawn_get_leagues(true)
    }

    /// Apply the freshness policy and, if a fetch is needed, move to
    /// `loading`. The returned guard owns the in-flight slot until the fetch
    /// resolves or is dropped.
    fn begin_fetch(&self, force_refresh: bool) -> Option<FetchGuard> {
        let now = Utc::now();
        let mut started = false;

        self.inner.state.send_if_modified(|state| {
            if !force_refresh && state.is_fresh(now, self.inner.freshness) {
                debug!(age = %state.age_display(now), "League data still fresh, skipping fetch");
                return false;
            }
            *state = std::mem::take(state).loading();
            started = true;
            true
        });

        if !started {
            return None;
        }

        let previous = self.inner.in_flight.fetch_add(1, Ordering::SeqCst);
        if previous > 0 {
            debug!(in_flight = previous + 1, "Fetch started while another is in flight; last to resolve wins");
        }
        Some(FetchGuard {
            inner: Arc::clone(&self.inner),
            started_at: now,
            resolved: false,
        })
    }

    async fn run_fetch(&self, mut guard: FetchGuard) {
        let source = self.inner.source.name().to_string();
        let started_at = guard.started_at;
        debug!(%source, %started_at, "Fetching leagues");

        let next = match self.inner.source.fetch_leagues().await {
            Ok(leagues) => {
                info!(%source, count = leagues.len(), "Leagues fetched");
                FetchState::succeeded(leagues, started_at)
            }
            Err(e) => {
                let message = failure_message(&e);
                warn!(%source, error = %message, "League fetch failed");
                FetchState::failed(message)
            }
        };

        self.inner.state.send_replace(next);
        guard.resolved = true;
    }
}

/// Releases the in-flight slot of one fetch. A fetch whose future is dropped
/// before it resolves leaves the state as it was, minus `loading` once no
/// other fetch is running.
struct FetchGuard {
    inner: Arc<Inner>,
    started_at: DateTime<Utc>,
    resolved: bool,
}

impl Drop for FetchGuard {
    fn drop(&mut self) {
        let remaining = self.inner.in_flight.fetch_sub(1, Ordering::SeqCst) - 1;
        if self.resolved || remaining > 0 {
            return;
        }
        warn!(started_at = %self.started_at, "League fetch abandoned before it resolved");
        self.inner.state.send_if_modified(|state| {
            let was_loading = state.loading;
            state.loading = false;
            was_loading
        });
    }
}

/// Best-effort human-readable message for a failed fetch.
pub fn failure_message(err: &anyhow::Error) -> String {
    // Alternate form includes the source chain ("context: cause: cause")
    let message = format!("{:#}", err);
    if message.trim().is_empty() {
        FALLBACK_ERROR.to_string()
    } else {
        message
    }
}

// ============================================================================
// Tests
// ============================================================================
