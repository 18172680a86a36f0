//! Application state management for leaguegrid.
//!
//! `App` holds the UI state and a handle to the league cache. Fetches run on
//! spawned tasks; each frame the app copies the cache's latest snapshot.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use tracing::{debug, info};

use leaguegrid_core::network::{probe_target, NetworkMonitor, NetworkStatus};
use leaguegrid_core::{ApiClient, Config, FetchState, League, LeagueDataCache, LeagueView};

use crate::ui::grid::{self, Move};

// ============================================================================
// Constants
// ============================================================================

/// The refresh indicator stays up at least this long after a manual refresh.
const MIN_REFRESH_INDICATOR: Duration = Duration::from_millis(500);

/// How often the app asks the cache to revalidate loaded data. The cache
/// itself decides whether the data is stale enough to refetch.
const REVALIDATE_INTERVAL: Duration = Duration::from_secs(30);

/// Status message shown when a refresh starts while the API host is unreachable.
pub const OFFLINE_REFRESH_NOTICE: &str = "Offline: refresh may fail";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    ShowingHelp,
    ShowingDetail,
    ConfirmingQuit,
    Quitting,
}

pub struct App {
    pub config: Config,
    cache: LeagueDataCache,
    network: Option<NetworkMonitor>,

    pub state: AppState,

    /// Latest copy of the cache state, refreshed every tick
    pub fetch: FetchState,

    pub selection: usize,
    pub columns: usize,

    refresh_started: Option<Instant>,
    last_revalidate: Instant,

    pub status_message: Option<String>,
}

impl App {
    /// Create the app from configuration. Fails if the API isn't configured.
    pub fn new(config: Config) -> Result<Self> {
        let settings = config.api_settings()?;
        let client = ApiClient::new(&settings)?;
        debug!(endpoint = %settings.endpoint, "API client configured");

        let network = probe_target(&settings.endpoint)
            .map(|target| NetworkMonitor::spawn(target, config.probe_interval()));

        let cache = LeagueDataCache::new(Arc::new(client), config.freshness());
        Ok(Self::with_cache(config, cache, network))
    }

    pub fn with_cache(config: Config, cache: LeagueDataCache, network: Option<NetworkMonitor>) -> Self {
        let fetch = cache.snapshot();
        Self {
            config,
            cache,
            network,
            state: AppState::Normal,
            fetch,
            selection: 0,
            columns: 1,
            refresh_started: None,
            last_revalidate: Instant::now(),
            status_message: None,
        }
    }

    /// Initial load, run once the UI is up.
    pub fn start(&mut self) {
        info!("Loading popular leagues");
        self.cache.spawn_get_leagues(false);
        self.sync();
    }

    /// Copy the latest cache state and keep the selection in range.
    pub fn sync(&mut self) {
        self.fetch = self.cache.snapshot();
        let count = self.fetch.league_count();
        if self.selection >= count {
            self.selection = count.saturating_sub(1);
        }
        if self.state == AppState::ShowingDetail && self.selected_league().is_none() {
            self.state = AppState::Normal;
        }
    }

    /// Per-frame housekeeping: pick up new state and revalidate loaded data.
    pub fn tick(&mut self, now: Instant) {
        self.sync();

        if now.duration_since(self.last_revalidate) >= REVALIDATE_INTERVAL {
            self.last_revalidate = now;
            // Only revalidate data we have; failures wait for the user
            if self.fetch.data.is_some() && !self.fetch.loading {
                if self.cache.spawn_get_leagues(false).is_some() {
                    debug!("Cached leagues went stale, revalidating");
                }
                self.sync();
            }
        }

        if !self.fetch.loading && self.status_message.as_deref() == Some(OFFLINE_REFRESH_NOTICE) {
            self.status_message = None;
        }

        if let Some(started) = self.refresh_started {
            if !self.fetch.loading && now.duration_since(started) >= MIN_REFRESH_INDICATOR {
                self.refresh_started = None;
            }
        }
    }

    /// Force a refetch (the refresh / try again action).
    pub fn refresh(&mut self) {
        info!("Manual refresh requested");
        self.refresh_started = Some(Instant::now());
        self.status_message = if self.network_status().is_online() {
            None
        } else {
            Some(OFFLINE_REFRESH_NOTICE.to_string())
        };
        self.cache.refetch();
        self.sync();
    }

    /// Refresh is disabled while the indicator is up, except for Try Again
    /// on the error panel.
    pub fn can_refresh(&self) -> bool {
        !self.is_refreshing() || matches!(self.view(), LeagueView::Failed(_))
    }

    pub fn is_refreshing(&self) -> bool {
        self.refresh_started.is_some()
    }

    pub fn network_status(&self) -> NetworkStatus {
        self.network
            .as_ref()
            .map(NetworkMonitor::status)
            .unwrap_or(NetworkStatus::Online)
    }

    pub fn view(&self) -> LeagueView<'_> {
        self.fetch.view()
    }

    pub fn leagues(&self) -> &[League] {
        self.fetch.data.as_deref().unwrap_or(&[])
    }

    pub fn selected_league(&self) -> Option<&League> {
        self.leagues().get(self.selection)
    }

    /// Update the grid geometry from the terminal width.
    pub fn set_viewport_width(&mut self, width: u16) {
        self.columns = grid::grid_columns(width);
    }

    pub fn move_selection(&mut self, mv: Move) {
        let count = self.leagues().len();
        self.selection = grid::navigate(self.selection, count, self.columns, mv);
    }

    /// "Updated ..." label for the status bar.
    pub fn last_updated(&self) -> String {
        self.fetch.age_display(chrono::Utc::now())
    }
}
