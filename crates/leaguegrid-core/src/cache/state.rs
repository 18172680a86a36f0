use chrono::{DateTime, Utc};

use crate::models::League;

/// Freshness check: true when `last_fetch` is less than `threshold` old.
///
/// A timestamp in the future (clock skew) counts as fresh.
pub fn is_fresh(now: DateTime<Utc>, last_fetch: Option<DateTime<Utc>>, threshold: chrono::Duration) -> bool {
    match last_fetch {
        Some(at) => now.signed_duration_since(at) < threshold,
        None => false,
    }
}

/// Fetch lifecycle for the league list.
///
/// Each completion replaces the whole value, so `error` and `data` never
/// come from the same fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchState {
    pub data: Option<Vec<League>>,
    pub loading: bool,
    pub error: Option<String>,
    pub last_fetch: Option<DateTime<Utc>>,
}

impl Default for FetchState {
    fn default() -> Self {
        Self::initial()
    }
}

impl FetchState {
    /// State at mount: nothing fetched yet, a fetch is about to start.
    pub fn initial() -> Self {
        Self {
            data: None,
            loading: true,
            error: None,
            last_fetch: None,
        }
    }

    /// A fetch has started. Previous data stays visible until it resolves.
    pub fn loading(self) -> Self {
        Self {
            loading: true,
            error: None,
            ..self
        }
    }

    pub fn succeeded(leagues: Vec<League>, at: DateTime<Utc>) -> Self {
        Self {
            data: Some(leagues),
            loading: false,
            error: None,
            last_fetch: Some(at),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            data: None,
            loading: false,
            error: Some(message.into()),
            last_fetch: None,
        }
    }

    /// Whether a non-forced fetch at `now` can be skipped.
    pub fn is_fresh(&self, now: DateTime<Utc>, threshold: chrono::Duration) -> bool {
        self.data.is_some() && is_fresh(now, self.last_fetch, threshold)
    }

    pub fn league_count(&self) -> usize {
        self.data.as_ref().map(Vec::len).unwrap_or(0)
    }

    /// What the rendering layer should show.
    pub fn view(&self) -> LeagueView<'_> {
        if let Some(ref message) = self.error {
            return LeagueView::Failed(message);
        }
        if self.loading {
            return LeagueView::Loading;
        }
        match self.data.as_deref() {
            Some(leagues) if !leagues.is_empty() => LeagueView::Leagues(leagues),
            _ => LeagueView::Empty,
        }
    }

    pub fn age_minutes(&self, now: DateTime<Utc>) -> Option<i64> {
        self.last_fetch.map(|at| (now - at).num_minutes())
    }

    /// Short "updated" label for the status bar.
    pub fn age_display(&self, now: DateTime<Utc>) -> String {
        match self.age_minutes(now) {
            None => "never".to_string(),
            Some(minutes) if minutes < 1 => "just now".to_string(),
            Some(minutes) if minutes < 60 => format!("{}m ago", minutes),
            Some(minutes) => {
                let hours = minutes / 60;
                if minutes % 60 >= 30 {
                    // Round up: 1h 30m+ becomes 2h
                    format!("{}h ago", hours + 1)
                } else {
                    format!("{}h ago", hours)
                }
            }
        }
    }
}

/// Rendering decision derived from a [`FetchState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeagueView<'a> {
    Loading,
    Failed(&'a str),
    Empty,
    Leagues(&'a [League]),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn league(id: i64) -> League {
        League {
            id,
            name: format!("League {}", id),
            localized_name: format!("League {}", id),
            logo: format!("https://example.com/{}.png", id),
        }
    }

    #[test]
    fn test_is_fresh_boundaries() {
        let now = Utc::now();
        let threshold = Duration::seconds(300);

        assert!(!is_fresh(now, None, threshold));
        assert!(is_fresh(now, Some(now), threshold));
        assert!(is_fresh(now, Some(now - Duration::seconds(299)), threshold));
        // Exactly the threshold is stale
        assert!(!is_fresh(now, Some(now - Duration::seconds(300)), threshold));
        assert!(!is_fresh(now, Some(now - Duration::minutes(10)), threshold));
        // Clock skew
        assert!(is_fresh(now, Some(now + Duration::seconds(30)), threshold));
    }

    #[test]
    fn test_initial_state() {
        let state = FetchState::initial();
        assert!(state.loading);
        assert!(state.data.is_none());
        assert!(state.error.is_none());
        assert!(state.last_fetch.is_none());
        assert_eq!(state.view(), LeagueView::Loading);
    }

    #[test]
    fn test_loading_keeps_data_and_clears_error() {
        let at = Utc::now();
        let state = FetchState::succeeded(vec![league(1)], at).loading();
        assert!(state.loading);
        assert_eq!(state.data, Some(vec![league(1)]));
        assert_eq!(state.last_fetch, Some(at));

        let state = FetchState::failed("HTTP error! status: 500").loading();
        assert!(state.loading);
        assert!(state.error.is_none());
    }

    #[test]
    fn test_success_clears_error() {
        let at = Utc::now();
        let state = FetchState::succeeded(vec![league(1)], at);
        assert!(!state.loading);
        assert!(state.error.is_none());
        assert_eq!(state.last_fetch, Some(at));
        assert_eq!(state.league_count(), 1);
    }

    #[test]
    fn test_failure_clears_data_and_timestamp() {
        let state = FetchState::failed("boom");
        assert!(!state.loading);
        assert!(state.data.is_none());
        assert!(state.last_fetch.is_none());
        assert_eq!(state.error.as_deref(), Some("boom"));
    }

    #[test]
    fn test_is_fresh_requires_data() {
        let now = Utc::now();
        let threshold = Duration::seconds(300);

        let mut state = FetchState::initial();
        state.last_fetch = Some(now);
        assert!(!state.is_fresh(now, threshold));

        let state = FetchState::succeeded(vec![], now);
        // An empty list is still data
        assert!(state.is_fresh(now, threshold));
    }

    #[test]
    fn test_view_precedence() {
        let at = Utc::now();
        let leagues = vec![league(1), league(2)];

        let state = FetchState::succeeded(leagues.clone(), at);
        assert_eq!(state.view(), LeagueView::Leagues(&leagues));

        assert_eq!(FetchState::succeeded(vec![], at).view(), LeagueView::Empty);
        assert_eq!(FetchState::failed("x").view(), LeagueView::Failed("x"));

        // Error wins over loading
        let mut state = FetchState::failed("x");
        state.loading = true;
        assert_eq!(state.view(), LeagueView::Failed("x"));

        let state = FetchState::succeeded(leagues, at).loading();
        assert_eq!(state.view(), LeagueView::Loading);
    }

    #[test]
    fn test_age_display() {
        let now = Utc::now();
        assert_eq!(FetchState::initial().age_display(now), "never");

        let state = FetchState::succeeded(vec![], now);
        assert_eq!(state.age_display(now), "just now");
        assert_eq!(state.age_display(now + Duration::minutes(4)), "4m ago");
        assert_eq!(state.age_display(now + Duration::minutes(80)), "1h ago");
        assert_eq!(state.age_display(now + Duration::minutes(95)), "2h ago");
        assert_eq!(state.age_display(now - Duration::minutes(3)), "just now");
    }
}
