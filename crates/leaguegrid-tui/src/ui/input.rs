//! Keyboard input handling for the TUI.
//!
//! Translates key events into application state changes.

use crossterm::event::{KeyCode, KeyEvent};

use crate::app::{App, AppState};

use super::grid::Move;

/// Handle keyboard input. Returns true if the app should quit.
pub fn handle_input(app: &mut App, key: KeyEvent) -> bool {
    // Handle help overlay
    if matches!(app.state, AppState::ShowingHelp) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.state = AppState::Normal;
        }
        return false;
    }

    // Handle detail overlay
    if matches!(app.state, AppState::ShowingDetail) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
            app.state = AppState::Normal;
        }
        return false;
    }

    // Handle quit confirmation
    if matches!(app.state, AppState::ConfirmingQuit) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.state = AppState::Quitting;
                return true;
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.state = AppState::Normal;
            }
            _ => {}
        }
        return false;
    }

    match key.code {
        KeyCode::Char('q') => app.state = AppState::ConfirmingQuit,
        KeyCode::Char('?') => app.state = AppState::ShowingHelp,
        KeyCode::Char('r') | KeyCode::Char('u') => {
            if app.can_refresh() {
                app.refresh();
            }
        }
        KeyCode::Enter => {
            if app.selected_league().is_some() {
                app.state = AppState::ShowingDetail;
            }
        }
        KeyCode::Esc => app.status_message = None,
        code => {
            if let Some(mv) = movement(code) {
                app.move_selection(mv);
            }
        }
    }

    false
}

fn movement(code: KeyCode) -> Option<Move> {
    let mv = match code {
        KeyCode::Up | KeyCode::Char('k') => Move::Up,
        KeyCode::Down | KeyCode::Char('j') => Move::Down,
        KeyCode::Left | KeyCode::Char('h') => Move::Left,
        KeyCode::Right | KeyCode::Char('l') => Move::Right,
        KeyCode::PageUp => Move::PageUp,
        KeyCode::PageDown => Move::PageDown,
        KeyCode::Home | KeyCode::Char('g') => Move::First,
        KeyCode::End | KeyCode::Char('G') => Move::Last,
        _ => return None,
    };
    Some(mv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use crossterm::event::KeyModifiers;
    use leaguegrid_core::{Config, League, LeagueDataCache, LeagueSource};

    struct StaticSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl LeagueSource for StaticSource {
        async fn fetch_leagues(&self) -> anyhow::Result<Vec<League>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok((1..=4)
                .map(|id| League {
                    id,
                    name: format!("League {}", id),
                    localized_name: String::new(),
                    logo: String::new(),
                })
                .collect())
        }

        fn name(&self) -> &str {
            "static"
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    async fn loaded_app() -> (App, Arc<StaticSource>) {
        let source = Arc::new(StaticSource {
            calls: AtomicUsize::new(0),
        });
        let cache = LeagueDataCache::new(source.clone(), Duration::from_secs(300));
        let mut app = App::with_cache(Config::default(), cache, None);
        app.set_viewport_width(80);
        app.start();
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        app.sync();
        (app, source)
    }

    #[tokio::test]
    async fn test_quit_requires_confirmation() {
        let (mut app, _) = loaded_app().await;

        assert!(!handle_input(&mut app, key(KeyCode::Char('q'))));
        assert_eq!(app.state, AppState::ConfirmingQuit);

        assert!(!handle_input(&mut app, key(KeyCode::Char('n'))));
        assert_eq!(app.state, AppState::Normal);

        handle_input(&mut app, key(KeyCode::Char('q')));
        assert!(handle_input(&mut app, key(KeyCode::Char('y'))));
        assert_eq!(app.state, AppState::Quitting);
    }

    #[tokio::test]
    async fn test_help_overlay_swallows_keys() {
        let (mut app, source) = loaded_app().await;

        handle_input(&mut app, key(KeyCode::Char('?')));
        assert_eq!(app.state, AppState::ShowingHelp);

        // Refresh is ignored while help is open
        handle_input(&mut app, key(KeyCode::Char('r')));
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);

        handle_input(&mut app, key(KeyCode::Esc));
        assert_eq!(app.state, AppState::Normal);
    }

    #[tokio::test]
    async fn test_refresh_keys_force_fetch() {
        let (mut app, _) = loaded_app().await;

        handle_input(&mut app, key(KeyCode::Char('r')));
        assert!(app.fetch.loading);
        assert!(app.is_refreshing());
        assert!(app.status_message.is_none());
    }

    #[tokio::test]
    async fn test_repeated_refresh_is_ignored_while_refreshing() {
        let (mut app, source) = loaded_app().await;

        handle_input(&mut app, key(KeyCode::Char('r')));
        handle_input(&mut app, key(KeyCode::Char('u')));
        handle_input(&mut app, key(KeyCode::Char('r')));
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }

        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_navigation_and_detail() {
        let (mut app, _) = loaded_app().await;

        handle_input(&mut app, key(KeyCode::Char('l')));
        handle_input(&mut app, key(KeyCode::Down));
        assert_eq!(app.selection, 3);

        handle_input(&mut app, key(KeyCode::Enter));
        assert_eq!(app.state, AppState::ShowingDetail);
        assert_eq!(app.selected_league().map(|l| l.id), Some(4));

        handle_input(&mut app, key(KeyCode::Esc));
        assert_eq!(app.state, AppState::Normal);

        handle_input(&mut app, key(KeyCode::Home));
        assert_eq!(app.selection, 0);
    }

    #[test]
    fn test_movement_keys() {
        assert_eq!(movement(KeyCode::Char('k')), Some(Move::Up));
        assert_eq!(movement(KeyCode::End), Some(Move::Last));
        assert_eq!(movement(KeyCode::Char('x')), None);
    }
}
