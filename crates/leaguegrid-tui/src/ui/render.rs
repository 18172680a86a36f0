use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use leaguegrid_core::utils::logo_host;
use leaguegrid_core::LeagueView;

use crate::app::{App, AppState};

use super::cards::{render_league_card, render_skeleton_card};
use super::grid::{self, CARD_HEIGHT, SKELETON_COUNT};
use super::styles;

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(2), // Section title
            Constraint::Min(CARD_HEIGHT), // League grid
            Constraint::Length(4), // Live data info card
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_section_title(frame, app, chunks[1]);
    render_main_content(frame, app, chunks[2]);
    render_info_card(frame, app, chunks[3]);
    render_status_bar(frame, app, chunks[4]);

    match app.state {
        AppState::ShowingHelp => render_help_overlay(frame),
        AppState::ShowingDetail => render_detail_overlay(frame, app),
        AppState::ConfirmingQuit => render_quit_overlay(frame),
        AppState::Normal | AppState::Quitting => {}
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let title = "  ⚽ Football Leagues";
    let subtitle = "  Popular leagues worldwide";

    let status = app.network_status();
    let (dot, status_style) = if status.is_online() {
        ("● ", styles::success_style())
    } else {
        ("○ ", styles::error_style())
    };
    let status_span = Span::styled(format!("{}{} ", dot, status.label()), status_style);

    let mut line = Line::from(vec![
        Span::styled(title, styles::title_style()),
        Span::styled(subtitle, styles::muted_style()),
    ]);
    line.push_span(Span::raw(" ".repeat(right_padding(area.width, line.width(), &status_span))));
    line.push_span(status_span);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    frame.render_widget(Paragraph::new(vec![Line::from(""), line]).block(block), area);
}

fn render_section_title(frame: &mut Frame, app: &App, area: Rect) {
    let count_text = if app.fetch.loading {
        "Loading...".to_string()
    } else {
        format!("{} leagues found", app.fetch.league_count())
    };

    let mut line = Line::from(vec![
        Span::styled("  Popular Leagues", styles::highlight_style()),
        Span::styled(format!("  {}", count_text), styles::muted_style()),
    ]);

    let right = if app.is_refreshing() {
        Some(Span::styled("⟳ Refreshing... ", styles::highlight_style()))
    } else if !app.fetch.loading && app.fetch.data.is_some() {
        Some(Span::styled("[r] Refresh ", styles::help_key_style()))
    } else {
        None
    };

    if let Some(right) = right {
        line.push_span(Span::raw(" ".repeat(right_padding(area.width, line.width(), &right))));
        line.push_span(right);
    }

    frame.render_widget(Paragraph::new(line), area);
}

fn render_main_content(frame: &mut Frame, app: &App, area: Rect) {
    let area = Rect {
        x: area.x + 1,
        width: area.width.saturating_sub(2),
        ..area
    };

    match app.view() {
        LeagueView::Failed(message) => render_error_panel(frame, message, area),
        LeagueView::Loading => render_skeleton_grid(frame, app, area),
        LeagueView::Empty => render_empty_panel(frame, area),
        LeagueView::Leagues(leagues) => {
            let visible_rows = (area.height / CARD_HEIGHT) as usize;
            let first_row = grid::scroll_row(app.selection, app.columns, visible_rows);
            for (index, rect) in grid::cell_rects(area, app.columns, leagues.len(), first_row) {
                render_league_card(frame, rect, &leagues[index], index == app.selection);
            }
        }
    }
}

fn render_skeleton_grid(frame: &mut Frame, app: &App, area: Rect) {
    for (_, rect) in grid::cell_rects(area, app.columns, SKELETON_COUNT, 0) {
        render_skeleton_card(frame, rect);
    }
}

fn render_error_panel(frame: &mut Frame, message: &str, area: Rect) {
    let panel = centered_rect_fixed(56, 9, area);

    let lines = vec![
        Line::from(Span::styled("🏆", styles::muted_style())),
        Line::from(Span::styled("Failed to load leagues", styles::error_style())),
        Line::from(""),
        Line::from(Span::styled(message.to_string(), styles::muted_style())),
        Line::from(""),
        Line::from(vec![
            Span::styled("[r]", styles::help_key_style()),
            Span::styled(" Try Again", styles::help_desc_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::error_style());

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, panel);
}

fn render_empty_panel(frame: &mut Frame, area: Rect) {
    let panel = centered_rect_fixed(52, 7, area);

    let lines = vec![
        Line::from(Span::styled("🏆", styles::muted_style())),
        Line::from(Span::styled("No leagues found", styles::title_style())),
        Line::from(""),
        Line::from(Span::styled(
            "Try refreshing or check back later.",
            styles::muted_style(),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    let paragraph = Paragraph::new(lines).block(block).alignment(Alignment::Center);
    frame.render_widget(paragraph, panel);
}

fn render_info_card(frame: &mut Frame, app: &App, area: Rect) {
    let area = Rect {
        x: area.x + 1,
        width: area.width.saturating_sub(2),
        ..area
    };

    let lines = vec![
        Line::from(Span::styled(" 🏆 Live API Data", styles::info_card_style())),
        Line::from(Span::styled(
            format!(
                " Fetching data from RapidAPI's free football data service. Data is cached for {} between requests.",
                cache_window(app.config.freshness().as_secs())
            ),
            styles::muted_style(),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::info_card_style());

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let shortcuts = "[r]efresh | [?] help | [q]uit";

    let left_text = if let Some(ref msg) = app.status_message {
        format!(" {} ", msg)
    } else {
        format!(" Football Leagues · Updated {} ", app.last_updated())
    };
    let center_text = "● Live Data";
    let right_text = format!(" {} ", shortcuts);

    let width = area.width as usize;
    let center_len = Span::raw(center_text).width();
    let left_len = Span::raw(left_text.as_str()).width();
    let center_start = (width.saturating_sub(center_len)) / 2;
    let left_pad = center_start.saturating_sub(left_len);
    let right_start = center_start.max(left_len) + center_len;
    let right_pad = width
        .saturating_sub(right_start)
        .saturating_sub(Span::raw(right_text.as_str()).width());

    let status_line = Line::from(vec![
        Span::styled(left_text, styles::muted_style()),
        Span::raw(" ".repeat(left_pad)),
        Span::styled(center_text, styles::success_style()),
        Span::raw(" ".repeat(right_pad)),
        Span::styled(right_text, styles::muted_style()),
    ]);

    let paragraph = Paragraph::new(status_line).style(styles::status_bar_style());
    frame.render_widget(paragraph, area);
}

fn render_help_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(46, 17, frame.area());

    // Clear the area
    frame.render_widget(Clear, area);

    let version = env!("CARGO_PKG_VERSION");

    let key_line = |key: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(key, styles::help_key_style()),
            Span::styled(desc, styles::help_desc_style()),
        ])
    };

    let help_text = vec![
        Line::from(Span::styled("   ⚽ Football Leagues", styles::title_style())),
        Line::from(Span::styled(
            format!("   version {}", version),
            styles::muted_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(" Navigation", styles::highlight_style())),
        key_line("  ←↑↓→ hjkl ", "Move between cards"),
        key_line("  PgUp/PgDn ", "Jump three rows"),
        key_line("  Home/End  ", "First / last league"),
        key_line("  Enter     ", "League details"),
        key_line("  Esc       ", "Close overlay"),
        Line::from(""),
        Line::from(Span::styled(" Actions", styles::highlight_style())),
        key_line("  r / u     ", "Refresh from the API"),
        key_line("  q         ", "Quit"),
        Line::from(""),
        Line::from(vec![
            Span::styled("   Press ", styles::muted_style()),
            Span::styled("?", styles::help_key_style()),
            Span::styled(" or ", styles::muted_style()),
            Span::styled("Esc", styles::help_key_style()),
            Span::styled(" to close", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(help_text).block(block), area);
}

fn render_detail_overlay(frame: &mut Frame, app: &App) {
    let Some(league) = app.selected_league() else {
        return;
    };

    let area = centered_rect_fixed(64, 11, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(vec![
            Span::styled("  Name:      ", styles::highlight_style()),
            Span::raw(league.display_name().to_string()),
        ]),
        Line::from(vec![
            Span::styled("  Canonical: ", styles::highlight_style()),
            Span::raw(league.name.clone()),
        ]),
        Line::from(vec![
            Span::styled("  ID:        ", styles::highlight_style()),
            Span::raw(league.id.to_string()),
        ]),
        Line::from(vec![
            Span::styled("  Logo:      ", styles::highlight_style()),
            Span::styled(league.logo.clone(), styles::muted_style()),
        ]),
        Line::from(vec![
            Span::styled("  Served by: ", styles::highlight_style()),
            Span::raw(logo_host(&league.logo)),
        ]),
        Line::from(""),
        Line::from(Span::styled("  Press Esc to close", styles::muted_style())),
    ];

    let block = Block::default()
        .title(format!(" {} ", league.display_name()))
        .title_style(styles::title_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_quit_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(40, 6, frame.area());

    // Clear the area
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "   Are you sure you want to quit?",
            styles::highlight_style(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("   Press ", styles::muted_style()),
            Span::styled("[Y]", styles::help_key_style()),
            Span::styled(" to quit, ", styles::muted_style()),
            Span::styled("[N]", styles::help_key_style()),
            Span::styled(" to cancel", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Spaces between left-hand content `used` cells wide and `right`, so that
/// `right` ends at the edge of an area `width` cells wide. Counts display
/// cells, so wide glyphs take two.
fn right_padding(width: u16, used: usize, right: &Span) -> usize {
    (width as usize).saturating_sub(used).saturating_sub(right.width())
}

/// "5 minutes", "1 minute", "45 seconds"
fn cache_window(secs: u64) -> String {
    match secs {
        1 => "1 second".to_string(),
        60 => "1 minute".to_string(),
        s if s >= 60 && s % 60 == 0 => format!("{} minutes", s / 60),
        s => format!("{} seconds", s),
    }
}

/// Create a centered rectangle with fixed dimensions
fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}
