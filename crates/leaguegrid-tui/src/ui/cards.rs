use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use leaguegrid_core::utils::truncate_string;
use leaguegrid_core::League;

use super::styles;

/// Stands in for the logo image, which a terminal can't show.
const LOGO_GLYPH: &str = "⚽";

/// Columns taken by the glyph and its padding.
const LOGO_WIDTH: usize = 4;

/// A placeholder bar covering `fraction` of `width`, at least one cell.
pub fn skeleton_bar(width: usize, fraction: f32) -> String {
    let cells = ((width as f32) * fraction).round() as usize;
    "░".repeat(cells.clamp(1, width.max(1)))
}

pub fn render_league_card(frame: &mut Frame, area: Rect, league: &League, selected: bool) {
    let text_width = (area.width as usize).saturating_sub(2 + LOGO_WIDTH);

    let title_style = if selected {
        styles::selected_style().fg(styles::PRIMARY)
    } else {
        styles::list_item_style()
    };

    let lines = vec![
        Line::from(vec![
            Span::raw(format!(" {} ", LOGO_GLYPH)),
            Span::styled(truncate_string(league.display_name(), text_width), title_style),
        ]),
        Line::from(vec![
            Span::raw(" ".repeat(LOGO_WIDTH)),
            Span::styled(truncate_string(&league.name, text_width), styles::muted_style()),
        ]),
        Line::from(vec![
            Span::raw(" ".repeat(LOGO_WIDTH)),
            Span::styled(format!(" {} ", league.id_badge()), styles::badge_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(selected));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

pub fn render_skeleton_card(frame: &mut Frame, area: Rect) {
    let text_width = (area.width as usize).saturating_sub(2 + LOGO_WIDTH);

    let lines = vec![
        Line::from(vec![
            Span::styled(" ▒▒ ", styles::skeleton_style()),
            Span::styled(skeleton_bar(text_width, 0.75), styles::skeleton_style()),
        ]),
        Line::from(vec![
            Span::raw(" ".repeat(LOGO_WIDTH)),
            Span::styled(skeleton_bar(text_width, 0.5), styles::skeleton_style()),
        ]),
        Line::from(vec![
            Span::raw(" ".repeat(LOGO_WIDTH)),
            Span::styled(skeleton_bar(text_width, 0.25), styles::skeleton_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(false));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
