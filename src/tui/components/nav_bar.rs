// Navigation bar component
//
// ◀ Prev | progress gauge with "n / total" | Next ▶
// Buttons render disabled at the deck edges. Returns the button rects so
// the App can hit-test mouse clicks against the frame actually drawn.

use crate::tui::app::App;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols,
    text::Line,
    widgets::{Block, Borders, LineGauge, Paragraph},
    Frame,
};

const PREV_LABEL: &str = "◀ Prev";
const NEXT_LABEL: &str = "Next ▶";
const BUTTON_WIDTH: u16 = 10;

/// Rects of the Prev and Next buttons
pub struct NavHits {
    pub prev: Rect,
    pub next: Rect,
}

pub fn render(f: &mut Frame, area: Rect, app: &App) -> NavHits {
    let theme = &app.theme;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border))
        .title_bottom(Line::styled(
            format!(" {} ", app.focus_hint()),
            Style::default().fg(theme.muted),
        ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(BUTTON_WIDTH),
            Constraint::Min(4),
            Constraint::Length(BUTTON_WIDTH),
        ])
        .split(inner);
    let (prev, gauge_area, next) = (cols[0], cols[1], cols[2]);

    let button = |label: &'static str, enabled: bool| {
        let style = if enabled {
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.disabled)
        };
        Paragraph::new(label)
            .style(style)
            .alignment(Alignment::Center)
    };

    f.render_widget(button(PREV_LABEL, !app.navigator.is_first()), prev);
    f.render_widget(button(NEXT_LABEL, !app.navigator.is_last()), next);

    let progress = app.progress();
    let gauge = LineGauge::default()
        .ratio(progress.ratio)
        .label(Line::styled(
            format!("{} ", progress.label),
            Style::default().fg(theme.foreground),
        ))
        .line_set(symbols::line::THICK)
        .filled_style(Style::default().fg(theme.accent))
        .unfilled_style(Style::default().fg(theme.gauge_track));
    f.render_widget(gauge, gauge_area);

    NavHits { prev, next }
}
