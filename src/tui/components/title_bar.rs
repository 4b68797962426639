// Title bar component
//
// Deck title on the left, current slide title after a separator, help
// hint on the right border.

use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let mut spans = vec![Span::styled(
        format!(" {}", app.deck.title()),
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(slide) = app.current_slide() {
        spans.push(Span::styled(" ──── ", Style::default().fg(theme.border)));
        spans.push(Span::styled(
            slide.title.clone(),
            Style::default().fg(theme.foreground),
        ));
    }

    let title = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.border))
            .title_top(
                Line::styled(" F1 help ", Style::default().fg(theme.muted)).right_aligned(),
            ),
    );

    f.render_widget(title, area);
}
