// Modal overlay rendering
//
// - Help modal: keyboard shortcuts and current theme/transport
// - Logs modal: the in-memory log buffer, newest at the bottom

use crate::logging::{LogEntry, LogLevel};
use crate::tui::app::App;
use crate::tui::modal::Modal;
use crate::tui::theme::Theme;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Log entries loaded into the overlay
const LOG_WINDOW: usize = 500;

/// Render a modal dialog as a centered overlay
pub fn render(f: &mut Frame, modal: &Modal, app: &App) {
    match modal {
        Modal::Help => render_help(f, app),
        Modal::Logs { from_bottom } => render_logs(f, app, *from_bottom),
    }
}

/// Calculate centered rect for modal dialog
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

fn render_help(f: &mut Frame, app: &App) {
    let theme = &app.theme;
    let key_style = Style::default().fg(theme.accent);
    let desc_style = Style::default().fg(theme.foreground);
    let header_style = Style::default()
        .fg(theme.accent)
        .add_modifier(Modifier::BOLD);

    // "    key         description"
    let kb = |key: &str, desc: &str| -> Line {
        Line::from(vec![
            Span::raw("    "),
            Span::styled(format!("{:<12}", key), key_style),
            Span::styled(desc.to_string(), desc_style),
        ])
    };

    let content = Text::from(vec![
        Line::raw(""),
        Line::from(Span::styled("  Slides", header_style)),
        kb("← / →", "Previous / next slide"),
        kb("Click", "◀ Prev / Next ▶"),
        Line::raw(""),
        Line::from(Span::styled("  Contact form", header_style)),
        kb("Tab / ↓", "Next field"),
        kb("S-Tab / ↑", "Previous field"),
        kb("Enter", "Next field, or send on Send"),
        kb("Esc", "Leave the form"),
        Line::raw(""),
        Line::from(Span::styled("  General", header_style)),
        kb("F1", "Toggle this help"),
        kb("F2", "System logs"),
        kb("t", "Toggle light/dark"),
        kb("q", "Quit (outside the form)"),
        kb("Ctrl+C", "Quit"),
        Line::raw(""),
        Line::from(vec![
            Span::styled("  Theme: ", desc_style),
            Span::styled(theme.kind.name(), key_style),
            Span::styled("  |  Slides: ", desc_style),
            Span::styled(app.deck.len().to_string(), key_style),
        ]),
    ]);

    let area = centered_rect(46, 25, f.area());
    f.render_widget(Clear, area);

    let paragraph = Paragraph::new(content)
        .style(Style::default().bg(theme.background))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border_focused))
                .border_type(theme.border_type)
                .title(" Keyboard ")
                .title_bottom(Line::from(" F1 or Esc to close ").centered()),
        );

    f.render_widget(paragraph, area);
}

fn render_logs(f: &mut Frame, app: &App, from_bottom: usize) {
    let theme = &app.theme;
    let frame_area = f.area();
    let width = (frame_area.width * 90 / 100).max(40);
    let height = (frame_area.height * 80 / 100).max(10);
    let area = centered_rect(width, height, frame_area);
    f.render_widget(Clear, area);

    let entries = app.log_buffer.tail(LOG_WINDOW);
    let viewport = area.height.saturating_sub(2) as usize;
    let end = entries.len().saturating_sub(from_bottom);
    let start = end.saturating_sub(viewport);

    let lines: Vec<Line> = entries[start..end]
        .iter()
        .map(|entry| log_line(entry, theme))
        .collect();

    let position = if from_bottom > 0 {
        format!(" ({} back) ", from_bottom)
    } else {
        String::new()
    };

    let paragraph = Paragraph::new(lines)
        .style(Style::default().bg(theme.background))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.border_focused))
                .border_type(theme.border_type)
                .title(format!(" System Logs{}", position))
                .title_bottom(Line::from(" ↑↓ PgUp/PgDn Home/End  F2/Esc close ").centered()),
        );

    f.render_widget(paragraph, area);
}

fn log_line<'a>(entry: &'a LogEntry, theme: &Theme) -> Line<'a> {
    let level_color = match entry.level {
        LogLevel::Error => theme.error,
        LogLevel::Warn => theme.warning,
        LogLevel::Info => theme.accent,
        LogLevel::Debug | LogLevel::Trace => theme.debug,
    };

    Line::from(vec![
        Span::styled(
            entry.timestamp.format("%H:%M:%S ").to_string(),
            Style::default().fg(theme.muted),
        ),
        Span::styled(
            format!("{:<5} ", entry.level.as_str()),
            Style::default().fg(level_color),
        ),
        Span::styled(entry.message.as_str(), Style::default().fg(theme.foreground)),
    ])
}
