//! Contact form component
//!
//! Renders `ContactForm` (name, email, message, Send) and implements
//! `Interactive` for it: Tab/arrows move focus, printable keys edit the
//! focused field. Enter on Send bubbles up so the App can start the
//! submission, which needs the transport.

use crate::contact::form::{ContactForm, Focus, FormStatus};
use crate::contact::Field;
use crate::tui::app::FormHits;
use crate::tui::theme::Theme;
use crate::tui::traits::{Handled, Interactive};
use crate::util::tail_to_width;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const CURSOR: &str = "▏";

impl Interactive for ContactForm {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.focus_next();
                Handled::Yes
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_prev();
                Handled::Yes
            }
            KeyCode::Esc if self.focus().is_some() => {
                self.set_focus(None);
                Handled::Yes
            }
            KeyCode::Enter => match self.focus() {
                // Enter in a field moves on, like tabbing through the form
                Some(Focus::Field(_)) => {
                    self.focus_next();
                    Handled::Yes
                }
                _ => Handled::No,
            },
            KeyCode::Backspace if self.focused_field().is_some() => {
                self.backspace();
                Handled::Yes
            }
            KeyCode::Char(c)
                if self.focus().is_some()
                    && !key
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                // Swallowed on Send and while sending, so typing never
                // quits or toggles
                self.insert_char(c);
                Handled::Yes
            }
            _ => Handled::No,
        }
    }

    fn focus_hint(&self) -> Option<&'static str> {
        match self.focus()? {
            Focus::Field(_) => Some("Tab: next field  Enter: next  Esc: leave form"),
            Focus::Submit => Some("Enter: send  Tab: back to fields  Esc: leave form"),
        }
    }
}

/// Render the form and return the rects of its controls
pub fn render(f: &mut Frame, area: Rect, form: &ContactForm, theme: &Theme) -> FormHits {
    let outer = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border))
        .title(Line::styled(
            " Contact us ",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ));
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(inner);

    render_field(f, rows[0], form, Field::Name, theme);
    render_field(f, rows[1], form, Field::Email, theme);
    render_field(f, rows[2], form, Field::Message, theme);
    render_send(f, rows[3], form, theme);

    FormHits {
        name: rows[0],
        email: rows[1],
        message: rows[2],
        send: rows[3],
    }
}

fn render_field(f: &mut Frame, area: Rect, form: &ContactForm, field: Field, theme: &Theme) {
    let focused = form.focused_field() == Some(field);
    let issue = form.error_for(field);

    let border_color = match (&issue, focused) {
        (Some(_), _) => theme.error,
        (None, true) => theme.border_focused,
        (None, false) => theme.border,
    };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(border_color))
        .title(Line::styled(
            format!(" {} ", field.label()),
            Style::default().fg(if focused { theme.accent } else { theme.muted }),
        ));
    if let Some(issue) = &issue {
        block = block.title_bottom(Line::styled(
            format!(" {} ", issue),
            Style::default().fg(theme.error),
        ));
    }

    let value = form.value(field);
    // Borders plus one column for the cursor
    let text_width = area.width.saturating_sub(3) as usize;

    let content: Line = if value.is_empty() && !focused {
        Line::styled(field.placeholder(), Style::default().fg(theme.muted))
    } else {
        let shown = if field == Field::Message {
            value
        } else {
            // Single-line inputs scroll to keep the end visible
            tail_to_width(value, text_width)
        };
        let mut spans = vec![Span::styled(shown.to_string(), Style::default().fg(theme.foreground))];
        if focused {
            spans.push(Span::styled(CURSOR, Style::default().fg(theme.accent)));
        }
        Line::from(spans)
    };

    let mut paragraph = Paragraph::new(content).block(block);
    if field == Field::Message {
        paragraph = paragraph.wrap(Wrap { trim: false });
    }
    f.render_widget(paragraph, area);
}

fn render_send(f: &mut Frame, area: Rect, form: &ContactForm, theme: &Theme) {
    let focused = form.focus() == Some(Focus::Submit);
    let submitting = form.is_submitting();

    let label = if submitting { "Sending..." } else { "Send Message" };
    let style = if submitting {
        Style::default().fg(theme.background).bg(theme.disabled)
    } else if focused {
        Style::default()
            .fg(theme.on_accent)
            .bg(theme.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
    };

    let border = if focused { theme.border_focused } else { theme.border };
    let status = match form.status() {
        FormStatus::Invalid => Some(("Please fix the fields above", theme.error)),
        FormStatus::Failed { .. } => Some(("Not sent, try again", theme.error)),
        FormStatus::Succeeded => Some(("Sent", theme.success)),
        FormStatus::Idle | FormStatus::Submitting => None,
    };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(border));
    if let Some((text, color)) = status {
        block = block.title_bottom(
            Line::styled(format!(" {} ", text), Style::default().fg(color)).right_aligned(),
        );
    }

    let button = Paragraph::new(Line::styled(label, style))
        .alignment(Alignment::Center)
        .block(block);
    f.render_widget(button, area);
}
