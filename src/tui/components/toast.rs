//! Toast notification component
//!
//! A non-blocking overlay that auto-dismisses after a configurable duration.
//! Renders in the bottom-right corner on top of all other content.

use crate::tui::theme::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use std::time::{Duration, Instant};
use unicode_width::UnicodeWidthStr;

/// Widest a toast may grow before its text wraps
const MAX_TEXT_WIDTH: u16 = 48;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

/// A toast notification that auto-dismisses
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    created_at: Instant,
    duration: Duration,
}

impl Toast {
    /// Create a new toast with default 2-second duration
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: ToastKind::Info,
            created_at: Instant::now(),
            duration: Duration::from_secs(2),
        }
    }

    pub fn success(title: &str, description: &str) -> Self {
        Self::new(format!("✓ {}: {}", title, description))
            .with_kind(ToastKind::Success)
            .with_duration(Duration::from_secs(5))
    }

    pub fn error(message: &str) -> Self {
        Self::new(format!("✗ {}", message))
            .with_kind(ToastKind::Error)
            .with_duration(Duration::from_secs(5))
    }

    pub fn with_kind(mut self, kind: ToastKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Check if the toast has expired and should be removed
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) >= self.duration
    }

    /// Box size (with borders and padding) for an `area`
    fn size(&self, area: Rect) -> (u16, u16) {
        let available = area.width.saturating_sub(8).max(1);
        let text_width = (self.message.width() as u16)
            .min(MAX_TEXT_WIDTH)
            .min(available)
            .max(1);
        let raw_lines = (self.message.width() as u16).div_ceil(text_width).max(1);
        // Word wrapping can spill past the column estimate
        let lines = if raw_lines > 1 { raw_lines + 1 } else { raw_lines };
        // 2 for borders, 2 for horizontal padding
        (text_width + 4, lines + 2)
    }

    /// Render the toast in the bottom-right corner
    ///
    /// Uses `Clear` widget to ensure toast is visible on top of other content.
    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let (width, height) = self.size(area);

        // Bottom-right corner, above the navigation bar
        let x = area.right().saturating_sub(width + 2);
        let y = area.bottom().saturating_sub(height + 4);
        let toast_area = Rect::new(x, y, width, height).intersection(area);

        let accent = match self.kind {
            ToastKind::Info => theme.accent,
            ToastKind::Success => theme.success,
            ToastKind::Error => theme.error,
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(accent))
            .style(Style::default().bg(theme.background));

        let text = Paragraph::new(self.message.as_str())
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(theme.foreground))
            .block(block.padding(ratatui::widgets::Padding::horizontal(1)));

        // Clear the area first so toast appears on top
        f.render_widget(Clear, toast_area);
        f.render_widget(text, toast_area);
    }
}
