//! Responsive layout for the presenter screen.
//!
//! Breakpoints are the single source of truth for width thresholds; the
//! renderer asks `ScreenLayout` where things go instead of doing arithmetic.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breakpoint {
    /// < 60 cols: split pane
    Compact,
    /// 60-109 cols
    Normal,
    /// 110+ cols: room for slide and form side by side
    Wide,
}

impl Breakpoint {
    pub fn from_width(width: u16) -> Self {
        match width {
            0..=59 => Breakpoint::Compact,
            60..=109 => Breakpoint::Normal,
            _ => Breakpoint::Wide,
        }
    }

    /// Check if at least this breakpoint (inclusive)
    pub fn at_least(&self, min: Breakpoint) -> bool {
        self.ordinal() >= min.ordinal()
    }

    fn ordinal(&self) -> u8 {
        match self {
            Breakpoint::Compact => 0,
            Breakpoint::Normal => 1,
            Breakpoint::Wide => 2,
        }
    }
}

pub const TITLE_HEIGHT: u16 = 3;
pub const NAV_HEIGHT: u16 = 3;
/// Name, email, message inputs plus the send button, inside a border
pub const FORM_HEIGHT: u16 = 3 + 3 + 5 + 3 + 2;

/// Where each region of the screen goes this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub title: Rect,
    pub slide: Rect,
    /// Present only on contact slides
    pub form: Option<Rect>,
    pub nav: Rect,
}

impl ScreenLayout {
    pub fn compute(area: Rect, with_form: bool) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(TITLE_HEIGHT),
                Constraint::Min(1),
                Constraint::Length(NAV_HEIGHT),
            ])
            .split(area);
        let (title, body, nav) = (rows[0], rows[1], rows[2]);

        if !with_form {
            return Self {
                title,
                slide: body,
                form: None,
                nav,
            };
        }

        let (slide, form) = if Breakpoint::from_width(area.width).at_least(Breakpoint::Wide) {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(body);
            (cols[0], cols[1])
        } else {
            let parts = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(3), Constraint::Length(FORM_HEIGHT)])
                .split(body);
            (parts[0], parts[1])
        };

        Self {
            title,
            slide,
            form: Some(form),
            nav,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoint_thresholds() {
        assert_eq!(Breakpoint::from_width(40), Breakpoint::Compact);
        assert_eq!(Breakpoint::from_width(59), Breakpoint::Compact);
        assert_eq!(Breakpoint::from_width(60), Breakpoint::Normal);
        assert_eq!(Breakpoint::from_width(109), Breakpoint::Normal);
        assert_eq!(Breakpoint::from_width(110), Breakpoint::Wide);
        assert!(Breakpoint::Wide.at_least(Breakpoint::Normal));
        assert!(!Breakpoint::Compact.at_least(Breakpoint::Normal));
    }

    #[test]
    fn content_slide_uses_whole_body() {
        let layout = ScreenLayout::compute(Rect::new(0, 0, 80, 30), false);
        assert_eq!(layout.title.height, TITLE_HEIGHT);
        assert_eq!(layout.nav.height, NAV_HEIGHT);
        assert_eq!(layout.slide.height, 30 - TITLE_HEIGHT - NAV_HEIGHT);
        assert!(layout.form.is_none());
    }

    #[test]
    fn form_sits_beside_on_wide_screens() {
        let layout = ScreenLayout::compute(Rect::new(0, 0, 140, 40), true);
        let form = layout.form.unwrap();
        assert_eq!(form.y, layout.slide.y);
        assert!(form.x >= layout.slide.right());
    }

    #[test]
    fn form_sits_below_on_narrow_screens() {
        let layout = ScreenLayout::compute(Rect::new(0, 0, 80, 40), true);
        let form = layout.form.unwrap();
        assert_eq!(form.height, FORM_HEIGHT);
        assert_eq!(form.y, layout.slide.bottom());
    }
}
