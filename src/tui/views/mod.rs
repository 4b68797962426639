// Views module - screen-level rendering
//
// One screen: title bar, slide area (plus contact form on contact slides),
// navigation bar. Overlays (help, logs, toast) draw on top.

mod modal;

use super::app::{App, HitAreas};
use super::components::{contact_form, nav_bar, slide_view, title_bar};
use super::layout::ScreenLayout;
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;
use std::time::Instant;

/// Main UI render function - called on every frame
///
/// Records clickable regions into `app.hits` as a side effect.
pub fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();
    let bg_block = Block::default().style(
        Style::default()
            .bg(app.theme.background)
            .fg(app.theme.foreground),
    );
    f.render_widget(bg_block, area);

    let layout = ScreenLayout::compute(area, app.on_contact_slide());

    title_bar::render(f, layout.title, app);

    let frame = app.presenter.frame(Instant::now());
    slide_view::render(f, layout.slide, &app.deck, &frame, &app.theme);

    let form_hits = layout
        .form
        .map(|form_area| contact_form::render(f, form_area, &app.form, &app.theme));

    let nav_hits = nav_bar::render(f, layout.nav, app);

    app.hits = HitAreas {
        prev: nav_hits.prev,
        next: nav_hits.next,
        form: form_hits,
    };

    if let Some(modal) = &app.modal {
        modal::render(f, modal, app);
    }

    if let Some(toast) = &app.toast {
        toast.render(f, area, &app.theme);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::contact::transport::{ContactTransport, MockTransport};
    use crate::deck::navigation::Step;
    use crate::deck::Deck;
    use crate::logging::LogBuffer;
    use crate::tui::modal::Modal;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use tokio::sync::mpsc;

    fn app() -> App {
        let (tx, _rx) = mpsc::channel(1);
        App::new(
            Deck::bundled().unwrap(),
            &Config::default(),
            ContactTransport::Mock(MockTransport::succeeding()),
            LogBuffer::new(),
            tx,
        )
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                if let Some(cell) = buffer.cell((x, y)) {
                    text.push_str(cell.symbol());
                }
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn first_slide_shows_title_and_progress() {
        let mut app = app();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw(f, &mut app)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Neurobotix Tech"));
        assert!(text.contains("1 / 16"));
        assert!(text.contains("◀ Prev"));
        assert!(app.hits.form.is_none());
        assert!(app.hits.next.width > 0);
    }

    #[test]
    fn contact_slide_renders_form_and_records_hits() {
        let mut app = app();
        while app.navigate(Step::Forward).moved() {}

        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| draw(f, &mut app)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("16 / 16"));
        assert!(text.contains("Send Message"));
        assert!(text.contains("Your Email"));

        let hits = app.hits.form.unwrap();
        assert!(hits.send.height > 0);
        assert!(hits.name.y < hits.email.y);
    }

    #[test]
    fn help_overlay_draws_on_top() {
        let mut app = app();
        app.open_modal(Modal::help());
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|f| draw(f, &mut app)).unwrap();

        assert!(screen_text(&terminal).contains("Keyboard"));
    }
}
