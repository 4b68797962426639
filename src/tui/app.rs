// TUI application state
//
// App owns the deck, navigation, the slide presenter and the contact form.
// Rendering reads it; the event loop mutates it. Background work (contact
// submissions) runs in spawned tasks that report back as `AppEvent`s.

use super::components::Toast;
use super::input::InputHandler;
use super::modal::Modal;
use super::theme::{Theme, ThemeKind};
use super::traits::{Handled, Interactive};
use crate::config::Config;
use crate::contact::form::{ContactForm, Focus, SubmitBlocked};
use crate::contact::transport::{ContactRequest, ContactTransport};
use crate::contact::Field;
use crate::deck::navigation::{Navigation, Navigator, Step};
use crate::deck::progress::{progress, Progress};
use crate::deck::transition::Presenter;
use crate::deck::{Deck, Slide};
use crate::events::AppEvent;
use crate::logging::LogBuffer;
use crate::util::email_fingerprint;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::layout::{Position, Rect};
use std::time::Instant;
use tokio::sync::mpsc;

const SENT_TITLE: &str = "Message Sent";
const SENT_DESCRIPTION: &str =
    "Thank you for contacting Neurobotix. We will be in touch shortly.";

/// Clickable regions from the last rendered frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HitAreas {
    pub prev: Rect,
    pub next: Rect,
    pub form: Option<FormHits>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormHits {
    pub name: Rect,
    pub email: Rect,
    pub message: Rect,
    pub send: Rect,
}

impl FormHits {
    fn focus_at(&self, position: Position) -> Option<Focus> {
        [
            (self.name, Focus::Field(Field::Name)),
            (self.email, Focus::Field(Field::Email)),
            (self.message, Focus::Field(Field::Message)),
            (self.send, Focus::Submit),
        ]
        .into_iter()
        .find(|(rect, _)| rect.contains(position))
        .map(|(_, focus)| focus)
    }
}

/// Main application state for the TUI
pub struct App {
    pub deck: Deck,
    pub navigator: Navigator,
    pub presenter: Presenter,
    pub form: ContactForm,

    transport: ContactTransport,
    events_tx: mpsc::Sender<AppEvent>,

    pub toast: Option<Toast>,
    pub modal: Option<Modal>,
    pub should_quit: bool,

    pub theme: Theme,
    pub log_buffer: LogBuffer,
    input_handler: InputHandler,

    /// Written by the renderer, read by mouse handling
    pub hits: HitAreas,
}

impl App {
    pub fn new(
        deck: Deck,
        config: &Config,
        transport: ContactTransport,
        log_buffer: LogBuffer,
        events_tx: mpsc::Sender<AppEvent>,
    ) -> Self {
        let navigator = Navigator::new(deck.len());
        let presenter = Presenter::new(navigator.current(), Instant::now());

        Self {
            deck,
            navigator,
            presenter,
            form: ContactForm::new(),
            transport,
            events_tx,
            toast: None,
            modal: None,
            should_quit: false,
            theme: ThemeKind::from_name(&config.theme).theme(),
            log_buffer,
            input_handler: InputHandler::default(),
            hits: HitAreas::default(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Slides
    // ─────────────────────────────────────────────────────────────────────

    pub fn current_slide(&self) -> Option<&Slide> {
        self.deck.get(self.navigator.current())
    }

    /// The form is live only while a contact slide is showing
    pub fn on_contact_slide(&self) -> bool {
        self.current_slide().is_some_and(Slide::is_contact)
    }

    pub fn progress(&self) -> Progress {
        progress(self.navigator.current(), self.deck.len())
    }

    /// Step through the deck and start the matching transition
    pub fn navigate(&mut self, step: Step) -> Navigation {
        let outcome = self.navigator.advance(step);

        if let Navigation::Moved { from, to, direction } = outcome {
            tracing::debug!(from, slide = to, direction = ?direction, "slide changed");
            self.presenter.present(to, direction, Instant::now());
            if !self.on_contact_slide() {
                self.form.set_focus(None);
            }
        }

        outcome
    }

    /// Redraw at animation rate while this holds
    pub fn is_animating(&self) -> bool {
        self.presenter.is_animating(Instant::now())
    }

    /// Advance timers; returns whether a transition is still running
    pub fn tick(&mut self) -> bool {
        let now = Instant::now();
        if self.toast.as_ref().is_some_and(|t| t.is_expired_at(now)) {
            self.toast = None;
        }
        self.presenter.tick(now)
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.kind.toggle().theme();
        tracing::debug!(theme = self.theme.kind.name(), "theme changed");
    }

    // ─────────────────────────────────────────────────────────────────────
    // Contact form
    // ─────────────────────────────────────────────────────────────────────

    /// Validate and, if the form is valid, send it in the background
    pub fn submit_form(&mut self) {
        let valid = match self.form.begin_submit() {
            Ok(valid) => valid,
            Err(SubmitBlocked::InFlight) => {
                tracing::debug!("submit ignored, already sending");
                return;
            }
            Err(SubmitBlocked::Invalid(_)) => return,
        };

        let request = ContactRequest::from(valid);
        tracing::info!(
            email_hash = %email_fingerprint(&request.email),
            via = %self.transport.describe(),
            "submitting contact request"
        );

        let transport = self.transport.clone();
        let events_tx = self.events_tx.clone();
        tokio::spawn(async move {
            let started = Instant::now();
            let result = transport.submit(&request).await;
            let event = AppEvent::SubmissionFinished {
                result,
                elapsed: started.elapsed(),
            };
            if events_tx.send(event).await.is_err() {
                tracing::debug!("presenter closed before submission finished");
            }
        });
    }

    /// Apply an event reported by a background task
    pub fn apply_event(&mut self, event: AppEvent) {
        tracing::debug!("{}", event.summary());
        match event {
            AppEvent::SubmissionFinished { result, .. } => {
                self.form.finish_submit(&result);
                if result.success {
                    tracing::info!("contact request accepted");
                    self.toast = Some(Toast::success(SENT_TITLE, SENT_DESCRIPTION));
                } else {
                    tracing::warn!(reason = result.error_message(), "contact request failed");
                    self.toast = Some(Toast::error(result.error_message()));
                }
            }
        }
    }

    /// Route a key to the form; only meaningful on the contact slide
    pub fn dispatch_to_form(&mut self, key: KeyEvent) -> Handled {
        if !self.on_contact_slide() {
            return Handled::No;
        }
        self.form.handle_key(key)
    }

    /// Hint for the navigation bar
    pub fn focus_hint(&self) -> &'static str {
        if self.on_contact_slide() {
            if let Some(hint) = self.form.focus_hint() {
                return hint;
            }
            return "Tab: fill in form  ← →: slides  F1: help";
        }
        "← →: slides  F1: help  q: quit"
    }

    // ─────────────────────────────────────────────────────────────────────
    // Mouse
    // ─────────────────────────────────────────────────────────────────────

    /// Left click at terminal cell (`column`, `row`)
    pub fn click(&mut self, column: u16, row: u16) {
        let position = Position::new(column, row);

        if self.hits.prev.contains(position) {
            self.navigate(Step::Back);
            return;
        }
        if self.hits.next.contains(position) {
            self.navigate(Step::Forward);
            return;
        }

        if !self.on_contact_slide() {
            return;
        }
        let Some(form_hits) = self.hits.form else {
            return;
        };
        match form_hits.focus_at(position) {
            Some(Focus::Submit) => {
                self.form.set_focus(Some(Focus::Submit));
                self.submit_form();
            }
            Some(focus) => self.form.set_focus(Some(focus)),
            None => {}
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Key debounce
    // ─────────────────────────────────────────────────────────────────────

    /// Handle a Press or Repeat - returns true if the action should be triggered
    pub fn handle_key_press(&mut self, key: KeyCode, kind: KeyEventKind) -> bool {
        self.input_handler.handle_key_press(key, kind)
    }

    pub fn handle_key_release(&mut self, key: KeyCode) {
        self.input_handler.handle_key_release(key);
    }

    pub fn open_modal(&mut self, modal: Modal) {
        self.modal = Some(modal);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::form::FormStatus;
    use crate::contact::transport::MockTransport;
    use crate::deck::navigation::Direction;
    use crossterm::event::KeyModifiers;
    use std::time::Duration;

    fn app_with(transport: MockTransport) -> (App, mpsc::Receiver<AppEvent>) {
        let (tx, rx) = mpsc::channel(4);
        let app = App::new(
            Deck::bundled().unwrap(),
            &Config::default(),
            ContactTransport::Mock(transport),
            LogBuffer::new(),
            tx,
        );
        (app, rx)
    }

    fn go_to_last(app: &mut App) {
        while app.navigate(Step::Forward).moved() {}
    }

    fn type_into(app: &mut App, field: Field, text: &str) {
        app.form.set_focus(Some(Focus::Field(field)));
        for c in text.chars() {
            let key = KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);
            assert_eq!(app.dispatch_to_form(key), Handled::Yes);
        }
    }

    #[test]
    fn navigation_starts_transition_and_stops_at_edges() {
        let (mut app, _rx) = app_with(MockTransport::succeeding());

        assert!(!app.navigate(Step::Back).moved());
        assert!(!app.is_animating());

        assert!(app.navigate(Step::Forward).moved());
        assert_eq!(app.navigator.direction(), Direction::Forward);
        assert_eq!(app.presenter.active_slide(), 1);
        assert!(app.is_animating());

        go_to_last(&mut app);
        assert!(app.on_contact_slide());
        assert_eq!(app.progress().ratio, 1.0);
        assert!(!app.navigate(Step::Forward).moved());
    }

    #[test]
    fn form_keys_only_apply_on_contact_slide() {
        let (mut app, _rx) = app_with(MockTransport::succeeding());
        let key = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        assert_eq!(app.dispatch_to_form(key), Handled::No);

        go_to_last(&mut app);
        app.form.set_focus(Some(Focus::Field(Field::Name)));
        assert_eq!(app.dispatch_to_form(key), Handled::Yes);
        assert_eq!(app.form.value(Field::Name), "a");

        // Leaving the slide drops form focus
        app.navigate(Step::Back);
        assert_eq!(app.form.focus(), None);
    }

    #[test]
    fn clicks_hit_navigation_buttons() {
        let (mut app, _rx) = app_with(MockTransport::succeeding());
        app.hits.prev = Rect::new(1, 20, 8, 1);
        app.hits.next = Rect::new(70, 20, 8, 1);

        app.click(72, 20);
        assert_eq!(app.navigator.current(), 1);
        app.click(3, 20);
        assert_eq!(app.navigator.current(), 0);
        // Disabled at the first slide
        app.click(3, 20);
        assert_eq!(app.navigator.current(), 0);
    }

    #[tokio::test]
    async fn successful_submission_clears_form_and_toasts() {
        let mock = MockTransport::succeeding();
        let (mut app, mut rx) = app_with(mock.clone());
        go_to_last(&mut app);

        type_into(&mut app, Field::Name, "Ada Lovelace");
        type_into(&mut app, Field::Email, "ada@example.com");
        type_into(&mut app, Field::Message, "We would like a demo.");

        app.submit_form();
        assert!(app.form.is_submitting());

        // A second submit while in flight is ignored
        app.submit_form();

        let event = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .unwrap()
            .unwrap();
        app.apply_event(event);

        assert_eq!(app.form.status(), &FormStatus::Succeeded);
        assert_eq!(app.form.value(Field::Name), "");
        assert_eq!(mock.received().len(), 1);
        let toast = app.toast.as_ref().unwrap();
        assert!(toast.message.contains("Message Sent"));
    }

    #[tokio::test]
    async fn failed_submission_keeps_fields_and_shows_reason() {
        let (mut app, mut rx) = app_with(MockTransport::failing("Service unavailable"));
        go_to_last(&mut app);

        type_into(&mut app, Field::Email, "ada@example.com");
        type_into(&mut app, Field::Message, "We would like a demo.");
        type_into(&mut app, Field::Name, "Ada");

        app.submit_form();
        let event = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .unwrap()
            .unwrap();
        app.apply_event(event);

        assert_eq!(
            app.form.status(),
            &FormStatus::Failed {
                message: "Service unavailable".to_string()
            }
        );
        assert_eq!(app.form.value(Field::Email), "ada@example.com");
        assert_eq!(app.toast.as_ref().unwrap().message, "✗ Service unavailable");
    }

    #[test]
    fn invalid_submission_sends_nothing() {
        let mock = MockTransport::succeeding();
        let (mut app, _rx) = app_with(mock.clone());
        go_to_last(&mut app);

        app.submit_form();
        assert_eq!(app.form.status(), &FormStatus::Invalid);
        assert_eq!(app.form.focus(), Some(Focus::Field(Field::Name)));
        assert!(mock.received().is_empty());
    }
}
