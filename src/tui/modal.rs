// Modal system for TUI overlays
//
// Self-contained modal dialogs that handle their own input and return actions.
// App just holds Option<Modal>, input routing acts on returned ModalAction.

use crossterm::event::KeyCode;

/// Lines moved by PageUp/PageDown in the logs overlay
const PAGE: usize = 10;

/// Actions returned by modal input handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalAction {
    /// Input consumed, no state change needed
    None,
    Close,
    ScrollUp(usize),
    ScrollDown(usize),
    /// Jump to the oldest entry
    ScrollTop,
    /// Resume following new entries
    ScrollBottom,
}

/// Available modal types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    /// Keyboard shortcuts
    Help,
    /// System log buffer; `from_bottom` lines scrolled back from the newest
    Logs { from_bottom: usize },
}

impl Modal {
    pub fn help() -> Self {
        Modal::Help
    }

    pub fn logs() -> Self {
        Modal::Logs { from_bottom: 0 }
    }

    /// Handle keyboard input, return action for caller to execute
    pub fn handle_input(&self, key: KeyCode) -> ModalAction {
        match self {
            Modal::Help => match key {
                KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('q') | KeyCode::Enter => {
                    ModalAction::Close
                }
                _ => ModalAction::None,
            },
            Modal::Logs { .. } => match key {
                KeyCode::Esc | KeyCode::F(2) | KeyCode::Char('q') => ModalAction::Close,
                KeyCode::Up | KeyCode::Char('k') => ModalAction::ScrollUp(1),
                KeyCode::Down | KeyCode::Char('j') => ModalAction::ScrollDown(1),
                KeyCode::PageUp => ModalAction::ScrollUp(PAGE),
                KeyCode::PageDown => ModalAction::ScrollDown(PAGE),
                KeyCode::Home => ModalAction::ScrollTop,
                KeyCode::End => ModalAction::ScrollBottom,
                _ => ModalAction::None,
            },
        }
    }

    /// Apply a scroll action; `total` is the number of log lines available
    pub fn scroll(&mut self, action: ModalAction, total: usize) {
        let Modal::Logs { from_bottom } = self else {
            return;
        };
        let max = total.saturating_sub(1);
        *from_bottom = match action {
            ModalAction::ScrollUp(n) => from_bottom.saturating_add(n).min(max),
            ModalAction::ScrollDown(n) => from_bottom.saturating_sub(n),
            ModalAction::ScrollTop => max,
            ModalAction::ScrollBottom => 0,
            ModalAction::None | ModalAction::Close => *from_bottom,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_closes_on_its_own_key() {
        assert_eq!(Modal::help().handle_input(KeyCode::F(1)), ModalAction::Close);
        assert_eq!(Modal::help().handle_input(KeyCode::Left), ModalAction::None);
    }

    #[test]
    fn logs_scroll_is_clamped() {
        let mut modal = Modal::logs();
        modal.scroll(ModalAction::ScrollUp(PAGE), 4);
        assert_eq!(modal, Modal::Logs { from_bottom: 3 });

        modal.scroll(ModalAction::ScrollDown(1), 4);
        assert_eq!(modal, Modal::Logs { from_bottom: 2 });

        modal.scroll(ModalAction::ScrollDown(PAGE), 4);
        assert_eq!(modal, Modal::Logs { from_bottom: 0 });

        modal.scroll(ModalAction::ScrollTop, 0);
        assert_eq!(modal, Modal::Logs { from_bottom: 0 });
    }
}
