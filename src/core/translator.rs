use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::{
    core::{msg::Msg, raw_msg::RawMsg, state::AppState},
    presentation::config::Action,
};

/// Translates raw external events into domain messages
/// This function is pure and contains no side effects
pub fn translate_raw_to_domain(raw: RawMsg, state: &AppState) -> Vec<Msg> {
    match raw {
        RawMsg::Quit => vec![Msg::Quit],
        RawMsg::Resize(width, height) => vec![Msg::Resize(width, height)],
        RawMsg::Key(key) => translate_key_event(key, state),
        RawMsg::Error(error) => vec![Msg::ShowError(error)],

        // Ignore frequent system events in domain layer
        RawMsg::Tick | RawMsg::Render => vec![],
    }
}

fn translate_key_event(key: KeyEvent, state: &AppState) -> Vec<Msg> {
    // ctrl-c quits regardless of the configured bindings
    if let KeyEvent {
        code: KeyCode::Char('c'),
        modifiers: KeyModifiers::CONTROL,
        ..
    } = key
    {
        return vec![Msg::Quit];
    }

    match state.keybindings.action_for(&key) {
        Some(action) => vec![translate_action(action)],
        None => vec![],
    }
}

fn translate_action(action: Action) -> Msg {
    match action {
        Action::ScrollLeft => Msg::ScrollLeft,
        Action::ScrollRight => Msg::ScrollRight,
        Action::ScrollToStart => Msg::ScrollToStart,
        Action::ScrollToEnd => Msg::ScrollToEnd,
        Action::FocusNext => Msg::FocusNext,
        Action::FocusPrevious => Msg::FocusPrevious,
        Action::Refresh => Msg::Refresh,
        Action::Quit => Msg::Quit,
    }
}
