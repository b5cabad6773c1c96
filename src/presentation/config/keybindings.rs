//! Key bindings of the dish list
//!
//! Bindings are configured as a flat map from key strings such as `"h"`,
//! `"left"` or `"ctrl-c"` to an [`Action`].

use std::{
    collections::HashMap,
    ops::{Deref, DerefMut},
};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{de, Deserialize, Deserializer, Serialize};
use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum Action {
    ScrollLeft,
    ScrollRight,
    ScrollToStart,
    ScrollToEnd,
    /// Move the focus to the card below
    FocusNext,
    /// Move the focus to the card above
    FocusPrevious,
    Refresh,
    Quit,
}

/// A key stripped down to what bindings care about
pub type KeyCombo = (KeyCode, KeyModifiers);

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyBindings(pub HashMap<KeyCombo, Action>);

impl KeyBindings {
    pub fn action_for(&self, key: &KeyEvent) -> Option<Action> {
        self.0.get(&key_combo(key)).copied()
    }
}

impl Deref for KeyBindings {
    type Target = HashMap<KeyCombo, Action>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for KeyBindings {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<'de> Deserialize<'de> for KeyBindings {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = HashMap::<String, Action>::deserialize(deserializer)?;
        raw.into_iter()
            .map(|(key, action)| {
                parse_key(&key)
                    .map(|combo| (combo, action))
                    .map_err(de::Error::custom)
            })
            .collect::<Result<HashMap<_, _>, _>>()
            .map(KeyBindings)
    }
}

/// Normalise a terminal key event for lookup.
///
/// Shift is folded into the character itself (`G` rather than shift-`g`).
pub fn key_combo(key: &KeyEvent) -> KeyCombo {
    let mut modifiers = key.modifiers;
    if matches!(key.code, KeyCode::Char(_)) {
        modifiers.remove(KeyModifiers::SHIFT);
    }
    (key.code, modifiers)
}

pub fn parse_key(raw: &str) -> Result<KeyCombo, String> {
    let mut modifiers = KeyModifiers::NONE;
    let mut rest = raw;

    loop {
        let lower = rest.to_ascii_lowercase();
        if let Some(stripped) = lower.strip_prefix("ctrl-") {
            modifiers.insert(KeyModifiers::CONTROL);
            rest = &rest[rest.len() - stripped.len()..];
        } else if let Some(stripped) = lower.strip_prefix("alt-") {
            modifiers.insert(KeyModifiers::ALT);
            rest = &rest[rest.len() - stripped.len()..];
        } else {
            break;
        }
    }

    let code = match rest.to_ascii_lowercase().as_str() {
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "esc" => KeyCode::Esc,
        "enter" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "space" => KeyCode::Char(' '),
        _ => {
            let mut chars = rest.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => return Err(format!("unable to parse key `{raw}`")),
            }
        }
    };

    Ok((code, modifiers))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("h", KeyCode::Char('h'), KeyModifiers::NONE)]
    #[case("G", KeyCode::Char('G'), KeyModifiers::NONE)]
    #[case("left", KeyCode::Left, KeyModifiers::NONE)]
    #[case("End", KeyCode::End, KeyModifiers::NONE)]
    #[case("ctrl-c", KeyCode::Char('c'), KeyModifiers::CONTROL)]
    #[case("ctrl-alt-x", KeyCode::Char('x'), KeyModifiers::CONTROL.union(KeyModifiers::ALT))]
    #[case("space", KeyCode::Char(' '), KeyModifiers::NONE)]
    fn test_parse_key(#[case] raw: &str, #[case] code: KeyCode, #[case] modifiers: KeyModifiers) {
        assert_eq!(parse_key(raw), Ok((code, modifiers)));
    }

    #[test]
    fn test_parse_key_rejects_words() {
        assert!(parse_key("banana").is_err());
        assert!(parse_key("").is_err());
    }

    #[test]
    fn test_shifted_char_matches_plain_binding() -> serde_json::Result<()> {
        let bindings: KeyBindings = serde_json::from_str(r#"{"G": "ScrollToEnd"}"#)?;
        let key = KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT);
        assert_eq!(bindings.action_for(&key), Some(Action::ScrollToEnd));
        Ok(())
    }

    #[test]
    fn test_invalid_binding_fails_to_deserialize() {
        let result = serde_json::from_str::<KeyBindings>(r#"{"nope": "Quit"}"#);
        assert!(result.is_err());
    }
}
