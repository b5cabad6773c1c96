use serde::{Deserialize, Serialize};

/// Domain messages of the dish list screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Msg {
    // Selection
    ScrollLeft,
    ScrollRight,
    ScrollToStart,
    ScrollToEnd,

    // Cards
    FocusNext,
    FocusPrevious,

    // List lifecycle
    Refresh,
    /// A card's item count changed (page appended, reset, fallback)
    ItemsChanged { card: usize, count: usize },

    // System
    Quit,
    Resize(u16, u16),
    ShowError(String),
}

impl Msg {
    /// Whether the message moves the selection
    pub fn is_movement(&self) -> bool {
        matches!(
            self,
            Msg::ScrollLeft | Msg::ScrollRight | Msg::ScrollToStart | Msg::ScrollToEnd
        )
    }
}
