use crate::{infrastructure::config::Config, presentation::config::KeyBindings};

/// Unified application state
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// One dish row per restaurant card, top to bottom
    pub lists: Vec<ListViewState>,
    /// Index of the card that receives scroll and refresh keys
    pub focused_card: usize,
    pub system: SystemState,
    pub keybindings: KeyBindings,
}

impl AppState {
    pub fn new_with_config(config: &Config) -> Self {
        Self {
            keybindings: config.keybindings.clone(),
            ..Self::with_lists(config.cards().len(), config.list.proximity_threshold)
        }
    }

    /// `count` empty dish rows and no bindings
    pub fn with_lists(count: usize, proximity_threshold: usize) -> Self {
        Self {
            lists: vec![ListViewState::new(proximity_threshold); count],
            ..Default::default()
        }
    }

    pub fn focused_list(&self) -> Option<&ListViewState> {
        self.lists.get(self.focused_card)
    }

    pub fn focused_list_mut(&mut self) -> Option<&mut ListViewState> {
        self.lists.get_mut(self.focused_card)
    }
}

/// Selection within the horizontal dish row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListViewState {
    pub selected_index: Option<usize>,
    /// Mirror of the controller's item count
    pub item_count: usize,
    /// How many items before the last one the next page is requested
    pub proximity_threshold: usize,
}

impl ListViewState {
    pub fn new(proximity_threshold: usize) -> Self {
        Self {
            proximity_threshold,
            ..Default::default()
        }
    }

    /// True when the selection sits within `proximity_threshold` items of
    /// the end of the list
    pub fn is_near_end(&self) -> bool {
        match self.selected_index {
            Some(selected) if self.item_count > 0 => {
                selected + self.proximity_threshold >= self.item_count - 1
            }
            _ => false,
        }
    }
}

/// System-related state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SystemState {
    pub should_quit: bool,
    pub status_message: Option<String>,
    pub terminal_size: Option<(u16, u16)>,
}
