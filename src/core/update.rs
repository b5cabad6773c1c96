use crate::core::{
    cmd::Cmd,
    msg::Msg,
    state::{AppState, ListViewState},
};

/// Elm-like update function
/// Returns new state and list of commands from current state and message
pub fn update(msg: Msg, mut state: AppState) -> (AppState, Vec<Cmd>) {
    match msg {
        Msg::ScrollLeft => scroll(state, |list| {
            scroll_left_position(list.selected_index, list.item_count)
        }),
        Msg::ScrollRight => scroll(state, |list| {
            scroll_right_position(list.selected_index, list.item_count)
        }),
        Msg::ScrollToStart => scroll(state, |list| (list.item_count > 0).then_some(0)),
        Msg::ScrollToEnd => scroll(state, |list| list.item_count.checked_sub(1)),

        Msg::FocusNext => {
            let last = state.lists.len().saturating_sub(1);
            state.focused_card = (state.focused_card + 1).min(last);
            (state, vec![])
        }
        Msg::FocusPrevious => {
            state.focused_card = state.focused_card.saturating_sub(1);
            (state, vec![])
        }

        Msg::Refresh => {
            state.system.status_message = None;
            let card = state.focused_card;
            let Some(list) = state.focused_list_mut() else {
                return (state, vec![]);
            };
            list.selected_index = None;
            (state, vec![Cmd::Refresh { card }])
        }
        Msg::ItemsChanged { card, count } => {
            if let Some(list) = state.lists.get_mut(card) {
                list.item_count = count;
                // a reset may have shrunk the list under the selection
                list.selected_index = match list.selected_index {
                    Some(_) if count == 0 => None,
                    Some(index) => Some(index.min(count - 1)),
                    None => None,
                };
            }
            (state, vec![])
        }

        Msg::Quit => {
            state.system.should_quit = true;
            (state, vec![])
        }
        Msg::Resize(width, height) => {
            state.system.terminal_size = Some((width, height));
            (state, vec![Cmd::Resize { width, height }])
        }
        Msg::ShowError(message) => {
            state.system.status_message = Some(message.clone());
            (state, vec![Cmd::LogError { message }])
        }
    }
}

/// Move the focused card's selection, then check how close it is to the end
fn scroll(
    mut state: AppState,
    position: impl FnOnce(&ListViewState) -> Option<usize>,
) -> (AppState, Vec<Cmd>) {
    let card = state.focused_card;
    let Some(list) = state.focused_list_mut() else {
        return (state, vec![]);
    };
    list.selected_index = position(&*list);
    let commands = if list.is_near_end() {
        vec![Cmd::RequestMore { card }]
    } else {
        vec![]
    };
    (state, commands)
}

fn scroll_left_position(current: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    match current {
        None => Some(0),
        Some(i) => Some(i.saturating_sub(1).min(len - 1)),
    }
}

fn scroll_right_position(current: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let max_index = len - 1;
    match current {
        None => Some(0),
        Some(i) if i >= max_index => Some(max_index),
        Some(i) => Some(i + 1),
    }
}
