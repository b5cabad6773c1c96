use ratatui::{prelude::*, widgets::*};
use tui_widget_list::{ListBuilder, ListState, ListView, ScrollAxis};

use crate::{
    core::{controller::ListSnapshot, state::ListViewState},
    domain::dish::Dish,
    infrastructure::tui::Frame,
    model::paged_list::Phase,
    presentation::widgets::dish_card::{DishCard, DISH_CARD_HEIGHT, DISH_CARD_WIDTH},
};

pub const LOADING_TEXT: &str = "Loading...";
pub const END_OF_LIST_TEXT: &str = "—— end of list ——";
pub const EMPTY_TEXT: &str = "No dishes";
pub const FIRST_PAGE_TEXT: &str = "Loading first page...";

/// Horizontal row of dish cards with its trailing affordance
#[derive(Debug, Clone, Default)]
pub struct DishList;

impl DishList {
    pub fn new() -> Self {
        Self
    }

    /// Rows needed for the cards plus the footer line
    pub fn height() -> u16 {
        DISH_CARD_HEIGHT + 1
    }

    /// Draw one card's dishes; the selection is only highlighted while the
    /// card has focus
    pub fn draw(
        &self,
        snapshot: &ListSnapshot<'_, Dish>,
        list: &ListViewState,
        focused: bool,
        f: &mut Frame<'_>,
        area: Rect,
    ) {
        let [cards_area, footer_area] =
            Layout::vertical([Constraint::Length(DISH_CARD_HEIGHT), Constraint::Length(1)])
                .areas(area);

        if snapshot.is_empty() {
            let text = if snapshot.phase == Phase::LoadingFirst {
                FIRST_PAGE_TEXT
            } else {
                EMPTY_TEXT
            };
            let placeholder = Paragraph::new(text)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(Block::default().padding(Padding::top(DISH_CARD_HEIGHT / 2)));
            f.render_widget(placeholder, cards_area);
            return;
        }

        let items = snapshot.items;
        let builder = ListBuilder::new(move |context| {
            let mut card = DishCard::new(&items[context.index]);
            card.highlight = focused && context.is_selected;
            (card, DISH_CARD_WIDTH)
        });
        let list_view = ListView::new(builder, items.len())
            .scroll_axis(ScrollAxis::Horizontal)
            .infinite_scrolling(false);
        let mut list_state = self.create_list_state(list);
        f.render_stateful_widget(list_view, cards_area, &mut list_state);

        if let Some(text) = footer_text(snapshot) {
            let style = if snapshot.is_loading {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            f.render_widget(
                Paragraph::new(text).style(style).alignment(Alignment::Center),
                footer_area,
            );
        }
    }

    fn create_list_state(&self, list: &ListViewState) -> ListState {
        let mut list_state = ListState::default();
        list_state.select(list.selected_index);
        list_state
    }
}

/// Trailing affordance for a non-empty list
pub fn footer_text<T>(snapshot: &ListSnapshot<'_, T>) -> Option<&'static str> {
    if snapshot.is_loading {
        Some(LOADING_TEXT)
    } else if snapshot.is_end && !snapshot.is_empty() {
        Some(END_OF_LIST_TEXT)
    } else if snapshot.is_empty() {
        Some(EMPTY_TEXT)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn snapshot(items: &[u8], is_loading: bool, is_end: bool, phase: Phase) -> ListSnapshot<'_, u8> {
        ListSnapshot {
            items,
            is_loading,
            is_end,
            phase,
        }
    }

    #[rstest]
    #[case(&[1, 2], true, false, Phase::LoadingMore, Some(LOADING_TEXT))]
    #[case(&[1, 2], false, true, Phase::ReadyEnd, Some(END_OF_LIST_TEXT))]
    #[case(&[1, 2], false, true, Phase::FailedFallback, Some(END_OF_LIST_TEXT))]
    #[case(&[1, 2], false, false, Phase::Ready, None)]
    #[case(&[], false, false, Phase::IdleEmpty, Some(EMPTY_TEXT))]
    #[case(&[], false, true, Phase::ReadyEnd, Some(EMPTY_TEXT))]
    fn test_footer_text(
        #[case] items: &[u8],
        #[case] is_loading: bool,
        #[case] is_end: bool,
        #[case] phase: Phase,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(footer_text(&snapshot(items, is_loading, is_end, phase)), expected);
    }
}
