//! Component collection
//!
//! Components are stateless renderers that receive state as parameters.

use ratatui::{prelude::*, widgets::*};

use crate::{
    core::{controller::ListSnapshot, state::AppState},
    domain::dish::Dish,
    infrastructure::{config::RestaurantConfig, tui::Frame},
};

pub mod dish_list;
pub mod restaurant_card;

pub use dish_list::DishList;
pub use restaurant_card::RestaurantCard;

/// Rows taken by one restaurant header plus its dish row
pub fn card_height() -> u16 {
    restaurant_card::RESTAURANT_CARD_HEIGHT + DishList::height()
}

/// Collection of all components
pub struct Components {
    pub restaurants: Vec<RestaurantCard>,
    pub dish_list: DishList,
}

impl Components {
    pub fn new(restaurants: Vec<RestaurantConfig>) -> Self {
        Self {
            restaurants: restaurants.into_iter().map(RestaurantCard::new).collect(),
            dish_list: DishList::new(),
        }
    }

    /// Render all components. `snapshots` holds one entry per card, in card
    /// order.
    pub fn render(
        &self,
        frame: &mut Frame<'_>,
        state: &AppState,
        snapshots: &[ListSnapshot<'_, Dish>],
    ) {
        let [cards_area, status] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

        let visible = usize::from((cards_area.height / card_height()).max(1));
        let offset = first_visible_card(state.focused_card, visible);
        let slots = Layout::vertical(vec![Constraint::Length(card_height()); visible])
            .split(cards_area);

        let cards = self
            .restaurants
            .iter()
            .zip(snapshots)
            .zip(&state.lists)
            .enumerate()
            .skip(offset)
            .take(visible);
        for (slot, (index, ((restaurant, snapshot), list))) in cards.enumerate() {
            let focused = index == state.focused_card;
            let [header, dishes] = Layout::vertical([
                Constraint::Length(restaurant_card::RESTAURANT_CARD_HEIGHT),
                Constraint::Length(DishList::height()),
            ])
            .areas(slots[slot]);

            restaurant.draw(frame, header, focused);
            self.dish_list.draw(snapshot, list, focused, frame, dishes);
        }

        let status_text = match &state.system.status_message {
            Some(message) => message.clone(),
            None => {
                let count = snapshots.get(state.focused_card).map_or(0, |s| s.len());
                format!(
                    "card {}/{} · {} dishes",
                    state.focused_card + 1,
                    snapshots.len().max(1),
                    count
                )
            }
        };
        frame.render_widget(
            Paragraph::new(status_text).style(Style::default().fg(Color::DarkGray)),
            status,
        );
    }
}

/// Index of the topmost card drawn so that `focused` stays on screen
fn first_visible_card(focused: usize, visible: usize) -> usize {
    focused.saturating_sub(visible.saturating_sub(1))
}
