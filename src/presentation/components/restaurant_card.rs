use ratatui::{prelude::*, widgets::*};

use crate::infrastructure::{config::RestaurantConfig, tui::Frame};

/// Rows used by the header including its border
pub const RESTAURANT_CARD_HEIGHT: u16 = 7;

const MAX_STARS: usize = 5;

/// Static restaurant header shown above each dish row
#[derive(Debug, Clone)]
pub struct RestaurantCard {
    restaurant: RestaurantConfig,
}

impl RestaurantCard {
    pub fn new(restaurant: RestaurantConfig) -> Self {
        Self { restaurant }
    }

    /// Draw the header; a focused card gets a highlighted border
    pub fn draw(&self, f: &mut Frame<'_>, area: Rect, focused: bool) {
        let r = &self.restaurant;
        let border_style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .padding(Padding::horizontal(1));

        let rating = Line::from(vec![
            Span::styled(star_string(r.rating), Style::default().fg(Color::Yellow)),
            Span::raw(" "),
            Span::styled(
                format!("{:.1}", r.rating),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(" {}  {}条", r.rating_label, r.review_count)),
        ]);
        let meta = Line::styled(
            format!(
                "{} · {} · ¥{}/人 · {}",
                r.cuisine, r.area, r.price_per_person, r.distance
            ),
            Style::default().fg(Color::Gray),
        );
        let rank = Line::styled(r.rank_tag.clone(), Style::default().fg(Color::LightRed));
        let tags = Line::from(
            r.tags
                .iter()
                .flat_map(|tag| {
                    [
                        Span::styled(format!("[{tag}]"), Style::default().fg(Color::Cyan)),
                        Span::raw(" "),
                    ]
                })
                .collect::<Vec<_>>(),
        );

        let lines = vec![
            Line::styled(
                r.shop_name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            rating,
            meta,
            rank,
            tags,
        ];
        f.render_widget(Paragraph::new(lines).block(block), area);
    }
}

/// Five-star rating with half stars, e.g. `★★★½☆` for 3.5
pub fn star_string(rating: f32) -> String {
    let clamped = rating.clamp(0.0, MAX_STARS as f32);
    let full = clamped.floor() as usize;
    let half = clamped - clamped.floor() >= 0.5;
    let empty = MAX_STARS - full - usize::from(half);

    let mut stars = "★".repeat(full);
    if half {
        stars.push('½');
    }
    stars.push_str(&"☆".repeat(empty));
    stars
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use ratatui::backend::TestBackend;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(3.5, "★★★½☆")]
    #[case(5.0, "★★★★★")]
    #[case(0.0, "☆☆☆☆☆")]
    #[case(4.2, "★★★★☆")]
    #[case(7.0, "★★★★★")]
    #[case(-1.0, "☆☆☆☆☆")]
    fn test_star_string(#[case] rating: f32, #[case] expected: &str) {
        assert_eq!(star_string(rating), expected);
    }

    #[test]
    fn test_draw_header() {
        let card = RestaurantCard::new(RestaurantConfig {
            shop_name: "Test Kitchen".to_string(),
            cuisine: "Sichuan".to_string(),
            area: "Downtown".to_string(),
            ..Default::default()
        });
        let mut terminal = Terminal::new(TestBackend::new(60, RESTAURANT_CARD_HEIGHT)).unwrap();
        terminal
            .draw(|f| card.draw(f, f.area(), true))
            .unwrap();

        let buf = terminal.backend().buffer();
        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Test Kitchen"));
        assert!(text.contains("Sichuan"));
        assert!(text.contains("Downtown"));
    }

    #[rstest]
    #[case(true, Color::Yellow)]
    #[case(false, Color::DarkGray)]
    fn test_border_follows_focus(#[case] focused: bool, #[case] expected: Color) {
        let card = RestaurantCard::new(RestaurantConfig::default());
        let mut terminal = Terminal::new(TestBackend::new(60, RESTAURANT_CARD_HEIGHT)).unwrap();
        terminal
            .draw(|f| card.draw(f, f.area(), focused))
            .unwrap();

        let buf = terminal.backend().buffer();
        assert_eq!(buf[(0, 0)].fg, expected);
    }
}
