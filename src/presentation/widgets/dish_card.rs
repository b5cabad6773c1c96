use ratatui::{prelude::*, widgets::*};

use crate::domain::{
    dish::{Badge, Dish},
    text::truncate_width,
};

/// Columns taken by one card including its border
pub const DISH_CARD_WIDTH: u16 = 22;
/// Rows taken by one card including its border
pub const DISH_CARD_HEIGHT: u16 = 8;

/// One dish in the horizontal row
#[derive(Debug, Clone)]
pub struct DishCard<'a> {
    dish: &'a Dish,
    pub highlight: bool,
}

impl<'a> DishCard<'a> {
    pub fn new(dish: &'a Dish) -> Self {
        Self {
            dish,
            highlight: false,
        }
    }

    fn badge_line(&self, width: usize) -> Line<'static> {
        match self.dish.badge {
            Badge::Subsidy => Line::from(vec![
                Span::styled(
                    self.dish.subsidy_text.clone(),
                    Style::default().fg(Color::White).bg(Color::Red),
                ),
                Span::raw(" "),
                Span::styled(
                    self.dish.minus_text.clone(),
                    Style::default().fg(Color::Red),
                ),
            ]),
            Badge::Timer => {
                let timer = self.dish.timer_text.as_deref().unwrap_or_default();
                Line::styled(
                    truncate_width(&format!("限时 {timer}"), width),
                    Style::default().fg(Color::Magenta),
                )
            }
        }
    }

    fn price_line(&self) -> Line<'static> {
        Line::from(vec![
            Span::styled(
                format!("¥{}", self.dish.price),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(
                format!("¥{}", self.dish.origin_price),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::CROSSED_OUT),
            ),
        ])
    }
}

impl Widget for DishCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.highlight {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        let width = inner.width as usize;
        let title_style = if self.highlight {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        let lines = vec![
            Line::styled(
                truncate_width(&format!("[{}]", self.dish.image), width),
                Style::default().fg(Color::Gray),
            )
            .centered(),
            self.badge_line(width),
            Line::styled(truncate_width(&self.dish.title, width), title_style),
            Line::styled(
                truncate_width(&self.dish.content, width),
                Style::default().fg(Color::Gray),
            ),
            self.price_line(),
        ];

        Paragraph::new(lines).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::domain::dish::DishRecord;

    fn dish(index: usize) -> Dish {
        Dish::from_record(
            DishRecord {
                id: 3,
                title: "Mapo tofu".to_string(),
                content: "page 1 item 3".to_string(),
            },
            index,
        )
    }

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_render_card_contents() {
        let dish = dish(0);
        let area = Rect::new(0, 0, DISH_CARD_WIDTH, DISH_CARD_HEIGHT);
        let mut buf = Buffer::empty(area);
        DishCard::new(&dish).render(area, &mut buf);

        assert!(row(&buf, 1).contains("[dish-1]"));
        assert!(row(&buf, 3).contains("Mapo tofu"));
        assert!(row(&buf, 4).contains("page 1 item 3"));
        assert!(row(&buf, 5).contains("¥75 ¥99"));
    }

    #[test]
    fn test_render_timer_badge() {
        let dish = dish(1);
        let area = Rect::new(0, 0, DISH_CARD_WIDTH, DISH_CARD_HEIGHT);
        let mut buf = Buffer::empty(area);
        DishCard::new(&dish).render(area, &mut buf);

        assert!(row(&buf, 1).contains("[dish-2]"));
        assert!(row(&buf, 2).contains("12:88:88"));
    }

    #[test]
    fn test_highlight_changes_border() {
        let dish = dish(0);
        let area = Rect::new(0, 0, DISH_CARD_WIDTH, DISH_CARD_HEIGHT);

        let mut normal = Buffer::empty(area);
        DishCard::new(&dish).render(area, &mut normal);

        let mut highlighted = Buffer::empty(area);
        let mut card = DishCard::new(&dish);
        card.highlight = true;
        card.render(area, &mut highlighted);

        assert_eq!(normal[(0, 0)].fg, Color::DarkGray);
        assert_eq!(highlighted[(0, 0)].fg, Color::Yellow);
    }
}
