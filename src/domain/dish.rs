//! Dish items shown in the horizontal list

use serde::{Deserialize, Serialize};

/// Anything the paged list can hold.
///
/// The controller never looks inside an item; the list view only needs a
/// stable identifier to key its cells.
pub trait ListItem: Clone + Send + Sync + 'static {
    fn id(&self) -> u64;
}

/// Placeholder artwork cycled through by position in the page
pub const DISH_IMAGES: [&str; 4] = ["dish-1", "dish-2", "dish-3", "dish-4"];

const PRICE: u32 = 75;
const ORIGIN_PRICE: u32 = 99;
const SUBSIDY_TEXT: &str = "特惠补贴";
const MINUS_TEXT: &str = "减10";
const TIMER_TEXT: &str = "12:88:88";

/// A record as served by the list endpoint.
///
/// Unknown fields are ignored so that richer servers stay compatible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DishRecord {
    pub id: u64,
    pub title: String,
    pub content: String,
}

/// Promotion badge drawn over the dish image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Badge {
    /// "特惠补贴" + "减10"
    Subsidy,
    /// Countdown until the offer ends
    Timer,
}

/// Render model of a single dish card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dish {
    pub id: u64,
    pub title: String,
    pub content: String,
    pub image: String,
    pub price: u32,
    pub origin_price: u32,
    pub badge: Badge,
    pub subsidy_text: String,
    pub minus_text: String,
    pub timer_text: Option<String>,
}

impl Dish {
    /// Decorate a wire record with the static presentation fields.
    ///
    /// `index` is the position of the record inside its page, which picks the
    /// placeholder image and alternates the badge kind.
    pub fn from_record(record: DishRecord, index: usize) -> Self {
        let badge = if index % 2 == 0 {
            Badge::Subsidy
        } else {
            Badge::Timer
        };

        Self {
            id: record.id,
            title: record.title,
            content: record.content,
            image: DISH_IMAGES[index % DISH_IMAGES.len()].to_string(),
            price: PRICE,
            origin_price: ORIGIN_PRICE,
            badge,
            subsidy_text: SUBSIDY_TEXT.to_string(),
            minus_text: MINUS_TEXT.to_string(),
            timer_text: Some(TIMER_TEXT.to_string()),
        }
    }

    pub fn discount(&self) -> u32 {
        self.origin_price.saturating_sub(self.price)
    }
}

impl ListItem for Dish {
    fn id(&self) -> u64 {
        self.id
    }
}
