//! Local dishes shown when the very first page cannot be fetched

use super::dish::{Dish, DishRecord};

const FALLBACK_TITLES: [&str; 4] = ["招牌椒麻鸡", "藤椒钵钵鸡", "麻辣牛肉", "青花椒鱼片"];

/// The default fallback sequence injected into the dish controller
pub fn fallback_dishes() -> Vec<Dish> {
    FALLBACK_TITLES
        .iter()
        .enumerate()
        .map(|(i, title)| {
            Dish::from_record(
                DishRecord {
                    id: i as u64 + 1,
                    title: (*title).to_string(),
                    content: String::new(),
                },
                i,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_fallback_is_fixed() {
        let dishes = fallback_dishes();
        let ids: Vec<u64> = dishes.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(dishes, fallback_dishes());
    }
}
