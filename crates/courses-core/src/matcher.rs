use crate::item::{Basket, Item};
use std::collections::HashSet;

/// What to do with a previous order, given the current basket
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReorderPlan {
    /// Items to add, in previous-order sequence
    pub additions: Vec<Item>,
    /// Descriptions of items that can no longer be bought
    pub unavailable: Vec<String>,
}

impl ReorderPlan {
    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.unavailable.is_empty()
    }
}

/// Decide which previous-order items go back into the basket.
///
/// Available items are added unless an item with the same description is
/// already in the basket or earlier in the plan. Unavailable items are
/// reported once each. Items without a description, and available items
/// without an identifier, are left out of both lists.
pub fn plan_reorder(previous: &[Item], basket: &Basket) -> ReorderPlan {
    let mut plan = ReorderPlan::default();
    let mut seen: HashSet<&str> = basket.descriptions().collect();
    let mut reported: HashSet<&str> = HashSet::new();

    for item in previous {
        let description = item.description();
        if description.trim().is_empty() {
            tracing::debug!("Skipping item {} without description", item.id());
            continue;
        }

        if !item.is_available() {
            if reported.insert(description) {
                plan.unavailable.push(description.to_string());
            }
            continue;
        }

        if item.id().trim().is_empty() {
            tracing::debug!("Skipping '{}': no identifier to add it with", description);
            continue;
        }

        if seen.insert(description) {
            plan.additions.push(item.clone());
        } else {
            tracing::debug!("'{}' already in basket", description);
        }
    }

    plan
}

/// Identifiers to remove to empty the basket, each exactly once
pub fn plan_empty(basket: &Basket) -> Vec<String> {
    basket.ids().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn previous_order() -> Vec<Item> {
        vec![
            Item::new("Heudeubert - Biscottes", true, "23"),
            Item::new("Printemps - Carottes", false, "-1"),
            Item::new("Danone - Yaourt", true, "32"),
        ]
    }

    #[test]
    fn test_available_items_added_unavailable_reported() {
        let plan = plan_reorder(&previous_order(), &Basket::new());

        let added: Vec<&str> = plan.additions.iter().map(Item::description).collect();
        assert_eq!(added, vec!["Heudeubert - Biscottes", "Danone - Yaourt"]);
        assert_eq!(plan.unavailable, vec!["Printemps - Carottes".to_string()]);
    }

    #[test]
    fn test_items_already_in_basket_are_left_alone() {
        let mut basket = Basket::new();
        basket.insert("99", "Danone - Yaourt");

        let plan = plan_reorder(&previous_order(), &basket);

        assert_eq!(plan.additions.len(), 1);
        assert_eq!(plan.additions[0].id(), "23");
    }

    #[test]
    fn test_duplicate_descriptions_added_once() {
        let previous = vec![
            Item::new("Lait", true, "1"),
            Item::new("Lait", true, "2"),
            Item::new("Pain", false, "-1"),
            Item::new("Pain", false, "-1"),
        ];

        let plan = plan_reorder(&previous, &Basket::new());

        assert_eq!(plan.additions.len(), 1);
        assert_eq!(plan.additions[0].id(), "1");
        assert_eq!(plan.unavailable, vec!["Pain".to_string()]);
    }

    #[test]
    fn test_malformed_items_are_ignored() {
        let previous = vec![
            Item::new("", true, "5"),
            Item::new("Beurre", true, ""),
            Item::new("   ", false, "-1"),
        ];

        let plan = plan_reorder(&previous, &Basket::new());
        assert!(plan.is_empty());
    }

    #[test]
    fn test_plan_empty_lists_each_id_once() {
        let mut basket = Basket::new();
        basket.insert("1", "beurre");
        basket.insert("2", "lait");

        let ids = plan_empty(&basket);
        assert_eq!(ids, vec!["1".to_string(), "2".to_string()]);
    }
}
