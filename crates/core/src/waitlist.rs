//! First-come-first-served allocation of restocked products to waitlisted
//! readers.

use std::collections::HashMap;

use crate::types::{DbId, Timestamp};

/// A queued request for an out-of-stock product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedEntry {
    pub id: DbId,
    pub user_id: DbId,
    pub product_id: DbId,
    pub queued_at: Timestamp,
}

/// One waitlist entry that should be moved into its owner's cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Allocation {
    pub entry_id: DbId,
    pub user_id: DbId,
    pub product_id: DbId,
}

/// Decide which waitlist entries can be fulfilled from current stock.
///
/// `stock` maps product id to units on hand. Entries are served in
/// `(queued_at, id)` order and a product never receives more allocations
/// than it has units. Products missing from `stock` are treated as sold out.
pub fn plan_allocations(stock: &HashMap<DbId, i32>, entries: &[QueuedEntry]) -> Vec<Allocation> {
    let mut queue: Vec<&QueuedEntry> = entries.iter().collect();
    queue.sort_by_key(|e| (e.queued_at, e.id));

    let mut remaining: HashMap<DbId, i32> = stock
        .iter()
        .filter(|(_, qty)| **qty > 0)
        .map(|(id, qty)| (*id, *qty))
        .collect();

    let mut allocations = Vec::new();
    for entry in queue {
        let Some(left) = remaining.get_mut(&entry.product_id) else {
            continue;
        };
        if *left == 0 {
            continue;
        }
        *left -= 1;
        allocations.push(Allocation {
            entry_id: entry.id,
            user_id: entry.user_id,
            product_id: entry.product_id,
        });
    }
    allocations
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;

    fn entry(id: DbId, user_id: DbId, product_id: DbId, minute: i64) -> QueuedEntry {
        let base = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
        QueuedEntry {
            id,
            user_id,
            product_id,
            queued_at: base + Duration::minutes(minute),
        }
    }

    #[test]
    fn serves_earliest_first_up_to_stock() {
        let stock = HashMap::from([(1, 2)]);
        let entries = vec![entry(3, 30, 1, 5), entry(1, 10, 1, 9), entry(2, 20, 1, 1)];
        let users: Vec<DbId> = plan_allocations(&stock, &entries)
            .iter()
            .map(|a| a.user_id)
            .collect();
        assert_eq!(users, vec![20, 30]);
    }

    #[test]
    fn ties_broken_by_entry_id() {
        let stock = HashMap::from([(1, 1)]);
        let entries = vec![entry(9, 90, 1, 0), entry(4, 40, 1, 0)];
        let plan = plan_allocations(&stock, &entries);
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].entry_id, 4);
    }

    #[test]
    fn sold_out_and_unknown_products_allocate_nothing() {
        let stock = HashMap::from([(1, 0)]);
        let entries = vec![entry(1, 10, 1, 0), entry(2, 10, 2, 0)];
        assert!(plan_allocations(&stock, &entries).is_empty());
    }

    #[test]
    fn products_are_independent() {
        let stock = HashMap::from([(1, 1), (2, 5)]);
        let entries = vec![
            entry(1, 10, 1, 0),
            entry(2, 11, 1, 1),
            entry(3, 12, 2, 2),
            entry(4, 13, 2, 3),
        ];
        let plan = plan_allocations(&stock, &entries);
        let ids: Vec<DbId> = plan.iter().map(|a| a.entry_id).collect();
        assert_eq!(ids, vec![1, 3, 4]);
    }
}
