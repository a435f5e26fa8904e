//! Property tests for the naming and ordering rules

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;

use daily_cli::domain::{cmp_list_order, resolve_unique_name, sort_in_list_order, Item, ListId};

proptest! {
    /// The resolved name is never among the taken names
    #[test]
    fn resolved_name_is_free(
        desired in "[A-Za-z][A-Za-z ]{0,10}",
        taken in prop::collection::vec("[A-Za-z][A-Za-z ]{0,10}", 0..20),
    ) {
        let resolved = resolve_unique_name(&desired, taken.iter().map(String::as_str));
        prop_assert!(!taken.contains(&resolved));
    }

    /// The resolved name is the desired name, possibly with " <n>" appended
    #[test]
    fn resolved_name_keeps_the_stem(
        desired in "[A-Za-z][A-Za-z ]{0,10}",
        taken in prop::collection::vec("[A-Za-z][A-Za-z ]{0,10}", 0..20),
    ) {
        let resolved = resolve_unique_name(&desired, taken.iter().map(String::as_str));
        if resolved != desired {
            let suffix = resolved.strip_prefix(&format!("{} ", desired));
            prop_assert!(suffix.is_some_and(|s| s.parse::<u32>().is_ok()));
        }
    }

    /// Feeding resolved names back in always stays collision-free
    #[test]
    fn repeated_resolution_never_collides(desired in "[A-Za-z]{1,8}", rounds in 1usize..10) {
        let mut names: Vec<String> = Vec::new();
        for _ in 0..rounds {
            let next = resolve_unique_name(&desired, names.iter().map(String::as_str));
            prop_assert!(!names.contains(&next));
            names.push(next);
        }
    }

    /// Sorting is stable under shuffling: same multiset in, same order out
    #[test]
    fn list_order_is_deterministic(
        specs in prop::collection::vec((any::<bool>(), 0i64..1000, proptest::option::of(-5i64..5)), 1..20),
        seed in any::<u64>(),
    ) {
        let list = ListId::new("Props", Utc::now());
        let items: Vec<Item> = specs
            .iter()
            .enumerate()
            .map(|(n, (priority, offset, sort_order))| {
                let mut item = Item::new(list.clone(), format!("Task {}", n));
                item.priority = *priority;
                item.created_at = Utc.timestamp_opt(1_700_000_000, 0).unwrap()
                    + Duration::seconds(*offset);
                item.sort_order = *sort_order;
                item
            })
            .collect();

        let mut sorted = items.clone();
        sort_in_list_order(&mut sorted);

        // Shuffle deterministically from the seed, then re-sort
        let mut shuffled = items;
        let mut state = seed | 1;
        for i in (1..shuffled.len()).rev() {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let j = (state >> 33) as usize % (i + 1);
            shuffled.swap(i, j);
        }
        sort_in_list_order(&mut shuffled);

        prop_assert_eq!(sorted, shuffled);
    }

    /// Every priority item precedes every regular item when no explicit
    /// sort order is set
    #[test]
    fn priority_items_lead_the_list(
        specs in prop::collection::vec((any::<bool>(), 0i64..1000), 1..20),
    ) {
        let list = ListId::new("Props", Utc::now());
        let mut items: Vec<Item> = specs
            .iter()
            .enumerate()
            .map(|(n, (priority, offset))| {
                let mut item = Item::new(list.clone(), format!("Task {}", n));
                item.priority = *priority;
                item.created_at = Utc.timestamp_opt(1_700_000_000, 0).unwrap()
                    + Duration::seconds(*offset);
                item
            })
            .collect();

        sort_in_list_order(&mut items);

        let first_regular = items.iter().position(|i| !i.priority);
        if let Some(pos) = first_regular {
            prop_assert!(items[pos..].iter().all(|i| !i.priority));
        }
    }
}

#[test]
fn comparator_is_antisymmetric_on_distinct_items() {
    let list = ListId::new("Props", Utc::now());
    let a = Item::new(list.clone(), "a");
    let b = Item::new(list, "b");

    assert_eq!(cmp_list_order(&a, &b), cmp_list_order(&b, &a).reverse());
}
