//! Property tests over arbitrary insert/remove sequences.

use std::collections::BTreeSet;

use proptest::prelude::*;
use redblack::{CountingHooks, OrdHooks, RbTree, TreeConfig};

type Counted = RbTree<i16, (), CountingHooks<OrdHooks<i16>>>;

fn checked_tree() -> Counted {
    RbTree::with_config(CountingHooks::new(OrdHooks::new()), TreeConfig::checked())
}

fn keys(tree: &Counted) -> Vec<i16> {
    tree.iter().map(|node| *node.item()).collect()
}

#[derive(Debug, Clone)]
enum Op {
    Insert(i16),
    Remove(i16),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (-64i16..64).prop_map(Op::Insert),
        2 => (-64i16..64).prop_map(Op::Remove),
    ]
}

proptest! {
    #[test]
    fn test_matches_btreeset(ops in prop::collection::vec(op(), 0..200)) {
        let mut tree = checked_tree();
        let mut model = BTreeSet::new();

        for op in ops {
            match op {
                Op::Insert(key) => {
                    prop_assert_eq!(tree.insert(key), model.insert(key));
                }
                Op::Remove(key) => {
                    prop_assert_eq!(tree.remove(&key), model.remove(&key));
                }
            }
        }

        prop_assert_eq!(keys(&tree), model.iter().copied().collect::<Vec<_>>());
        prop_assert_eq!(tree.num_items(), model.len());
        prop_assert_eq!(tree.len(), model.len());
        prop_assert_eq!(tree.hooks().live_nodes(), model.len());
        prop_assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_height_is_logarithmic(items in prop::collection::btree_set(any::<i16>(), 1..300)) {
        let mut tree = checked_tree();
        for &key in &items {
            tree.insert(key);
        }
        let bound = 2.0 * ((items.len() + 1) as f64).log2();
        prop_assert!(tree.height() as f64 <= bound);
        prop_assert!(tree.black_height().is_ok_and(|bh| bh >= 1));
    }

    #[test]
    fn test_find_after_insert(items in prop::collection::vec(any::<i16>(), 0..100), probe in any::<i16>()) {
        let mut tree = checked_tree();
        for &key in &items {
            tree.insert(key);
        }
        for key in &items {
            prop_assert_eq!(tree.find(key).map(|node| *node.item()), Some(*key));
        }
        prop_assert_eq!(tree.contains(&probe), items.contains(&probe));
    }

    #[test]
    fn test_level_order_visits_every_node(items in prop::collection::btree_set(any::<i16>(), 0..120)) {
        let mut tree = checked_tree();
        for &key in &items {
            tree.insert(key);
        }
        let mut visited = Vec::new();
        let mut last_level = 0;
        tree.level_order(|node, level| {
            assert!(level >= last_level);
            last_level = level;
            visited.push(*node.item());
        })
        .unwrap();
        visited.sort_unstable();
        prop_assert_eq!(visited, items.iter().copied().collect::<Vec<_>>());
        prop_assert_eq!(tree.hooks().live_entries(), 0);
    }
}
