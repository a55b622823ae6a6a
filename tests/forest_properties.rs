use ipforest::{Address, Edge, Forest, Rejection};
use proptest::prelude::*;
use proptest::sample::Index;
use std::net::Ipv4Addr;

/// Random single tree: distinct addresses, each hung from an earlier one
fn arb_tree(min: usize, max: usize) -> impl Strategy<Value = (Vec<Address>, Forest)> {
    prop::collection::btree_set(any::<u32>(), min..max)
        .prop_flat_map(|raw| {
            let count = raw.len();
            (
                Just(raw),
                prop::collection::vec(any::<Index>(), count - 1),
            )
        })
        .prop_map(|(raw, parents)| {
            let members: Vec<Address> = raw
                .into_iter()
                .map(|n| Address::from(Ipv4Addr::from(n)))
                .collect();
            let forest = hang(&members, &parents);
            (members, forest)
        })
}

fn hang(members: &[Address], parents: &[Index]) -> Forest {
    let edges = (1..members.len()).map(|i| Edge::new(members[parents[i - 1].index(i)], members[i]));
    Forest::from_edges(edges).unwrap()
}

proptest! {
    #[test]
    fn prop_address_text_round_trip(octets in any::<[u8; 4]>()) {
        let [a, b, c, d] = octets;
        let addr = Address::new(a, b, c, d);
        let parsed: Address = addr.to_string().parse().unwrap();
        prop_assert_eq!(parsed, addr);
    }

    #[test]
    fn prop_notation_round_trip_from_any_root((members, forest) in arb_tree(2, 24), pick in any::<Index>()) {
        let root = *pick.get(&members);
        let reparsed = Forest::parse(&forest.to_notation(&root)).unwrap();
        prop_assert_eq!(reparsed, forest);
    }

    #[test]
    fn prop_height_matches_levels((members, forest) in arb_tree(2, 24), pick in any::<Index>()) {
        let root = *pick.get(&members);
        let levels = forest.levels(&root);
        prop_assert_eq!(forest.height(&root), levels.len() - 1);
        prop_assert_eq!(levels.iter().map(Vec::len).sum::<usize>(), members.len());
    }

    #[test]
    fn prop_route_length_follows_depth(
        (members, forest) in arb_tree(2, 24),
        start in any::<Index>(),
        end in any::<Index>(),
    ) {
        let start = *start.get(&members);
        let end = *end.get(&members);
        let depth = forest
            .levels(&start)
            .iter()
            .position(|level| level.contains(&end))
            .unwrap();

        let route = forest.route(&start, &end);
        prop_assert_eq!(route.len(), depth + 1);
        prop_assert_eq!(route.first(), Some(&start));
        prop_assert_eq!(route.last(), Some(&end));
        for hop in route.windows(2) {
            prop_assert!(forest.linked(&hop[0], &hop[1]));
        }
    }

    #[test]
    fn prop_connect_then_disconnect_restores(
        raw in prop::collection::btree_set(any::<u32>(), 4..30),
        parents in prop::collection::vec(any::<Index>(), 30),
        from in any::<Index>(),
        to in any::<Index>(),
    ) {
        let members: Vec<Address> = raw.into_iter().map(|n| Address::from(Ipv4Addr::from(n))).collect();
        let (left, right) = members.split_at(members.len() / 2);

        let mut forest = hang(left, &parents);
        forest.union(&hang(right, &parents)).unwrap();
        let before = forest.clone();

        let a = *from.get(left);
        let b = *to.get(right);
        prop_assert_eq!(forest.connect(&a, &b), Ok(()));
        prop_assert_eq!(forest.components().len(), 1);
        prop_assert_eq!(forest.connect(&a, &b), Err(Rejection::AlreadyLinked(a, b)));

        prop_assert_eq!(forest.disconnect(&a, &b), Ok(()));
        prop_assert_eq!(forest, before);
    }

    #[test]
    fn prop_union_leaves_argument_untouched(
        (_, base) in arb_tree(2, 12),
        (_, other) in arb_tree(2, 12),
    ) {
        let mut forest = base.clone();
        let snapshot = other.clone();
        let _ = forest.union(&other);

        prop_assert_eq!(other, snapshot);
        for addr in base.list() {
            prop_assert!(forest.contains(&addr));
        }
    }

    #[test]
    fn prop_linking_within_a_tree_is_refused((members, forest) in arb_tree(3, 24), a in any::<Index>(), b in any::<Index>()) {
        let a = *a.get(&members);
        let b = *b.get(&members);
        prop_assume!(a != b && !forest.linked(&a, &b));

        let mut changed = forest.clone();
        prop_assert_eq!(changed.connect(&a, &b), Err(Rejection::WouldCycle(a, b)));
        prop_assert_eq!(changed, forest);
    }
}
