// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs, clippy::unwrap_used)]

use std::collections::{BTreeMap, VecDeque};

use proptest::prelude::*;
use wayfind_core::{FacilityGraph, Pathfinder};

fn name(i: usize) -> String {
    format!("n{i}")
}

/// Random directed adjacency over `n0..n{k}`; every node appears as a key.
fn adjacency() -> impl Strategy<Value = Vec<(String, Vec<String>)>> {
    (1usize..12).prop_flat_map(|k| {
        prop::collection::vec(prop::collection::vec(0..k, 0..4), k).prop_map(|lists| {
            lists
                .into_iter()
                .enumerate()
                .map(|(i, targets)| {
                    let mut seen = Vec::new();
                    for t in targets {
                        if !seen.contains(&name(t)) {
                            seen.push(name(t));
                        }
                    }
                    (name(i), seen)
                })
                .collect()
        })
    })
}

fn distance(graph: &FacilityGraph, start: &str, goal: &str) -> Option<usize> {
    let mut dist: BTreeMap<&str, usize> = BTreeMap::from([(start, 0)]);
    let mut queue = VecDeque::from([start]);
    while let Some(node) = queue.pop_front() {
        let d = dist[node];
        if node == goal {
            return Some(d);
        }
        for next in graph.neighbors(node) {
            if !dist.contains_key(next.as_str()) {
                dist.insert(next.as_str(), d + 1);
                queue.push_back(next.as_str());
            }
        }
    }
    None
}

proptest! {
    #[test]
    fn shortest_path_is_minimal_and_walkable(
        lists in adjacency(),
        start in 0usize..12,
        goal in 0usize..12,
    ) {
        let size = lists.len();
        let graph = FacilityGraph::from_adjacency(lists);
        let (start, goal) = (name(start % size), name(goal % size));

        let found = Pathfinder::new(&graph).shortest_path(&start, &goal);
        let expected = distance(&graph, &start, &goal);
        prop_assert_eq!(found.as_ref().map(|p| p.len() - 1), expected);

        if let Some(path) = found {
            prop_assert_eq!(path[0], start.as_str());
            prop_assert_eq!(*path.last().unwrap(), goal.as_str());
            for pair in path.windows(2) {
                prop_assert!(graph.neighbors(pair[0]).iter().any(|n| n == pair[1]));
            }
        }
    }

    #[test]
    fn unknown_goal_is_never_found(lists in adjacency(), start in 0usize..12) {
        let size = lists.len();
        let graph = FacilityGraph::from_adjacency(lists);
        let finder = Pathfinder::new(&graph);
        prop_assert!(finder.find_route(&name(start % size), "nowhere").is_none());
    }
}
