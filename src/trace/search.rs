//! Search trace generators.
//!
//! Linear and binary search scan the array directly; DFS and BFS first build
//! a [`SyntheticTree`] over the array and traverse that. Binary search
//! operates on (and reports positions into) a value-ascending sorted copy,
//! never the caller's original order, so the trace carries the exact array
//! playback must render.

use std::collections::VecDeque;

use log::debug;
use serde::{Deserialize, Serialize};

use super::event::{AnimationEvent, EventKind, EventLog};
use super::tree::SyntheticTree;
use crate::schema::SearchAlgorithm;

/// Terminal result of a search run, reported exactly once on completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum SearchOutcome {
    Found { index: usize },
    NotFound,
}

impl SearchOutcome {
    #[inline]
    pub fn is_found(self) -> bool {
        matches!(self, SearchOutcome::Found { .. })
    }

    /// Position of the match, if there was one.
    #[inline]
    pub fn index(self) -> Option<usize> {
        match self {
            SearchOutcome::Found { index } => Some(index),
            SearchOutcome::NotFound => None,
        }
    }
}

/// A generated search run: the event log, the array playback must render,
/// and the terminal outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchTrace {
    pub log: EventLog,
    /// Array positions in the log refer to: the sorted copy for binary
    /// search, the original order for everything else.
    pub view: Vec<u32>,
    pub outcome: SearchOutcome,
}

/// Generate the full event log for searching `array` for `target`.
///
/// The log ends in exactly one `Found` event or one terminal not-found
/// narration; empty arrays terminate without error.
pub fn trace(array: &[u32], target: u32, algorithm: SearchAlgorithm) -> SearchTrace {
    let mut log = EventLog::new();

    let view = if algorithm.requires_sorted_view() {
        let mut sorted = array.to_vec();
        sorted.sort_unstable();
        sorted
    } else {
        array.to_vec()
    };

    match algorithm {
        SearchAlgorithm::Linear => linear(&view, target, &mut log),
        SearchAlgorithm::Binary => binary(&view, target, &mut log),
        SearchAlgorithm::Dfs => {
            let tree = SyntheticTree::from_array(array);
            dfs(&tree, tree.root(), target, &mut log);
        }
        SearchAlgorithm::Bfs => {
            let tree = SyntheticTree::from_array(array);
            bfs(&tree, target, &mut log);
        }
    }

    let outcome = match log.found_index() {
        Some(index) => SearchOutcome::Found { index },
        None => SearchOutcome::NotFound,
    };

    debug!(
        "search trace: {} for {} over {} elements -> {} events, {:?}",
        algorithm,
        target,
        array.len(),
        log.len(),
        outcome
    );

    SearchTrace { log, view, outcome }
}

fn linear(arr: &[u32], target: u32, log: &mut EventLog) {
    log.narrate(format!("Starting linear search for value {target}"));

    for (i, &value) in arr.iter().enumerate() {
        log.visit(i, format!("Checking position {i}: Is {value} equal to {target}?"));
        if value == target {
            log.found(i, format!("Found {target} at position {i}!"));
            return;
        }
    }

    log.narrate(format!("Value {target} not found in the array"));
}

fn binary(arr: &[u32], target: u32, log: &mut EventLog) {
    log.narrate(format!(
        "Starting binary search for value {target} in a sorted array"
    ));

    // Inclusive bounds; signed so the window can close past either end.
    let mut left: isize = 0;
    let mut right: isize = arr.len() as isize - 1;

    while left <= right {
        let mid = ((left + right) / 2) as usize;
        let value = arr[mid];

        log.visit(
            mid,
            format!("Checking middle position {mid}: Is {value} equal to {target}?"),
        );

        if value == target {
            log.found(mid, format!("Found {target} at position {mid}!"));
            return;
        }

        if value < target {
            left = mid as isize + 1;
            narrow(log, left, right, format!("{value} < {target}, searching right half"));
        } else {
            right = mid as isize - 1;
            narrow(log, left, right, format!("{value} > {target}, searching left half"));
        }
    }

    log.narrate(format!("Value {target} not found in the array"));
}

/// Record the surviving search window. A closed window has no positions to
/// mark, so only the narration remains.
fn narrow(log: &mut EventLog, left: isize, right: isize, text: String) {
    if left <= right {
        log.push(AnimationEvent::narrated(
            EventKind::Compare {
                a: left as usize,
                b: right as usize,
            },
            text,
        ));
    } else {
        log.narrate(text);
    }
}

fn dfs(
    tree: &SyntheticTree,
    node: Option<usize>,
    target: u32,
    log: &mut EventLog,
) -> bool {
    let Some(id) = node else {
        log.narrate("Node is null, backtracking...");
        return false;
    };

    let node = tree.node(id);
    let value = node.value;
    let index = node.array_index;

    log.visit(index, format!("Visiting node with value {value}"));

    if value == target {
        log.found(index, format!("Found {target} at position {index}!"));
        return true;
    }

    log.narrate(format!("{value} != {target}, exploring left subtree"));
    if dfs(tree, node.left, target, log) {
        return true;
    }

    log.narrate(format!(
        "Left subtree didn't contain {target}, exploring right subtree"
    ));
    if dfs(tree, node.right, target, log) {
        return true;
    }

    log.narrate(format!(
        "{target} not found in subtree rooted at {value}, backtracking..."
    ));
    false
}

fn bfs(tree: &SyntheticTree, target: u32, log: &mut EventLog) {
    let Some(root) = tree.root() else {
        log.narrate("Tree is empty, nothing to search");
        return;
    };

    let mut queue = VecDeque::new();
    queue.push_back(root);

    log.narrate(format!("Starting BFS search for value {target}"));

    while let Some(id) = queue.pop_front() {
        let node = tree.node(id);
        log.visit(
            node.array_index,
            format!("Checking node with value {}", node.value),
        );

        if node.value == target {
            log.found(
                node.array_index,
                format!("Found {target} at position {}!", node.array_index),
            );
            return;
        }

        if let Some(left) = node.left {
            let child = tree.node(left);
            log.enqueue(
                child.array_index,
                format!("Enqueuing left child with value {}", child.value),
            );
            queue.push_back(left);
        }
        if let Some(right) = node.right {
            let child = tree.node(right);
            log.enqueue(
                child.array_index,
                format!("Enqueuing right child with value {}", child.value),
            );
            queue.push_back(right);
        }
    }

    log.narrate(format!("Value {target} not found in the tree"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::event::EventKind;
    use proptest::prelude::*;

    #[test]
    fn test_binary_scenario() {
        // Sorted input stays unchanged; mid probes go 2 then 3.
        let trace = trace(&[1, 3, 5, 7, 9], 7, SearchAlgorithm::Binary);
        assert_eq!(trace.view, vec![1, 3, 5, 7, 9]);
        assert_eq!(trace.outcome, SearchOutcome::Found { index: 3 });

        let visits: Vec<usize> = trace
            .log
            .iter()
            .filter_map(|e| match e.kind {
                EventKind::Visit { index } => Some(index),
                _ => None,
            })
            .collect();
        assert_eq!(visits, vec![2, 3]);
    }

    #[test]
    fn test_binary_searches_sorted_copy() {
        let trace = trace(&[9, 1, 5, 3], 5, SearchAlgorithm::Binary);
        assert_eq!(trace.view, vec![1, 3, 5, 9]);
        // Reported index points into the sorted copy.
        let index = trace.outcome.index().unwrap();
        assert_eq!(trace.view[index], 5);
    }

    #[test]
    fn test_binary_not_found_terminates_with_narration() {
        let trace = trace(&[2, 4, 6, 8], 5, SearchAlgorithm::Binary);
        assert_eq!(trace.outcome, SearchOutcome::NotFound);
        assert_eq!(trace.log.found_index(), None);

        let last = trace.log.get(trace.log.len() - 1).unwrap();
        assert_eq!(last.kind, EventKind::Narrate);
        assert!(last.narration.as_deref().unwrap().contains("not found"));
    }

    #[test]
    fn test_linear_finds_lowest_index() {
        let trace = trace(&[4, 7, 4, 7], 7, SearchAlgorithm::Linear);
        assert_eq!(trace.outcome, SearchOutcome::Found { index: 1 });
    }

    #[test]
    fn test_linear_visits_in_order_until_match() {
        let trace = trace(&[10, 20, 30], 30, SearchAlgorithm::Linear);
        let visits: Vec<usize> = trace
            .log
            .iter()
            .filter_map(|e| match e.kind {
                EventKind::Visit { index } => Some(index),
                _ => None,
            })
            .collect();
        assert_eq!(visits, vec![0, 1, 2]);
    }

    #[test]
    fn test_empty_array_never_errors() {
        for algorithm in SearchAlgorithm::ALL {
            let trace = trace(&[], 5, algorithm);
            assert_eq!(trace.outcome, SearchOutcome::NotFound, "{algorithm}");
            assert!(trace.log.len() <= 2, "{algorithm} log too long for []");
            assert!(!trace.log.is_empty(), "{algorithm} log empty for []");
        }
    }

    #[test]
    fn test_dfs_preorder_visits() {
        // Tree over [1..=5]: root index 2, left subtree {0, 1}, right {3, 4}.
        let trace = trace(&[1, 2, 3, 4, 5], 99, SearchAlgorithm::Dfs);
        let visits: Vec<usize> = trace
            .log
            .iter()
            .filter_map(|e| match e.kind {
                EventKind::Visit { index } => Some(index),
                _ => None,
            })
            .collect();
        assert_eq!(visits, vec![2, 0, 1, 3, 4]);
        assert_eq!(trace.outcome, SearchOutcome::NotFound);
    }

    #[test]
    fn test_bfs_level_order_visits() {
        let trace = trace(&[1, 2, 3, 4, 5], 99, SearchAlgorithm::Bfs);
        let visits: Vec<usize> = trace
            .log
            .iter()
            .filter_map(|e| match e.kind {
                EventKind::Visit { index } => Some(index),
                _ => None,
            })
            .collect();
        assert_eq!(visits, vec![2, 0, 3, 1, 4]);
    }

    #[test]
    fn test_bfs_enqueues_left_before_right() {
        let trace = trace(&[1, 2, 3], 99, SearchAlgorithm::Bfs);
        let enqueues: Vec<usize> = trace
            .log
            .iter()
            .filter_map(|e| match e.kind {
                EventKind::Enqueue { index } => Some(index),
                _ => None,
            })
            .collect();
        // Root is index 1; children are indices 0 (left) then 2 (right).
        assert_eq!(enqueues, vec![0, 2]);
    }

    #[test]
    fn test_exactly_one_found_event() {
        let trace = trace(&[6, 6, 6], 6, SearchAlgorithm::Linear);
        let found_count = trace
            .log
            .iter()
            .filter(|e| matches!(e.kind, EventKind::Found { .. }))
            .count();
        assert_eq!(found_count, 1);
    }

    proptest! {
        #[test]
        fn prop_binary_found_index_is_correct(
            mut array in prop::collection::vec(0u32..100, 0..30),
            target in 0u32..100,
        ) {
            let result = trace(&array, target, SearchAlgorithm::Binary);
            array.sort_unstable();
            prop_assert_eq!(&result.view, &array);

            match result.outcome {
                SearchOutcome::Found { index } => {
                    prop_assert_eq!(array[index], target);
                }
                SearchOutcome::NotFound => {
                    prop_assert!(!array.contains(&target));
                    prop_assert_eq!(result.log.found_index(), None);
                }
            }
        }

        #[test]
        fn prop_linear_reports_first_match(
            array in prop::collection::vec(0u32..20, 0..30),
            target in 0u32..20,
        ) {
            let result = trace(&array, target, SearchAlgorithm::Linear);
            let expected = array.iter().position(|&v| v == target);
            prop_assert_eq!(result.outcome.index(), expected);
        }

        #[test]
        fn prop_dfs_bfs_agree_on_unique_target(
            array in prop::collection::vec(0u32..1000, 1..30)
                .prop_filter("values must be unique", |v| {
                    let mut sorted = v.clone();
                    sorted.sort_unstable();
                    sorted.windows(2).all(|w| w[0] != w[1])
                }),
            pick in prop::sample::select(vec![0usize, 1, 2, 3, 4]),
        ) {
            let target = array[pick % array.len()];
            let dfs = trace(&array, target, SearchAlgorithm::Dfs);
            let bfs = trace(&array, target, SearchAlgorithm::Bfs);
            prop_assert_eq!(dfs.outcome, bfs.outcome);
            prop_assert!(dfs.outcome.is_found());
        }
    }
}
