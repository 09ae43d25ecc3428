//! Sorting trace generators.
//!
//! Each generator runs its textbook algorithm to completion over a private
//! copy of the input, recording every comparison, exchange and sorted-marking
//! as an animation event. Events are recorded before they are applied to the
//! working copy, so playback can still show the untouched board mid-run.
//!
//! Replaying the log's `Swap` and `Overwrite` events against a copy of the
//! original array yields the array in non-decreasing order, and the union of
//! all `MarkSorted` index sets covers every position.

use log::debug;

use super::event::EventLog;
use crate::schema::SortAlgorithm;

/// Generate the full event log for sorting `array` with `algorithm`.
///
/// Deterministic for any finite input; empty arrays produce empty logs.
pub fn trace(array: &[u32], algorithm: SortAlgorithm) -> EventLog {
    let mut work = array.to_vec();
    let mut log = EventLog::new();

    match algorithm {
        SortAlgorithm::Bubble => bubble(&mut work, &mut log),
        SortAlgorithm::Selection => selection(&mut work, &mut log),
        SortAlgorithm::Insertion => insertion(&mut work, &mut log),
        SortAlgorithm::Merge => merge_entry(&mut work, &mut log),
        SortAlgorithm::Quick => quick_entry(&mut work, &mut log),
    }

    debug!(
        "sort trace: {} over {} elements -> {} events",
        algorithm,
        array.len(),
        log.len()
    );
    log
}

fn bubble(arr: &mut [u32], log: &mut EventLog) {
    let n = arr.len();
    for i in 0..n {
        for j in 0..n - i - 1 {
            log.compare(j, j + 1);
            if arr[j] > arr[j + 1] {
                log.swap(j, j + 1);
                arr.swap(j, j + 1);
            }
        }
        log.mark_sorted(vec![n - i - 1]);
    }
}

fn selection(arr: &mut [u32], log: &mut EventLog) {
    let n = arr.len();
    for i in 0..n {
        let mut min_idx = i;
        for j in i + 1..n {
            log.compare(min_idx, j);
            if arr[j] < arr[min_idx] {
                min_idx = j;
            }
        }
        if min_idx != i {
            log.swap(i, min_idx);
            arr.swap(i, min_idx);
        }
        log.mark_sorted(vec![i]);
    }
}

fn insertion(arr: &mut [u32], log: &mut EventLog) {
    let n = arr.len();
    if n == 1 {
        // No shifts to record, but the single position is still sorted.
        log.mark_sorted(vec![0]);
        return;
    }
    for i in 1..n {
        let mut j = i;
        while j > 0 {
            log.compare(j, j - 1);
            if arr[j] < arr[j - 1] {
                log.swap(j, j - 1);
                arr.swap(j, j - 1);
                j -= 1;
            } else {
                break;
            }
        }
        log.mark_sorted((0..=i).collect());
    }
}

fn merge_entry(arr: &mut [u32], log: &mut EventLog) {
    let n = arr.len();
    match n {
        0 => {}
        1 => log.mark_sorted(vec![0]),
        _ => {
            let mut aux = arr.to_vec();
            merge_sort(arr, 0, n - 1, &mut aux, log);
        }
    }
}

fn merge_sort(arr: &mut [u32], low: usize, high: usize, aux: &mut [u32], log: &mut EventLog) {
    if low >= high {
        return;
    }
    let mid = low + (high - low) / 2;
    merge_sort(arr, low, mid, aux, log);
    merge_sort(arr, mid + 1, high, aux, log);
    merge(arr, low, mid, high, aux, log);
}

fn merge(
    arr: &mut [u32],
    low: usize,
    mid: usize,
    high: usize,
    aux: &mut [u32],
    log: &mut EventLog,
) {
    aux[low..=high].copy_from_slice(&arr[low..=high]);

    let mut i = low;
    let mut j = mid + 1;

    for k in low..=high {
        if i > mid {
            log.compare(k, j);
            log.overwrite(k, aux[j]);
            arr[k] = aux[j];
            j += 1;
        } else if j > high {
            log.compare(k, i);
            log.overwrite(k, aux[i]);
            arr[k] = aux[i];
            i += 1;
        } else if aux[i] <= aux[j] {
            // Ties favour the left run.
            log.compare(i, j);
            log.overwrite(k, aux[i]);
            arr[k] = aux[i];
            i += 1;
        } else {
            log.compare(i, j);
            log.overwrite(k, aux[j]);
            arr[k] = aux[j];
            j += 1;
        }
    }

    log.mark_sorted((low..=high).collect());
}

fn quick_entry(arr: &mut [u32], log: &mut EventLog) {
    let n = arr.len();
    if n > 0 {
        quick_sort(arr, 0, n - 1, log);
    }
}

fn quick_sort(arr: &mut [u32], low: usize, high: usize, log: &mut EventLog) {
    if low < high {
        let pivot = partition(arr, low, high, log);
        log.mark_sorted(vec![pivot]);

        if pivot > low {
            quick_sort(arr, low, pivot - 1, log);
        }
        if pivot + 1 <= high {
            quick_sort(arr, pivot + 1, high, log);
        }
    } else {
        // Single-element range is sorted by definition.
        log.mark_sorted(vec![low]);
    }
}

/// Lomuto partition around the last element of the range.
fn partition(arr: &mut [u32], low: usize, high: usize, log: &mut EventLog) -> usize {
    let pivot = arr[high];
    let mut i = low;

    for j in low..high {
        log.compare(j, high);
        if arr[j] <= pivot {
            log.swap(i, j);
            arr.swap(i, j);
            i += 1;
        }
    }

    log.swap(i, high);
    arr.swap(i, high);
    i
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::event::EventKind;
    use proptest::prelude::*;

    /// Apply the log's mutation events to a copy of the input.
    fn replay(array: &[u32], log: &EventLog) -> Vec<u32> {
        let mut out = array.to_vec();
        for event in log {
            match event.kind {
                EventKind::Swap { a, b } => out.swap(a, b),
                EventKind::Overwrite { index, value } => out[index] = value,
                _ => {}
            }
        }
        out
    }

    /// Union of all MarkSorted index sets in the log.
    fn sorted_union(log: &EventLog) -> Vec<usize> {
        let mut union: Vec<usize> = log
            .iter()
            .filter_map(|event| match &event.kind {
                EventKind::MarkSorted { indices } => Some(indices.clone()),
                _ => None,
            })
            .flatten()
            .collect();
        union.sort_unstable();
        union.dedup();
        union
    }

    #[test]
    fn test_bubble_scenario() {
        let array = [5, 3, 8, 1];
        let log = trace(&array, SortAlgorithm::Bubble);

        // 5 > 3, so the first comparison is immediately followed by a swap.
        assert_eq!(log.get(0).unwrap().kind, EventKind::Compare { a: 0, b: 1 });
        assert_eq!(log.get(1).unwrap().kind, EventKind::Swap { a: 0, b: 1 });

        assert_eq!(replay(&array, &log), vec![1, 3, 5, 8]);
        assert_eq!(sorted_union(&log), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_empty_array_all_algorithms() {
        for algorithm in SortAlgorithm::ALL {
            let log = trace(&[], algorithm);
            assert!(log.is_empty(), "{algorithm} produced events for []");
        }
    }

    #[test]
    fn test_single_element_all_algorithms() {
        for algorithm in SortAlgorithm::ALL {
            let log = trace(&[4], algorithm);
            assert_eq!(
                sorted_union(&log),
                vec![0],
                "{algorithm} missed position 0"
            );
            assert_eq!(replay(&[4], &log), vec![4]);
        }
    }

    #[test]
    fn test_quick_single_element_log() {
        let log = trace(&[4], SortAlgorithm::Quick);
        assert_eq!(log.len(), 1);
        assert_eq!(
            log.get(0).unwrap().kind,
            EventKind::MarkSorted { indices: vec![0] }
        );
    }

    #[test]
    fn test_selection_single_swap_per_pass() {
        let array = [3, 1, 2];
        let log = trace(&array, SortAlgorithm::Selection);

        let swaps = log
            .iter()
            .filter(|e| matches!(e.kind, EventKind::Swap { .. }))
            .count();
        // Pass 0 swaps (0, 1); pass 1 swaps (1, 2); pass 2 is already in place.
        assert_eq!(swaps, 2);
        assert_eq!(replay(&array, &log), vec![1, 2, 3]);
    }

    #[test]
    fn test_merge_records_moves_not_swaps() {
        let array = [4, 2, 7, 1];
        let log = trace(&array, SortAlgorithm::Merge);

        assert!(
            log.iter()
                .all(|e| !matches!(e.kind, EventKind::Swap { .. }))
        );
        assert!(
            log.iter()
                .any(|e| matches!(e.kind, EventKind::Overwrite { .. }))
        );
        assert_eq!(replay(&array, &log), vec![1, 2, 4, 7]);
    }

    #[test]
    fn test_quick_pivot_marked_before_recursion() {
        let array = [9, 4, 6, 2, 8];
        let log = trace(&array, SortAlgorithm::Quick);

        // First MarkSorted is the first partition's pivot position.
        let first_mark = log
            .iter()
            .find_map(|e| match &e.kind {
                EventKind::MarkSorted { indices } => Some(indices.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(first_mark.len(), 1);

        assert_eq!(replay(&array, &log), vec![2, 4, 6, 8, 9]);
        assert_eq!(sorted_union(&log), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_events_recorded_against_prior_state() {
        // Insertion on [2, 1]: the compare must precede the swap in the log.
        let log = trace(&[2, 1], SortAlgorithm::Insertion);
        assert_eq!(log.get(0).unwrap().kind, EventKind::Compare { a: 1, b: 0 });
        assert_eq!(log.get(1).unwrap().kind, EventKind::Swap { a: 1, b: 0 });
    }

    proptest! {
        #[test]
        fn prop_replay_yields_sorted(
            array in prop::collection::vec(0u32..200, 0..40),
            algo_idx in 0usize..SortAlgorithm::ALL.len(),
        ) {
            let algorithm = SortAlgorithm::ALL[algo_idx];
            let log = trace(&array, algorithm);

            let mut expected = array.clone();
            expected.sort_unstable();
            prop_assert_eq!(replay(&array, &log), expected);
        }

        #[test]
        fn prop_mark_sorted_covers_all_positions(
            array in prop::collection::vec(0u32..200, 1..40),
            algo_idx in 0usize..SortAlgorithm::ALL.len(),
        ) {
            let algorithm = SortAlgorithm::ALL[algo_idx];
            let log = trace(&array, algorithm);
            let expected: Vec<usize> = (0..array.len()).collect();
            prop_assert_eq!(sorted_union(&log), expected);
        }
    }
}
