//! Property-based tests for the reorder algorithms
//!
//! Adjacent moves swap two neighbors; index moves splice. Both must return
//! a permutation of their input with dense orders.

use menuboard_core::layout::reorder::{Direction, move_adjacent, move_to_index};
use menuboard_core::models::{PlacementUnit, UnitConfig, UnitId, UnitType};
use proptest::prelude::*;

// ============================================================================
// Test Strategies
// ============================================================================

fn units(count: usize) -> Vec<PlacementUnit> {
    (0..count)
        .map(|order| {
            let tag = format!("unit_{order}");
            PlacementUnit::new(UnitType::new(tag.as_str()), order, UnitConfig::new())
                .with_id(tag.as_str())
        })
        .collect()
}

/// Unit count plus two valid positions in it
fn positions_strategy() -> impl Strategy<Value = (usize, usize, usize)> {
    (1usize..=8).prop_flat_map(|len| (Just(len), 0..len, 0..len))
}

fn direction_strategy() -> impl Strategy<Value = Direction> {
    prop_oneof![Just(Direction::Up), Just(Direction::Down)]
}

fn ids(units: &[PlacementUnit]) -> Vec<&str> {
    units.iter().map(|u| u.id.as_str()).collect()
}

fn sorted_ids(units: &[PlacementUnit]) -> Vec<&str> {
    let mut ids = ids(units);
    ids.sort_unstable();
    ids
}

fn is_dense(units: &[PlacementUnit]) -> bool {
    units.iter().enumerate().all(|(i, u)| u.order == i)
}

// ============================================================================
// move_to_index
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The moved unit lands at `to` and the rest keep their relative order.
    #[test]
    fn prop_move_to_index_splices((len, from, to) in positions_strategy()) {
        let input = units(len);
        let output = move_to_index(&input, from, to).unwrap();

        prop_assert!(is_dense(&output));
        prop_assert_eq!(sorted_ids(&output), sorted_ids(&input));
        prop_assert_eq!(&output[to].id, &input[from].id);

        let moved = &input[from].id;
        let others_before: Vec<_> = input.iter().filter(|u| &u.id != moved).map(|u| &u.id).collect();
        let others_after: Vec<_> = output.iter().filter(|u| &u.id != moved).map(|u| &u.id).collect();
        prop_assert_eq!(others_before, others_after);
    }

    /// Moving back from `to` to `from` restores the original sequence.
    #[test]
    fn prop_move_to_index_inverts((len, from, to) in positions_strategy()) {
        let input = units(len);
        let moved = move_to_index(&input, from, to).unwrap();
        let back = move_to_index(&moved, to, from).unwrap();
        prop_assert_eq!(back, input);
    }

    /// Out-of-range positions are rejected.
    #[test]
    fn prop_move_to_index_rejects_out_of_range(len in 0usize..6, extra in 0usize..4) {
        let input = units(len);
        prop_assert!(move_to_index(&input, len + extra, 0).is_err());
        prop_assert!(move_to_index(&input, 0, len + extra).is_err());
    }
}

// ============================================================================
// move_adjacent
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// An adjacent move changes at most two positions.
    #[test]
    fn prop_move_adjacent_swaps_neighbors(
        (len, index, _) in positions_strategy(),
        direction in direction_strategy(),
    ) {
        let input = units(len);
        let id = input[index].id.clone();
        let output = move_adjacent(&input, &id, direction).unwrap();

        prop_assert!(is_dense(&output));
        prop_assert_eq!(sorted_ids(&output), sorted_ids(&input));
        let changed = input.iter().zip(&output).filter(|(a, b)| a.id != b.id).count();
        prop_assert!(changed == 0 || changed == 2);
    }

    /// Past a boundary the move is a no-op.
    #[test]
    fn prop_move_adjacent_boundaries_are_noops(len in 1usize..=8) {
        let input = units(len);
        let first = input[0].id.clone();
        let last = input[len - 1].id.clone();
        prop_assert_eq!(move_adjacent(&input, &first, Direction::Up).unwrap(), input.clone());
        prop_assert_eq!(move_adjacent(&input, &last, Direction::Down).unwrap(), input);
    }

    /// A move followed by the reverse move is the identity when not at an edge.
    #[test]
    fn prop_move_adjacent_reverses(
        (len, index, _) in positions_strategy(),
        direction in direction_strategy(),
    ) {
        let at_edge = match direction {
            Direction::Up => index == 0,
            Direction::Down => index + 1 == len,
        };
        prop_assume!(!at_edge);

        let input = units(len);
        let id = input[index].id.clone();
        let moved = move_adjacent(&input, &id, direction).unwrap();
        let back = move_adjacent(&moved, &id, direction.reversed()).unwrap();
        prop_assert_eq!(back, input);
    }

    /// Unknown ids are rejected.
    #[test]
    fn prop_move_adjacent_unknown_unit(len in 0usize..6, direction in direction_strategy()) {
        let input = units(len);
        prop_assert!(move_adjacent(&input, &UnitId::from("missing"), direction).is_err());
    }

    /// Walking one unit down step by step ends where a single splice puts it.
    #[test]
    fn prop_splice_matches_repeated_swaps(len in 3usize..=8, steps in 1usize..=7) {
        let input = units(len);
        let steps = steps.min(len - 1);
        let id = input[0].id.clone();

        let swapped = (0..steps).try_fold(input.clone(), |acc, _| {
            move_adjacent(&acc, &id, Direction::Down)
        }).unwrap();
        let spliced = move_to_index(&input, 0, steps).unwrap();
        prop_assert_eq!(ids(&swapped), ids(&spliced));
    }
}
