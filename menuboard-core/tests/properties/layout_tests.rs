//! Property-based tests for the layout model
//!
//! Random mutation sequences must keep every layout invariant, and a
//! rejected mutation must never change anything.

use menuboard_core::layout::{AddOutcome, Direction, LayoutModel};
use menuboard_core::models::{ConfigValue, ShapeId, UnitSize, UnitType};
use menuboard_core::registry::UnitConfigRegistry;
use proptest::prelude::*;

const MENU_TYPES: &[&str] = &["reserve", "chat", "menu", "access", "coupon", "website", "phone"];

const GRID_SHAPES: &[ShapeId] = &[
    ShapeId::Grid1x1,
    ShapeId::Grid1x2,
    ShapeId::Grid1x3,
    ShapeId::Grid2x2,
    ShapeId::Grid2x3,
];

// ============================================================================
// Test Strategies
// ============================================================================

/// Operation that can be performed on a `LayoutModel`
#[derive(Debug, Clone)]
enum LayoutOperation {
    Add(usize),
    Remove(usize),
    ToggleVisible(usize),
    SetLabel(usize, String),
    ChangeShape(usize),
    MoveAdjacentDown(usize),
    MoveAdjacentUp(usize),
    MoveToIndex(usize, usize),
}

fn layout_operation_strategy() -> impl Strategy<Value = LayoutOperation> {
    prop_oneof![
        3 => (0..MENU_TYPES.len()).prop_map(LayoutOperation::Add),
        1 => (0usize..8).prop_map(LayoutOperation::Remove),
        1 => (0usize..8).prop_map(LayoutOperation::ToggleVisible),
        1 => (0usize..8, "[a-zA-Z ]{0,30}").prop_map(|(i, s)| LayoutOperation::SetLabel(i, s)),
        1 => (0..GRID_SHAPES.len()).prop_map(LayoutOperation::ChangeShape),
        1 => (0usize..8).prop_map(LayoutOperation::MoveAdjacentDown),
        1 => (0usize..8).prop_map(LayoutOperation::MoveAdjacentUp),
        1 => (0usize..8, 0usize..8).prop_map(|(a, b)| LayoutOperation::MoveToIndex(a, b)),
    ]
}

fn layout_operations_strategy(max_ops: usize) -> impl Strategy<Value = Vec<LayoutOperation>> {
    proptest::collection::vec(layout_operation_strategy(), 0..=max_ops)
}

/// Applies an operation; a rejected operation returns the layout unchanged.
fn apply_operation(
    layout: &LayoutModel,
    registry: &UnitConfigRegistry,
    op: &LayoutOperation,
) -> LayoutModel {
    let unit_at = |index: usize| {
        let units = layout.units();
        (!units.is_empty()).then(|| units[index % units.len()].id.clone())
    };

    let result = match op {
        LayoutOperation::Add(t) => layout
            .add_unit(registry, &UnitType::from(MENU_TYPES[*t]))
            .map(|(l, _)| l),
        LayoutOperation::Remove(i) => match unit_at(*i) {
            Some(id) => layout.remove_unit(&id).map(|(l, _)| l),
            None => return layout.clone(),
        },
        LayoutOperation::ToggleVisible(i) => match unit_at(*i) {
            Some(id) => layout.toggle_visible(&id),
            None => return layout.clone(),
        },
        LayoutOperation::SetLabel(i, label) => match unit_at(*i) {
            Some(id) => {
                layout.set_unit_config(registry, &id, "label", ConfigValue::from(label.as_str()))
            }
            None => return layout.clone(),
        },
        LayoutOperation::ChangeShape(s) => {
            layout.change_shape(GRID_SHAPES[*s]).map(|c| c.layout)
        }
        LayoutOperation::MoveAdjacentDown(i) => match unit_at(*i) {
            Some(id) => layout.move_adjacent(&id, Direction::Down),
            None => return layout.clone(),
        },
        LayoutOperation::MoveAdjacentUp(i) => match unit_at(*i) {
            Some(id) => layout.move_adjacent(&id, Direction::Up),
            None => return layout.clone(),
        },
        LayoutOperation::MoveToIndex(a, b) => layout.move_to_index(*a, *b),
    };
    result.unwrap_or_else(|_| layout.clone())
}

fn type_names(layout: &LayoutModel) -> Vec<String> {
    layout
        .units()
        .iter()
        .map(|u| u.unit_type.to_string())
        .collect()
}

// ============================================================================
// Invariants under random mutation
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Orders stay dense, capacity holds, types and ids stay unique.
    #[test]
    fn prop_invariants_hold_after_every_operation(
        start in 0..GRID_SHAPES.len(),
        ops in layout_operations_strategy(30),
    ) {
        let registry = UnitConfigRegistry::rich_menu();
        let mut layout = LayoutModel::empty(GRID_SHAPES[start]);

        for op in &ops {
            layout = apply_operation(&layout, &registry, op);
            prop_assert!(
                layout.check_invariants().is_ok(),
                "invariant broken after {:?}: {:?}",
                op,
                layout.check_invariants()
            );
            prop_assert!(layout.len() <= layout.shape().max_units);
        }
    }

    /// A mutation never changes the layout it was called on.
    #[test]
    fn prop_mutations_are_pure(
        ops in layout_operations_strategy(15),
        probe in layout_operation_strategy(),
    ) {
        let registry = UnitConfigRegistry::rich_menu();
        let layout = ops
            .iter()
            .fold(LayoutModel::empty(ShapeId::Grid2x3), |l, op| apply_operation(&l, &registry, op));

        let before = layout.clone();
        let _ = apply_operation(&layout, &registry, &probe);
        prop_assert_eq!(layout, before);
    }

    /// Adding a type twice toggles it off and restores the type sequence.
    #[test]
    fn prop_add_is_a_toggle(
        ops in layout_operations_strategy(10),
        t in 0..MENU_TYPES.len(),
    ) {
        let registry = UnitConfigRegistry::rich_menu();
        let layout = ops
            .iter()
            .fold(LayoutModel::empty(ShapeId::Grid2x3), |l, op| apply_operation(&l, &registry, op));
        let unit_type = UnitType::from(MENU_TYPES[t]);
        prop_assume!(layout.find_by_type(&unit_type).is_none());
        prop_assume!(layout.remaining_capacity() > 0);

        let (added, outcome) = layout.add_unit(&registry, &unit_type).unwrap();
        prop_assert!(matches!(outcome, AddOutcome::Added(_)));
        prop_assert_eq!(added.units().last().map(|u| u.order), Some(layout.len()));

        let (removed, outcome) = added.add_unit(&registry, &unit_type).unwrap();
        prop_assert!(outcome.is_removed());
        prop_assert_eq!(type_names(&removed), type_names(&layout));
    }

    /// Shrinking keeps the lowest-order prefix and reports the rest.
    #[test]
    fn prop_shape_change_truncates_tail(
        ops in layout_operations_strategy(20),
        target in 0..GRID_SHAPES.len(),
    ) {
        let registry = UnitConfigRegistry::rich_menu();
        let layout = ops
            .iter()
            .fold(LayoutModel::empty(ShapeId::Grid2x3), |l, op| apply_operation(&l, &registry, op));
        let shape = GRID_SHAPES[target];

        let change = layout.change_shape(shape).unwrap();
        let kept = layout.len().min(shape.max_units());
        prop_assert_eq!(change.layout.units(), &layout.units()[..kept]);
        prop_assert_eq!(change.dropped.as_slice(), &layout.units()[kept..]);
        prop_assert!(change.layout.check_invariants().is_ok());
    }

    /// Dashboard sections can take every size; grids accept none.
    #[test]
    fn prop_size_only_in_free_lists(size_index in 0..UnitSize::all().len()) {
        let size = UnitSize::all()[size_index];
        let dashboard = UnitConfigRegistry::dashboard();
        let (layout, _) = LayoutModel::empty(ShapeId::Free)
            .add_unit(&dashboard, &UnitType::from("bookmarks"))
            .unwrap();
        let id = layout.units()[0].id.clone();
        let resized = layout.set_unit_size(&id, size).unwrap();
        prop_assert_eq!(resized.units()[0].size, Some(size));

        let menu = UnitConfigRegistry::rich_menu();
        let (grid, _) = LayoutModel::empty(ShapeId::Grid1x1)
            .add_unit(&menu, &UnitType::from("chat"))
            .unwrap();
        let id = grid.units()[0].id.clone();
        prop_assert!(grid.set_unit_size(&id, size).is_err());
    }
}
