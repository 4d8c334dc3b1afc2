//! Property-based tests for the preset store
//!
//! Arbitrary save/delete sequences must always list exactly one default,
//! first, and never let the default be overwritten or deleted.

use std::collections::HashSet;
use std::sync::Arc;

use menuboard_core::error::PresetError;
use menuboard_core::layout::LayoutModel;
use menuboard_core::models::{LayoutContext, ShapeId, UnitType};
use menuboard_core::preset::{DEFAULT_PRESET_NAME, PresetStore};
use menuboard_core::registry::UnitConfigRegistry;
use menuboard_core::repository::InMemoryRepository;
use proptest::prelude::*;

const MENU_TYPES: &[&str] = &["reserve", "chat", "menu", "access", "coupon", "website"];

// ============================================================================
// Test Strategies
// ============================================================================

/// Operation that can be performed on a `PresetStore`
#[derive(Debug, Clone)]
enum PresetOperation {
    Save { name: String, types: Vec<usize> },
    Delete(usize),
    DeleteDefault,
    SaveAsDefault,
}

fn preset_name_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Lunch".to_string()),
        Just("lunch".to_string()),
        Just("Dinner".to_string()),
        "[A-Z][a-z]{2,10}",
    ]
}

fn preset_operation_strategy() -> impl Strategy<Value = PresetOperation> {
    prop_oneof![
        4 => (
            preset_name_strategy(),
            proptest::collection::vec(0..MENU_TYPES.len(), 0..6),
        )
            .prop_map(|(name, types)| PresetOperation::Save { name, types }),
        2 => (0usize..8).prop_map(PresetOperation::Delete),
        1 => Just(PresetOperation::DeleteDefault),
        1 => Just(PresetOperation::SaveAsDefault),
    ]
}

fn layout(types: &[usize]) -> LayoutModel {
    let registry = UnitConfigRegistry::rich_menu();
    types
        .iter()
        .fold(LayoutModel::empty(ShapeId::Grid2x3), |layout, t| {
            layout
                .add_unit(&registry, &UnitType::from(MENU_TYPES[*t]))
                .map_or(layout, |(next, _)| next)
        })
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

async fn apply_operation(store: &PresetStore, op: &PresetOperation) -> Result<(), PresetError> {
    match op {
        PresetOperation::Save { name, types } => {
            store.save(name, None, &layout(types)).await.map(|_| ())
        }
        PresetOperation::Delete(index) => {
            let presets = store.list().await?;
            let id = presets[index % presets.len()].id.clone();
            store.delete(&id).await
        }
        PresetOperation::DeleteDefault => store.delete(&store.default_preset().id).await,
        PresetOperation::SaveAsDefault => store
            .save(DEFAULT_PRESET_NAME, None, &layout(&[0]))
            .await
            .map(|_| ()),
    }
}

// ============================================================================
// Default preset protection
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Exactly one default, always first, always the built-in one.
    #[test]
    fn prop_exactly_one_default(
        ops in proptest::collection::vec(preset_operation_strategy(), 0..20),
    ) {
        let runtime = runtime();
        let store = PresetStore::new(
            LayoutContext::RichMenu,
            Arc::new(InMemoryRepository::new()),
        );
        let builtin = store.default_preset().clone();

        for op in &ops {
            let result = runtime.block_on(apply_operation(&store, op));
            if matches!(op, PresetOperation::DeleteDefault | PresetOperation::SaveAsDefault) {
                prop_assert!(matches!(result, Err(PresetError::ProtectedResource(_))));
            }

            let presets = runtime.block_on(store.list()).unwrap();
            prop_assert_eq!(&presets[0], &builtin);
            prop_assert_eq!(presets.iter().filter(|p| p.is_default).count(), 1);
        }
    }

    /// Names are unique case-insensitively across stored presets.
    #[test]
    fn prop_names_stay_unique(
        ops in proptest::collection::vec(preset_operation_strategy(), 0..20),
    ) {
        let runtime = runtime();
        let store = PresetStore::new(
            LayoutContext::RichMenu,
            Arc::new(InMemoryRepository::new()),
        );
        for op in &ops {
            let _ = runtime.block_on(apply_operation(&store, op));
        }

        let presets = runtime.block_on(store.list()).unwrap();
        let names: HashSet<_> = presets.iter().map(|p| p.name.to_lowercase()).collect();
        prop_assert_eq!(names.len(), presets.len());
    }

    /// Every stored layout loads back into the same layout.
    #[test]
    fn prop_saved_layout_loads_back(
        name in preset_name_strategy(),
        types in proptest::collection::vec(0..MENU_TYPES.len(), 0..6),
    ) {
        prop_assume!(!name.eq_ignore_ascii_case(DEFAULT_PRESET_NAME));
        let runtime = runtime();
        let store = PresetStore::new(
            LayoutContext::RichMenu,
            Arc::new(InMemoryRepository::new()),
        );
        let original = layout(&types);
        let saved = runtime.block_on(store.save(&name, None, &original)).unwrap();
        let found = runtime.block_on(store.find(&name)).unwrap();
        prop_assert_eq!(&found.id, &saved.id);
        prop_assert_eq!(store.load_layout(&found).unwrap(), original);
    }
}
