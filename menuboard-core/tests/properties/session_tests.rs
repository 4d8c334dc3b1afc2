//! Property-based tests for the staged editor session
//!
//! Whatever happens to the working copy, the applied layout only changes on
//! apply, and cancel always restores it as the current view.

use menuboard_core::error::{SessionError, SessionResult};
use menuboard_core::layout::Direction;
use menuboard_core::models::{LayoutContext, ShapeId, UnitId, UnitSize, UnitType};
use menuboard_core::session::LayoutEditorSession;
use proptest::prelude::*;

const SECTION_TYPES: &[&str] = &[
    "reservation_summary",
    "chat_activity",
    "sales_chart",
    "recent_reports",
    "broadcast_stats",
    "schedule_calendar",
    "notification_feed",
    "bookmarks",
];

// ============================================================================
// Test Strategies
// ============================================================================

/// Operation that can be performed on a dashboard session
#[derive(Debug, Clone)]
enum SessionOperation {
    Add(usize),
    Remove(usize),
    Toggle(usize),
    Resize(usize, usize),
    Nudge(usize, bool),
    Move(usize, usize),
}

fn session_operation_strategy() -> impl Strategy<Value = SessionOperation> {
    prop_oneof![
        2 => (0..SECTION_TYPES.len()).prop_map(SessionOperation::Add),
        1 => (0usize..8).prop_map(SessionOperation::Remove),
        1 => (0usize..8).prop_map(SessionOperation::Toggle),
        1 => (0usize..8, 0..UnitSize::all().len()).prop_map(|(i, s)| SessionOperation::Resize(i, s)),
        1 => (0usize..8, any::<bool>()).prop_map(|(i, up)| SessionOperation::Nudge(i, up)),
        1 => (0usize..8, 0usize..8).prop_map(|(a, b)| SessionOperation::Move(a, b)),
    ]
}

fn unit_at(session: &LayoutEditorSession, index: usize) -> Option<UnitId> {
    let units = session.current().units();
    (!units.is_empty()).then(|| units[index % units.len()].id.clone())
}

fn apply_operation(session: &mut LayoutEditorSession, op: &SessionOperation) -> SessionResult<()> {
    match op {
        SessionOperation::Add(t) => session
            .add_unit(&UnitType::from(SECTION_TYPES[*t]))
            .map(|_| ()),
        SessionOperation::Remove(i) => match unit_at(session, *i) {
            Some(id) => session.remove_unit(&id).map(|_| ()),
            None => Ok(()),
        },
        SessionOperation::Toggle(i) => match unit_at(session, *i) {
            Some(id) => session.toggle_visible(&id),
            None => Ok(()),
        },
        SessionOperation::Resize(i, s) => match unit_at(session, *i) {
            Some(id) => session.set_unit_size(&id, UnitSize::all()[*s]),
            None => Ok(()),
        },
        SessionOperation::Nudge(i, up) => match unit_at(session, *i) {
            Some(id) => {
                let direction = if *up { Direction::Up } else { Direction::Down };
                session.move_adjacent(&id, direction)
            }
            None => Ok(()),
        },
        SessionOperation::Move(a, b) => session.move_to_index(*a, *b),
    }
}

// ============================================================================
// Staged edits
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Edits never leak into the applied layout, and cancel discards them.
    #[test]
    fn prop_cancel_restores_applied(
        ops in proptest::collection::vec(session_operation_strategy(), 0..25),
    ) {
        let mut session = LayoutEditorSession::for_context(LayoutContext::Dashboard);
        let applied = session.applied().clone();

        session.begin_edit().unwrap();
        for op in &ops {
            let _ = apply_operation(&mut session, op);
            prop_assert_eq!(session.applied(), &applied);
            prop_assert!(session.current().check_invariants().is_ok());
        }

        prop_assert!(session.cancel());
        prop_assert!(!session.is_editing());
        prop_assert_eq!(session.current(), &applied);
    }

    /// Mutations are rejected while idle and leave the session untouched.
    #[test]
    fn prop_idle_session_rejects_mutations(op in session_operation_strategy()) {
        let mut session = LayoutEditorSession::for_context(LayoutContext::Dashboard);
        let before = session.applied().clone();

        let result = apply_operation(&mut session, &op);
        prop_assert!(matches!(result, Err(SessionError::NotEditing)));
        prop_assert!(!session.is_editing());
        prop_assert_eq!(session.applied(), &before);
    }

    /// Switching shape in the rich menu reports exactly the truncated tail.
    #[test]
    fn prop_shape_switch_reports_dropped(
        shape_index in 0..ShapeId::all().len(),
    ) {
        let shape = ShapeId::all()[shape_index];
        prop_assume!(shape.context() == LayoutContext::RichMenu);

        let mut session = LayoutEditorSession::for_context(LayoutContext::RichMenu);
        let before = session.applied().units().to_vec();
        session.begin_edit().unwrap();
        let dropped = session.change_shape(shape).unwrap();

        let kept = before.len().min(shape.max_units());
        prop_assert_eq!(session.current().units(), &before[..kept]);
        prop_assert_eq!(dropped.as_slice(), &before[kept..]);
    }
}

/// Applying commits exactly the working copy.
#[test]
fn apply_commits_working_copy() {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    let mut session = LayoutEditorSession::for_context(LayoutContext::Dashboard);
    session.begin_edit().unwrap();
    session.add_unit(&UnitType::from("bookmarks")).unwrap();
    let last = session.current().len() - 1;
    session.move_to_index(last, 0).unwrap();
    let working = session.current().clone();

    let saved = runtime.block_on(session.apply(None)).unwrap();
    assert!(saved.is_none());
    assert!(!session.is_editing());
    assert_eq!(session.applied(), &working);
    assert_eq!(session.applied().units()[0].unit_type.as_str(), "bookmarks");
}
