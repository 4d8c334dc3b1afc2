//! Editor workflow tests
//!
//! Full edit, save, apply and deploy cycles against the in-memory backend.

use std::sync::Arc;

use menuboard_core::deploy::Deployer;
use menuboard_core::error::{DeployError, PresetError, RepositoryError, SessionError};
use menuboard_core::layout::Direction;
use menuboard_core::models::{ConfigValue, LayoutContext, ShapeId, UnitId, UnitType};
use menuboard_core::preset::PresetStore;
use menuboard_core::repository::{InMemoryRepository, LayoutRepository};
use menuboard_core::session::LayoutEditorSession;

fn rich_menu() -> (LayoutEditorSession, PresetStore, Arc<InMemoryRepository>) {
    let repository = Arc::new(InMemoryRepository::new());
    let store = PresetStore::new(LayoutContext::RichMenu, repository.clone());
    let session = LayoutEditorSession::for_context(LayoutContext::RichMenu);
    (session, store, repository)
}

fn configure_menu(session: &mut LayoutEditorSession) {
    for (unit, field, value) in [
        ("reserve", "url", "https://book.example.com"),
        ("menu", "pdf", "dinner.pdf"),
        ("access", "map_url", "https://maps.example.com/shop"),
    ] {
        session
            .set_unit_config(&UnitId::from(unit), field, ConfigValue::from(value))
            .unwrap();
    }
}

fn type_names(session: &LayoutEditorSession) -> Vec<String> {
    session
        .current()
        .units()
        .iter()
        .map(|u| u.unit_type.to_string())
        .collect()
}

// ========== Edit / Apply / Cancel ==========

#[tokio::test]
async fn apply_with_persist_saves_then_commits() {
    let (mut session, store, repository) = rich_menu();
    session.begin_edit().unwrap();
    session.change_shape(ShapeId::Grid2x3).unwrap();
    session.add_unit(&UnitType::from("coupon")).unwrap();

    let saved = session
        .apply(Some((&store, "Weekend")))
        .await
        .unwrap()
        .expect("persisting apply returns the preset");

    assert!(!session.is_editing());
    assert_eq!(session.applied().shape_id(), ShapeId::Grid2x3);
    assert_eq!(saved.snapshot, session.applied().snapshot());
    assert_eq!(repository.len().await, 1);
}

#[tokio::test]
async fn failed_persist_keeps_working_copy() {
    let (mut session, store, repository) = rich_menu();
    let applied = session.applied().clone();

    session.begin_edit().unwrap();
    session.add_unit(&UnitType::from("chat")).unwrap();
    let working = session.current().clone();

    repository.fail_next_writes(1);
    let err = session.apply(Some((&store, "Broken"))).await.unwrap_err();
    assert!(matches!(
        err,
        SessionError::Preset(PresetError::Persistence(RepositoryError::Unavailable(_)))
    ));

    assert!(session.is_editing());
    assert_eq!(session.current(), &working);
    assert_eq!(session.applied(), &applied);

    // Retrying after the backend recovers succeeds.
    session.apply(Some((&store, "Broken"))).await.unwrap();
    assert_eq!(session.applied(), &working);
}

#[tokio::test]
async fn apply_over_existing_preset_keeps_description() {
    let (mut session, store, repository) = rich_menu();
    session.begin_edit().unwrap();
    session
        .save_as_preset(&store, "Lunch", Some("Weekday lunch menu"))
        .await
        .unwrap();
    session.cancel();

    store.apply(&mut session, "Lunch").await.unwrap();
    session.toggle_visible(&UnitId::from("chat")).unwrap();
    let saved = session
        .apply(Some((&store, "Lunch")))
        .await
        .unwrap()
        .expect("persisting apply returns the preset");

    assert_eq!(saved.description, "Weekday lunch menu");
    assert_eq!(store.find("Lunch").await.unwrap().description, "Weekday lunch menu");
    assert_eq!(repository.len().await, 1);
}

#[tokio::test]
async fn cancel_discards_every_kind_of_edit() {
    let (mut session, _, _) = rich_menu();
    let applied = session.applied().clone();

    session.begin_edit().unwrap();
    configure_menu(&mut session);
    session
        .move_adjacent(&UnitId::from("access"), Direction::Up)
        .unwrap();
    session.toggle_visible(&UnitId::from("chat")).unwrap();
    session.change_shape(ShapeId::Grid1x2).unwrap();
    assert!(session.is_dirty());

    assert!(session.cancel());
    assert_eq!(session.current(), &applied);
    assert!(!session.cancel());
}

#[tokio::test]
async fn apply_when_idle_is_rejected() {
    let (mut session, store, repository) = rich_menu();
    assert!(matches!(
        session.apply(Some((&store, "Nothing"))).await,
        Err(SessionError::NotEditing)
    ));
    assert!(repository.is_empty().await);
}

// ========== Presets ==========

#[tokio::test]
async fn preset_roundtrip_through_working_copy() {
    let (mut session, store, _) = rich_menu();

    session.begin_edit().unwrap();
    session.move_to_index(0, 3).unwrap();
    let arranged = type_names(&session);
    session.save_as_preset(&store, "Night", Some("late service")).await.unwrap();
    session.cancel();

    let preset = store.apply(&mut session, "night").await.unwrap();
    assert_eq!(preset.description, "late service");
    assert!(session.is_editing());
    assert_eq!(type_names(&session), arranged);
    assert_ne!(session.applied().units(), session.current().units());

    store.reset_to_default(&mut session).unwrap();
    assert_eq!(
        type_names(&session),
        ["reserve", "chat", "menu", "access"]
    );
}

#[tokio::test]
async fn preset_of_other_context_is_rejected() {
    let (mut session, _, repository) = rich_menu();
    let dashboard = PresetStore::new(LayoutContext::Dashboard, repository);
    assert!(matches!(
        dashboard.apply(&mut session, "Default").await,
        Err(PresetError::ContextMismatch { .. })
    ));
    assert!(!session.is_editing());
}

#[tokio::test]
async fn contexts_share_a_repository_without_mixing() {
    let repository = Arc::new(InMemoryRepository::new());
    let menu_store = PresetStore::new(LayoutContext::RichMenu, repository.clone());
    let dashboard_store = PresetStore::new(LayoutContext::Dashboard, repository.clone());

    let menu = LayoutEditorSession::for_context(LayoutContext::RichMenu);
    let dashboard = LayoutEditorSession::for_context(LayoutContext::Dashboard);
    menu.save_as_preset(&menu_store, "Shared", None).await.unwrap();
    dashboard
        .save_as_preset(&dashboard_store, "Shared", None)
        .await
        .unwrap();

    assert_eq!(menu_store.list().await.unwrap().len(), 2);
    assert_eq!(dashboard_store.list().await.unwrap().len(), 2);
    assert_eq!(
        repository
            .fetch_presets(LayoutContext::Dashboard)
            .await
            .unwrap()
            .len(),
        1
    );
}

#[tokio::test]
async fn default_is_protected_from_delete_and_overwrite() {
    let (session, store, repository) = rich_menu();
    let default_id = store.default_preset().id.clone();

    assert!(matches!(
        store.delete(&default_id).await,
        Err(PresetError::ProtectedResource(_))
    ));
    assert!(matches!(
        session.save_as_preset(&store, " default ", None).await,
        Err(SessionError::Preset(PresetError::ProtectedResource(_)))
    ));
    assert!(repository.is_empty().await);
}

// ========== Deploy ==========

#[tokio::test]
async fn deploy_publishes_applied_menu() {
    let (mut session, _, repository) = rich_menu();
    let deployer = Deployer::new(repository.clone());

    assert!(matches!(
        deployer.deploy(&session).await,
        Err(DeployError::NotReady(_))
    ));

    session.begin_edit().unwrap();
    configure_menu(&mut session);
    session.apply(None).await.unwrap();

    let payload = deployer.deploy(&session).await.unwrap();
    assert_eq!(payload.plan.shape_id, ShapeId::Grid2x2);
    assert_eq!(payload.plan.areas.len(), 4);
    assert_eq!(repository.deployments().await.len(), 1);
    // Deploying is not saving.
    assert!(repository.is_empty().await);
}

#[tokio::test]
async fn deploy_ignores_unapplied_edits() {
    let (mut session, _, repository) = rich_menu();
    let deployer = Deployer::new(repository.clone());

    session.begin_edit().unwrap();
    configure_menu(&mut session);
    session.apply(None).await.unwrap();

    session.begin_edit().unwrap();
    session
        .set_unit_config(&UnitId::from("reserve"), "url", ConfigValue::from(""))
        .unwrap_err();
    session.change_shape(ShapeId::Grid1x1).unwrap();

    let payload = deployer.deploy(&session).await.unwrap();
    assert_eq!(payload.plan.areas.len(), 4);
}
