//! Persistence tests
//!
//! Presets and applied layouts must survive a restart of the process, and
//! corrupted stored data must be rejected rather than loaded.

use std::sync::Arc;

use menuboard_core::config::{AppSettings, BackendMode, ConfigManager};
use menuboard_core::deploy::Deployer;
use menuboard_core::error::LayoutError;
use menuboard_core::layout::LayoutModel;
use menuboard_core::models::{ConfigValue, LayoutContext, UnitId, UnitType};
use menuboard_core::preset::PresetStore;
use menuboard_core::registry::UnitConfigRegistry;
use menuboard_core::repository::{FileRepository, build_repository};
use menuboard_core::session::LayoutEditorSession;
use tempfile::TempDir;

#[tokio::test]
async fn file_presets_survive_restart() {
    let dir = TempDir::new().unwrap();

    let saved = {
        let store = PresetStore::new(
            LayoutContext::Dashboard,
            Arc::new(FileRepository::new(dir.path())),
        );
        let mut session = LayoutEditorSession::for_context(LayoutContext::Dashboard);
        session.begin_edit().unwrap();
        session.add_unit(&UnitType::from("bookmarks")).unwrap();
        session
            .apply(Some((&store, "Morning")))
            .await
            .unwrap()
            .unwrap()
    };

    let store = PresetStore::new(
        LayoutContext::Dashboard,
        Arc::new(FileRepository::new(dir.path())),
    );
    let presets = store.list().await.unwrap();
    assert_eq!(presets.len(), 2);
    assert_eq!(presets[1], saved);

    store.delete(&saved.id).await.unwrap();
    let reopened = PresetStore::new(
        LayoutContext::Dashboard,
        Arc::new(FileRepository::new(dir.path())),
    );
    assert_eq!(reopened.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn settings_select_the_file_backend() {
    let dir = TempDir::new().unwrap();
    let manager = ConfigManager::with_config_dir(dir.path().to_path_buf());

    let settings = manager.load_settings().unwrap();
    assert_eq!(settings.backend.mode, BackendMode::File);

    let mut memory = AppSettings::default();
    memory.backend.mode = BackendMode::Memory;
    manager.save_settings(&memory).unwrap();
    let reloaded = manager.load_settings().unwrap();
    let repository = build_repository(&reloaded.backend, manager.config_dir()).unwrap();
    assert_eq!(repository.backend_id(), "memory");
}

#[tokio::test]
async fn deployments_are_recorded_on_disk() {
    let dir = TempDir::new().unwrap();
    let repository = Arc::new(FileRepository::new(dir.path()));
    let deployer = Deployer::new(repository.clone());

    let mut session = LayoutEditorSession::for_context(LayoutContext::RichMenu);
    session.begin_edit().unwrap();
    for (unit, field, value) in [
        ("reserve", "url", "https://book.example.com"),
        ("menu", "pdf", "dinner.pdf"),
        ("access", "map_url", "https://maps.example.com/shop"),
    ] {
        session
            .set_unit_config(&UnitId::from(unit), field, ConfigValue::from(value))
            .unwrap();
    }
    session.apply(None).await.unwrap();

    let payload = deployer.deploy(&session).await.unwrap();
    let history = FileRepository::new(dir.path()).deployments().await.unwrap();
    assert_eq!(history, vec![payload]);
    assert!(!repository.presets_path().exists());
}

#[test]
fn applied_layout_roundtrips_through_config_dir() {
    let dir = TempDir::new().unwrap();
    let manager = ConfigManager::with_config_dir(dir.path().to_path_buf());
    let registry = UnitConfigRegistry::rich_menu();

    assert!(
        manager
            .load_applied_layout(LayoutContext::RichMenu)
            .unwrap()
            .is_none()
    );

    let session = LayoutEditorSession::for_context(LayoutContext::RichMenu);
    manager
        .save_applied_layout(LayoutContext::RichMenu, &session.applied().snapshot())
        .unwrap();

    let snapshot = manager
        .load_applied_layout(LayoutContext::RichMenu)
        .unwrap()
        .unwrap();
    let layout = LayoutModel::from_snapshot(snapshot, &registry).unwrap();
    assert_eq!(&layout, session.applied());
    assert!(
        manager
            .load_applied_layout(LayoutContext::Dashboard)
            .unwrap()
            .is_none()
    );
}

#[test]
fn corrupted_snapshot_is_rejected() {
    let dir = TempDir::new().unwrap();
    let manager = ConfigManager::with_config_dir(dir.path().to_path_buf());
    let registry = UnitConfigRegistry::rich_menu();

    let session = LayoutEditorSession::for_context(LayoutContext::RichMenu);
    let mut snapshot = session.applied().snapshot();
    let mut duplicate = snapshot.units[0].clone();
    duplicate.id = UnitId::from("other");
    snapshot.units.push(duplicate);
    manager
        .save_applied_layout(LayoutContext::RichMenu, &snapshot)
        .unwrap();

    let loaded = manager
        .load_applied_layout(LayoutContext::RichMenu)
        .unwrap()
        .unwrap();
    assert!(matches!(
        LayoutModel::from_snapshot(loaded, &registry),
        Err(LayoutError::InvalidSnapshot(_))
    ));

    std::fs::write(
        manager.applied_layout_path(LayoutContext::RichMenu),
        "{ not json",
    )
    .unwrap();
    assert!(
        manager
            .load_applied_layout(LayoutContext::RichMenu)
            .is_err()
    );
}
