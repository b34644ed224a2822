use career_multiverse::{
    AuthService, CareerManager, MultiverseError, RealityStore, RoadmapService, ServiceConfig,
    SqliteStorage, StoreConfig,
};
use std::sync::Arc;
use tempfile::TempDir;

fn open(dir: &TempDir) -> Arc<RealityStore> {
    let _ = env_logger::builder().is_test(true).try_init();
    let config = StoreConfig::default().with_db_path(dir.path().join("multiverse.db"));
    Arc::new(RealityStore::open(config).unwrap())
}

#[test]
fn test_profile_survives_reopen() {
    let dir = TempDir::new().unwrap();

    let (fork_id, profile) = {
        let manager = CareerManager::new(open(&dir));
        let fork = manager.fork_reality("root", "Plan B").unwrap();
        manager.add_gpa_record("Spring 2025", 3.9).unwrap();
        (fork.id, manager.profile().unwrap())
    };

    let manager = CareerManager::new(open(&dir));
    let reloaded = manager.profile().unwrap();
    assert_eq!(reloaded, profile);
    assert_eq!(reloaded.active_reality_id, fork_id);
    assert_eq!(reloaded.gpa_history.len(), 3);
}

#[test]
fn test_seeding_happens_once() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir);

    let first = store.read().unwrap();
    assert_eq!(store.revision(), 1);
    let second = store.read().unwrap();
    assert_eq!(store.revision(), 1);
    assert_eq!(first, second);
}

#[test]
fn test_stores_share_one_database_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("shared.db");

    let writer = RealityStore::with_storage(
        SqliteStorage::new(&path).unwrap(),
        StoreConfig::default(),
    );
    let reader = RealityStore::with_storage(
        SqliteStorage::new(&path).unwrap(),
        StoreConfig::default(),
    );

    let mut profile = writer.read().unwrap();
    profile.name = "Renamed".to_string();
    writer.write(&profile).unwrap();

    assert_eq!(reader.read().unwrap().name, "Renamed");
}

#[test]
fn test_corrupt_record_is_a_serialization_error() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir);
    let key = store.config().profile_key.clone();
    store.save_slot(&key, "{not json").unwrap();

    assert!(matches!(
        store.read().unwrap_err(),
        MultiverseError::Serialization(_)
    ));
}

#[tokio::test]
async fn test_session_and_roadmap_persist() {
    let dir = TempDir::new().unwrap();
    {
        let store = open(&dir);
        let auth = AuthService::new(Arc::clone(&store), ServiceConfig::immediate());
        auth.signup("Sam", "sam@example.com", "pw").await.unwrap();

        let manager = CareerManager::new(store);
        let origin = manager.active_reality().unwrap();
        RoadmapService::new(manager, ServiceConfig::immediate())
            .generate_roadmap(&origin.id)
            .await
            .unwrap();
    }

    let store = open(&dir);
    let auth = AuthService::new(Arc::clone(&store), ServiceConfig::immediate());
    let user = auth.current_user().unwrap().unwrap();
    assert_eq!(user.email, "sam@example.com");

    let origin = CareerManager::new(store).active_reality().unwrap();
    assert_eq!(origin.roadmap.len(), 3);
    assert_eq!(origin.history[0].description, "AI Generated Smart Roadmap");
}
