use orgvault_core::{
    Installation, RepoError, Repository, SessionFactory, SqliteRepository,
};

fn installation_repo() -> SqliteRepository<Installation> {
    let sessions = SessionFactory::in_memory().unwrap();
    SqliteRepository::new(sessions)
}

#[test]
fn create_then_get_returns_equal_record() {
    let repo = installation_repo();

    let installation = Installation::new("admin@example.com", "secret-key");
    let created = repo.create(&installation).unwrap();
    assert_eq!(created, installation);

    let loaded = repo.get_by_id(&installation.id).unwrap().unwrap();
    assert_eq!(loaded, installation);
}

#[test]
fn get_absent_record_is_none_not_an_error() {
    let repo = installation_repo();

    let missing = Installation::new("ghost@example.com", "none");
    assert!(repo.get_by_id(&missing.id).unwrap().is_none());
}

#[test]
fn duplicate_create_surfaces_constraint_violation() {
    let repo = installation_repo();

    let installation = Installation::new("dup@example.com", "key");
    repo.create(&installation).unwrap();

    let err = repo.create(&installation).unwrap_err();
    assert!(matches!(err, RepoError::Constraint(_)));
}

#[test]
fn replace_missing_record_returns_not_found() {
    let repo = installation_repo();

    let installation = Installation::new("missing@example.com", "key");
    let err = repo.replace(&installation).unwrap_err();
    match err {
        RepoError::NotFound { table, id } => {
            assert_eq!(table, "installations");
            assert_eq!(id, installation.id.to_string());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn replace_overwrites_every_field() {
    let repo = installation_repo();

    let mut installation = Installation::new("old@example.com", "old-key");
    repo.create(&installation).unwrap();

    installation.email = "new@example.com".to_string();
    installation.key = "new-key".to_string();
    installation.enabled = false;
    installation.created_at = 42;
    repo.replace(&installation).unwrap();

    let loaded = repo.get_by_id(&installation.id).unwrap().unwrap();
    assert_eq!(loaded, installation);
    assert_eq!(loaded.email, "new@example.com");
    assert_eq!(loaded.key, "new-key");
    assert!(!loaded.enabled);
    assert_eq!(loaded.created_at, 42);
}

#[test]
fn upsert_creates_when_absent_and_replaces_when_present() {
    let repo = installation_repo();

    let mut installation = Installation::new("upsert@example.com", "first");
    repo.upsert(&installation).unwrap();
    let loaded = repo.get_by_id(&installation.id).unwrap().unwrap();
    assert_eq!(loaded.key, "first");

    installation.key = "second".to_string();
    installation.enabled = false;
    repo.upsert(&installation).unwrap();
    let loaded = repo.get_by_id(&installation.id).unwrap().unwrap();
    assert_eq!(loaded.key, "second");
    assert!(!loaded.enabled);
}

#[test]
fn delete_removes_record_and_is_idempotent() {
    let repo = installation_repo();

    let installation = Installation::new("bye@example.com", "key");
    repo.create(&installation).unwrap();

    repo.delete(&installation).unwrap();
    assert!(repo.get_by_id(&installation.id).unwrap().is_none());

    // Deleting twice must not fail or corrupt anything.
    repo.delete(&installation).unwrap();
    assert!(repo.get_by_id(&installation.id).unwrap().is_none());
}

#[test]
fn file_backed_factory_supports_the_same_contract() {
    let dir = tempfile::tempdir().unwrap();
    let sessions = SessionFactory::open(dir.path().join("orgvault.db")).unwrap();
    let repo: SqliteRepository<Installation> = SqliteRepository::new(sessions);

    let installation = Installation::new("file@example.com", "key");
    repo.create(&installation).unwrap();

    let loaded = repo.get_by_id(&installation.id).unwrap().unwrap();
    assert_eq!(loaded, installation);
}
