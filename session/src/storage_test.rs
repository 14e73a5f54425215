use std::time::Duration;

use super::*;

fn temp_store_path() -> PathBuf {
    std::env::temp_dir().join(format!("rajawarama-storage-{}.json", Uuid::new_v4()))
}

#[test]
fn memory_scope_set_get_remove() {
    let handle = StorageScope::memory().handle();
    assert_eq!(handle.get("accessToken"), None);

    handle.set("accessToken", "A1").expect("set");
    assert_eq!(handle.get("accessToken").as_deref(), Some("A1"));

    handle.remove("accessToken").expect("remove");
    assert_eq!(handle.get("accessToken"), None);
}

#[test]
fn handles_of_one_scope_share_entries() {
    let scope = StorageScope::memory();
    let tab_a = scope.handle();
    let tab_b = scope.handle();
    assert_ne!(tab_a.origin(), tab_b.origin());

    tab_a.set("role", "ADMIN").expect("set");
    assert_eq!(tab_b.get("role").as_deref(), Some("ADMIN"));
}

#[test]
fn file_scope_survives_reopen() {
    let path = temp_store_path();
    {
        let handle = StorageScope::file(&path).expect("open").handle();
        handle.set("refreshToken", "R1").expect("set");
        handle.set("email", "a@b.lk").expect("set");
        handle.remove("email").expect("remove");
    }

    let reopened = StorageScope::file(&path).expect("reopen").handle();
    assert_eq!(reopened.get("refreshToken").as_deref(), Some("R1"));
    assert_eq!(reopened.get("email"), None);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn file_scope_missing_file_starts_empty() {
    let path = temp_store_path();
    let handle = StorageScope::file(&path).expect("open").handle();
    assert_eq!(handle.get("accessToken"), None);
    assert!(!path.exists(), "nothing is written until the first mutation");
}

#[test]
fn file_scope_rejects_corrupt_file() {
    let path = temp_store_path();
    std::fs::write(&path, "{not json").expect("write");

    let err = StorageScope::file(&path).err().expect("corrupt file should fail");
    assert!(matches!(err, StorageError::Corrupt { .. }));

    let _ = std::fs::remove_file(&path);
}

#[cfg(unix)]
#[test]
fn file_scope_writes_owner_only_file() {
    use std::os::unix::fs::PermissionsExt;

    let path = temp_store_path();
    let handle = StorageScope::file(&path).expect("open").handle();
    handle.set("accessToken", "A1").expect("set");

    let mode = std::fs::metadata(&path).expect("metadata").permissions().mode();
    assert_eq!(mode & 0o777, 0o600);

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn foreign_changes_skip_own_writes() {
    let scope = StorageScope::memory();
    let tab_a = scope.handle();
    let tab_b = scope.handle();
    let mut a_changes = tab_a.foreign_changes();

    tab_a.set("accessToken", "mine").expect("set");
    tab_b.remove("accessToken").expect("remove");

    let change = tokio::time::timeout(Duration::from_secs(1), a_changes.recv())
        .await
        .expect("change should arrive")
        .expect("scope alive");
    assert_eq!(change.key, "accessToken");
    assert_eq!(change.origin, tab_b.origin());
}

#[test]
fn file_batch_write_is_all_or_nothing() {
    let dir = std::env::temp_dir().join(format!("rajawarama-batch-{}", Uuid::new_v4()));
    let path = dir.join("session.json");
    let handle = StorageScope::file(&path).expect("open").handle();
    handle.set_many(&[("accessToken", "A1"), ("role", "ADMIN")]).expect("batch");

    // Parent directory replaced by a plain file: every later persist fails.
    std::fs::remove_dir_all(&dir).expect("remove dir");
    std::fs::write(&dir, "").expect("block dir");

    let err = handle.set_many(&[("accessToken", "A2"), ("role", "CUSTOMER")]);
    assert!(matches!(err, Err(StorageError::Io { .. })));
    assert_eq!(handle.get("accessToken").as_deref(), Some("A1"));
    assert_eq!(handle.get("role").as_deref(), Some("ADMIN"));

    let _ = std::fs::remove_file(&dir);
}

#[tokio::test]
async fn batch_write_announces_every_key() {
    let scope = StorageScope::memory();
    let writer = scope.handle();
    let mut changes = scope.handle().foreign_changes();

    writer.set_many(&[("accessToken", "A1"), ("refreshToken", "R1")]).expect("batch");
    let mut keys = Vec::new();
    for _ in 0..2 {
        let change = tokio::time::timeout(Duration::from_secs(1), changes.recv())
            .await
            .expect("change should arrive")
            .expect("scope alive");
        keys.push(change.key);
    }
    assert_eq!(keys, ["accessToken", "refreshToken"]);
}
