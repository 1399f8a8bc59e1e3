use super::*;

#[test]
fn new_session_starts_empty() {
    let session = SessionToken::in_memory();
    assert_eq!(session.get(), "");
    assert!(!session.is_present());
}

#[test]
fn clones_share_the_same_token() {
    let session = SessionToken::in_memory();
    let other = session.clone();

    session.set("tok-1").unwrap();
    assert_eq!(other.get(), "tok-1");

    other.clear().unwrap();
    assert_eq!(session.get(), "");
}

#[test]
fn setting_empty_token_clears_storage_key() {
    let storage = Arc::new(MemoryStorage::new());
    let session = SessionToken::new(storage.clone());

    session.set("tok").unwrap();
    assert_eq!(storage.get(TOKEN_STORAGE_KEY).unwrap().as_deref(), Some("tok"));

    session.set("").unwrap();
    assert_eq!(storage.get(TOKEN_STORAGE_KEY).unwrap(), None);
}

#[test]
fn token_written_directly_to_storage_is_visible() {
    let storage = Arc::new(MemoryStorage::new());
    let session = SessionToken::new(storage.clone());

    storage.set(TOKEN_STORAGE_KEY, "refreshed").unwrap();
    assert_eq!(session.get(), "refreshed");
}

#[tokio::test]
async fn load_reads_file_backed_token() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Arc::new(crate::util::storage::FileStorage::new(dir.path().join("session.json")));
    let session = SessionToken::new(storage);
    session.set("tok-file").unwrap();

    assert_eq!(session.load().await, "tok-file");
    session.clear().unwrap();
    assert_eq!(session.load().await, "");
}

struct PanickingStorage;

impl KeyValueStorage for PanickingStorage {
    fn get(&self, _key: &str) -> Result<Option<String>, ClientError> {
        panic!("storage unavailable");
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), ClientError> {
        Ok(())
    }

    fn remove(&self, _key: &str) -> Result<(), ClientError> {
        Ok(())
    }
}

#[tokio::test]
async fn load_degrades_to_empty_token_when_read_task_fails() {
    let session = SessionToken::new(Arc::new(PanickingStorage));
    assert_eq!(session.load().await, "");
}
