use async_trait::async_trait;

use super::*;
use crate::error::StorageError;

/// Store that fails every call
struct BrokenStore;

#[async_trait]
impl PreferenceStore for BrokenStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::NotAvailable)
    }

    async fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::NotAvailable)
    }
}

async fn store_with(value: &str) -> MemoryPreferenceStore {
    let mut store = MemoryPreferenceStore::new();
    store.set(THEME_KEY, value).await.unwrap();
    store
}

#[test]
fn test_theme_mode_parse() {
    assert_eq!("dark".parse::<ThemeMode>().unwrap(), ThemeMode::Dark);
    assert_eq!("light".parse::<ThemeMode>().unwrap(), ThemeMode::Light);
    assert!("sepia".parse::<ThemeMode>().is_err());
    assert_eq!(ThemeMode::Light.to_string(), "light");
    assert_eq!(ThemeMode::Dark.toggled(), ThemeMode::Light);
}

#[tokio::test]
async fn test_memory_store() {
    let mut store = MemoryPreferenceStore::new();
    assert!(store.get("theme").await.unwrap().is_none());

    store.set("theme", "light").await.unwrap();
    assert_eq!(store.get("theme").await.unwrap().as_deref(), Some("light"));
}

#[tokio::test]
async fn test_file_store_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("prefs.json");

    let mut store = FilePreferenceStore::open(&path).await.unwrap();
    assert!(store.get("theme").await.unwrap().is_none());
    store.set("theme", "light").await.unwrap();
    assert_eq!(store.path(), path.as_path());

    let reopened = FilePreferenceStore::open(&path).await.unwrap();
    assert_eq!(reopened.get("theme").await.unwrap().as_deref(), Some("light"));
}

#[tokio::test]
async fn test_file_store_empty_file() {
    let file = tempfile::NamedTempFile::new().unwrap();

    let store = FilePreferenceStore::open(file.path()).await.unwrap();
    assert!(store.get("theme").await.unwrap().is_none());
}

#[tokio::test]
async fn test_file_store_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.json");
    tokio::fs::write(&path, b"{not json").await.unwrap();

    let result = FilePreferenceStore::open(&path).await;
    assert!(matches!(result, Err(StorageError::Serialization(_))));
}

#[tokio::test]
async fn test_load_prefers_saved_value() {
    let theme = ThemeController::load(store_with("light").await, ThemeMode::Dark).await;
    assert_eq!(theme.mode(), ThemeMode::Light);
    assert!(!theme.is_dark());
}

#[tokio::test]
async fn test_load_uses_system_without_saved_value() {
    let theme = ThemeController::load(MemoryPreferenceStore::new(), ThemeMode::Light).await;
    assert_eq!(theme.mode(), ThemeMode::Light);
}

#[tokio::test]
async fn test_load_store_failure_defaults_to_dark() {
    let theme = ThemeController::load(BrokenStore, ThemeMode::Light).await;
    assert!(theme.is_dark());
}

#[tokio::test]
async fn test_load_unknown_saved_value_uses_system() {
    let theme = ThemeController::load(store_with("sepia").await, ThemeMode::Light).await;
    assert_eq!(theme.mode(), ThemeMode::Light);
}

#[tokio::test]
async fn test_toggle_persists() {
    let mut theme = ThemeController::load(MemoryPreferenceStore::new(), ThemeMode::Dark).await;

    assert_eq!(theme.toggle().await, ThemeMode::Light);
    assert_eq!(
        theme.store().get(THEME_KEY).await.unwrap().as_deref(),
        Some("light")
    );

    assert_eq!(theme.toggle().await, ThemeMode::Dark);
    assert_eq!(
        theme.store().get(THEME_KEY).await.unwrap().as_deref(),
        Some("dark")
    );
}

#[tokio::test]
async fn test_toggle_survives_save_failure() {
    let mut theme = ThemeController::load(BrokenStore, ThemeMode::Dark).await;
    assert_eq!(theme.toggle().await, ThemeMode::Light);
    assert_eq!(theme.mode(), ThemeMode::Light);
}

#[tokio::test]
async fn test_system_change_followed_until_user_chooses() {
    let mut theme = ThemeController::load(MemoryPreferenceStore::new(), ThemeMode::Dark).await;

    assert_eq!(theme.on_system_change(ThemeMode::Light).await, ThemeMode::Light);

    theme.toggle().await;
    assert_eq!(theme.mode(), ThemeMode::Dark);
    assert_eq!(theme.on_system_change(ThemeMode::Light).await, ThemeMode::Dark);
}
