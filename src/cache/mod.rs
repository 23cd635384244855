//! Local document store for the catalog and player state
//!
//! Every kind lives in its own JSON file under the data directory and is
//! read and written as a whole document:
//!
//! ```text
//! <data_dir>/
//!   group_cache.json                 groups (with categoryDetails inlined)
//!   category_cache.json              categories keyed by id
//!   achievement_cache.json           achievements keyed by id
//!   user_progress.json               {isComplete, progress, currentTier} keyed by id
//!   selected_seasonal_dailies.json   [category id, ...]
//!   api_key.txt                      raw access token
//! ```
//!
//! Loads never degrade silently: a missing file is `NotFound`, anything that
//! does not decode in full is `Decode`. The caller picks the fallback.

mod error;
mod io;

pub use error::CacheError;
pub(crate) use io::write_atomic;

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::ApiKey;

/// The independently persisted documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKind {
    Groups,
    Categories,
    Achievements,
    UserProgress,
    SelectedSeasonalIds,
    ApiKey,
}

impl CacheKind {
    /// The three catalog documents, cleared together on refresh
    pub const CATALOG: [CacheKind; 3] = [
        CacheKind::Groups,
        CacheKind::Categories,
        CacheKind::Achievements,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Groups => "group_cache.json",
            Self::Categories => "category_cache.json",
            Self::Achievements => "achievement_cache.json",
            Self::UserProgress => "user_progress.json",
            Self::SelectedSeasonalIds => "selected_seasonal_dailies.json",
            Self::ApiKey => "api_key.txt",
        }
    }

    /// Whether the document is written indented
    pub fn pretty(&self) -> bool {
        !matches!(self, Self::SelectedSeasonalIds | Self::ApiKey)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Groups => "group",
            Self::Categories => "category",
            Self::Achievements => "achievement",
            Self::UserProgress => "user progress",
            Self::SelectedSeasonalIds => "seasonal selection",
            Self::ApiKey => "api key",
        }
    }
}

impl fmt::Display for CacheKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// File-backed key/value store, one document per [`CacheKind`]
#[derive(Debug, Clone)]
pub struct CacheStore {
    dir: PathBuf,
}

impl CacheStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self, kind: CacheKind) -> PathBuf {
        self.dir.join(kind.file_name())
    }

    pub fn exists(&self, kind: CacheKind) -> bool {
        self.path(kind).is_file()
    }

    /// Load a whole document
    pub fn load<T: DeserializeOwned>(&self, kind: CacheKind) -> Result<T, CacheError> {
        let content = self.read(kind)?;
        serde_json::from_str(&content).map_err(|source| CacheError::Decode { kind, source })
    }

    /// Overwrite a whole document
    pub fn save<T: Serialize + ?Sized>(&self, kind: CacheKind, value: &T) -> Result<(), CacheError> {
        let content = if kind.pretty() {
            serde_json::to_vec_pretty(value)
        } else {
            serde_json::to_vec(value)
        }
        .map_err(|source| CacheError::Encode { kind, source })?;

        io::write_atomic(&self.path(kind), &content).map_err(|source| CacheError::Io { kind, source })?;
        tracing::debug!("Saved {} cache ({} bytes)", kind, content.len());
        Ok(())
    }

    pub fn delete(&self, kind: CacheKind) -> Result<(), CacheError> {
        io::remove_if_exists(&self.path(kind)).map_err(|source| CacheError::Io { kind, source })
    }

    /// Read the stored access token; a blank file counts as no token
    pub fn load_api_key(&self) -> Result<Option<ApiKey>, CacheError> {
        match self.read(CacheKind::ApiKey) {
            Ok(raw) => Ok(ApiKey::parse(&raw)),
            Err(CacheError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub fn save_api_key(&self, key: &ApiKey) -> Result<(), CacheError> {
        let kind = CacheKind::ApiKey;
        io::write_atomic(&self.path(kind), key.as_str().as_bytes())
            .map_err(|source| CacheError::Io { kind, source })
    }

    pub fn delete_api_key(&self) -> Result<(), CacheError> {
        self.delete(CacheKind::ApiKey)
    }

    fn read(&self, kind: CacheKind) -> Result<String, CacheError> {
        match std::fs::read_to_string(self.path(kind)) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(CacheError::NotFound(kind)),
            Err(source) => Err(CacheError::Io { kind, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Achievement, Category, Group, UserAchievementProgress};
    use crate::error::ErrorKind;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    fn store() -> (TempDir, CacheStore) {
        let dir = TempDir::new().unwrap();
        let store = CacheStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn test_missing_document_is_not_found() {
        let (_dir, store) = store();
        let err = store
            .load::<BTreeMap<u32, Category>>(CacheKind::Categories)
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_corrupt_document_is_decode_error_not_empty_map() {
        let (_dir, store) = store();
        std::fs::write(store.path(CacheKind::Achievements), r#"{"1": {"id": 1, "name": "#).unwrap();
        let err = store
            .load::<BTreeMap<u32, Achievement>>(CacheKind::Achievements)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[test]
    fn test_catalog_maps_round_trip() {
        let (_dir, store) = store();

        let mut achievements = BTreeMap::new();
        let mut cake = Achievement::new(2, "Eat Cake").with_tiers([1, 5]);
        cake.progress = 3;
        cake.current_tier = 1;
        achievements.insert(2, cake);
        achievements.insert(1, Achievement::new(1, "Do a Flip").with_tiers([1]));

        let festival = Category::new(10, "Festival", 2).with_achievements([1, 2]);
        let mut categories = BTreeMap::new();
        categories.insert(10, festival.clone());

        let mut group = Group::new("G-1", "Festivals", 4).with_categories([10]);
        group.category_details.push(festival);
        let mut groups = BTreeMap::new();
        groups.insert(group.id.clone(), group);

        store.save(CacheKind::Groups, &groups).unwrap();
        store.save(CacheKind::Categories, &categories).unwrap();
        store.save(CacheKind::Achievements, &achievements).unwrap();

        let raw = std::fs::read_to_string(store.path(CacheKind::Categories)).unwrap();
        assert!(raw.contains("\"10\""), "integer keys are written as strings");

        assert_eq!(store.load::<BTreeMap<String, Group>>(CacheKind::Groups).unwrap(), groups);
        assert_eq!(store.load::<BTreeMap<u32, Category>>(CacheKind::Categories).unwrap(), categories);
        assert_eq!(store.load::<BTreeMap<u32, Achievement>>(CacheKind::Achievements).unwrap(), achievements);
    }

    #[test]
    fn test_user_progress_document_shape() {
        let (_dir, store) = store();
        let mut progress = BTreeMap::new();
        progress.insert(
            42u32,
            UserAchievementProgress {
                is_complete: false,
                progress: 4,
                current_tier: 1,
            },
        );
        store.save(CacheKind::UserProgress, &progress).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(store.path(CacheKind::UserProgress)).unwrap()).unwrap();
        assert_eq!(value["42"]["progress"], 4);
        assert_eq!(value["42"]["currentTier"], 1);
        assert_eq!(value["42"]["isComplete"], false);
    }

    #[test]
    fn test_selection_is_written_compact() {
        let (_dir, store) = store();
        store.save(CacheKind::SelectedSeasonalIds, &vec![97u32, 98]).unwrap();
        let raw = std::fs::read_to_string(store.path(CacheKind::SelectedSeasonalIds)).unwrap();
        assert_eq!(raw, "[97,98]");
    }

    #[test]
    fn test_api_key_lifecycle() {
        let (_dir, store) = store();
        assert!(store.load_api_key().unwrap().is_none());

        let key = ApiKey::parse("ABCD-1234").unwrap();
        store.save_api_key(&key).unwrap();
        assert_eq!(store.load_api_key().unwrap(), Some(key));

        store.delete_api_key().unwrap();
        assert!(store.load_api_key().unwrap().is_none());
        store.delete_api_key().unwrap();
    }
}
