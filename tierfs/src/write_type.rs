use core::{fmt, str::FromStr};

use thiserror::Error;

use crate::storage::{StorageType, UnderStorageType};

/// Combined caching and persistence strategy for a new file.
///
/// A write type is the only way to choose a [`StorageType`] and [`UnderStorageType`]; the pair
/// is always derived from it so that contradictory combinations cannot be expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WriteType {
    /// Write to the storage tier only. Data is lost if the tier loses it.
    MustCache,
    /// Write to the storage tier and synchronously to the under storage.
    CacheThrough,
    /// Write synchronously to the under storage, skipping the storage tier.
    Through,
    /// Write to the storage tier and persist to the under storage in the background.
    AsyncThrough,
    /// Neither cache nor persist.
    None,
}

impl WriteType {
    pub const ALL: [WriteType; 5] = [
        WriteType::MustCache,
        WriteType::CacheThrough,
        WriteType::Through,
        WriteType::AsyncThrough,
        WriteType::None,
    ];

    pub fn storage_type(&self) -> StorageType {
        match self {
            WriteType::MustCache | WriteType::CacheThrough | WriteType::AsyncThrough => {
                StorageType::Store
            }
            WriteType::Through | WriteType::None => StorageType::NoStore,
        }
    }

    pub fn under_storage_type(&self) -> UnderStorageType {
        match self {
            WriteType::CacheThrough | WriteType::Through => UnderStorageType::SyncPersist,
            WriteType::AsyncThrough => UnderStorageType::AsyncPersist,
            WriteType::MustCache | WriteType::None => UnderStorageType::NoPersist,
        }
    }

    pub fn is_cache(&self) -> bool {
        self.storage_type().is_store()
    }

    pub fn is_through(&self) -> bool {
        self.under_storage_type().is_sync_persist()
    }

    pub fn is_async(&self) -> bool {
        self.under_storage_type().is_async_persist()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WriteType::MustCache => "MUST_CACHE",
            WriteType::CacheThrough => "CACHE_THROUGH",
            WriteType::Through => "THROUGH",
            WriteType::AsyncThrough => "ASYNC_THROUGH",
            WriteType::None => "NONE",
        }
    }
}

impl fmt::Display for WriteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown write type `{0}`")]
pub struct ParseWriteTypeError(String);

impl FromStr for WriteType {
    type Err = ParseWriteTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        WriteType::ALL
            .into_iter()
            .find(|wt| wt.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseWriteTypeError(s.to_string()))
    }
}
