/// Whether written data is kept in the tierfs storage tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageType {
    /// Put the data in the storage tier.
    Store,
    /// Bypass the storage tier.
    NoStore,
    /// Put the data in the storage tier and move it to the top tier.
    Promote,
}

impl StorageType {
    pub fn is_store(&self) -> bool {
        matches!(self, StorageType::Store | StorageType::Promote)
    }

    pub fn is_promote(&self) -> bool {
        matches!(self, StorageType::Promote)
    }
}

/// Whether written data is persisted to the under storage beneath tierfs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnderStorageType {
    /// Persist before the write completes.
    SyncPersist,
    NoPersist,
    /// Persist in the background after the write completes.
    AsyncPersist,
}

impl UnderStorageType {
    pub fn is_sync_persist(&self) -> bool {
        matches!(self, UnderStorageType::SyncPersist)
    }

    pub fn is_async_persist(&self) -> bool {
        matches!(self, UnderStorageType::AsyncPersist)
    }

    pub fn is_persist(&self) -> bool {
        !matches!(self, UnderStorageType::NoPersist)
    }
}
