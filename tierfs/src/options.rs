use core::time::Duration;

use thiserror::Error;
use tierfs_core::PropertyKey;

use crate::{
    context::ClientContext,
    error::Result,
    policy::LocationPolicy,
    security::{AuthType, IdentityError, Permission},
    storage::{StorageType, UnderStorageType},
    write_type::WriteType,
};

/// TTL meaning the file never expires.
pub const NO_TTL: i64 = -1;

/// Options for writing one new file.
///
/// Build with [`OutStreamOptions::defaults`], override fields with the `set_*` or `with_*`
/// methods, then hand the value to the write path. The storage and under storage types are not
/// fields: both follow the [`WriteType`].
///
/// Equality, hashing and `Debug` cover block size, TTL, location policy, write type and
/// permission, in that order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OutStreamOptions {
    block_size_bytes: u64,
    ttl: i64,
    location_policy: LocationPolicy,
    write_type: WriteType,
    permission: Permission,
}

/// Something that went wrong while resolving defaults without aborting it.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ResolveWarning {
    /// The owner could not be resolved, so owner and group were left empty and only the umask was
    /// applied.
    #[error("failed to resolve file owner, falling back to umask-only permission: {0}")]
    PermissionFallback(#[source] IdentityError),
}

/// Default options together with the warnings raised while resolving them.
#[derive(Debug)]
pub struct Resolved {
    /// The resolved options, complete even when warnings were raised.
    pub options: OutStreamOptions,
    /// Degradations that did not abort resolving, in the order they occurred.
    pub warnings: Vec<ResolveWarning>,
}

impl OutStreamOptions {
    /// Default options for `ctx`, logging any [`ResolveWarning`].
    ///
    /// Fails if a configuration value is missing or malformed, or if the configured location
    /// policy cannot be created. A failing identity provider is not an error.
    pub fn defaults(ctx: &ClientContext) -> Result<Self> {
        let Resolved { options, warnings } = Self::resolve(ctx)?;
        for warning in warnings {
            tracing::warn!(%warning, "write options degraded");
        }
        Ok(options)
    }

    /// Like [`OutStreamOptions::defaults`], handing warnings back instead of logging them.
    #[tracing::instrument(skip_all)]
    pub fn resolve(ctx: &ClientContext) -> Result<Resolved> {
        let conf = ctx.conf();

        let block_size_bytes = conf.get_bytes(PropertyKey::USER_BLOCK_SIZE_BYTES_DEFAULT)?;
        let policy_name = conf.get(PropertyKey::USER_FILE_WRITE_LOCATION_POLICY)?;
        let location_policy = ctx.policies().create(policy_name.trim())?;
        let write_type: WriteType = conf.get_enum(PropertyKey::USER_FILE_WRITE_TYPE_DEFAULT)?;
        let auth_type: AuthType = conf.get_enum(PropertyKey::SECURITY_AUTHENTICATION_TYPE)?;

        let mut warnings = Vec::new();
        let mut permission = Permission::defaults();
        permission.apply_file_umask(conf)?;
        if auth_type.is_enabled() {
            if let Err(err) = permission.set_owner_from_login(conf, ctx.identity()) {
                warnings.push(ResolveWarning::PermissionFallback(err));
            }
        }

        tracing::debug!(
            block_size_bytes,
            write_type = %write_type,
            location_policy = location_policy.name(),
            owner = permission.owner(),
            mode = %permission.mode(),
            "resolved default write options"
        );

        Ok(Resolved {
            options: Self {
                block_size_bytes,
                ttl: NO_TTL,
                location_policy,
                write_type,
                permission,
            },
            warnings,
        })
    }

    pub fn block_size_bytes(&self) -> u64 {
        self.block_size_bytes
    }

    /// Milliseconds the file is kept before it is deleted, pinned or not. [`NO_TTL`] if never.
    pub fn ttl(&self) -> i64 {
        self.ttl
    }

    /// The TTL as a duration, `None` for [`NO_TTL`] and any other negative value.
    pub fn ttl_duration(&self) -> Option<Duration> {
        u64::try_from(self.ttl).ok().map(Duration::from_millis)
    }

    pub fn location_policy(&self) -> &LocationPolicy {
        &self.location_policy
    }

    /// The write path asks the policy for a worker once per block.
    pub fn location_policy_mut(&mut self) -> &mut LocationPolicy {
        &mut self.location_policy
    }

    pub fn write_type(&self) -> WriteType {
        self.write_type
    }

    pub fn storage_type(&self) -> StorageType {
        self.write_type.storage_type()
    }

    pub fn under_storage_type(&self) -> UnderStorageType {
        self.write_type.under_storage_type()
    }

    pub fn permission(&self) -> &Permission {
        &self.permission
    }

    pub fn set_block_size_bytes(&mut self, block_size_bytes: u64) -> &mut Self {
        self.block_size_bytes = block_size_bytes;
        self
    }

    pub fn set_ttl(&mut self, ttl: i64) -> &mut Self {
        self.ttl = ttl;
        self
    }

    pub fn set_location_policy(&mut self, location_policy: LocationPolicy) -> &mut Self {
        self.location_policy = location_policy;
        self
    }

    /// Overrides both the storage type and the under storage type.
    pub fn set_write_type(&mut self, write_type: WriteType) -> &mut Self {
        self.write_type = write_type;
        self
    }

    pub fn set_permission(&mut self, permission: Permission) -> &mut Self {
        self.permission = permission;
        self
    }

    pub fn with_block_size_bytes(mut self, block_size_bytes: u64) -> Self {
        self.block_size_bytes = block_size_bytes;
        self
    }

    pub fn with_ttl(mut self, ttl: i64) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_location_policy(mut self, location_policy: LocationPolicy) -> Self {
        self.location_policy = location_policy;
        self
    }

    pub fn with_write_type(mut self, write_type: WriteType) -> Self {
        self.write_type = write_type;
        self
    }

    pub fn with_permission(mut self, permission: Permission) -> Self {
        self.permission = permission;
        self
    }
}
