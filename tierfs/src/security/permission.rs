use tierfs_core::{ConfError, Configuration, PropertyKey};

use super::{IdentityError, IdentityProvider, Mode, Umask};

/// Owner, group and mode bits of a file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Permission {
    owner: String,
    group: String,
    mode: Mode,
}

impl Permission {
    pub fn new(owner: impl Into<String>, group: impl Into<String>, mode: Mode) -> Self {
        Self {
            owner: owner.into(),
            group: group.into(),
            mode,
        }
    }

    /// Empty owner and group with every mode bit set.
    pub fn defaults() -> Self {
        Self::new("", "", Mode::ALL)
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set_owner(&mut self, owner: impl Into<String>) -> &mut Self {
        self.owner = owner.into();
        self
    }

    pub fn set_group(&mut self, group: impl Into<String>) -> &mut Self {
        self.group = group.into();
        self
    }

    pub fn set_mode(&mut self, mode: Mode) -> &mut Self {
        self.mode = mode;
        self
    }

    /// Clear the configured umask bits plus the execute bits files never get.
    pub fn apply_file_umask(&mut self, conf: &Configuration) -> Result<&mut Self, ConfError> {
        self.apply_dir_umask(conf)?;
        self.mode = self.mode.apply_umask(Umask::new(Mode::FILE_DIR_DIFF));
        Ok(self)
    }

    /// Clear the configured umask bits.
    pub fn apply_dir_umask(&mut self, conf: &Configuration) -> Result<&mut Self, ConfError> {
        let umask: Umask = conf.get_parsed(PropertyKey::SECURITY_AUTHORIZATION_PERMISSION_UMASK)?;
        self.mode = self.mode.apply_umask(umask);
        Ok(self)
    }

    /// Take owner and group from `provider`. On failure nothing is changed.
    pub fn set_owner_from_login(
        &mut self,
        conf: &Configuration,
        provider: &dyn IdentityProvider,
    ) -> Result<&mut Self, IdentityError> {
        let identity = provider.login(conf)?;
        self.owner = identity.user;
        self.group = identity.group;
        Ok(self)
    }
}
