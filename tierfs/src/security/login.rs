use core::{fmt, str::FromStr};
use std::{io, process::Command};

use thiserror::Error;
use tierfs_core::{Configuration, PropertyKey};

/// How clients authenticate. Only [`AuthType::Nosasl`] disables identity resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthType {
    Nosasl,
    Simple,
    Custom,
}

impl AuthType {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, AuthType::Nosasl)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthType::Nosasl => "NOSASL",
            AuthType::Simple => "SIMPLE",
            AuthType::Custom => "CUSTOM",
        }
    }
}

impl fmt::Display for AuthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown authentication type `{0}`")]
pub struct ParseAuthTypeError(String);

impl FromStr for AuthType {
    type Err = ParseAuthTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [AuthType::Nosasl, AuthType::Simple, AuthType::Custom]
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseAuthTypeError(s.trim().to_string()))
    }
}

/// The owning user and group a client writes as.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity {
    pub user: String,
    pub group: String,
}

impl Identity {
    pub fn new(user: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            group: group.into(),
        }
    }
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IdentityError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("login unavailable: {0}")]
    Unavailable(String),
}

/// Supplies the identity new files are owned by.
pub trait IdentityProvider: fmt::Debug + Send + Sync {
    fn login(&self, conf: &Configuration) -> Result<Identity, IdentityError>;
}

/// Logs in as the process user.
///
/// The user is `tierfs.security.login.username` if set, otherwise `USER` or `LOGNAME` from the
/// environment. The group is the user's primary group as reported by `id -gn`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLoginProvider;

impl SystemLoginProvider {
    fn user(conf: &Configuration) -> Result<String, IdentityError> {
        if let Ok(user) = conf.get(PropertyKey::SECURITY_LOGIN_USERNAME) {
            if !user.trim().is_empty() {
                return Ok(user.trim().to_string());
            }
        }
        ["USER", "LOGNAME"]
            .into_iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|user| !user.trim().is_empty())
            .ok_or_else(|| IdentityError::Unavailable("no login user in environment".into()))
    }

    fn primary_group(user: &str) -> Result<String, IdentityError> {
        let output = Command::new("id").arg("-gn").arg(user).output()?;
        if !output.status.success() {
            return Err(IdentityError::Io(io::Error::new(
                io::ErrorKind::Other,
                format!(
                    "`id -gn {user}` failed: {}",
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            )));
        }
        let group = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if group.is_empty() {
            return Err(IdentityError::Unavailable(format!(
                "no primary group for `{user}`"
            )));
        }
        Ok(group)
    }
}

impl IdentityProvider for SystemLoginProvider {
    fn login(&self, conf: &Configuration) -> Result<Identity, IdentityError> {
        let user = Self::user(conf)?;
        let group = Self::primary_group(&user)?;
        Ok(Identity { user, group })
    }
}

/// Always logs in as the same identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedIdentity(Identity);

impl FixedIdentity {
    pub fn new(user: impl Into<String>, group: impl Into<String>) -> Self {
        Self(Identity::new(user, group))
    }
}

impl IdentityProvider for FixedIdentity {
    fn login(&self, _conf: &Configuration) -> Result<Identity, IdentityError> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_type_parse() {
        assert_eq!("nosasl".parse(), Ok(AuthType::Nosasl));
        assert_eq!(" SIMPLE ".parse(), Ok(AuthType::Simple));
        assert!("KERBEROS".parse::<AuthType>().is_err());
        assert!(!AuthType::Nosasl.is_enabled());
        assert!(AuthType::Custom.is_enabled());
    }

    #[test]
    fn fixed_identity() {
        let identity = FixedIdentity::new("alice", "staff")
            .login(&Configuration::new())
            .unwrap();
        assert_eq!(identity, Identity::new("alice", "staff"));
    }

    #[test]
    fn unknown_user_has_no_group() {
        let conf =
            Configuration::new().with(PropertyKey::SECURITY_LOGIN_USERNAME, "no-such-user-4f9a1c");
        assert!(SystemLoginProvider.login(&conf).is_err());
    }
}
