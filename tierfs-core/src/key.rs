/// A configuration key together with its built-in default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PropertyKey {
    name: &'static str,
    default: Option<&'static str>,
}

impl PropertyKey {
    /// Default block size for newly written files.
    pub const USER_BLOCK_SIZE_BYTES_DEFAULT: PropertyKey =
        PropertyKey::new("tierfs.user.block.size.bytes.default", Some("512MB"));
    /// Default write type for newly written files, e.g. `CACHE_THROUGH`.
    pub const USER_FILE_WRITE_TYPE_DEFAULT: PropertyKey =
        PropertyKey::new("tierfs.user.file.writetype.default", Some("MUST_CACHE"));
    /// Registry name of the location policy instantiated for new files.
    pub const USER_FILE_WRITE_LOCATION_POLICY: PropertyKey = PropertyKey::new(
        "tierfs.user.file.write.location.policy.class",
        Some("LocalFirstPolicy"),
    );
    /// Octal umask applied to the mode of new files and directories.
    pub const SECURITY_AUTHORIZATION_PERMISSION_UMASK: PropertyKey = PropertyKey::new(
        "tierfs.security.authorization.permission.umask",
        Some("022"),
    );
    pub const SECURITY_AUTHENTICATION_TYPE: PropertyKey =
        PropertyKey::new("tierfs.security.authentication.type", Some("SIMPLE"));
    /// Overrides the login user otherwise taken from the environment.
    pub const SECURITY_LOGIN_USERNAME: PropertyKey =
        PropertyKey::new("tierfs.security.login.username", None);

    pub const ALL: [PropertyKey; 6] = [
        PropertyKey::USER_BLOCK_SIZE_BYTES_DEFAULT,
        PropertyKey::USER_FILE_WRITE_TYPE_DEFAULT,
        PropertyKey::USER_FILE_WRITE_LOCATION_POLICY,
        PropertyKey::SECURITY_AUTHORIZATION_PERMISSION_UMASK,
        PropertyKey::SECURITY_AUTHENTICATION_TYPE,
        PropertyKey::SECURITY_LOGIN_USERNAME,
    ];

    pub const fn new(name: &'static str, default: Option<&'static str>) -> Self {
        Self { name, default }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn default_value(&self) -> Option<&'static str> {
        self.default
    }

    /// Environment variable consulted by
    /// [`Configuration::merge_env`](crate::Configuration::merge_env):
    /// `tierfs.security.login.username` becomes `TIERFS_SECURITY_LOGIN_USERNAME`.
    pub fn env_var(&self) -> String {
        env_var_name(self.name)
    }
}

impl AsRef<str> for PropertyKey {
    fn as_ref(&self) -> &str {
        self.name
    }
}

pub(crate) fn env_var_name(key: &str) -> String {
    key.chars()
        .map(|c| match c {
            '.' | '-' => '_',
            c => c.to_ascii_uppercase(),
        })
        .collect()
}
