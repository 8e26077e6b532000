use std::{collections::HashMap, fmt::Display, path::Path, str::FromStr};

use crate::{error::ConfError, key::env_var_name, size::parse_space_size, PropertyKey, Result};

/// Nested `${...}` references deeper than this are treated as a cycle.
const MAX_SUBSTITUTION_DEPTH: usize = 32;
/// Upper bound on a value after `${...}` substitution.
const MAX_EXPANDED_LEN: usize = 64 * 1024;

/// Key/value configuration with typed accessors.
///
/// Values are stored as strings and parsed on every read, so a value that is never read is never
/// validated. A value may reference another key with `${other.key}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    properties: HashMap<String, String>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new()
    }
}

impl Configuration {
    /// A configuration holding the default of every [`PropertyKey`] that has one.
    pub fn new() -> Self {
        let properties = PropertyKey::ALL
            .iter()
            .filter_map(|key| {
                key.default_value()
                    .map(|value| (key.name().to_string(), value.to_string()))
            })
            .collect();
        Self { properties }
    }

    /// A configuration with no keys at all, not even defaults.
    pub fn empty() -> Self {
        Self {
            properties: HashMap::new(),
        }
    }

    /// Defaults overlaid with the `key=value` lines of a properties file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let mut conf = Self::new();
        conf.merge_properties(&text);
        tracing::debug!(
            path = %path.as_ref().display(),
            keys = conf.properties.len(),
            "loaded configuration file"
        );
        Ok(conf)
    }

    pub fn set(&mut self, key: impl AsRef<str>, value: impl Into<String>) -> &mut Self {
        self.properties
            .insert(key.as_ref().to_string(), value.into());
        self
    }

    pub fn with(mut self, key: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn unset(&mut self, key: impl AsRef<str>) -> Option<String> {
        self.properties.remove(key.as_ref())
    }

    pub fn contains(&self, key: impl AsRef<str>) -> bool {
        self.properties.contains_key(key.as_ref())
    }

    /// The stored value without `${...}` substitution.
    pub fn get_raw(&self, key: impl AsRef<str>) -> Option<&str> {
        self.properties.get(key.as_ref()).map(String::as_str)
    }

    /// Overlay `key=value` (or `key: value`) lines. Blank lines and lines starting with `#` or `!`
    /// are skipped, as are lines without a separator.
    pub fn merge_properties(&mut self, text: &str) -> &mut Self {
        for (lineno, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }
            let Some(split) = line.find(['=', ':']) else {
                tracing::warn!(line = lineno + 1, "ignoring properties line without separator");
                continue;
            };
            let key = line[..split].trim();
            if key.is_empty() {
                tracing::warn!(line = lineno + 1, "ignoring properties line with empty key");
                continue;
            }
            self.set(key, line[split + 1..].trim());
        }
        self
    }

    /// Overlay values from the process environment, see [`PropertyKey::env_var`].
    pub fn merge_env(&mut self) -> &mut Self {
        self.merge_env_with(|name| std::env::var(name).ok())
    }

    /// Like [`Configuration::merge_env`] with a caller supplied variable lookup. Every known key
    /// and every key already present is consulted.
    pub fn merge_env_with<F>(&mut self, lookup: F) -> &mut Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut keys: Vec<String> = PropertyKey::ALL
            .iter()
            .map(|key| key.name().to_string())
            .collect();
        keys.extend(self.properties.keys().cloned());
        keys.sort();
        keys.dedup();

        for key in keys {
            if let Some(value) = lookup(&env_var_name(&key)) {
                tracing::debug!(key = %key, "configuration overridden from environment");
                self.properties.insert(key, value);
            }
        }
        self
    }

    /// The value of `key` with `${...}` references substituted.
    pub fn get(&self, key: impl AsRef<str>) -> Result<String> {
        let key = key.as_ref();
        let value = self
            .properties
            .get(key)
            .ok_or_else(|| ConfError::NotFound {
                key: key.to_string(),
            })?;
        self.substitute(key, value, 0, &mut HashMap::new())
    }

    pub fn get_bytes(&self, key: impl AsRef<str>) -> Result<u64> {
        let key = key.as_ref();
        let value = self.get(key)?;
        parse_space_size(&value).map_err(|e| ConfError::invalid(key, &value, e))
    }

    pub fn get_int(&self, key: impl AsRef<str>) -> Result<i64> {
        self.get_parsed(key)
    }

    pub fn get_bool(&self, key: impl AsRef<str>) -> Result<bool> {
        let key = key.as_ref();
        let value = self.get(key)?;
        match value.to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(ConfError::invalid(key, &value, "expected `true` or `false`")),
        }
    }

    /// Parse the value of `key` into an enumeration through its [`FromStr`] impl.
    pub fn get_enum<T>(&self, key: impl AsRef<str>) -> Result<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.get_parsed(key)
    }

    /// Parse the trimmed value of `key` with `T`'s [`FromStr`] impl.
    pub fn get_parsed<T>(&self, key: impl AsRef<str>) -> Result<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        let key = key.as_ref();
        let value = self.get(key)?;
        value
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfError::invalid(key, &value, e))
    }

    fn substitute(
        &self,
        key: &str,
        value: &str,
        depth: usize,
        resolved: &mut HashMap<String, String>,
    ) -> Result<String> {
        if depth > MAX_SUBSTITUTION_DEPTH {
            return Err(ConfError::Recursion {
                key: key.to_string(),
            });
        }
        let mut out = String::with_capacity(value.len());
        let mut rest = value;
        while let Some(start) = rest.find("${") {
            let Some(len) = rest[start + 2..].find('}') else {
                break;
            };
            out.push_str(&rest[..start]);
            let name = &rest[start + 2..start + 2 + len];
            if let Some(done) = resolved.get(name) {
                out.push_str(done);
            } else {
                let nested = self
                    .properties
                    .get(name)
                    .ok_or_else(|| ConfError::NotFound {
                        key: name.to_string(),
                    })?;
                let expanded = self.substitute(key, nested, depth + 1, resolved)?;
                out.push_str(&expanded);
                resolved.insert(name.to_string(), expanded);
            }
            if out.len() > MAX_EXPANDED_LEN {
                return Err(ConfError::ExpansionTooLarge {
                    key: key.to_string(),
                    limit: MAX_EXPANDED_LEN,
                });
            }
            rest = &rest[start + 3 + len..];
        }
        out.push_str(rest);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::size::MB;

    #[test]
    fn defaults_are_present() {
        let conf = Configuration::new();
        assert_eq!(
            conf.get_bytes(PropertyKey::USER_BLOCK_SIZE_BYTES_DEFAULT)
                .unwrap(),
            512 * MB
        );
        assert_eq!(
            conf.get(PropertyKey::SECURITY_AUTHORIZATION_PERMISSION_UMASK)
                .unwrap(),
            "022"
        );
        assert!(!conf.contains(PropertyKey::SECURITY_LOGIN_USERNAME));
        assert!(Configuration::empty()
            .get(PropertyKey::USER_FILE_WRITE_TYPE_DEFAULT)
            .is_err());
    }

    #[test]
    fn missing_key() {
        let err = Configuration::new().get("no.such.key").unwrap_err();
        assert!(matches!(err, ConfError::NotFound { key } if key == "no.such.key"));
    }

    #[test]
    fn typed_getters() {
        let conf = Configuration::empty()
            .with("a.bytes", "64MB")
            .with("a.int", " -12 ")
            .with("a.bool", "TRUE")
            .with("a.bad", "sixty");

        assert_eq!(conf.get_bytes("a.bytes").unwrap(), 64 * MB);
        assert_eq!(conf.get_int("a.int").unwrap(), -12);
        assert!(conf.get_bool("a.bool").unwrap());
        assert!(matches!(
            conf.get_bytes("a.bad"),
            Err(ConfError::InvalidValue { .. })
        ));
        assert!(matches!(
            conf.get_int("a.bad"),
            Err(ConfError::InvalidValue { .. })
        ));
        assert!(matches!(
            conf.get_bool("a.bad"),
            Err(ConfError::InvalidValue { .. })
        ));
    }

    #[test]
    fn substitution() {
        let conf = Configuration::empty()
            .with("base", "/mnt")
            .with("dir", "${base}/tier")
            .with("file", "${dir}/data-${base}")
            .with("open", "x${unterminated");

        assert_eq!(conf.get("file").unwrap(), "/mnt/tier/data-/mnt");
        assert_eq!(conf.get("open").unwrap(), "x${unterminated");
        assert_eq!(conf.get_raw("dir"), Some("${base}/tier"));

        let missing = Configuration::empty().with("k", "${nope}");
        assert!(matches!(missing.get("k"), Err(ConfError::NotFound { key }) if key == "nope"));
    }

    #[test]
    fn substitution_cycle() {
        let conf = Configuration::empty().with("a", "${b}").with("b", "${a}");
        assert!(matches!(conf.get("a"), Err(ConfError::Recursion { key }) if key == "a"));
    }

    #[test]
    fn substitution_fan_out_is_bounded() {
        let mut conf = Configuration::empty().with("k20", "x");
        for i in 0..20 {
            conf.set(format!("k{i}"), format!("${{k{}}}${{k{}}}", i + 1, i + 1));
        }
        assert!(matches!(
            conf.get("k0"),
            Err(ConfError::ExpansionTooLarge { key, .. }) if key == "k0"
        ));

        // fan-out over empty values resolves each key once
        conf.set("k20", "");
        assert_eq!(conf.get("k0").unwrap(), "");

        // shallow fan-out stays within bounds
        assert_eq!(conf.with("k19", "ab").get("k17").unwrap(), "abababab");
    }

    #[test]
    fn properties_overlay() {
        let mut conf = Configuration::new();
        conf.merge_properties(
            "# comment\n\
             ! another comment\n\
             \n\
             tierfs.user.block.size.bytes.default = 64MB\n\
             tierfs.user.file.writetype.default: THROUGH\n\
             no separator here\n\
             =orphan\n",
        );
        assert_eq!(
            conf.get_bytes(PropertyKey::USER_BLOCK_SIZE_BYTES_DEFAULT)
                .unwrap(),
            64 * MB
        );
        assert_eq!(
            conf.get(PropertyKey::USER_FILE_WRITE_TYPE_DEFAULT).unwrap(),
            "THROUGH"
        );
        assert!(!conf.contains("no separator here"));
        assert!(!conf.contains(""));
    }

    #[test]
    fn from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "tierfs.security.authorization.permission.umask=077").unwrap();
        let conf = Configuration::from_file(file.path()).unwrap();
        assert_eq!(
            conf.get(PropertyKey::SECURITY_AUTHORIZATION_PERMISSION_UMASK)
                .unwrap(),
            "077"
        );
        // untouched keys keep their defaults
        assert_eq!(
            conf.get(PropertyKey::USER_FILE_WRITE_LOCATION_POLICY)
                .unwrap(),
            "LocalFirstPolicy"
        );

        let dir = tempfile::tempdir().unwrap();
        let err = Configuration::from_file(dir.path().join("missing.properties")).unwrap_err();
        assert!(matches!(err, ConfError::Io(_)));
    }

    #[test]
    fn env_overlay() {
        let mut conf = Configuration::new().with("custom.key", "a");
        conf.merge_env_with(|name| match name {
            "TIERFS_SECURITY_LOGIN_USERNAME" => Some("alice".to_string()),
            "CUSTOM_KEY" => Some("b".to_string()),
            _ => None,
        });
        assert_eq!(conf.get(PropertyKey::SECURITY_LOGIN_USERNAME).unwrap(), "alice");
        assert_eq!(conf.get("custom.key").unwrap(), "b");
        assert_eq!(
            conf.get(PropertyKey::USER_FILE_WRITE_TYPE_DEFAULT).unwrap(),
            "MUST_CACHE"
        );
    }
}
