use std::{collections::BTreeMap, fmt, sync::Arc};

use super::{
    FileWriteLocationPolicy, LocalFirstPolicy, LocationPolicy, MostAvailableFirstPolicy,
    RoundRobinPolicy,
};
use crate::error::{BoxedError, Error, Result};

pub type PolicyFactory =
    Arc<dyn Fn() -> Result<Box<dyn FileWriteLocationPolicy>, BoxedError> + Send + Sync>;

/// Maps policy names, as found in configuration, to zero-argument factories.
#[derive(Clone)]
pub struct PolicyRegistry {
    factories: BTreeMap<String, PolicyFactory>,
}

impl Default for PolicyRegistry {
    /// A registry holding the built-in policies under their `NAME`s.
    fn default() -> Self {
        let mut registry = Self::empty();
        registry
            .register(LocalFirstPolicy::NAME, || {
                Ok(Box::new(LocalFirstPolicy::new()?))
            })
            .register(MostAvailableFirstPolicy::NAME, || {
                Ok(Box::new(MostAvailableFirstPolicy))
            })
            .register(RoundRobinPolicy::NAME, || {
                Ok(Box::new(RoundRobinPolicy::default()))
            });
        registry
    }
}

impl PolicyRegistry {
    pub fn empty() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// Register `factory` under `name`, replacing any previous registration.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn() -> Result<Box<dyn FileWriteLocationPolicy>, BoxedError> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Arc::new(factory));
        self
    }

    pub fn with<F>(mut self, name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Result<Box<dyn FileWriteLocationPolicy>, BoxedError> + Send + Sync + 'static,
    {
        self.register(name, factory);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Build a fresh policy instance. Both an unknown name and a failing factory are errors.
    pub fn create(&self, name: &str) -> Result<LocationPolicy> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| Error::UnknownPolicy {
                name: name.to_string(),
            })?;
        let policy = factory().map_err(|source| Error::PolicyConstruction {
            name: name.to_string(),
            source,
        })?;
        tracing::debug!(name, "created location policy");
        Ok(LocationPolicy::from_box(policy))
    }
}

impl fmt::Debug for PolicyRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.factories.keys()).finish()
    }
}
