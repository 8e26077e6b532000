use std::sync::Arc;

use tierfs_core::Configuration;

use crate::{
    policy::PolicyRegistry,
    security::{IdentityProvider, SystemLoginProvider},
};

/// Everything write options are resolved from.
///
/// The context is read, never written, while resolving, so one context may serve any number of
/// concurrent writes.
#[derive(Debug, Clone)]
pub struct ClientContext {
    conf: Configuration,
    policies: PolicyRegistry,
    identity: Arc<dyn IdentityProvider>,
}

impl Default for ClientContext {
    fn default() -> Self {
        Self::new(Configuration::new())
    }
}

impl ClientContext {
    /// A context with the built-in policies that logs in as the process user.
    pub fn new(conf: Configuration) -> Self {
        Self {
            conf,
            policies: PolicyRegistry::default(),
            identity: Arc::new(SystemLoginProvider),
        }
    }

    pub fn conf(&self) -> &Configuration {
        &self.conf
    }

    pub fn policies(&self) -> &PolicyRegistry {
        &self.policies
    }

    pub fn identity(&self) -> &dyn IdentityProvider {
        self.identity.as_ref()
    }

    pub fn set_conf(&mut self, conf: Configuration) {
        self.conf = conf;
    }

    pub fn with_conf(mut self, conf: Configuration) -> Self {
        self.conf = conf;
        self
    }

    pub fn with_policies(mut self, policies: PolicyRegistry) -> Self {
        self.policies = policies;
        self
    }

    /// Mutably access the registry, e.g. to register a custom policy.
    pub fn policies_mut(&mut self) -> &mut PolicyRegistry {
        &mut self.policies
    }

    pub fn with_identity(mut self, identity: Arc<dyn IdentityProvider>) -> Self {
        self.identity = identity;
        self
    }
}
