use core::{
    fmt,
    hash::{Hash, Hasher},
    ops::{Deref, DerefMut},
    sync::atomic::{AtomicU64, Ordering},
};

use super::FileWriteLocationPolicy;

static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(0);

fn next_instance() -> u64 {
    NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed)
}

/// An owned location policy with an instance identity.
///
/// Equality asks the policy's [`dyn_eq`](FileWriteLocationPolicy::dyn_eq) first and falls back
/// to comparing instances. Every construction and every clone is a new instance.
pub struct LocationPolicy {
    instance: u64,
    policy: Box<dyn FileWriteLocationPolicy>,
}

impl LocationPolicy {
    pub fn new<P: FileWriteLocationPolicy>(policy: P) -> Self {
        Self::from_box(Box::new(policy))
    }

    pub fn from_box(policy: Box<dyn FileWriteLocationPolicy>) -> Self {
        Self {
            instance: next_instance(),
            policy,
        }
    }

    pub fn into_inner(self) -> Box<dyn FileWriteLocationPolicy> {
        self.policy
    }
}

impl From<Box<dyn FileWriteLocationPolicy>> for LocationPolicy {
    fn from(policy: Box<dyn FileWriteLocationPolicy>) -> Self {
        Self::from_box(policy)
    }
}

impl Deref for LocationPolicy {
    type Target = dyn FileWriteLocationPolicy;

    fn deref(&self) -> &Self::Target {
        self.policy.as_ref()
    }
}

impl DerefMut for LocationPolicy {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.policy.as_mut()
    }
}

impl Clone for LocationPolicy {
    fn clone(&self) -> Self {
        Self::from_box(self.policy.clone_box())
    }
}

impl PartialEq for LocationPolicy {
    fn eq(&self, other: &Self) -> bool {
        self.policy
            .dyn_eq(other.policy.as_ref())
            .unwrap_or(self.instance == other.instance)
    }
}

impl Eq for LocationPolicy {}

impl Hash for LocationPolicy {
    // instance-compared policies only hash their name, which equal instances share
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.policy.name().hash(state);
        self.policy.dyn_hash(state);
    }
}

impl fmt::Debug for LocationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.policy, f)
    }
}
