//! Placement of new blocks on workers.
//!
//! A [`FileWriteLocationPolicy`] is picked by name from a [`PolicyRegistry`] when write options
//! are resolved and is consulted by the write path once per block.

mod local_first;
mod location;
mod most_available;
mod registry;
mod round_robin;

use core::{any::Any, fmt, hash::Hasher};

pub use local_first::LocalFirstPolicy;
pub use location::LocationPolicy;
pub use most_available::MostAvailableFirstPolicy;
pub use registry::{PolicyFactory, PolicyRegistry};
pub use round_robin::RoundRobinPolicy;

/// Network address of a block worker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WorkerNetAddress {
    pub host: String,
    pub rpc_port: u16,
    pub data_port: u16,
}

impl WorkerNetAddress {
    pub fn new(host: impl Into<String>, rpc_port: u16, data_port: u16) -> Self {
        Self {
            host: host.into(),
            rpc_port,
            data_port,
        }
    }
}

/// A candidate worker as seen by a policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockWorkerInfo {
    pub address: WorkerNetAddress,
    pub capacity_bytes: u64,
    pub used_bytes: u64,
}

impl BlockWorkerInfo {
    pub fn new(address: WorkerNetAddress, capacity_bytes: u64, used_bytes: u64) -> Self {
        Self {
            address,
            capacity_bytes,
            used_bytes,
        }
    }

    pub fn available_bytes(&self) -> u64 {
        self.capacity_bytes.saturating_sub(self.used_bytes)
    }
}

/// Object plumbing implemented for every `Clone` policy.
pub trait PolicyBase {
    fn clone_box(&self) -> Box<dyn FileWriteLocationPolicy>;

    fn as_any(&self) -> &dyn Any;
}

impl<T> PolicyBase for T
where
    T: FileWriteLocationPolicy + Clone,
{
    fn clone_box(&self) -> Box<dyn FileWriteLocationPolicy> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Decides which worker receives the next block of a file being written.
///
/// Policies may keep state between calls and are not required to be `Sync`; each set of write
/// options owns its policy exclusively, wrapped in a [`LocationPolicy`].
///
/// By default two policies are equal only if they are the same [`LocationPolicy`] instance.
/// Value-like policies return `Some` from [`dyn_eq`](FileWriteLocationPolicy::dyn_eq) and feed
/// the compared state to [`dyn_hash`](FileWriteLocationPolicy::dyn_hash).
pub trait FileWriteLocationPolicy: PolicyBase + fmt::Debug + Send + 'static {
    /// Name the policy is registered under.
    fn name(&self) -> &str;

    /// Pick a worker able to hold a block of `block_size` bytes, or `None` if no worker fits.
    fn worker_for_next_block(
        &mut self,
        workers: &[BlockWorkerInfo],
        block_size: u64,
    ) -> Option<WorkerNetAddress>;

    /// Value equality with `other`, `None` to compare instances instead.
    fn dyn_eq(&self, _other: &dyn FileWriteLocationPolicy) -> Option<bool> {
        None
    }

    fn dyn_hash(&self, _state: &mut dyn Hasher) {}
}

/// Structural equality for policies that are `PartialEq`.
pub(crate) fn eq_by_value<P>(policy: &P, other: &dyn FileWriteLocationPolicy) -> Option<bool>
where
    P: PartialEq + 'static,
{
    Some(
        other
            .as_any()
            .downcast_ref::<P>()
            .is_some_and(|other| other == policy),
    )
}
