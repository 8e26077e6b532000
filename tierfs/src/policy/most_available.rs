use core::hash::Hasher;

use super::{eq_by_value, BlockWorkerInfo, FileWriteLocationPolicy, WorkerNetAddress};

/// Picks the worker with the most free bytes, regardless of the block size.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MostAvailableFirstPolicy;

impl MostAvailableFirstPolicy {
    pub const NAME: &'static str = "MostAvailableFirstPolicy";
}

impl FileWriteLocationPolicy for MostAvailableFirstPolicy {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn worker_for_next_block(
        &mut self,
        workers: &[BlockWorkerInfo],
        _block_size: u64,
    ) -> Option<WorkerNetAddress> {
        // first worker wins ties
        workers
            .iter()
            .reduce(|best, w| {
                if w.available_bytes() > best.available_bytes() {
                    w
                } else {
                    best
                }
            })
            .map(|w| w.address.clone())
    }

    fn dyn_eq(&self, other: &dyn FileWriteLocationPolicy) -> Option<bool> {
        eq_by_value(self, other)
    }

    fn dyn_hash(&self, state: &mut dyn Hasher) {
        state.write(Self::NAME.as_bytes());
    }
}
