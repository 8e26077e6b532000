use core::hash::Hasher;

use super::{eq_by_value, BlockWorkerInfo, FileWriteLocationPolicy, WorkerNetAddress};

/// Cycles through the workers seen on the first call, skipping those without room.
///
/// The rotation order is fixed on the first call with a non-empty worker list by sorting the
/// workers by address. Workers that later disappear from the candidate list are skipped; workers
/// that appear later are not added to the rotation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundRobinPolicy {
    rotation: Option<Vec<WorkerNetAddress>>,
    index: usize,
}

impl RoundRobinPolicy {
    pub const NAME: &'static str = "RoundRobinPolicy";
}

impl FileWriteLocationPolicy for RoundRobinPolicy {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn worker_for_next_block(
        &mut self,
        workers: &[BlockWorkerInfo],
        block_size: u64,
    ) -> Option<WorkerNetAddress> {
        if self.rotation.is_none() {
            let mut rotation: Vec<_> = workers.iter().map(|w| w.address.clone()).collect();
            rotation.sort();
            // an empty list does not fix the rotation, the next non-empty one does
            self.rotation = (!rotation.is_empty()).then_some(rotation);
            self.index = 0;
        }
        let rotation = self.rotation.as_ref()?;
        for _ in 0..rotation.len() {
            let candidate = &rotation[self.index];
            self.index = (self.index + 1) % rotation.len();
            let fits = workers
                .iter()
                .any(|w| &w.address == candidate && w.available_bytes() >= block_size);
            if fits {
                return Some(candidate.clone());
            }
        }
        None
    }

    fn dyn_eq(&self, other: &dyn FileWriteLocationPolicy) -> Option<bool> {
        eq_by_value(self, other)
    }

    fn dyn_hash(&self, state: &mut dyn Hasher) {
        state.write(Self::NAME.as_bytes());
        state.write_usize(self.index);
    }
}
