use core::hash::Hasher;
use std::{ffi::OsString, io};

use rand::seq::SliceRandom;

use super::{eq_by_value, BlockWorkerInfo, FileWriteLocationPolicy, WorkerNetAddress};

/// Prefers the worker on the local host, then a random worker with room for the block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFirstPolicy {
    local_host: String,
}

impl LocalFirstPolicy {
    pub const NAME: &'static str = "LocalFirstPolicy";

    /// Use the host name reported by the operating system as the local host.
    pub fn new() -> io::Result<Self> {
        Self::from_host_name(gethostname::gethostname())
    }

    fn from_host_name(host: OsString) -> io::Result<Self> {
        let host = host.into_string().map_err(|host| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("host name {host:?} is not valid UTF-8"),
            )
        })?;
        let host = host.trim();
        if host.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "host name is empty",
            ));
        }
        Ok(Self::with_local_host(host))
    }

    pub fn with_local_host(local_host: impl Into<String>) -> Self {
        Self {
            local_host: local_host.into(),
        }
    }

    pub fn local_host(&self) -> &str {
        &self.local_host
    }
}

impl FileWriteLocationPolicy for LocalFirstPolicy {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn worker_for_next_block(
        &mut self,
        workers: &[BlockWorkerInfo],
        block_size: u64,
    ) -> Option<WorkerNetAddress> {
        let fits = |w: &&BlockWorkerInfo| w.available_bytes() >= block_size;

        if let Some(local) = workers
            .iter()
            .filter(fits)
            .find(|w| w.address.host == self.local_host)
        {
            return Some(local.address.clone());
        }
        let candidates: Vec<&BlockWorkerInfo> = workers.iter().filter(fits).collect();
        candidates
            .choose(&mut rand::thread_rng())
            .map(|w| w.address.clone())
    }

    fn dyn_eq(&self, other: &dyn FileWriteLocationPolicy) -> Option<bool> {
        eq_by_value(self, other)
    }

    fn dyn_hash(&self, state: &mut dyn Hasher) {
        state.write(Self::NAME.as_bytes());
        state.write(self.local_host.as_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn worker(host: &str, capacity: u64, used: u64) -> BlockWorkerInfo {
        BlockWorkerInfo::new(WorkerNetAddress::new(host, 29998, 29999), capacity, used)
    }

    #[test]
    fn prefers_local_worker() {
        let mut policy = LocalFirstPolicy::with_local_host("node-2");
        let workers = [
            worker("node-1", 1024, 0),
            worker("node-2", 1024, 0),
            worker("node-3", 1024, 0),
        ];
        for _ in 0..8 {
            assert_eq!(
                policy.worker_for_next_block(&workers, 512).unwrap().host,
                "node-2"
            );
        }
    }

    #[test]
    fn falls_back_to_a_worker_with_room() {
        let mut policy = LocalFirstPolicy::with_local_host("node-2");
        let workers = [
            worker("node-1", 1024, 0),
            worker("node-2", 1024, 1000),
            worker("node-3", 100, 0),
        ];
        for _ in 0..8 {
            assert_eq!(
                policy.worker_for_next_block(&workers, 512).unwrap().host,
                "node-1"
            );
        }
        assert_eq!(policy.worker_for_next_block(&workers, 4096), None);
        assert_eq!(policy.worker_for_next_block(&[], 1), None);
    }

    #[test]
    fn host_name_from_the_system() {
        let policy = LocalFirstPolicy::new().unwrap();
        assert!(!policy.local_host().is_empty());
        assert_eq!(policy.local_host(), policy.local_host().trim());
    }

    #[test]
    fn rejects_blank_host_name() {
        let err = LocalFirstPolicy::from_host_name(OsString::from("  \n")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert_eq!(
            LocalFirstPolicy::from_host_name(OsString::from("node-4\n"))
                .unwrap()
                .local_host(),
            "node-4"
        );
    }

    #[test]
    fn equality_follows_local_host() {
        let a = LocalFirstPolicy::with_local_host("node-1");
        assert_eq!(
            a.dyn_eq(&LocalFirstPolicy::with_local_host("node-1")),
            Some(true)
        );
        assert_eq!(
            a.dyn_eq(&LocalFirstPolicy::with_local_host("node-2")),
            Some(false)
        );
    }
}
