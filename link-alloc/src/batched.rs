use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use tracing::debug;

use super::AllocError;
use super::Allocation;
use super::Allocator;
use super::AllocatorConfig;
use super::Snapshot;

/// Batched round robin allocation.
///
/// The first `group_size` allocations go to the first link, the next
/// `group_size` to the second, and so on, wrapping back to the first link
/// until every link has received `quota_per_url` allocations. When the group
/// size equals the quota, links are simply filled one after the other.
#[derive(Debug)]
pub struct BatchedRoundRobin {
    config: AllocatorConfig,
    capacity: usize,
    served: AtomicUsize,
}

impl Allocator for BatchedRoundRobin {
    fn next(&self) -> Result<Allocation, AllocError> {
        let capacity = self.capacity;

        // The counter only moves while there is capacity left, so an exhausted
        // allocator stays at `capacity` however often it is asked.
        let sequence = self
            .served
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |served| {
                if served < capacity {
                    Some(served + 1)
                } else {
                    None
                }
            })
            .map_err(|_| AllocError::Exhausted { capacity })?;

        let bin = self.bin_for(sequence);
        let url = self.config.urls()[bin].clone();
        debug!(sequence, bin, url = %url, "allocated link");

        Ok(Allocation { sequence, bin, url })
    }

    fn info(&self) -> Snapshot {
        Snapshot {
            served: self.served.load(Ordering::Acquire),
            quota_per_url: self.config.quota_per_url(),
            group_size: self.config.group_size().get(),
            urls: self.config.urls().to_vec(),
        }
    }
}

impl BatchedRoundRobin {
    /// Creates a new `BatchedRoundRobin` allocator with nothing served yet.
    pub fn new(config: AllocatorConfig) -> Self {
        Self {
            capacity: config.capacity(),
            config,
            served: AtomicUsize::new(0),
        }
    }

    // Only called with sequence < capacity, which implies a non-empty list.
    fn bin_for(&self, sequence: usize) -> usize {
        let group = sequence / self.config.group_size().get();
        group % self.config.urls().len()
    }
}
