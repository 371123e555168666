use std::sync::Arc;

use arc_swap::ArcSwapOption;
use tracing::info;

use super::AllocError;
use super::Allocation;
use super::Allocator;
use super::AllocatorConfig;
use super::BatchedRoundRobin;
use super::ProgressRow;
use super::Snapshot;
use super::project;

/// The live allocator, shared by every request handler.
///
/// Installing a configuration replaces the whole allocator in one atomic swap.
/// Callers that already loaded the previous allocator finish against it; every
/// later caller sees the new one, starting from zero.
#[derive(Debug, Default)]
pub struct SharedAllocator {
    current: ArcSwapOption<BatchedRoundRobin>,
}

impl SharedAllocator {
    /// Creates a handle with no configuration installed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a handle with `config` already installed.
    pub fn with_config(config: AllocatorConfig) -> Self {
        let shared = Self::new();
        shared.install(config);
        shared
    }

    /// Replaces the live allocator, discarding its progress.
    ///
    /// Returns the allocator that was live before, if any.
    pub fn install(&self, config: AllocatorConfig) -> Option<Arc<BatchedRoundRobin>> {
        info!(
            links = config.urls().len(),
            quota_per_url = config.quota_per_url(),
            group_size = config.group_size().get(),
            "installing link allocator"
        );
        self.current
            .swap(Some(Arc::new(BatchedRoundRobin::new(config))))
    }

    /// Allocates from the live allocator.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError::Uninitialized`] if nothing has been installed, or
    /// [`AllocError::Exhausted`] once the live allocator is used up.
    pub fn next(&self) -> Result<Allocation, AllocError> {
        match self.current.load().as_deref() {
            Some(allocator) => allocator.next(),
            None => Err(AllocError::Uninitialized),
        }
    }

    /// Snapshot of the live allocator, or `None` before the first install.
    pub fn info(&self) -> Option<Snapshot> {
        self.current.load().as_deref().map(Allocator::info)
    }

    /// Progress rows for the live allocator.
    pub fn progress(&self) -> Vec<ProgressRow> {
        self.info().as_ref().map(project).unwrap_or_default()
    }

    /// The live allocator, if any.
    pub fn current(&self) -> Option<Arc<BatchedRoundRobin>> {
        self.current.load_full()
    }
}
