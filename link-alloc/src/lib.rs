//! # link-alloc
//!
//! `link-alloc` hands out destination links in batched round robin order.
//!
//! ## Core Philosophy
//!
//! A redirect service sees many visitors at once, but every visitor must land on exactly
//! one slot of a fixed allocation sequence. `link-alloc` keeps the whole mutable state in a
//! single atomic counter and updates it with a Compare-And-Swap loop, so every caller
//! consumes a distinct slot without holding a lock.
//!
//! ## Key Concepts
//!
//! * **Group**: `group_size` consecutive visitors go to the same link.
//! * **Bin**: groups rotate through the configured links, wrapping at the end of the list.
//! * **Quota**: each link receives at most `quota_per_url` visitors, after which the
//!   allocator reports exhaustion.
//! * **Replacement, not mutation**: a new configuration means a new allocator.
//!   [`SharedAllocator`] swaps it in atomically and progress starts again from zero.
//!
//! ## Example
//!
//! ```rust
//! use link_alloc::Allocator;
//! use link_alloc::AllocatorConfig;
//! use link_alloc::BatchedRoundRobin;
//! use std::num::NonZeroUsize;
//!
//! let urls = vec!["http://a".to_string(), "http://b".to_string()];
//! let group_size = NonZeroUsize::new(2).unwrap();
//! let allocator = BatchedRoundRobin::new(AllocatorConfig::new(urls, 4, group_size));
//!
//! let first = allocator.next().unwrap();
//! assert_eq!(first.url, "http://a");
//! assert_eq!(allocator.info().served, 1);
//! ```

use std::fmt::Debug;

mod batched;
mod config;
mod error;
mod progress;
mod shared;

pub use batched::BatchedRoundRobin;
pub use config::AllocatorConfig;
pub use error::AllocError;
pub use error::ConfigError;
pub use progress::ProgressRow;
pub use progress::project;
pub use shared::SharedAllocator;

/// A single successful allocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Allocation {
    /// The counter value this allocation consumed.
    pub sequence: usize,
    /// Index of the selected link in the configured list.
    pub bin: usize,
    pub url: String,
}

/// A point-in-time view of an allocator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    /// Allocations issued since the configuration was installed.
    pub served: usize,
    pub quota_per_url: usize,
    pub group_size: usize,
    pub urls: Vec<String>,
}

impl Snapshot {
    /// Total number of allocations the configuration allows.
    pub fn capacity(&self) -> usize {
        self.urls.len().saturating_mul(self.quota_per_url)
    }

    pub fn is_exhausted(&self) -> bool {
        self.served >= self.capacity()
    }
}

/// The core trait for link allocation algorithms.
///
/// Allocators must be `Send` and `Sync` to be shared between request handlers
/// via `Arc`.
pub trait Allocator: Debug {
    /// Consumes the next slot of the allocation sequence.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError::Exhausted`] once every link has received its quota.
    fn next(&self) -> Result<Allocation, AllocError>;

    /// Returns a consistent snapshot of the allocator state.
    fn info(&self) -> Snapshot;
}
