/// Reasons why an allocation request might be rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AllocError {
    /// Every link has already received its full quota.
    #[error("no more links left; all {capacity} redirects have been issued")]
    Exhausted {
        /// Total allocations the configuration allowed.
        capacity: usize,
    },

    /// No configuration has been installed yet.
    #[error("allocator has not been configured")]
    Uninitialized,
}

/// Reasons why a configuration is rejected by [`AllocatorConfig::validate`].
///
/// [`AllocatorConfig::validate`]: crate::AllocatorConfig::validate
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("redirect count per link must be at least 1")]
    ZeroQuota,

    #[error("group size {group_size} is larger than the redirect count {quota_per_url}")]
    GroupTooLarge {
        group_size: usize,
        quota_per_url: usize,
    },

    #[error("group size {group_size} does not divide the redirect count {quota_per_url}")]
    UnevenGroups {
        group_size: usize,
        quota_per_url: usize,
    },
}
