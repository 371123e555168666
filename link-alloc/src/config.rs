use std::num::NonZeroUsize;

use crate::ConfigError;

/// The immutable settings of one allocation run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AllocatorConfig {
    urls: Vec<String>,
    quota_per_url: usize,
    group_size: NonZeroUsize,
}

impl AllocatorConfig {
    /// Creates a configuration without checking it.
    ///
    /// An empty link list or a zero quota is accepted and yields an allocator
    /// that is exhausted from the start.
    ///
    /// # Arguments
    ///
    /// * `urls` - The destination links, in rotation order.
    /// * `quota_per_url` - How many allocations each link receives in total.
    /// * `group_size` - How many consecutive allocations go to one link before rotating.
    pub fn new(urls: Vec<String>, quota_per_url: usize, group_size: NonZeroUsize) -> Self {
        Self {
            urls,
            quota_per_url,
            group_size,
        }
    }

    /// Checks that the quota splits into whole groups.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the quota is zero, or the group size is larger
    /// than the quota or does not divide it.
    pub fn validate(self) -> Result<Self, ConfigError> {
        let group_size = self.group_size.get();
        let quota_per_url = self.quota_per_url;

        if quota_per_url == 0 {
            return Err(ConfigError::ZeroQuota);
        }
        if group_size > quota_per_url {
            return Err(ConfigError::GroupTooLarge {
                group_size,
                quota_per_url,
            });
        }
        if quota_per_url % group_size != 0 {
            return Err(ConfigError::UnevenGroups {
                group_size,
                quota_per_url,
            });
        }
        Ok(self)
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn quota_per_url(&self) -> usize {
        self.quota_per_url
    }

    pub fn group_size(&self) -> NonZeroUsize {
        self.group_size
    }

    /// Total number of allocations this configuration allows.
    pub fn capacity(&self) -> usize {
        self.urls.len().saturating_mul(self.quota_per_url)
    }
}
