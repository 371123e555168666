use super::Snapshot;

/// Display progress of one configured link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressRow {
    pub url: String,
    /// Allocations this link has received so far.
    pub delivered: usize,
    /// The link's quota.
    pub max: usize,
    /// Whether the next allocation goes to this link.
    pub active: bool,
}

/// Projects a snapshot onto per-link progress rows.
///
/// Delivered counts are exactly the allocations the allocator has made to each
/// link, so they always sum to `snapshot.served`. Exactly one row is active
/// while capacity remains; none once the allocator is exhausted.
pub fn project(snapshot: &Snapshot) -> Vec<ProgressRow> {
    let links = snapshot.urls.len();
    if snapshot.quota_per_url == 0 || links == 0 || snapshot.group_size == 0 {
        return Vec::new();
    }

    let group_size = snapshot.group_size;
    let active_group = snapshot.served / group_size;
    let active_bin = active_group % links;
    let full_wraps = active_group / links;
    let exhausted = snapshot.is_exhausted();

    snapshot
        .urls
        .iter()
        .enumerate()
        .map(|(index, url)| {
            let mut delivered = full_wraps * group_size;
            if index < active_bin {
                // Already had its group in the current wrap.
                delivered += group_size;
            } else if index == active_bin {
                delivered += snapshot.served % group_size;
            }

            ProgressRow {
                url: url.clone(),
                delivered,
                max: snapshot.quota_per_url,
                active: index == active_bin && !exhausted,
            }
        })
        .collect()
}
