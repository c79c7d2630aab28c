//! Binary-search nearest-neighbor lookup over x-sorted data.
//!
//! Every lookup assumes its input is sorted ascending by x. Sorting happens
//! once per data change (see [`crate::core::SortedSeries`]); feeding unsorted
//! data here yields an arbitrary, but memory-safe, index.

use serde::{Deserialize, Serialize};

/// Which neighbor of a query value to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupPolicy {
    /// First index whose x is `>= query`.
    Left,
    /// Index minimizing `|x - query|`, ties toward the lower index.
    Center,
    /// Last index whose x is `< query`.
    Right,
}

/// Insertion point keeping `items` sorted when `query` goes before equal keys.
pub fn bisect_left<T>(items: &[T], query: f64, x: impl Fn(&T) -> f64) -> usize {
    items.partition_point(|item| x(item) < query)
}

/// Insertion point keeping `items` sorted when `query` goes after equal keys.
pub fn bisect_right<T>(items: &[T], query: f64, x: impl Fn(&T) -> f64) -> usize {
    items.partition_point(|item| x(item) <= query)
}

/// Resolves `query` to an index of `items` under `policy` in `O(log n)`.
///
/// Returns `None` only for empty input or a NaN query. Queries beyond either
/// end clamp to the first or last element so a hovering pointer always
/// resolves a datum.
pub fn nearest_index<T>(
    items: &[T],
    query: f64,
    policy: LookupPolicy,
    x: impl Fn(&T) -> f64,
) -> Option<usize> {
    if items.is_empty() || query.is_nan() {
        return None;
    }
    let last = items.len() - 1;
    let insertion = bisect_left(items, query, &x);

    let index = match policy {
        LookupPolicy::Left => insertion.min(last),
        LookupPolicy::Right => insertion.saturating_sub(1),
        LookupPolicy::Center => {
            if insertion == 0 {
                0
            } else {
                let below = insertion - 1;
                let below_wins = insertion > last
                    || (query - x(&items[below])).abs() <= (x(&items[insertion]) - query).abs();
                if below_wins {
                    // First of any run of equal x values.
                    bisect_left(items, x(&items[below]), &x)
                } else {
                    insertion
                }
            }
        }
    };
    Some(index)
}

/// Owned, pre-extracted x column for repeated lookups on one series.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NearestPointIndex {
    xs: Vec<f64>,
}

impl NearestPointIndex {
    /// Builds an index from values already sorted ascending.
    #[must_use]
    pub fn from_sorted(xs: Vec<f64>) -> Self {
        debug_assert!(
            xs.windows(2).all(|pair| pair[0] <= pair[1]),
            "nearest point index requires ascending x values"
        );
        Self { xs }
    }

    /// Sorts then indexes; for callers that cannot guarantee order.
    #[must_use]
    pub fn from_unsorted(mut xs: Vec<f64>) -> Self {
        xs.retain(|value| !value.is_nan());
        xs.sort_by(f64::total_cmp);
        Self { xs }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    #[must_use]
    pub fn x_at(&self, index: usize) -> Option<f64> {
        self.xs.get(index).copied()
    }

    #[must_use]
    pub fn lookup(&self, query: f64, policy: LookupPolicy) -> Option<usize> {
        nearest_index(&self.xs, query, policy, |value| *value)
    }
}
