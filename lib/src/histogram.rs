use std::cmp;
use std::convert::TryFrom;

use crate::errors::{AbundError, AbundResult};
use crate::format_err;

/// Inclusive range of abundances that gets binned.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct HistRange {
    pub min: i64,
    pub max: i64,
}

impl HistRange {
    /// Number of distinct integer abundances in the range (0 if inverted).
    pub fn width(&self) -> i128 {
        cmp::max(0, i128::from(self.max) - i128::from(self.min) + 1)
    }

    pub fn contains(&self, value: u64) -> bool {
        let v = i128::from(value);
        i128::from(self.min) <= v && v <= i128::from(self.max)
    }
}

/// Work out the range to bin over. The minimum defaults to 1 and the
/// maximum to the largest value; overrides are used exactly as given, even
/// if they end up inverted.
pub fn resolve_range(
    values: &[u64],
    override_min: Option<i64>,
    override_max: Option<i64>,
) -> AbundResult<HistRange> {
    let min = override_min.unwrap_or(1);
    let max = match override_max {
        Some(max) => max,
        None => {
            let data_max = values.iter().copied().max().ok_or(AbundError::EmptyData)?;
            i64::try_from(data_max)
                .map_err(|_| format_err!("abundance {} is too large to bin", data_max))?
        }
    };
    Ok(HistRange { min, max })
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Bin {
    /// Largest abundance this bin covers (the bin's right edge).
    pub upper_edge: i64,
    pub count: u64,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Histogram {
    pub range: HistRange,
    pub bins: Vec<Bin>,
}

impl Histogram {
    pub fn edges(&self) -> Vec<i64> {
        self.bins.iter().map(|b| b.upper_edge).collect()
    }

    pub fn counts(&self) -> Vec<u64> {
        self.bins.iter().map(|b| b.count).collect()
    }

    /// Number of values that landed in any bin.
    pub fn total(&self) -> u64 {
        self.bins.iter().map(|b| b.count).sum()
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }
}

/// The number of bins actually used: never more than there are integer
/// abundances in the range.
pub fn effective_bins(range: HistRange, requested_bins: i64) -> AbundResult<usize> {
    if requested_bins <= 0 || range.max < range.min {
        return Err(AbundError::InvalidRange {
            min: range.min,
            max: range.max,
            bins: requested_bins,
        });
    }
    let n_bins = cmp::min(i128::from(requested_bins), range.width());
    usize::try_from(n_bins).map_err(|_| format_err!("{} bins can not be allocated", n_bins))
}

/// Bin `values` into equal-width bins over `range`.
///
/// Bins are half-open `[lo, hi)` except the last, which also takes
/// `range.max`. Values outside the range are not counted anywhere. The edge
/// reported for each bin is its upper bound rounded down to an integer;
/// with a negative `range.min` that is toward negative infinity, so
/// `min = -5, max = 0` in 2 bins reports edges `[-3, 0]`, not `[-2, 0]`.
///
/// Fails rather than aborting if the bins can't be allocated.
pub fn build_histogram(
    values: &[u64],
    range: HistRange,
    requested_bins: i64,
) -> AbundResult<Histogram> {
    let n_bins = effective_bins(range, requested_bins)?;
    let min = i128::from(range.min);
    let span = i128::from(range.max) - min;
    let bins_wide = n_bins as i128;

    let mut bins: Vec<Bin> = Vec::new();
    bins.try_reserve_exact(n_bins)
        .map_err(|_| format_err!("{} bins can not be allocated", n_bins))?;
    for i in 0..n_bins {
        let upper = min + (i as i128 + 1) * span / bins_wide;
        bins.push(Bin {
            upper_edge: upper as i64,
            count: 0,
        });
    }

    for value in values {
        if !range.contains(*value) {
            continue;
        }
        let offset = i128::from(*value) - min;
        let ix = if offset == span {
            n_bins - 1
        } else {
            // offset < span here so span > 0
            (offset * bins_wide / span) as usize
        };
        bins[ix].count += 1;
    }

    Ok(Histogram { range, bins })
}
