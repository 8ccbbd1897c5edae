//! Grouping, ratio, and growth primitives shared by every dashboard series.
//!
//! Series are `BTreeMap`-keyed, so iteration is always ascending by key and
//! the operations that need sorted input ([`cumulative_sum`],
//! [`percent_growth`]) get it structurally. Counts stay integral until a
//! percentage or rate is produced; [`round2`] is applied exactly once, at
//! that human-facing boundary, never inside chained computation.
//!
//! Division by zero and missing counterpart keys uniformly produce 0;
//! a chart cell is never NaN, infinite, or silently dropped.

use std::collections::BTreeMap;

/// Caller-chosen presentation order for a grouped series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesOrder {
    /// Ascending by key (years on an axis).
    KeyAscending,
    /// Descending by count, ties broken ascending by key (Top-N tables).
    CountDescending,
}

/// Round to 2 decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Count rows grouped by `key`. Rows whose key is `None` are skipped;
/// this is where records with an underivable year fall out of year-keyed
/// series without contaminating them with a sentinel.
pub fn counts_by<T, K, F>(rows: &[T], key: F) -> BTreeMap<K, u64>
where
    K: Ord,
    F: Fn(&T) -> Option<K>,
{
    let mut counts: BTreeMap<K, u64> = BTreeMap::new();
    for row in rows {
        if let Some(k) = key(row) {
            *counts.entry(k).or_insert(0) += 1;
        }
    }
    counts
}

/// Flatten a counts map into a display series in the requested order.
pub fn to_series<K: Ord + Clone>(counts: &BTreeMap<K, u64>, order: SeriesOrder) -> Vec<(K, u64)> {
    let mut series: Vec<(K, u64)> = counts.iter().map(|(k, v)| (k.clone(), *v)).collect();
    if order == SeriesOrder::CountDescending {
        series.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    }
    series
}

/// The `n` largest groups, count-descending.
pub fn top_n<K: Ord + Clone>(counts: &BTreeMap<K, u64>, n: usize) -> Vec<(K, u64)> {
    let mut series = to_series(counts, SeriesOrder::CountDescending);
    series.truncate(n);
    series
}

/// Percentage of `numerator` against `denominator`, keyed by the
/// numerator's keys. A key absent from the denominator, or with a zero
/// denominator, yields 0.
pub fn ratio_pct<K: Ord + Clone>(
    numerator: &BTreeMap<K, u64>,
    denominator: &BTreeMap<K, u64>,
) -> BTreeMap<K, f64> {
    numerator
        .iter()
        .map(|(key, num)| {
            let den = denominator.get(key).copied().unwrap_or(0);
            let pct = if den == 0 {
                0.0
            } else {
                round2(*num as f64 / den as f64 * 100.0)
            };
            (key.clone(), pct)
        })
        .collect()
}

/// Running total ascending by key, inclusive of the current key.
pub fn cumulative_sum<K: Ord + Clone>(series: &BTreeMap<K, u64>) -> BTreeMap<K, u64> {
    let mut running = 0u64;
    series
        .iter()
        .map(|(key, value)| {
            running += value;
            (key.clone(), running)
        })
        .collect()
}

/// Percent change against the previous key, ascending.
///
/// The first key has no baseline and reports 0; a zero baseline also
/// reports 0 rather than blowing up.
pub fn percent_growth<K: Ord + Clone>(series: &BTreeMap<K, u64>) -> BTreeMap<K, f64> {
    let mut previous: Option<u64> = None;
    series
        .iter()
        .map(|(key, value)| {
            let growth = match previous {
                Some(prev) if prev > 0 => {
                    round2((*value as f64 - prev as f64) / prev as f64 * 100.0)
                }
                _ => 0.0,
            };
            previous = Some(*value);
            (key.clone(), growth)
        })
        .collect()
}

/// `count / base * unit` per key of `counts` (e.g. incidents per 100k
/// registrations). A zero or missing base yields 0; the key is kept.
pub fn per_unit_rate<K: Ord + Clone>(
    counts: &BTreeMap<K, u64>,
    base: &BTreeMap<K, u64>,
    unit: f64,
) -> BTreeMap<K, f64> {
    counts
        .iter()
        .map(|(key, count)| {
            let base_value = base.get(key).copied().unwrap_or(0);
            let rate = if base_value == 0 {
                0.0
            } else {
                round2(*count as f64 / base_value as f64 * unit)
            };
            (key.clone(), rate)
        })
        .collect()
}

/// Pair two counts maps over the union of their keys, missing side 0.
pub fn join_with_fill_zero<K: Ord + Clone>(
    a: &BTreeMap<K, u64>,
    b: &BTreeMap<K, u64>,
) -> BTreeMap<K, (u64, u64)> {
    let mut joined: BTreeMap<K, (u64, u64)> = BTreeMap::new();
    for (key, value) in a {
        joined.insert(key.clone(), (*value, 0));
    }
    for (key, value) in b {
        joined
            .entry(key.clone())
            .and_modify(|pair| pair.1 = *value)
            .or_insert((0, *value));
    }
    joined
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_by_skips_none_keys() {
        let rows = vec![Some(2021), Some(2022), None, Some(2022)];
        let counts = counts_by(&rows, |r| *r);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts[&2021], 1);
        assert_eq!(counts[&2022], 2);
    }

    #[test]
    fn to_series_orders_both_ways() {
        let counts = BTreeMap::from([("a", 5u64), ("b", 9), ("c", 5)]);
        let by_key = to_series(&counts, SeriesOrder::KeyAscending);
        assert_eq!(by_key, vec![("a", 5), ("b", 9), ("c", 5)]);
        let by_count = to_series(&counts, SeriesOrder::CountDescending);
        assert_eq!(by_count, vec![("b", 9), ("a", 5), ("c", 5)]);
    }

    #[test]
    fn top_n_truncates() {
        let counts = BTreeMap::from([("a", 1u64), ("b", 3), ("c", 2)]);
        assert_eq!(top_n(&counts, 2), vec![("b", 3), ("c", 2)]);
        assert_eq!(top_n(&counts, 10).len(), 3);
    }

    #[test]
    fn ratio_pct_zero_fallback() {
        let numerator = BTreeMap::from([(2021, 40u64), (2022, 7), (2023, 5)]);
        let denominator = BTreeMap::from([(2021, 1000u64), (2022, 0)]);
        let ratio = ratio_pct(&numerator, &denominator);
        assert_eq!(ratio[&2021], 4.0);
        assert_eq!(ratio[&2022], 0.0); // zero denominator
        assert_eq!(ratio[&2023], 0.0); // missing denominator key
    }

    #[test]
    fn ratio_pct_rounds_to_two_decimals() {
        let numerator = BTreeMap::from([(2021, 1u64)]);
        let denominator = BTreeMap::from([(2021, 3u64)]);
        assert_eq!(ratio_pct(&numerator, &denominator)[&2021], 33.33);
    }

    #[test]
    fn cumulative_sum_runs_ascending() {
        let series = BTreeMap::from([(2021, 10u64), (2022, 5), (2023, 20)]);
        let cumulative = cumulative_sum(&series);
        assert_eq!(cumulative[&2021], 10);
        assert_eq!(cumulative[&2022], 15);
        assert_eq!(cumulative[&2023], 35);
    }

    #[test]
    fn percent_growth_baselines_at_zero() {
        let series = BTreeMap::from([(2021, 10u64), (2022, 15), (2023, 9)]);
        let growth = percent_growth(&series);
        assert_eq!(growth[&2021], 0.0);
        assert_eq!(growth[&2022], 50.0);
        assert_eq!(growth[&2023], -40.0);
    }

    #[test]
    fn percent_growth_zero_baseline_reports_zero() {
        let series = BTreeMap::from([(2021, 0u64), (2022, 8)]);
        let growth = percent_growth(&series);
        assert_eq!(growth[&2022], 0.0);
    }

    #[test]
    fn per_unit_rate_keeps_keys_with_zero_base() {
        let counts = BTreeMap::from([("Seoul", 3u64), ("Busan", 2)]);
        let base = BTreeMap::from([("Busan", 4000u64)]);
        let rates = per_unit_rate(&counts, &base, 10_000.0);
        assert_eq!(rates["Seoul"], 0.0);
        assert_eq!(rates["Busan"], 5.0);
        assert_eq!(rates.len(), 2);
    }

    #[test]
    fn join_with_fill_zero_unions_keys() {
        let a = BTreeMap::from([("A", 3u64), ("B", 5)]);
        let b = BTreeMap::from([("B", 2u64), ("C", 7)]);
        let joined = join_with_fill_zero(&a, &b);
        assert_eq!(joined["A"], (3, 0));
        assert_eq!(joined["B"], (5, 2));
        assert_eq!(joined["C"], (0, 7));
    }

    #[test]
    fn empty_inputs_yield_empty_outputs() {
        let empty: BTreeMap<i32, u64> = BTreeMap::new();
        assert!(cumulative_sum(&empty).is_empty());
        assert!(percent_growth(&empty).is_empty());
        assert!(ratio_pct(&empty, &empty).is_empty());
        assert!(join_with_fill_zero(&empty, &empty).is_empty());
        assert!(top_n(&empty, 5).is_empty());
    }
}
