//! Ranked lists for the funnel and rose charts.
//!
//! Rankings are sorted descending by value with a stable sort, so equal
//! values keep the fixture's iteration order.

use crate::models::fixture::City;
use crate::models::series::RankedEntry;

/// Sort descending by value, ties in original order.
pub fn rank_descending(mut entries: Vec<RankedEntry>) -> Vec<RankedEntry> {
    entries.sort_by(|a, b| b.value.cmp(&a.value));
    entries
}

/// Rank and keep at most `limit` entries.
pub fn top_n(entries: Vec<RankedEntry>, limit: usize) -> Vec<RankedEntry> {
    let mut ranked = rank_descending(entries);
    ranked.truncate(limit);
    ranked
}

/// Rank cities by their sales weight scaled by `multiplier`.
pub fn rank_cities(cities: &[City], multiplier: i64) -> Vec<RankedEntry> {
    rank_descending(
        cities
            .iter()
            .map(|c| RankedEntry::new(c.name.clone(), c.value * multiplier))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(values: &[(&str, i64)]) -> Vec<RankedEntry> {
        values.iter().map(|(n, v)| RankedEntry::new(*n, *v)).collect()
    }

    #[test]
    fn test_ties_keep_original_order() {
        let ranked = rank_descending(entries(&[("a", 1), ("b", 5), ("c", 1), ("d", 5)]));
        let names: Vec<&str> = ranked.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_top_n_truncates() {
        let ranked = top_n(entries(&[("a", 1), ("b", 2), ("c", 3)]), 2);
        assert_eq!(ranked, entries(&[("c", 3), ("b", 2)]));
        assert!(top_n(Vec::new(), 6).is_empty());
    }

    #[test]
    fn test_rank_cities_scales_values() {
        let cities = vec![
            City { name: "Ankara".into(), value: 3, coordinates: [32.9, 39.9] },
            City { name: "İstanbul".into(), value: 7, coordinates: [29.0, 41.0] },
        ];
        let ranked = rank_cities(&cities, 500);
        assert_eq!(ranked, entries(&[("İstanbul", 3_500), ("Ankara", 1_500)]));
    }
}
