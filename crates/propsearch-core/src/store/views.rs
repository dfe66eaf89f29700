//! Pure projections over a raw collection.
//!
//! Both functions are recomputed from scratch on every call; neither holds
//! state between calls.

use std::collections::{BTreeSet, HashMap};
use std::hash::Hash;

/// Map each key to the record carrying it.
///
/// When several records share a key, the last one in collection order wins.
pub fn index_by<'a, R, K, F>(records: &'a [R], key: F) -> HashMap<K, &'a R>
where
    K: Eq + Hash,
    F: Fn(&'a R) -> K,
{
    let mut index = HashMap::with_capacity(records.len());
    for record in records {
        index.insert(key(record), record);
    }
    index
}

/// Flatten every record's tags into a deduplicated, ascending list.
pub fn unique_sorted<'a, R, T, I, F>(records: &'a [R], tags: F) -> Vec<T>
where
    T: Ord,
    I: IntoIterator<Item = T>,
    F: Fn(&'a R) -> I,
{
    records
        .iter()
        .flat_map(tags)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Station {
        postcode: &'static str,
        name: &'static str,
        lines: Vec<&'static str>,
    }

    fn station(postcode: &'static str, name: &'static str, lines: &[&'static str]) -> Station {
        Station {
            postcode,
            name,
            lines: lines.to_vec(),
        }
    }

    #[test]
    fn test_index_by_last_record_wins() {
        let stations = vec![
            station("SW1A 1AA", "first", &[]),
            station("E1 6AN", "other", &[]),
            station("SW1A 1AA", "last", &[]),
        ];

        let index = index_by(&stations, |s| s.postcode);
        assert_eq!(index.len(), 2);
        assert_eq!(index["SW1A 1AA"].name, "last");
        assert_eq!(index["E1 6AN"].name, "other");
    }

    #[test]
    fn test_index_by_empty() {
        let stations: Vec<Station> = Vec::new();
        assert!(index_by(&stations, |s| s.postcode).is_empty());
    }

    #[test]
    fn test_unique_sorted_dedupes_and_orders() {
        let stations = vec![
            station("A", "a", &["Central", "Victoria"]),
            station("B", "b", &["Victoria"]),
            station("C", "c", &["Jubilee", "Central"]),
        ];

        let lines = unique_sorted(&stations, |s| s.lines.iter().copied());
        assert_eq!(lines, vec!["Central", "Jubilee", "Victoria"]);
    }

    #[test]
    fn test_unique_sorted_zero_tags() {
        let stations = vec![station("A", "a", &[]), station("B", "b", &[])];
        let lines = unique_sorted(&stations, |s| s.lines.clone());
        assert!(lines.is_empty());
    }

    #[test]
    fn test_unique_sorted_optional_tags() {
        let postcodes = vec![Some("N1 9GU"), None, Some("E1 6AN"), Some("N1 9GU")];
        let unique = unique_sorted(&postcodes, |p| *p);
        assert_eq!(unique, vec!["E1 6AN", "N1 9GU"]);
    }
}
