use std::cmp::Reverse;

use super::model::{Dataset, DatasetCollection};

// ---------------------------------------------------------------------------
// Per-label breakdown
// ---------------------------------------------------------------------------

/// Datasets that recorded `label`, as `(dataset, count)`, highest count first.
///
/// Ties keep dataset-name order.
pub fn label_breakdown<'a>(collection: &'a DatasetCollection, label: &str) -> Vec<(&'a str, u64)> {
    let mut rows: Vec<(&str, u64)> = collection
        .iter()
        .filter_map(|ds| ds.get(label).map(|count| (ds.name.as_str(), count)))
        .collect();
    rows.sort_by_key(|&(_, count)| Reverse(count));
    rows
}

// ---------------------------------------------------------------------------
// Two-dataset comparison
// ---------------------------------------------------------------------------

/// One label's counts in the two compared datasets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonRow {
    pub label: String,
    pub first: u64,
    pub second: u64,
}

impl ComparisonRow {
    pub fn combined(&self) -> u64 {
        self.first.saturating_add(self.second)
    }
}

/// Compare two datasets by name.
///
/// * both given → labels present in both, by combined count (desc)
/// * one given → all of its labels, by its count (desc); the other side is 0
/// * none given, or a name that does not exist → empty
///
/// Ties are broken by label order.
pub fn compare(
    collection: &DatasetCollection,
    first: Option<&str>,
    second: Option<&str>,
) -> Vec<ComparisonRow> {
    let lookup = |name: Option<&str>| name.map(|n| collection.get(n));

    let mut rows = match (lookup(first), lookup(second)) {
        (Some(Some(a)), Some(Some(b))) => common_rows(a, b),
        (Some(Some(a)), None) => single_rows(a, |count| (count, 0)),
        (None, Some(Some(b))) => single_rows(b, |count| (0, count)),
        _ => Vec::new(),
    };
    rows.sort_by_key(|row| Reverse(row.combined()));
    rows
}

fn common_rows(a: &Dataset, b: &Dataset) -> Vec<ComparisonRow> {
    a.counts
        .iter()
        .filter_map(|(label, &first)| {
            b.get(label).map(|second| ComparisonRow {
                label: label.clone(),
                first,
                second,
            })
        })
        .collect()
}

fn single_rows(ds: &Dataset, split: impl Fn(u64) -> (u64, u64)) -> Vec<ComparisonRow> {
    ds.counts
        .iter()
        .map(|(label, &count)| {
            let (first, second) = split(count);
            ComparisonRow {
                label: label.clone(),
                first,
                second,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::MergePolicy;

    fn dataset(name: &str, entries: &[(&str, u64)]) -> Dataset {
        let mut ds = Dataset::new(name);
        for &(label, count) in entries {
            ds.record(label.to_string(), count, MergePolicy::Sum);
        }
        ds
    }

    fn collection() -> DatasetCollection {
        DatasetCollection::from_datasets([
            dataset("alice", &[("hornet", 4), ("nosk", 1), ("zote", 2)]),
            dataset("bob", &[("hornet", 1), ("zote", 6), ("radiance", 30)]),
            dataset("cara", &[("hornet", 4)]),
        ])
    }

    #[test]
    fn breakdown_sorted_by_count() {
        let coll = collection();
        assert_eq!(
            label_breakdown(&coll, "hornet"),
            vec![("alice", 4), ("cara", 4), ("bob", 1)]
        );
        assert_eq!(label_breakdown(&coll, "radiance"), vec![("bob", 30)]);
        assert!(label_breakdown(&coll, "grimm").is_empty());
    }

    #[test]
    fn compare_common_labels_by_combined_count() {
        let coll = collection();
        let rows = compare(&coll, Some("alice"), Some("bob"));
        let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, ["zote", "hornet"]);
        assert_eq!(rows[0].first, 2);
        assert_eq!(rows[0].second, 6);
    }

    #[test]
    fn compare_single_dataset() {
        let coll = collection();
        let rows = compare(&coll, None, Some("bob"));
        let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, ["radiance", "zote", "hornet"]);
        assert!(rows.iter().all(|r| r.first == 0));
    }

    #[test]
    fn compare_nothing_in_common() {
        let coll = DatasetCollection::from_datasets([
            dataset("a", &[("x", 1)]),
            dataset("b", &[("y", 1)]),
        ]);
        assert!(compare(&coll, Some("a"), Some("b")).is_empty());
    }

    #[test]
    fn compare_unknown_or_missing_names() {
        let coll = collection();
        assert!(compare(&coll, None, None).is_empty());
        assert!(compare(&coll, Some("alice"), Some("nobody")).is_empty());
        assert!(compare(&coll, Some("nobody"), None).is_empty());
    }
}
