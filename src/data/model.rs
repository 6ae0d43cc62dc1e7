use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Parsing policies
// ---------------------------------------------------------------------------

/// What to do when a label appears more than once in the same file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum MergePolicy {
    /// Add the counts together.
    #[default]
    Sum,
    /// Keep the last value seen.
    Overwrite,
}

impl MergePolicy {
    pub fn merge(self, existing: u64, incoming: u64) -> u64 {
        match self {
            MergePolicy::Sum => existing.saturating_add(incoming),
            MergePolicy::Overwrite => incoming,
        }
    }
}

/// Whether labels differing only in case are the same label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum CaseFolding {
    /// `"Boss"` and `"boss"` merge into `"boss"`.
    #[default]
    #[value(name = "lower")]
    Lowercase,
    /// Labels are compared as exact strings.
    Preserve,
}

impl CaseFolding {
    pub fn apply(self, label: &str) -> String {
        match self {
            CaseFolding::Lowercase => label.to_lowercase(),
            CaseFolding::Preserve => label.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – one tally file
// ---------------------------------------------------------------------------

/// Counts per label for one input file. Serializes as `{ "label": count }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Dataset {
    #[serde(skip)]
    pub name: String,
    pub counts: BTreeMap<String, u64>,
}

impl Dataset {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            counts: BTreeMap::new(),
        }
    }

    /// Record `count` for `label`, combining with an earlier entry per `policy`.
    pub fn record(&mut self, label: String, count: u64, policy: MergePolicy) {
        match self.counts.entry(label) {
            Entry::Occupied(mut e) => {
                let merged = policy.merge(*e.get(), count);
                e.insert(merged);
            }
            Entry::Vacant(e) => {
                e.insert(count);
            }
        }
    }

    pub fn get(&self, label: &str) -> Option<u64> {
        self.counts.get(label).copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.counts.values().fold(0u64, |acc, &v| acc.saturating_add(v))
    }

    /// `(label, count)` pairs, highest count first; ties keep label order.
    pub fn ranked(&self) -> Vec<(&str, u64)> {
        let mut entries: Vec<(&str, u64)> =
            self.counts.iter().map(|(l, &c)| (l.as_str(), c)).collect();
        // stable sort keeps the BTreeMap's label order among equal counts
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
    }

    pub fn summary(&self) -> DatasetSummary {
        let total = self.total();
        let unique = self.len();
        let top = self
            .ranked()
            .first()
            .map(|&(label, count)| (label.to_string(), count));
        let average = if unique == 0 {
            0.0
        } else {
            total as f64 / unique as f64
        };

        DatasetSummary {
            total,
            unique,
            top,
            average,
        }
    }
}

/// Headline numbers shown next to a dataset's chart.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSummary {
    pub total: u64,
    pub unique: usize,
    /// Label with the highest count.
    pub top: Option<(String, u64)>,
    pub average: f64,
}

// ---------------------------------------------------------------------------
// LabelSet – union of labels across datasets
// ---------------------------------------------------------------------------

/// Distinct labels in their canonical (byte-lexicographic) order.
///
/// The order is what colour assignment indexes into, so the same set always
/// yields the same colours no matter which dataset a label came from first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSet(BTreeSet<String>);

impl LabelSet {
    pub fn from_datasets<'a>(datasets: impl IntoIterator<Item = &'a Dataset>) -> Self {
        datasets
            .into_iter()
            .flat_map(|ds| ds.counts.keys().cloned())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.0.contains(label)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<String> for LabelSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        LabelSet(iter.into_iter().collect())
    }
}

// ---------------------------------------------------------------------------
// DatasetCollection – everything loaded for one run
// ---------------------------------------------------------------------------

/// All datasets keyed by name, with the label union pre-computed.
#[derive(Debug, Clone, Default)]
pub struct DatasetCollection {
    datasets: BTreeMap<String, Dataset>,
    labels: LabelSet,
}

impl DatasetCollection {
    /// Build the collection and its label index. A repeated name replaces the earlier dataset.
    pub fn from_datasets(datasets: impl IntoIterator<Item = Dataset>) -> Self {
        let mut by_name = BTreeMap::new();
        for ds in datasets {
            if let Some(previous) = by_name.insert(ds.name.clone(), ds) {
                log::warn!("Dataset '{}' defined twice, keeping the last one", previous.name);
            }
        }
        let labels = LabelSet::from_datasets(by_name.values());

        DatasetCollection {
            datasets: by_name,
            labels,
        }
    }

    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    pub fn get(&self, name: &str) -> Option<&Dataset> {
        self.datasets.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.datasets.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Dataset> {
        self.datasets.values()
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    /// `{ dataset: { label: count } }`, the shape embedded in generated pages.
    pub fn counts_by_dataset(&self) -> BTreeMap<&str, &Dataset> {
        self.datasets
            .iter()
            .map(|(name, ds)| (name.as_str(), ds))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(name: &str, entries: &[(&str, u64)]) -> Dataset {
        let mut ds = Dataset::new(name);
        for &(label, count) in entries {
            ds.record(label.to_string(), count, MergePolicy::Overwrite);
        }
        ds
    }

    #[test]
    fn record_sums_or_overwrites() {
        let mut summed = Dataset::new("a");
        summed.record("hornet".into(), 3, MergePolicy::Sum);
        summed.record("hornet".into(), 4, MergePolicy::Sum);
        assert_eq!(summed.get("hornet"), Some(7));

        let mut overwritten = Dataset::new("b");
        overwritten.record("hornet".into(), 3, MergePolicy::Overwrite);
        overwritten.record("hornet".into(), 4, MergePolicy::Overwrite);
        assert_eq!(overwritten.get("hornet"), Some(4));
    }

    #[test]
    fn sum_saturates() {
        assert_eq!(MergePolicy::Sum.merge(u64::MAX, 5), u64::MAX);
    }

    #[test]
    fn case_folding() {
        assert_eq!(CaseFolding::Lowercase.apply("Moss Mother"), "moss mother");
        assert_eq!(CaseFolding::Preserve.apply("Moss Mother"), "Moss Mother");
    }

    #[test]
    fn ranked_orders_by_count_then_label() {
        let ds = dataset("p", &[("b", 2), ("a", 2), ("c", 9)]);
        assert_eq!(ds.ranked(), vec![("c", 9), ("a", 2), ("b", 2)]);
    }

    #[test]
    fn summary_of_dataset() {
        let ds = dataset("p", &[("hornet", 5), ("moss mother", 1), ("false knight", 3)]);
        let summary = ds.summary();
        assert_eq!(summary.total, 9);
        assert_eq!(summary.unique, 3);
        assert_eq!(summary.top, Some(("hornet".to_string(), 5)));
        assert!((summary.average - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn summary_of_empty_dataset() {
        let summary = Dataset::new("empty").summary();
        assert_eq!(summary.total, 0);
        assert_eq!(summary.top, None);
        assert_eq!(summary.average, 0.0);
    }

    #[test]
    fn label_set_is_union_in_sorted_order() {
        let a = dataset("a", &[("zote", 1), ("hornet", 2)]);
        let b = dataset("b", &[("hornet", 1), ("crystal guardian", 4)]);

        let forward = LabelSet::from_datasets([&a, &b]);
        let backward = LabelSet::from_datasets([&b, &a]);
        assert_eq!(forward, backward);
        assert_eq!(
            forward.iter().collect::<Vec<_>>(),
            ["crystal guardian", "hornet", "zote"]
        );
    }

    #[test]
    fn collection_indexes_by_name() {
        let coll = DatasetCollection::from_datasets([
            dataset("zed", &[("x", 1)]),
            dataset("amy", &[("y", 2)]),
        ]);
        assert_eq!(coll.len(), 2);
        assert_eq!(coll.names().collect::<Vec<_>>(), ["amy", "zed"]);
        assert_eq!(coll.labels().len(), 2);
        assert_eq!(coll.get("amy").and_then(|d| d.get("y")), Some(2));
    }

    #[test]
    fn duplicate_name_keeps_last() {
        let coll = DatasetCollection::from_datasets([
            dataset("amy", &[("x", 1)]),
            dataset("amy", &[("y", 2)]),
        ]);
        assert_eq!(coll.len(), 1);
        assert!(!coll.labels().contains("x"));
        assert!(coll.labels().contains("y"));
    }

    #[test]
    fn counts_serialize_as_nested_object() {
        let coll = DatasetCollection::from_datasets([dataset("amy", &[("hornet", 3)])]);
        let json = serde_json::to_string(&coll.counts_by_dataset()).unwrap();
        assert_eq!(json, r#"{"amy":{"hornet":3}}"#);
    }
}
