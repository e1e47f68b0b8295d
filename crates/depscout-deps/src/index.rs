use crate::heavy::HeavyMatcher;
use crate::models::{DependencyKind, DependencyUsage, HeavyDependency, ManifestRecord};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Dependency name -> every manifest that declares it
///
/// Names are kept sorted. The usage list for a name keeps the order the
/// manifests were folded in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DependencyIndex {
    entries: BTreeMap<String, Vec<DependencyUsage>>,
}

impl DependencyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, location: &str, version: &str) {
        self.entries
            .entry(name.to_string())
            .or_default()
            .push(DependencyUsage::new(location, version));
    }

    pub fn get(&self, name: &str) -> Option<&[DependencyUsage]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of distinct dependency names
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of manifests declaring `name` (0 if none)
    pub fn usage_count(&self, name: &str) -> usize {
        self.entries.get(name).map_or(0, Vec::len)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[DependencyUsage])> {
        self.entries
            .iter()
            .map(|(name, usages)| (name.as_str(), usages.as_slice()))
    }

    /// Names declared by more than one manifest
    pub fn duplicates(&self) -> DependencyIndex {
        let entries = self
            .entries
            .iter()
            .filter(|(_, usages)| usages.len() > 1)
            .map(|(name, usages)| (name.clone(), usages.clone()))
            .collect();

        DependencyIndex { entries }
    }

    /// Duplicates shared by at least half of the manifests - hoist these to the root
    pub fn root_candidates(&self, manifest_count: usize) -> Vec<String> {
        let threshold = manifest_count / 2;

        self.entries
            .iter()
            .filter(|(_, usages)| usages.len() > 1 && usages.len() >= threshold)
            .map(|(name, _)| name.clone())
            .collect()
    }
}

/// The production and dev indexes for one scan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyIndexes {
    pub production: DependencyIndex,
    pub dev: DependencyIndex,
}

impl DependencyIndexes {
    /// Fold records into the two indexes, in the order given
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a ManifestRecord>,
    {
        records.into_iter().fold(Self::default(), |mut indexes, record| {
            for (name, version) in &record.dependencies {
                indexes.production.insert(name, &record.location, version);
            }
            for (name, version) in &record.dev_dependencies {
                indexes.dev.insert(name, &record.location, version);
            }
            indexes
        })
    }

    pub fn get(&self, kind: DependencyKind) -> &DependencyIndex {
        match kind {
            DependencyKind::Production => &self.production,
            DependencyKind::Dev => &self.dev,
        }
    }

    /// Distinct names across both kinds
    pub fn unique_names(&self) -> BTreeSet<&str> {
        self.production.names().chain(self.dev.names()).collect()
    }

    /// Every (manifest, dependency) declaration, both kinds
    pub fn total_entries(&self) -> usize {
        self.production
            .iter()
            .chain(self.dev.iter())
            .map(|(_, usages)| usages.len())
            .sum()
    }

    /// Duplicated production names plus duplicated dev names
    pub fn duplicate_count(&self) -> usize {
        self.production.duplicates().len() + self.dev.duplicates().len()
    }

    /// Names in either index that the matcher flags as heavy
    ///
    /// Most widely used first, ties broken by name.
    pub fn heavy(&self, matcher: &HeavyMatcher) -> Vec<HeavyDependency> {
        let mut found: Vec<HeavyDependency> = self
            .unique_names()
            .into_iter()
            .filter_map(|name| {
                matcher.matches(name).map(|keyword| HeavyDependency {
                    name: name.to_string(),
                    keyword: keyword.to_string(),
                    count: self.production.usage_count(name) + self.dev.usage_count(name),
                })
            })
            .collect();

        found.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
        found
    }
}

/// Fold records into production and dev indexes
pub fn aggregate(records: &[ManifestRecord]) -> DependencyIndexes {
    DependencyIndexes::from_records(records)
}

/// Names (either kind) that every manifest declares
///
/// Only meaningful across workspaces, so fewer than two records gives an
/// empty set.
pub fn common_dependencies(records: &[ManifestRecord]) -> BTreeSet<String> {
    if records.len() < 2 {
        return BTreeSet::new();
    }

    let mut sets = records.iter().map(ManifestRecord::dependency_names);
    let first: BTreeSet<&str> = sets.next().unwrap_or_default();

    sets.fold(first, |common, names| {
        common.intersection(&names).copied().collect()
    })
    .into_iter()
    .map(str::to_string)
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MatchMode;
    use crate::parsers::parse_package_json;

    fn record(location: &str, deps: &[(&str, &str)], dev: &[(&str, &str)]) -> ManifestRecord {
        ManifestRecord {
            location: location.to_string(),
            declared_name: location.to_string(),
            dependencies: deps
                .iter()
                .map(|(n, v)| (n.to_string(), v.to_string()))
                .collect(),
            dev_dependencies: dev
                .iter()
                .map(|(n, v)| (n.to_string(), v.to_string()))
                .collect(),
        }
    }

    #[test]
    fn test_left_pad_duplicate() {
        let records = vec![
            record("a/package.json", &[("left-pad", "^1.0.0")], &[]),
            record("b/package.json", &[("left-pad", "^1.0.0")], &[]),
        ];

        let duplicates = aggregate(&records).production.duplicates();

        assert_eq!(duplicates.len(), 1);
        assert_eq!(
            duplicates.get("left-pad").unwrap(),
            &[
                DependencyUsage::new("a/package.json", "^1.0.0"),
                DependencyUsage::new("b/package.json", "^1.0.0"),
            ]
        );
    }

    #[test]
    fn test_duplicate_has_one_entry_per_declaring_manifest() {
        let records: Vec<_> = (0..5)
            .map(|i| {
                let deps: &[(&str, &str)] = if i % 2 == 0 {
                    &[("react", "^18.0.0"), ("zod", "3")]
                } else {
                    &[("react", "^18.2.0")]
                };
                record(&format!("pkg{}/package.json", i), deps, &[])
            })
            .collect();

        let indexes = aggregate(&records);
        let duplicates = indexes.production.duplicates();

        assert_eq!(duplicates.usage_count("react"), 5);
        assert_eq!(duplicates.usage_count("zod"), 3);
        assert_eq!(indexes.total_entries(), 8);
    }

    #[test]
    fn test_single_use_is_not_a_duplicate() {
        let records = vec![
            record("a", &[("express", "4")], &[("jest", "29")]),
            record("b", &[("fastify", "4")], &[]),
        ];

        let indexes = aggregate(&records);
        assert!(indexes.production.duplicates().is_empty());
        assert!(indexes.dev.duplicates().is_empty());
        assert_eq!(indexes.duplicate_count(), 0);
    }

    #[test]
    fn test_production_and_dev_tracked_separately() {
        let records = vec![
            record("a", &[("typescript", "5")], &[]),
            record("b", &[], &[("typescript", "5")]),
        ];

        let indexes = aggregate(&records);
        assert_eq!(indexes.production.usage_count("typescript"), 1);
        assert_eq!(indexes.dev.usage_count("typescript"), 1);
        assert_eq!(indexes.duplicate_count(), 0);
        assert_eq!(indexes.unique_names().len(), 1);
        assert_eq!(indexes.total_entries(), 2);
    }

    #[test]
    fn test_permutation_keeps_classification() {
        let records = vec![
            record("a", &[("react", "18"), ("lodash", "4")], &[("jest", "29")]),
            record("b", &[("react", "17")], &[("jest", "28"), ("vite", "5")]),
            record("c", &[("lodash", "4"), ("axios", "1")], &[]),
        ];
        let mut reversed = records.clone();
        reversed.reverse();

        let forward = aggregate(&records);
        let backward = aggregate(&reversed);

        for kind in [DependencyKind::Production, DependencyKind::Dev] {
            let f: Vec<_> = forward.get(kind).duplicates().names().map(str::to_string).collect();
            let b: Vec<_> = backward.get(kind).duplicates().names().map(str::to_string).collect();
            assert_eq!(f, b);
        }

        // Only the usage order flips
        let f = forward.production.get("react").unwrap();
        let b = backward.production.get("react").unwrap();
        assert_eq!(f[0], b[1]);
        assert_eq!(f[1], b[0]);
    }

    #[test]
    fn test_invalid_manifest_does_not_change_totals() {
        let good = vec![
            parse_package_json(r#"{"dependencies": {"a": "1", "b": "2"}}"#, "x/package.json")
                .unwrap(),
        ];
        let with_bad: Vec<_> = [
            parse_package_json(r#"{"dependencies": {"a": "1", "b": "2"}}"#, "x/package.json").ok(),
            parse_package_json("{ broken", "y/package.json").ok(),
        ]
        .into_iter()
        .flatten()
        .collect();

        assert_eq!(aggregate(&good).total_entries(), aggregate(&with_bad).total_entries());
    }

    #[test]
    fn test_heavy_exact_match_counts_both_kinds() {
        let records = vec![
            record("a", &[("react", "18"), ("react-dom", "18")], &[("jest", "29")]),
            record("b", &[("React", "18")], &[("react", "18"), ("jest", "29")]),
        ];
        let matcher = HeavyMatcher::new(["react", "jest"], MatchMode::Exact);

        let heavy = aggregate(&records).heavy(&matcher);

        let summary: Vec<_> = heavy
            .iter()
            .map(|h| (h.name.as_str(), h.keyword.as_str(), h.count))
            .collect();
        assert_eq!(
            summary,
            vec![("jest", "jest", 2), ("react", "react", 2), ("React", "react", 1)]
        );
    }

    #[test]
    fn test_heavy_substring_match() {
        let records = vec![record("a", &[("react-dom", "18"), ("lodash", "4")], &[])];
        let matcher = HeavyMatcher::new(["react"], MatchMode::Substring);

        let heavy = aggregate(&records).heavy(&matcher);
        assert_eq!(heavy.len(), 1);
        assert_eq!(heavy[0].name, "react-dom");
        assert_eq!(heavy[0].count, 1);
    }

    #[test]
    fn test_common_dependencies_intersection() {
        let records = vec![
            record("a", &[("react", "18"), ("zod", "3")], &[("typescript", "5")]),
            record("b", &[("react", "18")], &[("typescript", "5"), ("zod", "3")]),
            record("c", &[("react", "18"), ("typescript", "5")], &[]),
        ];

        let common = common_dependencies(&records);
        assert_eq!(
            common.into_iter().collect::<Vec<_>>(),
            vec!["react".to_string(), "typescript".to_string()]
        );
        assert!(common_dependencies(&records[..1]).is_empty());
    }

    #[test]
    fn test_root_candidates_threshold() {
        let records = vec![
            record("a", &[("react", "18"), ("zod", "3")], &[]),
            record("b", &[("react", "18"), ("zod", "3")], &[]),
            record("c", &[("react", "18")], &[]),
            record("d", &[("react", "18")], &[]),
            record("e", &[], &[]),
            record("f", &[], &[]),
        ];

        let index = aggregate(&records).production;
        // 6 manifests -> threshold 3
        assert_eq!(index.root_candidates(records.len()), vec!["react".to_string()]);
        // 2 manifests -> threshold 1, but single use never counts
        assert_eq!(
            index.root_candidates(2),
            vec!["react".to_string(), "zod".to_string()]
        );
    }
}
