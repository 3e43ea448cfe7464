use std::collections::{BTreeMap, BTreeSet, HashSet};

use super::model::{scalar_cmp, CellValue, ProductionRecord};

/// Distinct values offered by the dropdown filters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Facets {
    /// Ascending (numeric when numeric-like).
    pub years: Vec<CellValue>,
    /// Ascending.
    pub months: Vec<u32>,
    /// Ascending lexicographic.
    pub groups: Vec<String>,
    /// Ascending (numeric when numeric-like).
    pub machines: Vec<CellValue>,
}

impl Facets {
    /// Collect the distinct non-empty values of each filterable field.
    pub fn from_records(records: &[ProductionRecord]) -> Self {
        let months: BTreeSet<u32> = records
            .iter()
            .map(|r| r.month)
            .filter(|m| *m != 0)
            .collect();
        let groups: BTreeSet<String> = records
            .iter()
            .filter(|r| !r.group.trim().is_empty())
            .map(|r| r.group.clone())
            .collect();

        Facets {
            years: distinct_scalars(records.iter().map(|r| &r.year)),
            months: months.into_iter().collect(),
            groups: groups.into_iter().collect(),
            machines: distinct_scalars(records.iter().map(|r| &r.machine)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
            && self.months.is_empty()
            && self.groups.is_empty()
            && self.machines.is_empty()
    }
}

/// First occurrence per canonical key, sorted with [`scalar_cmp`].
fn distinct_scalars<'a>(values: impl Iterator<Item = &'a CellValue>) -> Vec<CellValue> {
    let mut seen = HashSet::new();
    let mut distinct: Vec<CellValue> = values
        .filter(|v| !v.is_blank())
        .filter(|v| seen.insert(v.canonical()))
        .cloned()
        .collect();
    distinct.sort_by(scalar_cmp);
    distinct
}

/// Number of records per group, for the side panel legend.
pub fn group_counts(records: &[ProductionRecord]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for r in records.iter().filter(|r| !r.group.is_empty()) {
        *counts.entry(r.group.clone()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(year: CellValue, month: u32, group: &str, machine: CellValue) -> ProductionRecord {
        ProductionRecord {
            id: 0,
            year,
            month,
            group: group.to_string(),
            product_code: String::new(),
            description: String::new(),
            machine,
            max_production: 0.0,
            min_production: 0.0,
            avg_production: 0.0,
        }
    }

    #[test]
    fn empty_collection_has_empty_facets() {
        let facets = Facets::from_records(&[]);
        assert!(facets.is_empty());
        assert_eq!(facets, Facets::default());
    }

    #[test]
    fn duplicates_appear_once_and_sorted() {
        let records = vec![
            record(CellValue::Integer(2024), 3, "B", CellValue::Integer(10)),
            record(CellValue::String("2023".into()), 1, "A", CellValue::Integer(2)),
            record(CellValue::Float(2024.0), 3, "B", CellValue::String("10".into())),
            record(CellValue::Integer(2023), 12, "A", CellValue::String("X1".into())),
        ];
        let facets = Facets::from_records(&records);

        assert_eq!(
            facets.years,
            vec![CellValue::String("2023".into()), CellValue::Integer(2024)]
        );
        assert_eq!(facets.months, vec![1, 3, 12]);
        assert_eq!(facets.groups, vec!["A".to_string(), "B".to_string()]);
        assert_eq!(
            facets.machines,
            vec![
                CellValue::Integer(2),
                CellValue::Integer(10),
                CellValue::String("X1".into()),
            ]
        );
    }

    #[test]
    fn blank_values_are_not_facets() {
        let records = vec![record(CellValue::Null, 0, "", CellValue::String(" ".into()))];
        assert!(Facets::from_records(&records).is_empty());
    }

    #[test]
    fn group_counts_skip_empty_groups() {
        let records = vec![
            record(CellValue::Null, 1, "A", CellValue::Null),
            record(CellValue::Null, 1, "A", CellValue::Null),
            record(CellValue::Null, 1, "", CellValue::Null),
        ];
        let counts = group_counts(&records);
        assert_eq!(counts.len(), 1);
        assert_eq!(counts["A"], 2);
    }
}
