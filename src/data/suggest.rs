use std::collections::HashSet;

use super::filter::contains_ci;
use super::model::ProductionRecord;

/// Maximum number of autocomplete entries.
pub const SUGGESTION_LIMIT: usize = 5;

/// Distinct descriptions containing `partial` (case-insensitive), in
/// first-occurrence order. Empty input yields nothing.
pub fn suggest(records: &[ProductionRecord], partial: &str) -> Vec<String> {
    if partial.is_empty() {
        return Vec::new();
    }
    let mut seen = HashSet::new();
    records
        .iter()
        .map(|r| r.description.as_str())
        .filter(|d| !d.is_empty() && contains_ci(d, partial))
        .filter(|d| seen.insert(*d))
        .take(SUGGESTION_LIMIT)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;

    fn records(descriptions: &[&str]) -> Vec<ProductionRecord> {
        descriptions
            .iter()
            .enumerate()
            .map(|(id, d)| ProductionRecord {
                id,
                year: CellValue::Null,
                month: 0,
                group: String::new(),
                product_code: String::new(),
                description: d.to_string(),
                machine: CellValue::Null,
                max_production: 0.0,
                min_production: 0.0,
                avg_production: 0.0,
            })
            .collect()
    }

    #[test]
    fn empty_partial_gives_no_suggestions() {
        assert!(suggest(&records(&["Tampa"]), "").is_empty());
    }

    #[test]
    fn distinct_in_first_occurrence_order() {
        let data = records(&["Tampa Azul", "Balde", "tampa verde", "Tampa Azul", ""]);
        assert_eq!(suggest(&data, "TAMPA"), vec!["Tampa Azul", "tampa verde"]);
    }

    #[test]
    fn capped_at_limit() {
        let data = records(&["a1", "a2", "a3", "a1", "a4", "a5", "a6", "a7"]);
        let out = suggest(&data, "a");
        assert_eq!(out.len(), SUGGESTION_LIMIT);
        assert_eq!(out, vec!["a1", "a2", "a3", "a4", "a5"]);
    }
}
