use std::collections::BTreeMap;

use super::model::ProductionRecord;

/// Summary metrics over a (filtered) record collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statistics {
    pub total: usize,
    /// Mean of `max_production`; 0 for an empty collection.
    pub avg_max: f64,
    /// Record with the largest `max_production` (first one on ties).
    pub global_max: Option<ProductionRecord>,
    /// Product code → largest `max_production` seen for it. Left empty
    /// while a machine filter is active.
    pub max_by_product: BTreeMap<String, f64>,
}

impl Statistics {
    /// Whether `record` holds the maximum of its product code.
    pub fn is_product_best(&self, record: &ProductionRecord) -> bool {
        self.max_by_product
            .get(&record.product_code)
            .is_some_and(|max| *max == record.max_production)
    }
}

/// Compute [`Statistics`] in a single pass over `records`.
pub fn statistics<'a, I>(records: I, machine_filter_active: bool) -> Statistics
where
    I: IntoIterator<Item = &'a ProductionRecord>,
{
    let mut total = 0usize;
    let mut sum = 0.0;
    let mut global_max: Option<&ProductionRecord> = None;
    let mut max_by_product: BTreeMap<String, f64> = BTreeMap::new();

    for record in records {
        total += 1;
        sum += record.max_production;

        // Strict `>` keeps the first occurrence on ties.
        if global_max.map_or(true, |best| record.max_production > best.max_production) {
            global_max = Some(record);
        }

        if !machine_filter_active {
            max_by_product
                .entry(record.product_code.clone())
                .and_modify(|max| *max = max.max(record.max_production))
                .or_insert(record.max_production);
        }
    }

    Statistics {
        total,
        avg_max: if total > 0 { sum / total as f64 } else { 0.0 },
        global_max: global_max.cloned(),
        max_by_product,
    }
}
