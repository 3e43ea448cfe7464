use serde::{Deserialize, Serialize};

use super::model::{canonical_text, ProductionRecord};

// ---------------------------------------------------------------------------
// Filter criteria
// ---------------------------------------------------------------------------

/// How a text criterion is compared against a record field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Whole-value equality (dropdown selection).
    #[default]
    Exact,
    /// Case-insensitive substring (typed text).
    Contains,
}

/// The active filter constraints. An empty string means "no constraint".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub year: String,
    pub month: String,
    pub group: String,
    /// Matched against description or product code.
    pub product_search: String,
    pub machine: String,
    pub group_mode: MatchMode,
    pub machine_mode: MatchMode,
}

impl FilterCriteria {
    /// All-unset criteria keeping the given match modes.
    pub fn cleared(group_mode: MatchMode, machine_mode: MatchMode) -> Self {
        FilterCriteria {
            group_mode,
            machine_mode,
            ..Default::default()
        }
    }

    /// Reset every constraint, keeping the match modes.
    pub fn clear(&mut self) {
        *self = Self::cleared(self.group_mode, self.machine_mode);
    }

    pub fn is_unset(&self) -> bool {
        self.year.is_empty()
            && self.month.is_empty()
            && self.group.is_empty()
            && self.product_search.is_empty()
            && self.machine.is_empty()
    }

    pub fn machine_filter_active(&self) -> bool {
        !self.machine.is_empty()
    }

    /// Whether a single record satisfies every set constraint.
    pub fn matches(&self, record: &ProductionRecord) -> bool {
        if !self.year.is_empty() && record.year.canonical() != canonical_text(&self.year) {
            return false;
        }
        if !self.month.is_empty() && record.month.to_string() != canonical_text(&self.month) {
            return false;
        }
        if !self.group.is_empty() && !text_matches(&record.group, &self.group, self.group_mode) {
            return false;
        }
        if !self.machine.is_empty() {
            let ok = match self.machine_mode {
                MatchMode::Exact => record.machine.canonical() == canonical_text(&self.machine),
                MatchMode::Contains => contains_ci(&record.machine.to_string(), &self.machine),
            };
            if !ok {
                return false;
            }
        }
        if !self.product_search.is_empty()
            && !contains_ci(&record.description, &self.product_search)
            && !contains_ci(&record.product_code, &self.product_search)
        {
            return false;
        }
        true
    }
}

fn text_matches(value: &str, wanted: &str, mode: MatchMode) -> bool {
    match mode {
        MatchMode::Exact => value == wanted,
        MatchMode::Contains => contains_ci(value, wanted),
    }
}

/// Case-insensitive substring test. An empty haystack never matches a
/// non-empty needle.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

// ---------------------------------------------------------------------------
// Applying the criteria
// ---------------------------------------------------------------------------

/// Return indices of records that pass all active criteria, in input order.
pub fn filtered_indices(records: &[ProductionRecord], criteria: &FilterCriteria) -> Vec<usize> {
    if criteria.is_unset() {
        return (0..records.len()).collect();
    }
    records
        .iter()
        .enumerate()
        .filter(|(_, r)| criteria.matches(r))
        .map(|(i, _)| i)
        .collect()
}

/// Borrowing variant of [`filtered_indices`].
pub fn apply_filters<'a>(
    records: &'a [ProductionRecord],
    criteria: &FilterCriteria,
) -> Vec<&'a ProductionRecord> {
    records.iter().filter(|r| criteria.matches(r)).collect()
}
