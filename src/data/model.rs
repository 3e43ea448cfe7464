use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

use super::facets::Facets;

// ---------------------------------------------------------------------------
// CellValue – a single decoded spreadsheet cell
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value as produced by the workbook decoder.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// ISO-8601 date / duration text kept as-is.
    Date(String),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) | CellValue::Date(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{}", canonical_number(*v)),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => Ok(()),
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::String(s) | CellValue::Date(s) => serializer.serialize_str(s),
            CellValue::Integer(i) => serializer.serialize_i64(*i),
            CellValue::Float(v) => serializer.serialize_f64(*v),
            CellValue::Bool(b) => serializer.serialize_bool(*b),
            CellValue::Null => serializer.serialize_none(),
        }
    }
}

impl CellValue {
    /// `Null` or a string holding only whitespace.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::String(s) | CellValue::Date(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Interpret the value as a finite number, if it looks like one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Integer(i) => Some(*i as f64),
            CellValue::Float(v) if v.is_finite() => Some(*v),
            CellValue::String(s) => parse_number(s),
            _ => None,
        }
    }

    /// Canonical comparison key: numbers (and numeric text) lose any
    /// representation detail, so `2024`, `2024.0` and `"2024"` share a key.
    pub fn canonical(&self) -> String {
        match self {
            CellValue::Integer(i) => i.to_string(),
            CellValue::Float(v) => canonical_number(*v),
            CellValue::String(s) => canonical_text(s),
            CellValue::Date(s) => s.trim().to_string(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Null => String::new(),
        }
    }
}

/// Render a number without a trailing `.0` when it is integral.
pub fn canonical_number(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

/// Canonical form of free text: trimmed, and normalised like a number when
/// it parses as one.
pub fn canonical_text(s: &str) -> String {
    match parse_number(s) {
        Some(v) => canonical_number(v),
        None => s.trim().to_string(),
    }
}

/// Permissive numeric parse. Accepts surrounding whitespace and a single
/// decimal comma (`"1234,5"`); rejects non-finite results.
pub fn parse_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    let parsed = trimmed.parse::<f64>().ok().or_else(|| {
        if trimmed.matches(',').count() == 1 && !trimmed.contains('.') {
            trimmed.replace(',', ".").parse::<f64>().ok()
        } else {
            None
        }
    });
    parsed.filter(|v| v.is_finite())
}

/// Ordering used for facet values: numeric-like values compare numerically
/// and sort before text; text compares lexicographically.
pub fn scalar_cmp(a: &CellValue, b: &CellValue) -> Ordering {
    match (a.as_number(), b.as_number()) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.to_string().cmp(&b.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Raw rows and normalized records
// ---------------------------------------------------------------------------

/// One decoded sheet row: column header → cell. Empty cells are absent.
pub type RawRow = BTreeMap<String, CellValue>;

/// One normalized production record.
///
/// Serialized field names follow the source spreadsheet headers so an
/// exported view can be loaded again.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductionRecord {
    #[serde(skip_serializing)]
    pub id: usize,
    #[serde(rename = "Ano")]
    pub year: CellValue,
    #[serde(rename = "Meses")]
    pub month: u32,
    #[serde(rename = "Grupo")]
    pub group: String,
    #[serde(rename = "Produto")]
    pub product_code: String,
    #[serde(rename = "Descricao")]
    pub description: String,
    #[serde(rename = "PRENSA")]
    pub machine: CellValue,
    #[serde(rename = "Produção Máxima")]
    pub max_production: f64,
    #[serde(rename = "Produção Mínima")]
    pub min_production: f64,
    #[serde(rename = "Produção Média")]
    pub avg_production: f64,
}

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Fev", "Mar", "Abr", "Mai", "Jun", "Jul", "Ago", "Set", "Out", "Nov", "Dez",
];

/// Short Portuguese month label, or the bare number outside 1–12.
pub fn month_label(month: u32) -> String {
    month
        .checked_sub(1)
        .and_then(|i| MONTH_NAMES.get(i as usize))
        .map(|name| name.to_string())
        .unwrap_or_else(|| month.to_string())
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded spreadsheet
// ---------------------------------------------------------------------------

/// The normalized records of one ingested file plus their facets.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// File name the records came from (for the toolbar).
    pub source_name: String,
    pub records: Vec<ProductionRecord>,
    pub facets: Facets,
}

impl Dataset {
    /// Build facet sets from the normalized records.
    pub fn from_records(source_name: impl Into<String>, records: Vec<ProductionRecord>) -> Self {
        let facets = Facets::from_records(&records);
        Dataset {
            source_name: source_name.into(),
            records,
            facets,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
