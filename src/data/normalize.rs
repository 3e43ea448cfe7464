use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::model::{CellValue, ProductionRecord, RawRow};

// ---------------------------------------------------------------------------
// Column aliases
// ---------------------------------------------------------------------------

/// Candidate header names per canonical field, in priority order.
pub mod aliases {
    pub const YEAR: &[&str] = &["Ano", "ano", "ANO"];
    pub const MONTH: &[&str] = &["Meses", "meses", "MESES", "Mês", "Mes", "mes"];
    pub const GROUP: &[&str] = &["Grupo", "grupo", "GRUPO"];
    pub const PRODUCT: &[&str] = &["Produto", "produto", "PRODUTO"];
    pub const DESCRIPTION: &[&str] = &[
        "Descricao",
        "descricao",
        "Descrição",
        "descrição",
        "DESCRICAO",
        "DESCRIÇÃO",
    ];
    pub const MACHINE: &[&str] = &["PRENSA", "prensa", "Prensa"];
    pub const MAX_PRODUCTION: &[&str] = &[
        "Produção Máxima",
        "Producao Maxima",
        "produção máxima",
        "producao maxima",
    ];
    pub const MIN_PRODUCTION: &[&str] = &[
        "Produção Mínima",
        "Producao Minima",
        "produção mínima",
        "producao minima",
    ];
    pub const AVG_PRODUCTION: &[&str] = &[
        "Produção Média",
        "Producao Media",
        "produção média",
        "producao media",
    ];
}

/// Lowercase, strip accents and collapse inner whitespace.
pub fn fold_header(name: &str) -> String {
    let stripped: String = name
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Resolve a field from the first candidate that holds a non-blank value.
///
/// Exact header names are tried first; only when none matches are the
/// row's headers compared in folded form.
fn resolve<'a>(row: &'a RawRow, candidates: &[&str]) -> Option<&'a CellValue> {
    let exact = candidates
        .iter()
        .filter_map(|name| row.get(*name))
        .find(|value| !value.is_blank());
    if exact.is_some() {
        return exact;
    }

    let folded: Vec<String> = candidates.iter().map(|c| fold_header(c)).collect();
    row.iter()
        .filter(|(key, value)| !value.is_blank() && folded.contains(&fold_header(key)))
        .min_by_key(|(key, _)| {
            let key = fold_header(key);
            folded.iter().position(|f| *f == key).unwrap_or(usize::MAX)
        })
        .map(|(_, value)| value)
}

// ---------------------------------------------------------------------------
// Coercion
// ---------------------------------------------------------------------------

/// Coerce to a finite, non-negative number; anything else becomes 0.
fn coerce_amount(value: Option<&CellValue>, field: &str, id: usize) -> f64 {
    let Some(value) = value else {
        return 0.0;
    };
    let number = match value {
        CellValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        other => other.as_number(),
    };
    match number {
        Some(v) if v >= 0.0 => v,
        _ => {
            log::debug!("record {id}: '{field}' value {value:?} coerced to 0");
            0.0
        }
    }
}

fn coerce_month(value: Option<&CellValue>, id: usize) -> u32 {
    let Some(value) = value else {
        return 0;
    };
    match value.as_number() {
        Some(v) if v >= 0.0 && v <= u32::MAX as f64 => v.trunc() as u32,
        _ => {
            log::debug!("record {id}: month value {value:?} coerced to 0");
            0
        }
    }
}

fn coerce_text(value: Option<&CellValue>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn coerce_scalar(value: Option<&CellValue>) -> CellValue {
    value.cloned().unwrap_or(CellValue::Null)
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Normalize decoded rows into production records.
///
/// Ids are `id_offset + index`, so they follow input order. Never fails:
/// unresolvable cells fall back to `""`, `Null` or `0`.
pub fn normalize(rows: &[RawRow], id_offset: usize) -> Vec<ProductionRecord> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| normalize_row(row, id_offset + i))
        .collect()
}

fn normalize_row(row: &RawRow, id: usize) -> ProductionRecord {
    ProductionRecord {
        id,
        year: coerce_scalar(resolve(row, aliases::YEAR)),
        month: coerce_month(resolve(row, aliases::MONTH), id),
        group: coerce_text(resolve(row, aliases::GROUP)),
        product_code: coerce_text(resolve(row, aliases::PRODUCT)),
        description: coerce_text(resolve(row, aliases::DESCRIPTION)),
        machine: coerce_scalar(resolve(row, aliases::MACHINE)),
        max_production: coerce_amount(resolve(row, aliases::MAX_PRODUCTION), "max", id),
        min_production: coerce_amount(resolve(row, aliases::MIN_PRODUCTION), "min", id),
        avg_production: coerce_amount(resolve(row, aliases::AVG_PRODUCTION), "avg", id),
    }
}
