use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::model::{CellValue, Dataset, RawRow};
use super::normalize::normalize;

/// Headers the first row must carry under [`ValidationMode::Strict`].
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "Ano",
    "Meses",
    "Grupo",
    "Produto",
    "Descricao",
    "PRENSA",
    "Produção Máxima",
];

/// Extensions accepted by the file picker and by [`check_extension`].
pub const SUPPORTED_EXTENSIONS: [&str; 2] = ["xls", "xlsx"];

/// Required-column policy applied after decoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Reject files whose first row lacks a required column.
    #[default]
    Strict,
    /// Accept anything; missing fields normalize to defaults.
    Lenient,
}

/// Why an ingestion attempt was aborted. No state is changed on any of these.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("unsupported file '{0}': select an Excel file (.xls or .xlsx)")]
    UnsupportedFileType(String),
    #[error("could not read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not decode the spreadsheet: {0}")]
    Decode(#[from] calamine::Error),
    #[error("the workbook has no worksheet")]
    NoWorksheet,
    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Read, decode, validate and normalize a spreadsheet from disk.
pub fn load_file(path: &Path, mode: ValidationMode) -> Result<Dataset, IngestError> {
    check_extension(path)?;
    let bytes = std::fs::read(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    load_bytes(&name, bytes, mode)
}

/// Same as [`load_file`] for content already in memory.
pub fn load_bytes(name: &str, bytes: Vec<u8>, mode: ValidationMode) -> Result<Dataset, IngestError> {
    check_extension(Path::new(name))?;
    let rows = decode_workbook(bytes)?;
    validate_columns(&rows, mode)?;
    let records = normalize(&rows, 0);
    Ok(Dataset::from_records(name, records))
}

/// Reject anything that is not `.xls` / `.xlsx` (case-insensitive).
pub fn check_extension(path: &Path) -> Result<(), IngestError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    if SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
        Ok(())
    } else {
        Err(IngestError::UnsupportedFileType(
            path.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
        ))
    }
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Decode the first worksheet into rows keyed by the header row.
///
/// calamine detects legacy BIFF vs. zip-based workbooks from the content.
pub fn decode_workbook(bytes: Vec<u8>) -> Result<Vec<RawRow>, IngestError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(IngestError::NoWorksheet)??;
    Ok(range_to_rows(&range))
}

/// Convert a sheet range into header-keyed rows.
///
/// The first row holds the headers; blank headers and repeated headers
/// (after the first) are dropped. Fully empty rows are skipped and empty
/// cells are left out of each row.
pub fn range_to_rows(range: &Range<Data>) -> Vec<RawRow> {
    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Vec::new();
    };

    let mut headers: Vec<Option<String>> = Vec::with_capacity(header_row.len());
    for cell in header_row {
        let name = convert_cell(cell)
            .map(|v| v.to_string().trim().to_string())
            .filter(|n| !n.is_empty());
        let name = name.filter(|n| !headers.iter().flatten().any(|h| h == n));
        headers.push(name);
    }

    rows.filter_map(|cells| {
        let row: RawRow = cells
            .iter()
            .zip(&headers)
            .filter_map(|(cell, header)| {
                let header = header.as_ref()?;
                convert_cell(cell).map(|v| (header.clone(), v))
            })
            .collect();
        (!row.is_empty()).then_some(row)
    })
    .collect()
}

fn convert_cell(value: &Data) -> Option<CellValue> {
    match value {
        Data::Empty => None,
        Data::String(s) if s.trim().is_empty() => None,
        Data::String(s) => Some(CellValue::String(s.clone())),
        Data::Int(v) => Some(CellValue::Integer(*v)),
        Data::Float(v) => Some(CellValue::Float(*v)),
        Data::Bool(v) => Some(CellValue::Bool(*v)),
        // Serial date number, as spreadsheet-to-row converters report it.
        Data::DateTime(v) => Some(CellValue::Float(v.as_f64())),
        Data::DateTimeIso(v) | Data::DurationIso(v) => Some(CellValue::Date(v.clone())),
        Data::Error(e) => {
            log::debug!("cell error {e:?} treated as empty value");
            Some(CellValue::Null)
        }
    }
}

// ---------------------------------------------------------------------------
// Schema validation
// ---------------------------------------------------------------------------

/// Check the first decoded row for the exact required headers.
///
/// Missing names are reported in [`REQUIRED_COLUMNS`] order. An empty
/// sheet lacks all of them.
pub fn validate_columns(rows: &[RawRow], mode: ValidationMode) -> Result<(), IngestError> {
    let first = rows.first();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| first.map_or(true, |row| !row.contains_key(**col)))
        .map(|col| col.to_string())
        .collect();
    if missing.is_empty() {
        return Ok(());
    }
    match mode {
        ValidationMode::Strict => Err(IngestError::MissingColumns(missing)),
        ValidationMode::Lenient => {
            log::warn!("Loading without required columns: {}", missing.join(", "));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;

    const HEADERS: [&str; 8] = [
        "Ano",
        "Meses",
        "Grupo",
        "Produto",
        "Descricao",
        "PRENSA",
        "Produção Máxima",
        "Produção Mínima",
    ];

    fn workbook_bytes(headers: &[&str], rows: &[(f64, f64, &str, &str, &str, f64, f64)]) -> Vec<u8> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (col, name) in headers.iter().enumerate() {
            sheet.write_string(0, col as u16, *name).unwrap();
        }
        for (i, (year, month, group, product, desc, machine, max)) in rows.iter().enumerate() {
            let r = i as u32 + 1;
            sheet.write_number(r, 0, *year).unwrap();
            sheet.write_number(r, 1, *month).unwrap();
            sheet.write_string(r, 2, *group).unwrap();
            sheet.write_string(r, 3, *product).unwrap();
            sheet.write_string(r, 4, *desc).unwrap();
            sheet.write_number(r, 5, *machine).unwrap();
            sheet.write_number(r, 6, *max).unwrap();
        }
        workbook.save_to_buffer().unwrap()
    }

    fn full_row() -> RawRow {
        REQUIRED_COLUMNS
            .iter()
            .map(|c| (c.to_string(), CellValue::String("x".into())))
            .collect()
    }

    #[test]
    fn extension_check() {
        assert!(check_extension(Path::new("dados.xlsx")).is_ok());
        assert!(check_extension(Path::new("DADOS.XLS")).is_ok());
        assert!(matches!(
            check_extension(Path::new("dados.csv")),
            Err(IngestError::UnsupportedFileType(name)) if name == "dados.csv"
        ));
        assert!(check_extension(Path::new("sem_extensao")).is_err());
    }

    #[test]
    fn strict_validation_lists_missing_columns_in_order() {
        let mut row = full_row();
        row.remove("Grupo");
        row.remove("Produção Máxima");
        match validate_columns(&[row], ValidationMode::Strict) {
            Err(IngestError::MissingColumns(missing)) => {
                assert_eq!(missing, vec!["Grupo", "Produção Máxima"]);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn strict_validation_rejects_empty_sheet() {
        match validate_columns(&[], ValidationMode::Strict) {
            Err(IngestError::MissingColumns(missing)) => assert_eq!(missing.len(), 7),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn strict_validation_accepts_complete_row_and_lenient_accepts_anything() {
        assert!(validate_columns(&[full_row()], ValidationMode::Strict).is_ok());
        assert!(validate_columns(&[RawRow::new()], ValidationMode::Lenient).is_ok());
        assert!(validate_columns(&[], ValidationMode::Lenient).is_ok());
    }

    #[test]
    fn missing_columns_message_names_them() {
        let err = IngestError::MissingColumns(vec!["Ano".into(), "PRENSA".into()]);
        assert_eq!(err.to_string(), "missing required columns: Ano, PRENSA");
    }

    #[test]
    fn range_rows_skip_blank_cells_rows_and_headers() {
        let mut range: Range<Data> = Range::new((0, 0), (3, 2));
        range.set_value((0, 0), Data::String("Ano".into()));
        range.set_value((0, 1), Data::String("  ".into()));
        range.set_value((0, 2), Data::String("Ano".into()));
        range.set_value((1, 0), Data::Float(2024.0));
        range.set_value((1, 1), Data::String("ignored".into()));
        range.set_value((3, 0), Data::Int(2023));

        let rows = range_to_rows(&range);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 1);
        assert_eq!(rows[0]["Ano"], CellValue::Float(2024.0));
        assert_eq!(rows[1]["Ano"], CellValue::Integer(2023));
    }

    #[test]
    fn garbage_bytes_are_a_decode_error() {
        let result = load_bytes("dados.xlsx", b"not a workbook".to_vec(), ValidationMode::Lenient);
        assert!(matches!(result, Err(IngestError::Decode(_))));
    }

    #[test]
    fn wrong_extension_is_rejected_before_decoding() {
        let result = load_bytes("dados.txt", Vec::new(), ValidationMode::Lenient);
        assert!(matches!(result, Err(IngestError::UnsupportedFileType(_))));
    }

    #[test]
    fn loads_xlsx_end_to_end() {
        let bytes = workbook_bytes(
            &HEADERS,
            &[
                (2024.0, 1.0, "A", "P1", "Widget", 1.0, 500.0),
                (2024.0, 2.0, "A", "P1", "Widget", 2.0, 700.0),
                (2023.0, 1.0, "B", "P2", "Gadget", 1.0, 300.0),
            ],
        );
        let dataset = load_bytes("producao.xlsx", bytes, ValidationMode::Strict).unwrap();
        assert_eq!(dataset.source_name, "producao.xlsx");
        assert_eq!(dataset.len(), 3);

        let r = &dataset.records[1];
        assert_eq!(r.id, 1);
        assert_eq!(r.year.canonical(), "2024");
        assert_eq!(r.month, 2);
        assert_eq!(r.product_code, "P1");
        assert_eq!(r.machine.canonical(), "2");
        assert_eq!(r.max_production, 700.0);
        assert_eq!(r.min_production, 0.0);

        assert_eq!(dataset.facets.months, vec![1, 2]);
        assert_eq!(dataset.facets.groups, vec!["A", "B"]);
    }

    #[test]
    fn strict_load_reports_missing_headers() {
        let bytes = workbook_bytes(&["Ano", "Meses"], &[]);
        match load_bytes("producao.xlsx", bytes, ValidationMode::Strict) {
            Err(IngestError::MissingColumns(missing)) => {
                assert_eq!(missing.len(), 7);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_file(&dir.path().join("nada.xlsx"), ValidationMode::Strict);
        assert!(matches!(result, Err(IngestError::Io(_))));
    }
}
