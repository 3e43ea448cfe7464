use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use super::model::ProductionRecord;

/// Write records as CSV with the source spreadsheet headers.
pub fn write_csv<'a, W, I>(writer: W, records: I) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a ProductionRecord>,
{
    let mut csv_writer = csv::Writer::from_writer(writer);
    let mut written = 0;
    for record in records {
        csv_writer
            .serialize(record)
            .with_context(|| format!("writing record {}", record.id))?;
        written += 1;
    }
    csv_writer.flush().context("flushing CSV output")?;
    Ok(written)
}

/// Export records to a CSV file, returning how many rows were written.
pub fn export_csv<'a, I>(path: &Path, records: I) -> Result<usize>
where
    I: IntoIterator<Item = &'a ProductionRecord>,
{
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_csv(file, records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;

    fn record(id: usize, desc: &str, max: f64) -> ProductionRecord {
        ProductionRecord {
            id,
            year: CellValue::Integer(2024),
            month: 3,
            group: "Tampas".to_string(),
            product_code: "P1".to_string(),
            description: desc.to_string(),
            machine: CellValue::Null,
            max_production: max,
            min_production: 0.0,
            avg_production: 12.5,
        }
    }

    #[test]
    fn writes_source_headers_and_rows() {
        let records = vec![record(0, "Tampa, azul", 500.0), record(1, "Tampa", 700.0)];
        let mut out = Vec::new();
        let written = write_csv(&mut out, &records).unwrap();
        assert_eq!(written, 2);

        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("Ano,Meses,Grupo,Produto,Descricao,PRENSA,Produção Máxima,Produção Mínima,Produção Média")
        );
        assert_eq!(lines.next(), Some("2024,3,Tampas,P1,\"Tampa, azul\",,500.0,0.0,12.5"));
        assert_eq!(lines.next(), Some("2024,3,Tampas,P1,Tampa,,700.0,0.0,12.5"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn export_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("filtrado.csv");
        let records = vec![record(0, "Balde", 1.0)];
        assert_eq!(export_csv(&path, &records).unwrap(), 1);
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("Ano,Meses"));
        assert!(text.contains("Balde"));
    }
}
